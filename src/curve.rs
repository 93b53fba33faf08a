//! Solving x-monotone cubics, and ordering them just past a common point.

use arrayvec::ArrayVec;
use kurbo::{common::solve_cubic, CubicBez, ParamCurve as _, ParamCurveDeriv as _};

/// Finds the parameter at which `c` passes through the given `x` coordinate.
///
/// `c` must be monotonic in `x` (in either direction), and `x` must lie
/// within its `x` range.
pub(crate) fn solve_t_for_x(c: CubicBez, x: f64) -> f64 {
    if x == c.p0.x {
        return 0.0;
    }
    if x == c.p3.x {
        return 1.0;
    }
    let c3 = c.p3.x - 3.0 * c.p2.x + 3.0 * c.p1.x - c.p0.x;
    let c2 = 3.0 * (c.p2.x - 2.0 * c.p1.x + c.p0.x);
    let c1 = 3.0 * (c.p1.x - c.p0.x);
    let c0 = c.p0.x - x;

    for t in solve_cubic_in_unit_interval(c0, c1, c2, c3) {
        if (0.0..=1.0).contains(&t) {
            return t;
        }
    }

    // The sharp cutoff at the endpoint can miss some legitimate internal
    // points. The 1e-4 threshold is a bit arbitrary, though.
    if (x - c.p3.x).abs() < 1e-4 {
        return 1.0;
    } else if (x - c.p0.x).abs() < 1e-4 {
        return 0.0;
    }
    panic!("no solution found for {c:?}, x = {x}");
}

/// The `y` coordinate of `c` at the given `x` coordinate.
pub(crate) fn solve_y_for_x(c: CubicBez, x: f64) -> f64 {
    c.eval(solve_t_for_x(c, x)).y
}

// Tries to solve a cubic, but only looks for accurate solutions in the interval [0.0, 1.0].
//
// This doesn't actually filter out solutions outside that interval, it only
// makes some tweaks for better numerical stability inside it.
fn solve_cubic_in_unit_interval(c0: f64, c1: f64, c2: f64, c3: f64) -> ArrayVec<f64, 3> {
    // Since we're only interested in small values of t, we can ignore c3 if it's
    // much smaller than the other coefficients.
    //
    // To explain where the 1e7 comes from, suppose we take a threshold of T.
    // By zeroing out c3, we're introducing error of order 1/T by modifying the
    // cubic. (For our applications, we care less about numerical stability of
    // the roots and more about the *value* at the roots being about zero.)
    // On the other hand, if c2 / c3 is of order T, when we use it to find roots
    // we'll have a relative error of about 1e-15, and so an absolute error of
    // about T * 1e-15 (because that's how accurate f64s are). Balancing out these
    // sources of error suggests we take T around 1e7.
    let mut new_c3 = c3;
    let mut new_c2 = c2;
    if c3.abs() < c2.abs().max(c1.abs()) / 1e7 {
        new_c3 = 0.0;
        if c2.abs() < c1.abs().max(c0.abs()) / 1e7 {
            new_c2 = 0.0;
        }
    }
    let mut roots = solve_cubic(c0, c1, new_c2, new_c3);

    // Do a few Newton steps to increase accuracy. Also, we do this with the
    // original parameters, which helps reduce the error that we may have
    // introduced.
    for t in &mut roots {
        let mut val = c3 * *t * *t * *t + c2 * *t * *t + c1 * *t + c0;
        let mut deriv = 3.0 * c3 * *t * *t + 2.0 * c2 * *t + c1;
        for _ in 0..3 {
            if val.abs() <= 1e-14 {
                break;
            }

            let step = val / deriv;
            // Truncate the step size, because of an annoying case. If the original
            // equation was (t - 1)^2 + eps * t^3, we'll perturb it and find that
            // perfect double-root at t = 1. But when we add back in eps * t^3, the
            // Newton step will be giant (independent of eps). We should restrict
            // it to more like sqrt(eps).
            let step = step.abs().min(val.abs().sqrt()).copysign(step);
            *t -= step;

            val = c3 * *t * *t * *t + c2 * *t * *t + c1 * *t + c0;
            deriv = 3.0 * c3 * *t * *t + 2.0 * c2 * *t + c1;
        }
    }
    roots
}

/// Vertical order of two curves immediately to the right of a point lying
/// on both of them.
///
/// `t0` and `t1` are the curves' parameters at that common point. Exactly at
/// the point the curves agree, so we compare dy/dx slopes; if the slopes tie
/// too (a tangential touch), we sample the midpoint of the shared remaining
/// `x` extent. Curves that still agree there are order-equivalent as far as
/// the status line is concerned.
pub(crate) fn compare_off_to_the_right(
    c0: CubicBez,
    c1: CubicBez,
    t0: f64,
    t1: f64,
) -> std::cmp::Ordering {
    let d0 = c0.deriv().eval(t0);
    let d1 = c1.deriv().eval(t1);

    // For an x-monotone curve the sign of dx depends only on the direction
    // of parameterization; flip so that both derivatives point rightwards.
    let (dx0, dy0) = if d0.x < 0.0 { (-d0.x, -d0.y) } else { (d0.x, d0.y) };
    let (dx1, dy1) = if d1.x < 0.0 { (-d1.x, -d1.y) } else { (d1.x, d1.y) };

    // slope0 - slope1 has the sign of dy0 * dx1 - dy1 * dx0, and this form
    // also gets vertical tangents (dx == 0) right without dividing.
    let cross = dy0 * dx1 - dy1 * dx0;
    if cross < 0.0 {
        return std::cmp::Ordering::Less;
    } else if cross > 0.0 {
        return std::cmp::Ordering::Greater;
    }

    // Tangential: sample halfway to the nearer right endpoint.
    let x = c0.eval(t0).x;
    let right = (c0.p0.x.max(c0.p3.x)).min(c1.p0.x.max(c1.p3.x));
    if right <= x {
        return std::cmp::Ordering::Equal;
    }
    let mid = 0.5 * (x + right);
    let y0 = solve_y_for_x(c0, mid);
    let y1 = solve_y_for_x(c1, mid);
    y0.partial_cmp(&y1).unwrap_or(std::cmp::Ordering::Equal)
}
