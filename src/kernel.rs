//! The curve-kernel capability trait, and a concrete kernel for cubics.

use std::cmp::Ordering;

use crate::curve::{compare_off_to_the_right, solve_t_for_x};
use crate::geom::{Point, Segment};
use crate::num::CheapOrderedFloat;

/// The geometric operations the status line needs from a curve
/// representation.
///
/// Everything in this crate is generic over a kernel, so the status-line
/// bookkeeping can be reused with exact arithmetic, with different curve
/// families, and so on. The kernel is held by reference and never mutated.
///
/// Kernel calls are assumed to be the expensive part of the sweep (they may
/// involve root-finding or exact arithmetic), which is why
/// [`Subcurve`](crate::Subcurve) caches their results so aggressively.
pub trait CurveKernel {
    /// The kernel's point type.
    type Point: Clone + std::fmt::Debug;
    /// The kernel's x-monotone curve type.
    type Curve: Clone + std::fmt::Debug;

    /// Total order over points, consistent with the sweep direction:
    /// `x` primary, `y` secondary.
    fn compare_points(&self, p: &Self::Point, q: &Self::Point) -> Ordering;

    /// Are these the same point?
    fn points_equal(&self, p: &Self::Point, q: &Self::Point) -> bool {
        self.compare_points(p, q) == Ordering::Equal
    }

    /// The start of the curve's parameterization.
    fn source(&self, c: &Self::Curve) -> Self::Point;

    /// The end of the curve's parameterization.
    fn target(&self, c: &Self::Curve) -> Self::Point;

    /// Vertical order of two curves at the `x` coordinate of `at`.
    ///
    /// Both curves must span that `x` coordinate. A result of `Equal` means
    /// the curves pass through the same point there; it says nothing about
    /// their order on either side of it.
    fn compare_y_at(&self, a: &Self::Curve, b: &Self::Curve, at: &Self::Point) -> Ordering;

    /// Vertical order of two curves immediately to the right of `p`, which
    /// lies on both of them.
    ///
    /// This is the tie-break for [`compare_y_at`](Self::compare_y_at)
    /// answering `Equal`: at a shared endpoint or crossing the y values are
    /// degenerate, and the order that matters is the one just past the
    /// point. `Equal` here means the curves are order-equivalent as far as
    /// the sweep can tell (e.g. a higher-order tangency the kernel doesn't
    /// resolve).
    fn compare_right_of(&self, a: &Self::Curve, b: &Self::Curve, p: &Self::Point) -> Ordering;
}

/// A kernel for x-monotone cubic Béziers over `f64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubicKernel;

impl CurveKernel for CubicKernel {
    type Point = Point;
    type Curve = Segment;

    fn compare_points(&self, p: &Point, q: &Point) -> Ordering {
        p.cmp(q)
    }

    fn source(&self, c: &Segment) -> Point {
        c.p0
    }

    fn target(&self, c: &Segment) -> Point {
        c.p3
    }

    fn compare_y_at(&self, a: &Segment, b: &Segment, at: &Point) -> Ordering {
        debug_assert!((a.left_x()..=a.right_x()).contains(&at.x));
        debug_assert!((b.left_x()..=b.right_x()).contains(&at.x));

        CheapOrderedFloat::from(a.at_x(at.x)).cmp(&CheapOrderedFloat::from(b.at_x(at.x)))
    }

    fn compare_right_of(&self, a: &Segment, b: &Segment, p: &Point) -> Ordering {
        let ca = a.to_kurbo();
        let cb = b.to_kurbo();
        let ta = solve_t_for_x(ca, p.x);
        let tb = solve_t_for_x(cb, p.x);
        compare_off_to_the_right(ca, cb, ta, tb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_order() {
        let k = CubicKernel;
        let p = Point::new(1.0, 5.0);
        let q = Point::new(2.0, 0.0);
        assert_eq!(k.compare_points(&p, &q), Ordering::Less);
        assert_eq!(k.compare_points(&q, &p), Ordering::Greater);
        assert!(k.points_equal(&p, &p.clone()));
        // Same x: y decides.
        assert_eq!(
            k.compare_points(&Point::new(1.0, 0.0), &Point::new(1.0, 5.0)),
            Ordering::Less
        );
    }

    #[test]
    fn y_order_at_reference() {
        let k = CubicKernel;
        let lo = Segment::straight(Point::new(0.0, 0.0), Point::new(10.0, 2.0));
        let hi = Segment::straight(Point::new(0.0, 5.0), Point::new(10.0, 7.0));
        let at = Point::new(4.0, 0.0);
        assert_eq!(k.compare_y_at(&lo, &hi, &at), Ordering::Less);
        assert_eq!(k.compare_y_at(&hi, &lo, &at), Ordering::Greater);
        assert_eq!(k.compare_y_at(&lo, &lo, &at), Ordering::Equal);
    }
}
