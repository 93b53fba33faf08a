//! Geometric primitives: points and x-monotone curve segments.

use kurbo::ParamCurve as _;

use crate::curve::{solve_t_for_x, solve_y_for_x};
use crate::num::CheapOrderedFloat;

/// A two-dimensional point.
///
/// Points are sorted by `x` and then by `y`, for the convenience of our
/// sweep-line algorithm (which moves in increasing `x`).
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate. The sweep moves towards larger values.
    pub x: f64,
    /// Vertical coordinate.
    ///
    /// Although it isn't important for functionality, the documentation and
    /// method naming assumes that larger values are up.
    pub y: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (
            CheapOrderedFloat::from(self.x),
            CheapOrderedFloat::from(self.y),
        )
            .cmp(&(
                CheapOrderedFloat::from(other.x),
                CheapOrderedFloat::from(other.y),
            ))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Point { x, y }
    }

    /// Compute an affine combination between `self` and `other`; that is,
    /// `(1 - t) * self + t * other`.
    pub fn affine(&self, other: &Self, t: f64) -> Self {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// Convert to a kurbo point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An x-monotone curve segment: a cubic Bézier whose `x` coordinate is
/// monotone along its parameterization.
///
/// The control points are stored as given, so `p0` may lie to the right of
/// `p3`: the segment remembers its original direction, and it's the
/// [`Subcurve`](crate::Subcurve) wrapper's job to know which end is the
/// left one.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// The start of the parameterization (the "source").
    pub p0: Point,
    /// First control point.
    pub p1: Point,
    /// Second control point.
    pub p2: Point,
    /// The end of the parameterization (the "target").
    pub p3: Point,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Segment { p0, p1, p2, p3 } = self;
        write!(f, "{p0:?} -- {p1:?} -- {p2:?} -- {p3:?}",)
    }
}

// Checks whether the quadratic with Bernstein control values q0, q1, q2
// stays non-negative on [0, 1].
//
// This is subject to some numerical error, and doesn't guarantee that the
// error is one-sided.
fn quadratic_non_negative(q0: f64, q1: f64, q2: f64) -> bool {
    // If q0 or q2 is negative, the quadratic is negative at an endpoint.
    if q0 < 0.0 || q2 < 0.0 {
        return false;
    }

    // The extremum is at t = (q0 - q1) / (q0 - q1 + q2 - q1), so consider
    // the signs of q0 - q1 and q2 - q1. If both are non-positive there's no
    // interior minimum; if exactly one is, the extremum lies outside [0, 1].
    if q0 <= q1 || q2 <= q1 {
        return true;
    }

    // There's a minimum between 0 and 1, and its value turns out to be
    // (q2 q0 - q1^2) / (q0 - q1 + q2 - q1). We've already checked that the
    // denominator is positive.
    q2 * q0 >= q1 * q1
}

// Checks whether the cubic Bézier with these control points is monotonic
// in x, in either direction.
fn monotonic_cubic(p0: &Point, p1: &Point, p2: &Point, p3: &Point) -> bool {
    // The tangent curve has control points 3(p1 - p0), 3(p2 - p1), and
    // 3(p3 - p2), but we only care about the x coordinate and the 3s don't
    // affect the sign.
    let q0 = p1.x - p0.x;
    let q1 = p2.x - p1.x;
    let q2 = p3.x - p2.x;

    quadratic_non_negative(q0, q1, q2) || quadratic_non_negative(-q0, -q1, -q2)
}

impl Segment {
    /// Create a new segment.
    ///
    /// The control points must describe a curve that's monotonic in `x`
    /// (in either direction).
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        debug_assert!(monotonic_cubic(&p0, &p1, &p2, &p3));
        Self { p0, p1, p2, p3 }
    }

    /// Create a straight segment from `source` to `target`.
    pub fn straight(source: Point, target: Point) -> Self {
        let p0 = source;
        let p1 = source.affine(&target, 1.0 / 3.0);
        let p2 = source.affine(&target, 2.0 / 3.0);
        let p3 = target;
        Self::new(p0, p1, p2, p3)
    }

    /// Convert to a kurbo cubic.
    pub fn to_kurbo(&self) -> kurbo::CubicBez {
        kurbo::CubicBez {
            p0: self.p0.to_kurbo(),
            p1: self.p1.to_kurbo(),
            p2: self.p2.to_kurbo(),
            p3: self.p3.to_kurbo(),
        }
    }

    pub(crate) fn from_kurbo(c: kurbo::CubicBez) -> Self {
        // No monotonicity assertion here: this is used for sub-segments of
        // curves that were already checked, and splitting can introduce
        // harmless sub-epsilon wiggles in the control polygon.
        Segment {
            p0: Point::new(c.p0.x, c.p0.y),
            p1: Point::new(c.p1.x, c.p1.y),
            p2: Point::new(c.p2.x, c.p2.y),
            p3: Point::new(c.p3.x, c.p3.y),
        }
    }

    /// The smaller of the two endpoint `x` coordinates.
    pub fn left_x(&self) -> f64 {
        self.p0.x.min(self.p3.x)
    }

    /// The larger of the two endpoint `x` coordinates.
    pub fn right_x(&self) -> f64 {
        self.p0.x.max(self.p3.x)
    }

    /// Our `y` coordinate at the given `x` coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `x` is outside the `x` range of this segment.
    pub fn at_x(&self, x: f64) -> f64 {
        debug_assert!(
            (self.left_x()..=self.right_x()).contains(&x),
            "segment {self:?}, x={x:?}"
        );

        solve_y_for_x(self.to_kurbo(), x)
    }

    /// Split this segment at the given `x` coordinate, returning the two
    /// pieces in parameterization order (the piece containing `p0` first).
    ///
    /// # Panics
    ///
    /// Panics if `x` is outside the `x` range of this segment.
    pub fn split_at(&self, x: f64) -> (Segment, Segment) {
        let c = self.to_kurbo();
        let t = solve_t_for_x(c, x);
        (
            Segment::from_kurbo(c.subsegment(0.0..t)),
            Segment::from_kurbo(c.subsegment(t..1.0)),
        )
    }
}
