//! The status-line comparator: vertical order at the current sweep position.

use std::cmp::Ordering;

use crate::kernel::CurveKernel;
use crate::subcurve::Subcurve;

/// Orders subcurves by their vertical position at a reference point.
///
/// The reference point is the position of the current sweep event. It isn't
/// a property of any one subcurve, so it lives here: the sweep loop
/// re-points it with [`advance_to`](Self::advance_to) before each batch of
/// comparisons, and for any fixed reference point [`compare`](Self::compare)
/// is a strict weak ordering of every curve active there.
///
/// Comparisons use each subcurve's cached remainder
/// ([`last_curve`](Subcurve::last_curve)), which always contains the
/// reference point for curves that are active. Comparing two curves at an
/// `x` coordinate neither of them spans is undefined; the sweep guarantees
/// this doesn't happen, since curves are only compared while simultaneously
/// on the status line.
#[derive(Clone, Debug)]
pub struct StatusOrder<'k, K: CurveKernel> {
    kernel: &'k K,
    position: K::Point,
}

impl<'k, K: CurveKernel> StatusOrder<'k, K> {
    /// Creates a comparator anchored at `position`.
    pub fn new(kernel: &'k K, position: K::Point) -> Self {
        StatusOrder { kernel, position }
    }

    /// Moves the reference point to the next event position.
    pub fn advance_to(&mut self, position: K::Point) {
        self.position = position;
    }

    /// The current reference point.
    pub fn position(&self) -> &K::Point {
        &self.position
    }

    /// Vertical order of `a` and `b` at the reference point.
    ///
    /// When both curves pass through the reference point itself (a shared
    /// endpoint, or a crossing exactly at the event), a raw y-comparison is
    /// degenerate, so the order is decided by the curves' directions
    /// immediately past the point. `Equal` is reserved for curves the
    /// kernel can't tell apart going rightwards from here.
    pub fn compare(&self, a: &Subcurve<'_, K>, b: &Subcurve<'_, K>) -> Ordering {
        match self
            .kernel
            .compare_y_at(a.last_curve(), b.last_curve(), &self.position)
        {
            Ordering::Equal => {
                self.kernel
                    .compare_right_of(a.last_curve(), b.last_curve(), &self.position)
            }
            ord => ord,
        }
    }
}
