//! The subcurve entity: one input curve plus its sweep-progress state.

use std::cmp::Ordering;

use crate::kernel::CurveKernel;
use crate::status::StatusPos;
use crate::Error;

/// A wrapper around one x-monotone curve, tracking the progress of the
/// sweep over it.
///
/// The information kept here exists to turn kernel calls into field reads:
///
/// - the curve's two endpoints, extracted from the kernel once at
///   construction, together with a flag saying which of them is the left
///   one;
/// - the rightmost point on the curve the sweep has handled so far
///   ([`last_point`](Self::last_point)), and the portion of the curve to
///   the right of it ([`last_curve`](Self::last_curve)), so that newly
///   discovered intersection points never force us to re-derive
///   already-consumed geometry;
/// - the most recently reported finished piece, cached for the consumer;
/// - an advisory hint of this subcurve's last known position in the
///   status line.
///
/// The kernel is held by reference for the subcurve's lifetime and never
/// mutated.
pub struct Subcurve<'k, K: CurveKernel> {
    kernel: &'k K,
    curve: K::Curve,
    source: K::Point,
    target: K::Point,
    /// True iff `source` is the left endpoint. Fixed at construction.
    source_is_left: bool,
    last_point: K::Point,
    last_curve: K::Curve,
    last_piece: Option<K::Curve>,
    hint: Option<StatusPos>,
}

impl<'k, K: CurveKernel> Subcurve<'k, K> {
    /// Wraps a curve for sweeping.
    ///
    /// Extracts and caches the endpoints, determines the curve's direction,
    /// and initializes the sweep progress to the curve's left endpoint.
    /// Curves whose endpoints coincide have no usable direction and are
    /// rejected with [`Error::DegenerateCurve`].
    pub fn new(curve: K::Curve, kernel: &'k K) -> Result<Self, Error> {
        let source = kernel.source(&curve);
        let target = kernel.target(&curve);
        let (source_is_left, last_point) = match kernel.compare_points(&source, &target) {
            Ordering::Less => (true, source.clone()),
            Ordering::Greater => (false, target.clone()),
            Ordering::Equal => return Err(Error::DegenerateCurve),
        };
        Ok(Subcurve {
            kernel,
            last_curve: curve.clone(),
            curve,
            source,
            target,
            source_is_left,
            last_point,
            last_piece: None,
            hint: None,
        })
    }

    /// The curve as originally given.
    pub fn curve(&self) -> &K::Curve {
        &self.curve
    }

    /// The start of the curve's parameterization.
    pub fn source(&self) -> &K::Point {
        &self.source
    }

    /// The end of the curve's parameterization.
    pub fn target(&self) -> &K::Point {
        &self.target
    }

    /// Is the source the left endpoint?
    pub fn source_is_left(&self) -> bool {
        self.source_is_left
    }

    /// The geometrically left endpoint, from the cached direction flag.
    pub fn left_endpoint(&self) -> &K::Point {
        if self.source_is_left {
            &self.source
        } else {
            &self.target
        }
    }

    /// The geometrically right endpoint, from the cached direction flag.
    pub fn right_endpoint(&self) -> &K::Point {
        if self.source_is_left {
            &self.target
        } else {
            &self.source
        }
    }

    /// Is `p` the curve's source?
    pub fn is_source(&self, p: &K::Point) -> bool {
        self.kernel.points_equal(p, &self.source)
    }

    /// Is `p` the curve's target?
    pub fn is_target(&self, p: &K::Point) -> bool {
        self.kernel.points_equal(p, &self.target)
    }

    /// Is `p` one of the curve's endpoints?
    pub fn is_endpoint(&self, p: &K::Point) -> bool {
        self.is_target(p) || self.is_source(p)
    }

    /// Is `p` the curve's left endpoint?
    pub fn is_left_endpoint(&self, p: &K::Point) -> bool {
        self.kernel.points_equal(p, self.left_endpoint())
    }

    /// Is `p` the curve's right endpoint?
    pub fn is_right_endpoint(&self, p: &K::Point) -> bool {
        self.kernel.points_equal(p, self.right_endpoint())
    }

    /// The rightmost point on this curve the sweep has handled so far.
    ///
    /// Starts at the left endpoint and advances rightwards with every
    /// intersection point discovered on the curve.
    pub fn last_point(&self) -> &K::Point {
        &self.last_point
    }

    /// Records `p` as the new rightmost handled point.
    ///
    /// The caller must have already established (with kernel comparisons it
    /// performed anyway) that `p` lies on the curve, to the right of the
    /// previous value.
    pub fn advance_to(&mut self, p: K::Point) {
        self.last_point = p;
    }

    /// The portion of the curve to the right of
    /// [`last_point`](Self::last_point).
    ///
    /// This is the only geometry needed for future intersection tests.
    pub fn last_curve(&self) -> &K::Curve {
        &self.last_curve
    }

    /// Replaces the cached remainder with `cv`, a trimmed curve the caller
    /// computed by splitting at [`last_point`](Self::last_point).
    ///
    /// The subcurve never splits curves itself; that's a kernel operation
    /// the caller drives.
    pub fn set_remaining(&mut self, cv: K::Curve) {
        self.last_curve = cv;
    }

    /// The most recently reported finished piece, if any.
    pub fn last_piece(&self) -> Option<&K::Curve> {
        self.last_piece.as_ref()
    }

    /// Records the most recently emitted finished piece.
    ///
    /// Purely a cache for the consumer; carries no ordering semantics.
    pub fn set_last_piece(&mut self, cv: K::Curve) {
        self.last_piece = Some(cv);
    }

    /// This subcurve's last known status-line position, if any.
    ///
    /// Advisory only: the status line may have shifted under it. Consumers
    /// validate before trusting it.
    pub fn hint(&self) -> Option<StatusPos> {
        self.hint
    }

    /// Stores a status-line position hint.
    pub fn set_hint(&mut self, pos: StatusPos) {
        self.hint = Some(pos);
    }

    /// Forgets the status-line position hint.
    pub fn clear_hint(&mut self) {
        self.hint = None;
    }
}

impl<K: CurveKernel> std::fmt::Debug for Subcurve<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subcurve({:?}, last point {:?})",
            self.curve, self.last_point
        )
    }
}

/// An index into our subcurve arena.
///
/// Subcurves have identities: two distinct input curves may share their
/// endpoints, or even all their geometry, and still occupy separate
/// status-line slots. This index is the identity; the data lives in
/// [`Subcurves`].
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SubcurveIdx(pub usize);

impl std::fmt::Debug for SubcurveIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sc_{}", self.0)
    }
}

/// An arena of subcurves, indexed by [`SubcurveIdx`].
///
/// The sweep loop owns one of these for the duration of the sweep; the
/// status line stores indices into it.
pub struct Subcurves<'k, K: CurveKernel> {
    kernel: &'k K,
    subs: Vec<Subcurve<'k, K>>,
}

impl<'k, K: CurveKernel> Subcurves<'k, K> {
    /// Creates an empty arena over the given kernel.
    pub fn new(kernel: &'k K) -> Self {
        Subcurves {
            kernel,
            subs: Vec::new(),
        }
    }

    /// Wraps `curve` in a [`Subcurve`] and adds it, returning its index.
    ///
    /// Fails with [`Error::DegenerateCurve`] for curves whose endpoints
    /// coincide.
    pub fn insert(&mut self, curve: K::Curve) -> Result<SubcurveIdx, Error> {
        let sub = Subcurve::new(curve, self.kernel)?;
        Ok(self.push(sub))
    }

    /// Adds an already-wrapped subcurve, returning its index.
    pub fn push(&mut self, sub: Subcurve<'k, K>) -> SubcurveIdx {
        self.subs.push(sub);
        SubcurveIdx(self.subs.len() - 1)
    }

    /// The number of subcurves in this arena.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// Iterate over all indices that can be used to index into this arena.
    pub fn indices(&self) -> impl Iterator<Item = SubcurveIdx> {
        (0..self.subs.len()).map(SubcurveIdx)
    }

    /// Iterate over all subcurves in this arena.
    pub fn iter(&self) -> impl Iterator<Item = &Subcurve<'k, K>> {
        self.subs.iter()
    }
}

impl<'k, K: CurveKernel> std::ops::Index<SubcurveIdx> for Subcurves<'k, K> {
    type Output = Subcurve<'k, K>;

    fn index(&self, index: SubcurveIdx) -> &Self::Output {
        &self.subs[index.0]
    }
}

impl<K: CurveKernel> std::ops::IndexMut<SubcurveIdx> for Subcurves<'_, K> {
    fn index_mut(&mut self, index: SubcurveIdx) -> &mut Self::Output {
        &mut self.subs[index.0]
    }
}
