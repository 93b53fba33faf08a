//! The status line: the ordered collection of currently-active subcurves.

use std::cmp::Ordering;

use crate::kernel::CurveKernel;
use crate::order::StatusOrder;
use crate::subcurve::{SubcurveIdx, Subcurves};
use crate::Error;

/// A position in the status line, bottom-to-top.
///
/// Positions are not stable: inserting or removing a subcurve shifts every
/// position after it. That's fine for the hints stored in subcurves, which
/// are advisory and validated on use, but don't hold one across mutations
/// and expect it to mean anything.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
pub struct StatusPos(pub usize);

impl std::fmt::Debug for StatusPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p_{}", self.0)
    }
}

/// The ordered set of subcurves crossing the current sweep position.
///
/// Entries are kept sorted bottom-to-top according to a [`StatusOrder`].
/// The container itself is dumb: it's the caller's job to supply a
/// comparator whose reference point matches the state of the line (and to
/// re-establish order around an event, e.g. with
/// [`swap_adjacent`](Self::swap_adjacent), when the sweep passes a
/// crossing).
///
/// Every positional operation first tries the subcurve's own hint and only
/// falls back to a search when the hint doesn't check out, so repeated
/// updates around the same spot in the order stay cheap.
#[derive(Clone, Debug, Default)]
pub struct StatusLine {
    entries: Vec<SubcurveIdx>,
}

impl StatusLine {
    /// Creates an empty status line.
    pub fn new() -> Self {
        StatusLine::default()
    }

    /// The number of active subcurves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the status line empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The subcurve at `pos`, if in range.
    pub fn get(&self, pos: StatusPos) -> Option<SubcurveIdx> {
        self.entries.get(pos.0).copied()
    }

    /// The neighbor directly below `pos`.
    pub fn below(&self, pos: StatusPos) -> Option<SubcurveIdx> {
        pos.0.checked_sub(1).map(|i| self.entries[i])
    }

    /// The neighbor directly above `pos`.
    pub fn above(&self, pos: StatusPos) -> Option<SubcurveIdx> {
        self.entries.get(pos.0 + 1).copied()
    }

    /// Iterate over the active subcurves, bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = SubcurveIdx> + '_ {
        self.entries.iter().copied()
    }

    /// Inserts `idx` at its ordered position, seeding the search with the
    /// subcurve's hint, and stores the fresh position back as the new hint.
    pub fn insert<K: CurveKernel>(
        &mut self,
        idx: SubcurveIdx,
        subs: &mut Subcurves<'_, K>,
        order: &StatusOrder<'_, K>,
    ) -> StatusPos {
        let pos = self.insertion_pos(idx, subs, order);
        self.entries.insert(pos, idx);
        subs[idx].set_hint(StatusPos(pos));
        StatusPos(pos)
    }

    // Finds an index where inserting `idx` keeps the line sorted.
    //
    // A valid hint saves the binary search: if the new entry fits between
    // the hinted position's neighbors, that's our spot.
    fn insertion_pos<K: CurveKernel>(
        &self,
        idx: SubcurveIdx,
        subs: &Subcurves<'_, K>,
        order: &StatusOrder<'_, K>,
    ) -> usize {
        if let Some(StatusPos(h)) = subs[idx].hint() {
            if h <= self.entries.len() {
                let fits_below = h == 0
                    || order.compare(&subs[self.entries[h - 1]], &subs[idx]) != Ordering::Greater;
                let fits_above = h == self.entries.len()
                    || order.compare(&subs[idx], &subs[self.entries[h]]) != Ordering::Greater;
                if fits_below && fits_above {
                    return h;
                }
            }
        }

        self.entries
            .partition_point(|&other| order.compare(&subs[other], &subs[idx]) == Ordering::Less)
    }

    /// Finds the position of `idx`, trying its hint before searching.
    ///
    /// The search uses the comparator first and degrades to a linear scan,
    /// so it finds the entry even if the line has drifted out of order
    /// around it (the caller may be mid-way through re-establishing order
    /// at an event).
    pub fn locate<K: CurveKernel>(
        &self,
        idx: SubcurveIdx,
        subs: &Subcurves<'_, K>,
        order: &StatusOrder<'_, K>,
    ) -> Option<StatusPos> {
        if let Some(StatusPos(h)) = subs[idx].hint() {
            if self.entries.get(h) == Some(&idx) {
                return Some(StatusPos(h));
            }
        }

        let start = self
            .entries
            .partition_point(|&other| order.compare(&subs[other], &subs[idx]) == Ordering::Less);
        for (i, &other) in self.entries[start..].iter().enumerate() {
            if other == idx {
                return Some(StatusPos(start + i));
            }
            if order.compare(&subs[other], &subs[idx]) == Ordering::Greater {
                break;
            }
        }

        self.entries.iter().position(|&other| other == idx).map(StatusPos)
    }

    /// Removes `idx` from the line, returning the position it occupied.
    ///
    /// Returns `None` (and changes nothing) if `idx` isn't on the line.
    pub fn remove<K: CurveKernel>(
        &mut self,
        idx: SubcurveIdx,
        subs: &mut Subcurves<'_, K>,
        order: &StatusOrder<'_, K>,
    ) -> Option<StatusPos> {
        let pos = self.locate(idx, subs, order)?;
        self.entries.remove(pos.0);
        subs[idx].clear_hint();
        Some(pos)
    }

    /// Swaps the entries at `pos` and the position above it, refreshing
    /// both hints.
    ///
    /// This is how the sweep re-establishes order when it passes the
    /// crossing of two adjacent subcurves.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not the position of an entry with a neighbor
    /// above it.
    pub fn swap_adjacent<K: CurveKernel>(&mut self, pos: StatusPos, subs: &mut Subcurves<'_, K>) {
        self.entries.swap(pos.0, pos.0 + 1);
        subs[self.entries[pos.0]].set_hint(pos);
        subs[self.entries[pos.0 + 1]].set_hint(StatusPos(pos.0 + 1));
    }

    /// Verifies that adjacent entries are ordered under `order`.
    ///
    /// A failure means the comparator stopped being a strict weak order for
    /// the active set (or was queried at a stale reference point), which
    /// silently corrupts every subsequent positional operation; callers
    /// treat it as fatal for the sweep.
    pub fn check_order<K: CurveKernel>(
        &self,
        subs: &Subcurves<'_, K>,
        order: &StatusOrder<'_, K>,
    ) -> Result<(), Error> {
        for (i, pair) in self.entries.windows(2).enumerate() {
            if order.compare(&subs[pair[0]], &subs[pair[1]]) == Ordering::Greater {
                return Err(Error::OrderViolation(StatusPos(i)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Segment};
    use crate::kernel::CubicKernel;
    use assert_matches::assert_matches;

    const KERNEL: CubicKernel = CubicKernel;

    fn fan<'k>(
        kernel: &'k CubicKernel,
        slopes: &[f64],
    ) -> (Subcurves<'k, CubicKernel>, Vec<SubcurveIdx>) {
        // A fan of lines through x = [0, 10], bottom-to-top by slope at x=0.
        let mut subs = Subcurves::new(kernel);
        let ids = slopes
            .iter()
            .map(|&m| {
                subs.insert(Segment::straight(
                    Point::new(0.0, m),
                    Point::new(10.0, m + 1.0),
                ))
                .unwrap()
            })
            .collect();
        (subs, ids)
    }

    #[test]
    fn insert_keeps_order() {
        let (mut subs, ids) = fan(&KERNEL, &[3.0, 1.0, 2.0, 0.0]);
        let order = StatusOrder::new(&KERNEL, Point::new(0.0, 0.0));

        let mut line = StatusLine::new();
        for &id in &ids {
            line.insert(id, &mut subs, &order);
        }

        // ids[3] (offset 0) < ids[1] < ids[2] < ids[0].
        let got: Vec<_> = line.iter().collect();
        assert_eq!(got, vec![ids[3], ids[1], ids[2], ids[0]]);
        line.check_order(&subs, &order).unwrap();

        // Locate finds everyone, whether or not later inserts shifted the
        // hint it was left with.
        for (i, &id) in got.iter().enumerate() {
            assert_eq!(line.locate(id, &subs, &order), Some(StatusPos(i)));
        }
    }

    #[test]
    fn neighbors() {
        let (mut subs, ids) = fan(&KERNEL, &[0.0, 1.0, 2.0]);
        let order = StatusOrder::new(&KERNEL, Point::new(0.0, 0.0));
        let mut line = StatusLine::new();
        for &id in &ids {
            line.insert(id, &mut subs, &order);
        }

        assert_eq!(line.below(StatusPos(0)), None);
        assert_eq!(line.above(StatusPos(0)), Some(ids[1]));
        assert_eq!(line.below(StatusPos(2)), Some(ids[1]));
        assert_eq!(line.above(StatusPos(2)), None);
        assert_eq!(line.get(StatusPos(1)), Some(ids[1]));
    }

    #[test]
    fn stale_hint_falls_back() {
        let (mut subs, ids) = fan(&KERNEL, &[0.0, 1.0, 2.0, 3.0]);
        let order = StatusOrder::new(&KERNEL, Point::new(0.0, 0.0));
        let mut line = StatusLine::new();
        for &id in &ids {
            line.insert(id, &mut subs, &order);
        }

        // Removing the bottom entry shifts everything; the other hints are
        // now stale but locate still finds everyone.
        line.remove(ids[0], &mut subs, &order).unwrap();
        for (i, &id) in ids[1..].iter().enumerate() {
            assert_eq!(line.locate(id, &subs, &order), Some(StatusPos(i)));
        }

        // A hint that's wildly wrong (not just shifted) also recovers.
        subs[ids[3]].set_hint(StatusPos(17));
        assert_eq!(line.locate(ids[3], &subs, &order), Some(StatusPos(2)));

        // And a removed subcurve is simply not found.
        assert_eq!(line.locate(ids[0], &subs, &order), None);
        assert_eq!(line.remove(ids[0], &mut subs, &order), None);
    }

    #[test]
    fn hint_seeded_reinsert() {
        let (mut subs, ids) = fan(&KERNEL, &[0.0, 1.0, 2.0]);
        let order = StatusOrder::new(&KERNEL, Point::new(0.0, 0.0));
        let mut line = StatusLine::new();
        for &id in &ids {
            line.insert(id, &mut subs, &order);
        }

        // Take the middle entry out and put it back: the hint left over
        // from the previous occupancy seeds the insertion.
        let pos = line.remove(ids[1], &mut subs, &order).unwrap();
        assert_eq!(pos, StatusPos(1));
        subs[ids[1]].set_hint(pos);
        let back = line.insert(ids[1], &mut subs, &order);
        assert_eq!(back, StatusPos(1));
        line.check_order(&subs, &order).unwrap();
    }

    #[test]
    fn swap_at_crossing() {
        let kernel = CubicKernel;
        let mut subs = Subcurves::new(&kernel);
        let up = subs
            .insert(Segment::straight(Point::new(0.0, 0.0), Point::new(10.0, 10.0)))
            .unwrap();
        let down = subs
            .insert(Segment::straight(Point::new(0.0, 10.0), Point::new(10.0, 0.0)))
            .unwrap();

        let mut order = StatusOrder::new(&kernel, Point::new(0.0, 0.0));
        let mut line = StatusLine::new();
        line.insert(up, &mut subs, &order);
        line.insert(down, &mut subs, &order);
        assert_eq!(line.iter().collect::<Vec<_>>(), vec![up, down]);

        // At the crossing the stored order is no longer the geometric one.
        order.advance_to(Point::new(5.0, 5.0));
        assert_matches!(
            line.check_order(&subs, &order),
            Err(Error::OrderViolation(StatusPos(0)))
        );

        let pos = line.locate(up, &subs, &order).unwrap();
        line.swap_adjacent(pos, &mut subs);
        assert_eq!(line.iter().collect::<Vec<_>>(), vec![down, up]);
        line.check_order(&subs, &order).unwrap();

        // Hints were refreshed by the swap.
        assert_eq!(subs[down].hint(), Some(StatusPos(0)));
        assert_eq!(subs[up].hint(), Some(StatusPos(1)));
    }
}
