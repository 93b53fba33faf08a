//! Drives the status line through a miniature sweep: three segments, one
//! crossing, with the trimming protocol a real event loop would follow.

use assert_matches::assert_matches;
use sweepstatus::{
    CubicKernel, Error, Point, Segment, StatusLine, StatusOrder, Subcurves,
};

#[test]
fn sweep_with_one_crossing() {
    let kernel = CubicKernel;
    let mut subs = Subcurves::new(&kernel);

    // `up` and `down` cross at (5, 5); `low` stays underneath both.
    // `down` is parameterized right-to-left to exercise the direction flag.
    let up = subs
        .insert(Segment::straight(Point::new(0.0, 0.0), Point::new(10.0, 10.0)))
        .unwrap();
    let down = subs
        .insert(Segment::straight(Point::new(10.0, 0.0), Point::new(0.0, 10.0)))
        .unwrap();
    let low = subs
        .insert(Segment::straight(Point::new(0.0, -2.0), Point::new(10.0, -1.0)))
        .unwrap();

    assert!(subs[up].source_is_left());
    assert!(!subs[down].source_is_left());

    let mut order = StatusOrder::new(&kernel, Point::new(0.0, 0.0));
    let mut line = StatusLine::new();

    // Left-endpoint events at x = 0, in queue order (y ascending).
    for idx in [low, up, down] {
        let enter = *subs[idx].left_endpoint();
        assert!(subs[idx].is_left_endpoint(&enter));
        order.advance_to(enter);
        line.insert(idx, &mut subs, &order);
    }
    assert_eq!(line.iter().collect::<Vec<_>>(), vec![low, up, down]);
    line.check_order(&subs, &order).unwrap();

    // Intersection event at (5, 5). The stored order around the crossing
    // pair is now inverted; swap it back and trim both curves.
    let cross = Point::new(5.0, 5.0);
    order.advance_to(cross);
    assert_matches!(line.check_order(&subs, &order), Err(Error::OrderViolation(_)));

    let pos = line.locate(up, &subs, &order).unwrap();
    line.swap_adjacent(pos, &mut subs);
    line.check_order(&subs, &order).unwrap();
    assert_eq!(line.iter().collect::<Vec<_>>(), vec![low, down, up]);

    for idx in [up, down] {
        assert!(!subs[idx].is_endpoint(&cross));

        let (before, after) = subs[idx].last_curve().split_at(cross.x);
        // The remainder is the piece containing the curve's right endpoint;
        // which one that is depends on the parameterization direction.
        let (finished, rest) = if subs[idx].source_is_left() {
            (before, after)
        } else {
            (after, before)
        };

        let sub = &mut subs[idx];
        sub.set_last_piece(finished);
        sub.advance_to(cross);
        sub.set_remaining(rest);
    }

    assert_eq!(*subs[up].last_point(), cross);
    assert_eq!(*subs[down].last_point(), cross);

    // The cached remainders span [5, 10] and still answer comparisons.
    for idx in [up, down] {
        let rest = subs[idx].last_curve();
        assert!((rest.left_x() - 5.0).abs() < 1e-9);
        assert!((rest.right_x() - 10.0).abs() < 1e-9);
        let piece = subs[idx].last_piece().unwrap();
        assert!((piece.left_x() - 0.0).abs() < 1e-9 || (piece.right_x() - 5.0).abs() < 1e-9);
    }
    order.advance_to(Point::new(8.0, 0.0));
    line.check_order(&subs, &order).unwrap();

    // Right-endpoint events at x = 10: everything leaves the line.
    for idx in [down, up, low] {
        let exit = *subs[idx].right_endpoint();
        assert!(subs[idx].is_right_endpoint(&exit));
        order.advance_to(exit);
        assert!(line.remove(idx, &mut subs, &order).is_some());
        assert_eq!(subs[idx].hint(), None);
    }
    assert!(line.is_empty());
}
