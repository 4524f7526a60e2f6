use fleetfire::{BitBoard, BitBoardError, Coord};

#[test]
fn test_new_is_empty() {
    let bb = BitBoard::<u64>::new(10);
    assert_eq!(bb.size(), 10);
    assert!(bb.is_empty());
    assert!(!bb.is_full());
    assert_eq!(bb.count_ones(), 0);
}

#[test]
fn test_get_set_clear() {
    let mut bb = BitBoard::<u16>::new(4);
    bb.set(Coord::new(1, 1)).unwrap();
    assert!(bb.get(Coord::new(1, 1)).unwrap());
    assert!(!bb.get(Coord::new(1, 2)).unwrap());

    bb.clear(Coord::new(1, 1)).unwrap();
    assert!(!bb.get(Coord::new(1, 1)).unwrap());

    bb.set(Coord::new(3, 2)).unwrap();
    assert_eq!(bb.count_ones(), 1);
}

#[test]
fn test_out_of_bounds() {
    let mut bb = BitBoard::<u8>::new(3);
    let err = bb.set(Coord::new(3, 0)).unwrap_err();
    assert_eq!(
        err,
        BitBoardError::IndexOutOfBounds {
            col: 3,
            row: 0,
            size: 3
        }
    );
    assert!(bb.get(Coord::new(0, 7)).is_err());
    assert!(bb.is_empty());
}

#[test]
fn test_small_word_spans_many_words() {
    // 5x5 = 25 cells over 8-bit words
    let mut bb = BitBoard::<u8>::new(5);
    for row in 0..5 {
        for col in 0..5 {
            bb.set(Coord::new(col, row)).unwrap();
        }
    }
    assert!(bb.is_full());
    assert_eq!(bb.count_ones(), 25);
    bb.clear_all();
    assert!(bb.is_empty());
}

#[test]
fn test_from_coords_and_iter() {
    let bb = BitBoard::<u16>::from_coords(4, [Coord::new(0, 1), Coord::new(3, 3)]).unwrap();
    let set: Vec<_> = bb.iter_set().collect();
    assert_eq!(set, vec![Coord::new(0, 1), Coord::new(3, 3)]);
    assert_eq!(bb.iter_clear().count(), 14);
    assert!(!bb.iter_clear().any(|c| c == Coord::new(3, 3)));
}

#[test]
fn test_union() {
    let a = BitBoard::<u64>::from_coords(3, [Coord::new(0, 0)]).unwrap();
    let b = BitBoard::<u64>::from_coords(3, [Coord::new(2, 2)]).unwrap();
    let u = a.union(&b).unwrap();
    assert_eq!(u.count_ones(), 2);

    let c = BitBoard::<u64>::new(4);
    assert_eq!(
        a.union(&c).unwrap_err(),
        BitBoardError::SizeMismatch { left: 3, right: 4 }
    );
}

#[test]
fn test_display() {
    let bb = BitBoard::<u8>::from_coords(2, [Coord::new(1, 0)]).unwrap();
    assert_eq!(bb.to_string(), "□ ■ \n□ □ ");
}
