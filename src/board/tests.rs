use super::*;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::X.opponent(), Player::O);
    assert_eq!(Player::O.opponent(), Player::X);
}

#[test]
fn test_player_label() {
    assert_eq!(Player::X.label(), 'X');
    assert_eq!(Player::O.label(), 'O');
}

#[test]
fn test_point_offset() {
    let p = Point::new(2, -3);
    assert_eq!(p.offset((1, 0), 4), Point::new(6, -3));
    assert_eq!(p.offset((1, -1), 2), Point::new(4, -5));
    assert_eq!(p.offset((-1, -1), 1), Point::new(1, -2));
    assert_eq!(p.offset((0, 1), 0), p);
}

#[test]
fn test_point_ordering_is_row_major() {
    let a = Point::new(5, -1);
    let b = Point::new(-5, 0);
    let c = Point::new(-6, 0);
    let d = Point::new(0, 3);

    assert!(a < b, "lower row comes first regardless of x");
    assert!(c < b, "same row ordered by x");
    assert!(b < d);
}

#[test]
fn test_point_negative_coordinates() {
    // The lattice is unbounded in every direction
    let p = Point::new(i32::MIN / 2, i32::MAX / 2);
    assert_eq!(p.offset((1, 1), 1).x, i32::MIN / 2 + 1);
}
