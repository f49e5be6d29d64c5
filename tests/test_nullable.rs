//! Nullable wrapper tests.

use std::collections::HashSet;

use owned_handle::{MinusOne, Null, Nullable, NullablePointer};

type NullableInt = Nullable<i32>;
type Fd = Nullable<i32, MinusOne>;

#[test]
fn test_default_is_null() {
    assert!(NullableInt::default().is_null());
    assert!(!NullableInt::default().is_valid());
}

#[test]
fn test_from_null_is_null() {
    assert!(NullableInt::from(Null).is_null());
    let n: NullableInt = Null.into();
    assert_eq!(n.get(), 0);
}

#[test]
fn test_zero_is_null() {
    assert!(NullableInt::new(0).is_null(), "zero is stored verbatim and is null");
}

#[test]
fn test_non_zero_is_valid() {
    assert!(NullableInt::new(1).is_valid());
    assert!(NullableInt::new(-1).is_valid(), "negative values are not null");
}

#[test]
fn test_compares_with_null() {
    assert!(NullableInt::new(1) != Null);
    assert!(Null != NullableInt::new(1));
    assert!(NullableInt::default() == Null);
    assert!(Null == NullableInt::default());
}

#[test]
fn test_round_trips_underlying_value() {
    for raw in [i32::MIN, -1, 0, 1, 42, i32::MAX] {
        let n = NullableInt::new(raw);
        assert_eq!(n.get(), raw);
        assert_eq!(i32::from(n), raw);
        assert_eq!(n.is_null(), raw == 0, "null exactly when equal to sentinel: {raw}");
    }
}

#[test]
fn test_equality_compares_values() {
    assert_eq!(NullableInt::new(7), NullableInt::from(7));
    assert_ne!(NullableInt::new(7), NullableInt::new(8));
    assert_eq!(NullableInt::null(), NullableInt::NULL);
}

#[test]
fn test_minus_one_sentinel() {
    assert!(Fd::default().is_null());
    assert_eq!(Fd::default().get(), -1);
    assert!(Fd::new(-1) == Null);
    assert!(Fd::new(0).is_valid(), "descriptor 0 is a live descriptor");
}

#[test]
fn test_is_hashable() {
    let set: HashSet<NullableInt> = [1, 2, 2, 3].into_iter().map(NullableInt::new).collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn test_same_size_as_underlying() {
    assert_eq!(std::mem::size_of::<NullableInt>(), std::mem::size_of::<i32>());
    assert_eq!(std::mem::size_of::<Nullable<u64, owned_handle::Zero>>(), 8);
}
