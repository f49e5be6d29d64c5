//! Capability detection tests.

use std::ptr::NonNull;

use owned_handle::{
    define_handle, is_equality_comparable, is_equality_comparable_with, is_nullable_pointer, Null,
    Nullable, NullablePointer, MinusOne,
};

#[allow(dead_code)]
struct Empty;

define_handle!(Texture(u32));

#[test]
fn test_integers_are_equality_comparable() {
    assert!(is_equality_comparable!(u8), "u8 should be comparable");
    assert!(is_equality_comparable!(i32), "i32 should be comparable");
    assert!(is_equality_comparable!(usize), "usize should be comparable");
    assert!(is_equality_comparable_with!(i64, i64));
}

#[test]
fn test_mixed_width_integers_are_not_comparable() {
    assert!(
        !is_equality_comparable_with!(u8, i64),
        "Rust does not compare integers of different types"
    );
}

#[test]
fn test_integers_not_comparable_with_null() {
    assert!(!is_equality_comparable_with!(i32, Null));
    assert!(!is_equality_comparable_with!(Null, i32));
}

#[test]
fn test_empty_type_is_not_comparable() {
    assert!(!is_equality_comparable!(Empty));
    assert!(!is_equality_comparable_with!(i32, Empty));
}

#[test]
fn test_pointers_are_nullable_pointers() {
    assert!(is_nullable_pointer!(*const u8));
    assert!(is_nullable_pointer!(*mut i32));
    assert!(is_nullable_pointer!(*mut std::ffi::c_void));
    assert!(is_nullable_pointer!(*mut *mut std::ffi::c_void));
    assert!(is_nullable_pointer!(Option<NonNull<u8>>));
    assert!(is_nullable_pointer!(Null));
}

#[test]
fn test_pointers_compare_with_null_both_ways() {
    assert!(is_equality_comparable_with!(*mut u8, Null));
    assert!(is_equality_comparable_with!(Null, *mut u8));
    assert!(is_equality_comparable_with!(Option<NonNull<u8>>, Null));
    assert!(is_equality_comparable_with!(Null, Option<NonNull<u8>>));
}

#[test]
fn test_integers_are_not_nullable_pointers() {
    assert!(!is_nullable_pointer!(u8));
    assert!(!is_nullable_pointer!(i32));
    assert!(!is_nullable_pointer!(u32));
    assert!(!is_nullable_pointer!(Empty));
}

#[test]
fn test_wrapped_integers_are_nullable_pointers() {
    assert!(is_nullable_pointer!(Nullable<i32>));
    assert!(is_nullable_pointer!(Nullable<u64>));
    assert!(is_nullable_pointer!(Nullable<i32, MinusOne>));
    assert!(is_equality_comparable_with!(Null, Nullable<i32>));
}

#[test]
fn test_defined_handles_are_nullable_pointers() {
    assert!(is_nullable_pointer!(Texture));
    assert_eq!(Texture::NULL, Texture::invalid());
    assert!(Texture::invalid() == Null);
    assert!(Null != Texture::from_raw(4));
    assert!(!NullablePointer::is_null(&Texture::from_raw(4)));
    assert_eq!(Texture::from(Null), Texture::default());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot(u8);

impl From<Null> for Slot {
    fn from(_: Null) -> Self {
        Slot(0)
    }
}

impl PartialEq<Null> for Slot {
    fn eq(&self, _: &Null) -> bool {
        self.0 == 0
    }
}

impl PartialEq<Slot> for Null {
    fn eq(&self, other: &Slot) -> bool {
        other.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OptedSlot(u8);

impl From<Null> for OptedSlot {
    fn from(_: Null) -> Self {
        OptedSlot(0)
    }
}

impl PartialEq<Null> for OptedSlot {
    fn eq(&self, _: &Null) -> bool {
        self.0 == 0
    }
}

impl NullablePointer for OptedSlot {
    const NULL: Self = OptedSlot(0);
}

#[test]
fn test_nullable_pointer_detection_is_opt_in() {
    assert!(is_equality_comparable_with!(Slot, Null));
    assert!(is_equality_comparable_with!(Null, Slot));
    assert!(!is_nullable_pointer!(Slot), "capabilities alone are not enough");

    assert!(is_nullable_pointer!(OptedSlot));
    assert!(OptedSlot::NULL.is_null());
    assert!(!OptedSlot(3).is_null());
}

#[test]
fn test_detection_is_constant() {
    const _: () = owned_handle::detect::assert_nullable_pointer::<*const u8>();
    const _: () = owned_handle::detect::assert_nullable_pointer::<Nullable<u8>>();
    const _: () = owned_handle::detect::assert_nullable_pointer::<Texture>();
}
