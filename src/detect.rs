//! Capability detection for handle types.
//!
//! [`NullablePointer`] is the requirement an owned handle's storage must
//! meet. The `is_*!` macros answer capability questions about
//! concrete types as plain `bool`s, resolved by the trait solver at compile
//! time: a missing capability gives `false`, never a compile error.

use std::fmt;
use std::ptr::{self, NonNull};

/// The null literal.
///
/// Nullable types convert from it and compare against it in both operand
/// orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Null;

/// A value that behaves like a nullable pointer.
///
/// Copy, swap and destruction come with `Copy`. Construction and
/// assignment from the null literal come with `From<Null>`, and
/// comparison with it with `PartialEq<Null>`. Default construction is
/// [`NullablePointer::NULL`].
///
/// Every implementor shipped by this crate also implements
/// `PartialEq<T> for Null`.
///
/// Detection is opt-in: a type with all of these capabilities is only
/// reported by [`is_nullable_pointer!`](crate::is_nullable_pointer) once it
/// implements this trait, as [`define_handle!`](crate::define_handle) types
/// do. `Debug` is required so owners can log the value they release.
pub trait NullablePointer: Copy + Eq + fmt::Debug + From<Null> + PartialEq<Null> {
    /// The null value of this type.
    const NULL: Self;

    /// Returns `true` if this is the null value.
    #[inline]
    fn is_null(&self) -> bool {
        *self == Null
    }
}

impl NullablePointer for Null {
    const NULL: Self = Null;
}

macro_rules! impl_raw_pointer {
    ($ptr:ty, $null:path) => {
        impl<T> From<Null> for $ptr {
            #[inline]
            fn from(_: Null) -> Self {
                $null()
            }
        }

        impl<T> PartialEq<Null> for $ptr {
            #[inline]
            fn eq(&self, _: &Null) -> bool {
                <$ptr>::is_null(*self)
            }
        }

        impl<T> PartialEq<$ptr> for Null {
            #[inline]
            fn eq(&self, other: &$ptr) -> bool {
                <$ptr>::is_null(*other)
            }
        }

        impl<T> NullablePointer for $ptr {
            const NULL: Self = $null();
        }
    };
}

impl_raw_pointer!(*const T, ptr::null);
impl_raw_pointer!(*mut T, ptr::null_mut);

impl<T> From<Null> for Option<NonNull<T>> {
    #[inline]
    fn from(_: Null) -> Self {
        None
    }
}

impl<T> PartialEq<Null> for Option<NonNull<T>> {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        self.is_none()
    }
}

impl<T> PartialEq<Option<NonNull<T>>> for Null {
    #[inline]
    fn eq(&self, other: &Option<NonNull<T>>) -> bool {
        other.is_none()
    }
}

impl<T> NullablePointer for Option<NonNull<T>> {
    const NULL: Self = None;
}

/// Fails to type-check unless `T` is a [`NullablePointer`].
///
/// ```
/// const _: () = owned_handle::detect::assert_nullable_pointer::<*mut u8>();
/// ```
pub const fn assert_nullable_pointer<T: NullablePointer>() {}

/// Autoref probes behind the `is_*!` macros.
///
/// Method lookup tries the by-reference receiver first, which only matches
/// when the capability's bound holds; otherwise it falls through to the
/// auto-referenced impl that answers `false`.
#[doc(hidden)]
pub mod probe {
    use std::marker::PhantomData;

    use super::NullablePointer;

    pub struct Probe<T: ?Sized>(PhantomData<fn() -> *const T>);

    impl<T: ?Sized> Probe<T> {
        #[inline]
        pub const fn new() -> Self {
            Probe(PhantomData)
        }
    }

    pub struct PairProbe<T: ?Sized, U: ?Sized>(PhantomData<(fn() -> *const T, fn() -> *const U)>);

    impl<T: ?Sized, U: ?Sized> PairProbe<T, U> {
        #[inline]
        pub const fn new() -> Self {
            PairProbe(PhantomData)
        }
    }

    pub trait IsNullablePointer {
        #[inline]
        fn is_nullable_pointer(&self) -> bool {
            true
        }
    }

    impl<T: NullablePointer> IsNullablePointer for Probe<T> {}

    pub trait NotNullablePointer {
        #[inline]
        fn is_nullable_pointer(&self) -> bool {
            false
        }
    }

    impl<T: ?Sized> NotNullablePointer for &Probe<T> {}

    pub trait IsComparable {
        #[inline]
        fn is_comparable(&self) -> bool {
            true
        }
    }

    impl<T: ?Sized + PartialEq<U>, U: ?Sized> IsComparable for PairProbe<T, U> {}

    pub trait NotComparable {
        #[inline]
        fn is_comparable(&self) -> bool {
            false
        }
    }

    impl<T: ?Sized, U: ?Sized> NotComparable for &PairProbe<T, U> {}
}

/// `true` if `a == b` and `a != b` are well-formed for `a: T`, `b: U`.
///
/// ```
/// use owned_handle::{is_equality_comparable_with, Null};
///
/// assert!(is_equality_comparable_with!(i32, i32));
/// assert!(!is_equality_comparable_with!(i32, Null));
/// ```
#[macro_export]
macro_rules! is_equality_comparable_with {
    ($t:ty, $u:ty) => {{
        #[allow(unused_imports)]
        use $crate::detect::probe::{IsComparable as _, NotComparable as _};
        (&$crate::detect::probe::PairProbe::<$t, $u>::new()).is_comparable()
    }};
}

/// `true` if values of `T` can be compared with each other.
#[macro_export]
macro_rules! is_equality_comparable {
    ($t:ty) => {
        $crate::is_equality_comparable_with!($t, $t)
    };
}

/// `true` if `T` implements [`NullablePointer`].
///
/// ```
/// use owned_handle::{is_nullable_pointer, Nullable};
///
/// assert!(is_nullable_pointer!(*mut u8));
/// assert!(is_nullable_pointer!(Nullable<u32>));
/// assert!(!is_nullable_pointer!(u32));
/// ```
#[macro_export]
macro_rules! is_nullable_pointer {
    ($t:ty) => {{
        #[allow(unused_imports)]
        use $crate::detect::probe::{IsNullablePointer as _, NotNullablePointer as _};
        (&$crate::detect::probe::Probe::<$t>::new()).is_nullable_pointer()
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_pointer_compares_with_null() {
        let p: *mut u8 = Null.into();
        assert!(p == Null);
        assert!(Null == p);
        assert!(NullablePointer::is_null(&p));

        let mut byte = 0u8;
        let q: *mut u8 = &mut byte;
        assert!(q != Null);
        assert!(Null != q);
    }

    #[test]
    fn test_non_null_option() {
        let none: Option<NonNull<u8>> = Null.into();
        assert!(none == Null);

        let mut byte = 0u8;
        let some = NonNull::new(&mut byte as *mut u8);
        assert!(some != Null);
        assert!(!NullablePointer::is_null(&some));
    }
}
