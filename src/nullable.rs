//! Nullable wrapper for scalar handle types.
//!
//! Integer handles (file descriptors, GL object names, socket IDs) have no
//! null literal of their own. [`Nullable`] pairs such a value with a fixed,
//! compile-time sentinel so it satisfies [`NullablePointer`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::detect::{Null, NullablePointer};

/// A plain scalar usable as a handle value.
pub trait Scalar: Copy + Eq + fmt::Debug + Hash {
    /// The zero value of the type.
    const ZERO: Self;
}

/// Picks the null value of `T` at compile time.
pub trait NullSentinel<T>: 'static {
    /// The value that means "no resource".
    const NULL: T;
}

/// Sentinel strategy: zero is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zero {}

/// Sentinel strategy: minus one is null (POSIX file descriptors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinusOne {}

impl<T: Scalar> NullSentinel<T> for Zero {
    const NULL: T = T::ZERO;
}

/// A scalar that is null when equal to `S::NULL`.
///
/// Construction from a raw value stores it verbatim, so `Nullable::new(0)`
/// with the [`Zero`] sentinel is null.
#[repr(transparent)]
pub struct Nullable<T, S = Zero> {
    value: T,
    sentinel: PhantomData<fn() -> S>,
}

impl<T: Copy, S: NullSentinel<T>> Nullable<T, S> {
    /// Wrap a raw value.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            sentinel: PhantomData,
        }
    }

    /// The null value.
    #[inline]
    pub const fn null() -> Self {
        Self::new(S::NULL)
    }

    /// The stored raw value.
    #[inline]
    pub const fn get(self) -> T {
        self.value
    }
}

impl<T: Copy + Eq, S: NullSentinel<T>> Nullable<T, S> {
    /// Returns `true` if the stored value is the sentinel.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.value == S::NULL
    }

    /// Returns `true` unless the stored value is the sentinel.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_null()
    }
}

impl<T: Copy, S> Clone for Nullable<T, S> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, S> Copy for Nullable<T, S> {}

impl<T: Copy, S: NullSentinel<T>> Default for Nullable<T, S> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Copy, S: NullSentinel<T>> From<Null> for Nullable<T, S> {
    #[inline]
    fn from(_: Null) -> Self {
        Self::null()
    }
}

impl<T: PartialEq, S> PartialEq for Nullable<T, S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, S> Eq for Nullable<T, S> {}

impl<T: Copy + Eq, S: NullSentinel<T>> PartialEq<Null> for Nullable<T, S> {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl<T: Copy + Eq, S: NullSentinel<T>> PartialEq<Nullable<T, S>> for Null {
    #[inline]
    fn eq(&self, other: &Nullable<T, S>) -> bool {
        other.is_null()
    }
}

impl<T: Hash, S> Hash for Nullable<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Nullable<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Nullable").field(&self.value).finish()
    }
}

impl<T: Copy + Eq + fmt::Debug, S: NullSentinel<T>> NullablePointer for Nullable<T, S> {
    const NULL: Self = Self::null();
}

/// Maps a raw handle type to the storage an owner keeps for it.
///
/// Types that already are [`NullablePointer`]s store themselves and ignore
/// `S`. Integers store [`Nullable<T, S>`].
pub trait AsNullable<S = Zero>: Copy {
    /// The pointer-like storage type.
    type Storage: NullablePointer;

    /// Convert a raw handle into storage.
    fn into_storage(self) -> Self::Storage;

    /// Convert storage back into the raw handle.
    fn from_storage(storage: Self::Storage) -> Self;
}

impl<P: NullablePointer, S> AsNullable<S> for P {
    type Storage = P;

    #[inline]
    fn into_storage(self) -> P {
        self
    }

    #[inline]
    fn from_storage(storage: P) -> Self {
        storage
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const ZERO: Self = 0;
            }

            impl<S: NullSentinel<$ty>> AsNullable<S> for $ty {
                type Storage = Nullable<$ty, S>;

                #[inline]
                fn into_storage(self) -> Self::Storage {
                    Nullable::new(self)
                }

                #[inline]
                fn from_storage(storage: Self::Storage) -> Self {
                    storage.get()
                }
            }

            impl<S: NullSentinel<$ty>> From<$ty> for Nullable<$ty, S> {
                #[inline]
                fn from(value: $ty) -> Self {
                    Nullable::new(value)
                }
            }

            impl<S: NullSentinel<$ty>> From<Nullable<$ty, S>> for $ty {
                #[inline]
                fn from(nullable: Nullable<$ty, S>) -> Self {
                    nullable.get()
                }
            }
        )*
    };
}

impl_scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! impl_minus_one {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NullSentinel<$ty> for MinusOne {
                const NULL: $ty = -1;
            }
        )*
    };
}

impl_minus_one!(i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        let n: Nullable<i32> = Nullable::default();
        assert!(n.is_null());
        assert_eq!(n.get(), 0);
    }

    #[test]
    fn test_minus_one_sentinel() {
        let fd: Nullable<i32, MinusOne> = Nullable::null();
        assert_eq!(fd.get(), -1);
        assert!(!Nullable::<i32, MinusOne>::new(0).is_null());
    }

    #[test]
    fn test_storage_selection() {
        let storage = <u32 as AsNullable>::into_storage(5);
        assert_eq!(storage, Nullable::<u32>::new(5));
        assert_eq!(<u32 as AsNullable>::from_storage(storage), 5);

        let p: *const u8 = std::ptr::null();
        let same: *const u8 = <*const u8 as AsNullable>::into_storage(p);
        assert!(same.is_null());
    }
}
