//! Typed integer handles.
//!
//! Many C APIs hand out opaque object IDs as plain integers. A newtype per
//! object kind keeps them from being mixed up, and implementing
//! [`NullablePointer`](crate::NullablePointer) lets a [`Handle`](crate::Handle)
//! own them directly.

/// Define an opaque integer handle type whose null value is zero.
///
/// ```
/// use owned_handle::{define_handle, is_nullable_pointer};
///
/// define_handle!(pub Buffer(u64));
///
/// assert!(!Buffer::invalid().is_valid());
/// assert!(Buffer::from_raw(3).is_valid());
/// assert!(is_nullable_pointer!(Buffer));
/// ```
#[macro_export]
macro_rules! define_handle {
    ($(#[$meta:meta])* $vis:vis $name:ident($repr:ty)) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name {
            _h: $repr,
        }

        impl $name {
            /// Create an invalid (null) handle.
            #[inline]
            pub const fn invalid() -> Self {
                Self { _h: 0 }
            }

            /// Wrap a raw ID.
            #[inline]
            pub const fn from_raw(raw: $repr) -> Self {
                Self { _h: raw }
            }

            /// The raw ID.
            #[inline]
            pub const fn raw(&self) -> $repr {
                self._h
            }

            /// Check if this handle is valid (non-zero).
            #[inline]
            pub const fn is_valid(&self) -> bool {
                self._h != 0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<$crate::Null> for $name {
            #[inline]
            fn from(_: $crate::Null) -> Self {
                Self::invalid()
            }
        }

        impl PartialEq<$crate::Null> for $name {
            #[inline]
            fn eq(&self, _: &$crate::Null) -> bool {
                !self.is_valid()
            }
        }

        impl PartialEq<$name> for $crate::Null {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                !other.is_valid()
            }
        }

        impl $crate::NullablePointer for $name {
            const NULL: Self = Self::invalid();
        }
    };
}
