//! Release strategies and the deleters built on them.
//!
//! A [`Release`] implementor is a zero-sized type that names a foreign
//! release function at compile time. [`Deleter`]s wrap a release strategy
//! into the callable an owner runs on drop: [`StaticDeleter`] skips null
//! values, [`PlainDeleter`] does not check.

use std::fmt;
use std::marker::PhantomData;

use crate::detect::NullablePointer;
use crate::nullable::AsNullable;

/// A release function bound at compile time.
///
/// Usually declared with [`release_fn!`](crate::release_fn).
///
/// Releasing is `unsafe`: only an owner that holds the handle may give it
/// up, so safe code reaches the release function through
/// [`Handle`](crate::Handle) alone.
///
/// ```compile_fail,E0133
/// use owned_handle::{release_fn, MinusOne, Release};
///
/// fn close_fd(_fd: i32) -> i32 { 0 }
/// release_fn!(CloseFd(i32) -> i32 = close_fd, null = MinusOne);
///
/// let _ = CloseFd::release(3);
/// ```
pub trait Release {
    /// The raw handle type the foreign API hands out.
    type Handle: AsNullable<Self::Sentinel>;

    /// Null sentinel strategy, used when `Handle` is a plain integer.
    type Sentinel;

    /// Whatever the release function returns.
    type Output;

    /// Release the resource behind `handle`.
    ///
    /// # Safety
    ///
    /// `handle` must be a live resource owned by the caller, and must not be
    /// used or released again afterwards.
    unsafe fn release(handle: Self::Handle) -> Self::Output;
}

/// The storage type an owner keeps for the handles of `R`.
pub type Storage<R> = <<R as Release>::Handle as AsNullable<<R as Release>::Sentinel>>::Storage;

/// Callable run by an owner to give up its handle.
pub trait Deleter: Default {
    /// The release strategy this deleter forwards to.
    type Release: Release;

    /// Dispose of `storage`. The release function's return value is dropped.
    ///
    /// # Safety
    ///
    /// Same contract as [`Release::release`]. [`StaticDeleter`] also accepts
    /// the null value.
    unsafe fn delete(&self, storage: Storage<Self::Release>);
}

/// Forwards every call to the release function, null or not.
///
/// For APIs whose release function already accepts null, such as `free`.
pub struct PlainDeleter<R>(PhantomData<fn(R)>);

impl<R: Release> PlainDeleter<R> {
    /// Create the deleter.
    #[inline]
    pub const fn new() -> Self {
        PlainDeleter(PhantomData)
    }

    /// Release `handle` unconditionally.
    ///
    /// # Safety
    ///
    /// Same contract as [`Release::release`].
    #[inline]
    pub unsafe fn call(&self, handle: R::Handle) {
        let _ = unsafe { R::release(handle) };
    }
}

impl<R: Release> Deleter for PlainDeleter<R> {
    type Release = R;

    #[inline]
    unsafe fn delete(&self, storage: Storage<R>) {
        unsafe { self.call(<R::Handle as AsNullable<R::Sentinel>>::from_storage(storage)) }
    }
}

/// Forwards to the release function unless the handle is null.
///
/// The release function is never called with the null value.
pub struct StaticDeleter<R>(PhantomData<fn(R)>);

impl<R: Release> StaticDeleter<R> {
    /// Create the deleter.
    #[inline]
    pub const fn new() -> Self {
        StaticDeleter(PhantomData)
    }

    /// Release `handle` unless it is null.
    ///
    /// # Safety
    ///
    /// `handle` must be null, or satisfy the contract of
    /// [`Release::release`].
    #[inline]
    pub unsafe fn call(&self, handle: R::Handle) {
        unsafe { self.delete(<R::Handle as AsNullable<R::Sentinel>>::into_storage(handle)) }
    }
}

impl<R: Release> Deleter for StaticDeleter<R> {
    type Release = R;

    #[inline]
    unsafe fn delete(&self, storage: Storage<R>) {
        if NullablePointer::is_null(&storage) {
            return;
        }
        let _ = unsafe { R::release(<R::Handle as AsNullable<R::Sentinel>>::from_storage(storage)) };
    }
}

macro_rules! impl_deleter_boilerplate {
    ($($name:ident),*) => {
        $(
            impl<R: Release> Default for $name<R> {
                #[inline]
                fn default() -> Self {
                    Self::new()
                }
            }

            impl<R> Clone for $name<R> {
                #[inline]
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<R> Copy for $name<R> {}

            impl<R> fmt::Debug for $name<R> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!(stringify!($name), "<{}>"), std::any::type_name::<R>())
                }
            }
        )*
    };
}

impl_deleter_boilerplate!(PlainDeleter, StaticDeleter);

/// Declare a zero-sized [`Release`] strategy for a function.
///
/// ```
/// use owned_handle::release_fn;
///
/// fn destroy_texture(_name: u32) {}
/// unsafe extern "C" fn close_socket(_fd: i32) -> i32 { 0 }
///
/// release_fn!(pub DestroyTexture(u32) = destroy_texture);
/// release_fn!(CloseSocket(i32) -> i32 = close_socket, null = owned_handle::MinusOne);
/// ```
///
/// The generated [`Release::release`] is an `unsafe fn`, so an `unsafe`
/// foreign release function can be bound directly. Its contract is carried
/// by `Release::release` and discharged by [`Handle`](crate::Handle).
#[macro_export]
macro_rules! release_fn {
    (@output) => { () };
    (@output $ret:ty) => { $ret };
    (@sentinel) => { $crate::Zero };
    (@sentinel $sentinel:ty) => { $sentinel };
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident($handle:ty) $(-> $ret:ty)? = $func:path $(, null = $sentinel:ty)? $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Release for $name {
            type Handle = $handle;
            type Sentinel = $crate::release_fn!(@sentinel $($sentinel)?);
            type Output = $crate::release_fn!(@output $($ret)?);

            #[inline]
            unsafe fn release(handle: Self::Handle) -> Self::Output {
                #[allow(unused_unsafe)]
                unsafe {
                    $func(handle)
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    thread_local! {
        static RELEASED: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };
    }

    fn record(name: u32) {
        RELEASED.with(|r| r.borrow_mut().push(name));
    }

    fn released() -> Vec<u32> {
        RELEASED.with(|r| r.borrow_mut().drain(..).collect())
    }

    crate::release_fn!(Record(u32) = record);

    #[test]
    fn test_static_deleter_skips_null() {
        let deleter = StaticDeleter::<Record>::new();
        unsafe { deleter.call(0) };
        assert!(released().is_empty());

        unsafe { deleter.call(3) };
        assert_eq!(released(), vec![3]);
    }

    #[test]
    fn test_plain_deleter_always_calls() {
        let deleter = PlainDeleter::<Record>::new();
        unsafe {
            deleter.call(0);
            deleter.call(9);
        }
        assert_eq!(released(), vec![0, 9]);
    }

    #[test]
    fn test_release_calls_bound_function() {
        unsafe { Record::release(7) };
        assert_eq!(released(), vec![7]);
    }

    #[test]
    fn test_delete_goes_through_storage() {
        let deleter = StaticDeleter::<Record>::default();
        unsafe {
            deleter.delete(Storage::<Record>::from(0u32));
            deleter.delete(Storage::<Record>::from(4u32));
        }
        assert_eq!(released(), vec![4]);
    }

    #[test]
    fn test_deleters_are_zero_sized() {
        assert_eq!(std::mem::size_of::<StaticDeleter<Record>>(), 0);
        assert_eq!(std::mem::size_of::<PlainDeleter<Record>>(), 0);
        assert_eq!(std::mem::size_of::<Record>(), 0);
    }
}
