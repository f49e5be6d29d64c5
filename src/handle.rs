//! Single-owner wrapper for foreign resource handles.

use std::any::type_name;
use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ptr;

use crate::deleter::{Deleter, Release, StaticDeleter, Storage};
use crate::detect::NullablePointer;
use crate::error::{Error, Result};
use crate::nullable::AsNullable;

/// Owns at most one foreign handle and releases it exactly once.
///
/// Acquisition is the caller's job: hand the raw value from the foreign
/// API to [`Handle::from_raw`] right away, with nothing fallible in
/// between. From then on the release function of `R` runs exactly once for
/// a non-null value, when the handle is dropped, reset, or replaced. It
/// never runs for the null value.
///
/// The handle is as large as the raw value; the deleter is zero-sized.
///
/// # Example
///
/// ```
/// use owned_handle::{release_fn, Handle};
///
/// fn destroy_window(id: u32) {
///     println!("destroying window {id}");
/// }
///
/// release_fn!(DestroyWindow(u32) = destroy_window);
/// type Window = Handle<DestroyWindow>;
///
/// let window = unsafe { Window::from_raw(7) };
/// assert_eq!(window.get(), 7);
/// // `destroy_window(7)` runs here.
/// ```
pub struct Handle<R: Release, D: Deleter<Release = R> = StaticDeleter<R>> {
    storage: Storage<R>,
    deleter: D,
}

impl<R: Release, D: Deleter<Release = R>> Handle<R, D> {
    /// A handle that owns nothing.
    #[inline]
    pub fn null() -> Self {
        Self {
            storage: <Storage<R> as NullablePointer>::NULL,
            deleter: D::default(),
        }
    }

    /// Take ownership of `raw`.
    ///
    /// # Safety
    ///
    /// `raw` must be null, or a live resource that nothing else owns or will
    /// release. It is released through `R` when this handle goes away.
    #[inline]
    pub unsafe fn from_raw(raw: R::Handle) -> Self {
        Self {
            storage: Self::to_storage(raw),
            deleter: D::default(),
        }
    }

    /// Take ownership of `raw`, rejecting the null value.
    ///
    /// Use this right after a foreign acquisition call that signals failure
    /// by returning null.
    ///
    /// # Safety
    ///
    /// Same contract as [`Handle::from_raw`].
    pub unsafe fn try_from_raw(raw: R::Handle) -> Result<Self> {
        let handle = Self::from_raw(raw);
        if handle.is_null() {
            log::debug!("{} acquisition returned null", type_name::<R>());
            return Err(Error::InvalidHandle(type_name::<R::Handle>()));
        }
        Ok(handle)
    }

    /// The raw handle, for passing into the foreign API.
    ///
    /// Ownership stays with `self`; do not release the returned value.
    #[inline]
    pub fn get(&self) -> R::Handle {
        <R::Handle as AsNullable<R::Sentinel>>::from_storage(self.storage)
    }

    /// Alias of [`Handle::get`].
    #[inline]
    pub fn as_raw(&self) -> R::Handle {
        self.get()
    }

    /// Returns `true` if nothing is owned.
    #[inline]
    pub fn is_null(&self) -> bool {
        NullablePointer::is_null(&self.storage)
    }

    /// Returns `true` if a resource is owned.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_null()
    }

    /// Release the owned resource now and become null.
    pub fn reset(&mut self) {
        let old = mem::replace(&mut self.storage, <Storage<R> as NullablePointer>::NULL);
        self.dispose(old);
    }

    /// Take ownership of `raw`, releasing the previously owned resource.
    ///
    /// # Safety
    ///
    /// Same contract as [`Handle::from_raw`].
    pub unsafe fn reset_to(&mut self, raw: R::Handle) {
        let old = mem::replace(&mut self.storage, Self::to_storage(raw));
        self.dispose(old);
    }

    /// Move the owned resource out, leaving this handle null.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::null())
    }

    /// Exchange the resources owned by two handles.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.storage, &mut other.storage);
    }

    /// Give up ownership without releasing.
    ///
    /// The caller becomes responsible for releasing the returned value.
    #[must_use = "the returned handle is no longer released automatically"]
    pub fn into_raw(self) -> R::Handle {
        let (storage, _deleter) = self.into_parts();
        <R::Handle as AsNullable<R::Sentinel>>::from_storage(storage)
    }

    /// Release the owned resource and return what the release function
    /// returned, or `None` if nothing was owned.
    ///
    /// Dropping a handle discards that value; `close` is the way to observe
    /// a failing release.
    pub fn close(self) -> Option<R::Output> {
        let (storage, _deleter) = self.into_parts();
        if NullablePointer::is_null(&storage) {
            return None;
        }
        log::trace!("closing {} {:?}", type_name::<R>(), storage);
        // SAFETY: `storage` was owned by `self`, which is consumed.
        Some(unsafe { R::release(<R::Handle as AsNullable<R::Sentinel>>::from_storage(storage)) })
    }

    #[inline]
    fn to_storage(raw: R::Handle) -> Storage<R> {
        <R::Handle as AsNullable<R::Sentinel>>::into_storage(raw)
    }

    fn dispose(&self, storage: Storage<R>) {
        if !NullablePointer::is_null(&storage) {
            log::trace!("releasing {} {:?}", type_name::<R>(), storage);
            // SAFETY: callers pass storage this handle owned and will not
            // release again.
            unsafe { self.deleter.delete(storage) };
        }
    }

    fn into_parts(self) -> (Storage<R>, D) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the deleter is read out once.
        let deleter = unsafe { ptr::read(&this.deleter) };
        (this.storage, deleter)
    }
}

impl<R: Release, D: Deleter<Release = R>> Drop for Handle<R, D> {
    fn drop(&mut self) {
        self.dispose(self.storage);
    }
}

impl<R: Release, D: Deleter<Release = R>> Default for Handle<R, D> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<R: Release, D: Deleter<Release = R>> fmt::Debug for Handle<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.storage).finish()
    }
}
