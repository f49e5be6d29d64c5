//! Scope-bound cleanup guards.
//!
//! For lifecycles that are not a single handle value: a subsystem that was
//! initialised and must be shut down once, or a begin/end pair in an
//! immediate-mode API.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

/// A niladic cleanup function bound at compile time.
///
/// Usually declared with [`cleanup_fn!`](crate::cleanup_fn).
pub trait Cleanup {
    /// Run the cleanup.
    fn cleanup();
}

/// Runs `C::cleanup()` exactly once, when the guard goes out of scope.
///
/// The call happens on every exit path: fall-through, early `return`, `?`
/// and panic unwinding. There is no way to disarm the guard.
///
/// ```
/// use owned_handle::{cleanup_fn, ScopeCleanup};
///
/// fn end_frame() {}
/// cleanup_fn!(EndFrame = end_frame);
///
/// {
///     let _frame = ScopeCleanup::<EndFrame>::new();
///     // draw...
/// } // `end_frame()` runs here.
/// ```
#[must_use = "the cleanup runs as soon as the guard is dropped"]
pub struct ScopeCleanup<C: Cleanup> {
    cleanup: PhantomData<fn() -> C>,
}

impl<C: Cleanup> ScopeCleanup<C> {
    /// Arm the guard.
    #[inline]
    pub const fn new() -> Self {
        Self {
            cleanup: PhantomData,
        }
    }
}

impl<C: Cleanup> Default for ScopeCleanup<C> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cleanup> Drop for ScopeCleanup<C> {
    fn drop(&mut self) {
        log::trace!("scope cleanup {}", type_name::<C>());
        C::cleanup();
    }
}

impl<C: Cleanup> fmt::Debug for ScopeCleanup<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeCleanup<{}>", type_name::<C>())
    }
}

/// Runs a closure exactly once, when the guard goes out of scope.
#[must_use = "the closure runs as soon as the guard is dropped"]
pub struct Defer<F: FnOnce()> {
    f: Option<F>,
}

impl<F: FnOnce()> Drop for Defer<F> {
    fn drop(&mut self) {
        if let Some(f) = self.f.take() {
            f();
        }
    }
}

impl<F: FnOnce()> fmt::Debug for Defer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defer").finish_non_exhaustive()
    }
}

/// Run `f` when the returned guard goes out of scope.
///
/// ```
/// use std::cell::Cell;
///
/// let done = Cell::new(false);
/// {
///     let _guard = owned_handle::on_exit(|| done.set(true));
///     assert!(!done.get());
/// }
/// assert!(done.get());
/// ```
#[inline]
pub fn on_exit<F: FnOnce()>(f: F) -> Defer<F> {
    Defer { f: Some(f) }
}

/// Declare a zero-sized [`Cleanup`] for a niladic function.
///
/// An `unsafe` function must be bound with the `unsafe` marker. It asserts
/// that calling the function is sound whenever a guard is dropped.
///
/// ```
/// use owned_handle::cleanup_fn;
///
/// fn end_frame() {}
/// unsafe extern "C" fn shutdown() {}
///
/// cleanup_fn!(EndFrame = end_frame);
/// cleanup_fn!(pub Shutdown = unsafe shutdown);
/// ```
///
/// Without the marker, an `unsafe` function is rejected:
///
/// ```compile_fail,E0133
/// use owned_handle::cleanup_fn;
///
/// unsafe extern "C" fn shutdown() {}
/// cleanup_fn!(Shutdown = shutdown);
/// ```
#[macro_export]
macro_rules! cleanup_fn {
    (@define $(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = unsafe $func:path $(,)?) => {
        $crate::cleanup_fn!(@define $(#[$meta])* $vis $name);

        impl $crate::Cleanup for $name {
            #[inline]
            fn cleanup() {
                // SAFETY: asserted by the `unsafe` marker at the binding.
                unsafe {
                    let _ = $func();
                }
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = $func:path $(,)?) => {
        $crate::cleanup_fn!(@define $(#[$meta])* $vis $name);

        impl $crate::Cleanup for $name {
            #[inline]
            fn cleanup() {
                let _ = $func();
            }
        }
    };
}
