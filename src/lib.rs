//! Zero-overhead single-owner wrappers for foreign resource handles.
//!
//! Low-level platform and hardware APIs hand out opaque handles (window and
//! context pointers, GPU object names, file descriptors) and expect a
//! matching release call later. This crate binds the two together: the raw
//! value goes into a [`Handle`] straight after acquisition, and the release
//! function runs exactly once, only for a non-null value, on every exit
//! path.
//!
//! The release function is bound at compile time through a zero-sized
//! [`Release`] strategy, so a [`Handle`] is exactly as large as the raw
//! value and releasing it is a direct call.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//!
//! use owned_handle::{cleanup_fn, release_fn, Handle, ScopeCleanup};
//!
//! thread_local! {
//!     static LOG: RefCell<Vec<String>> = RefCell::new(Vec::new());
//! }
//!
//! fn destroy_context(id: u32) {
//!     LOG.with(|l| l.borrow_mut().push(format!("destroy {id}")));
//! }
//!
//! fn shutdown() {
//!     LOG.with(|l| l.borrow_mut().push("shutdown".to_string()));
//! }
//!
//! release_fn!(DestroyContext(u32) = destroy_context);
//! cleanup_fn!(Shutdown = shutdown);
//!
//! type Context = Handle<DestroyContext>;
//!
//! {
//!     let _subsystem = ScopeCleanup::<Shutdown>::new();
//!     let context = unsafe { Context::from_raw(3) };
//!     assert!(context.is_valid());
//! }
//!
//! LOG.with(|l| assert_eq!(*l.borrow(), ["destroy 3", "shutdown"]));
//! ```
//!
//! # Handle types
//!
//! Owners store a [`NullablePointer`]. Raw pointers, `Option<NonNull<T>>`
//! and [`define_handle!`] newtypes are stored as-is; plain integers are
//! stored in a [`Nullable`] with a compile-time sentinel ([`Zero`] unless
//! the release strategy picks another, such as [`MinusOne`]).

pub mod cleanup;
pub mod deleter;
pub mod detect;
pub mod error;
pub mod ffi;
pub mod handle;
pub mod nullable;

// Re-export main types at the crate root
pub use cleanup::{on_exit, Cleanup, Defer, ScopeCleanup};
pub use deleter::{Deleter, PlainDeleter, Release, StaticDeleter, Storage};
pub use detect::{Null, NullablePointer};
pub use error::{Error, Result};
pub use handle::Handle;
pub use nullable::{AsNullable, MinusOne, NullSentinel, Nullable, Scalar, Zero};
