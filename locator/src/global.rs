//! The process-wide registry and the functions that front it.
//!
//! Application code that prefers not to pass a [`Registry`] around uses this
//! one instead. It is created on first access, filled by [`start`], and
//! emptied by [`restart`]. Until `start` runs it behaves like any empty
//! registry: required resolution panics and optional resolution yields `None`.

use crate::module::Module;
use crate::registry::Registry;
use once_cell::sync::Lazy;
use std::any::Any;
use std::sync::Arc;

static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

/// Provides a reference to the global registry instance.
///
/// # Examples
///
/// ```
/// use fibre_locator::global;
///
/// global().add_instance(String::from("Hello from global!"));
/// assert_eq!(*global().resolve::<String>(), "Hello from global!");
/// ```
pub fn global() -> &'static Registry {
  &GLOBAL_REGISTRY
}

/// Loads `modules` into the global registry, in order.
pub fn start<I>(modules: I)
where
  I: IntoIterator,
  I::Item: Module,
{
  tracing::debug!("starting global registry");
  global().load_modules(modules);
}

/// Resolves a required dependency from the global registry.
///
/// # Panics
///
/// Panics if `T` is not registered.
#[track_caller]
pub fn resolve<T: ?Sized + Any + Send + Sync>() -> Arc<T> {
  global().resolve::<T>()
}

/// Resolves a dependency from the global registry, or `None` if `T` is not
/// registered.
pub fn resolve_optional<T: ?Sized + Any + Send + Sync>() -> Option<Arc<T>> {
  global().get::<T>()
}

/// Clears every registration in the global registry.
pub fn restart() {
  global().reset();
}
