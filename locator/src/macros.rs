//! Public macros for ergonomic dependency resolution.

/// Resolves a dependency from a given registry, returning an `Option<Arc<T>>`.
///
/// # Examples
///
/// ```
/// use fibre_locator::{maybe_resolve_from, Registry};
///
/// let registry = Registry::new();
/// registry.add_instance(7_u16);
///
/// assert_eq!(*maybe_resolve_from!(&registry, u16).unwrap(), 7);
/// assert!(maybe_resolve_from!(&registry, u32).is_none());
/// ```
#[macro_export]
macro_rules! maybe_resolve_from {
  ($registry:expr, trait $trait_ident:ident) => {
    $registry.get::<dyn $trait_ident>()
  };
  ($registry:expr, $type:ty) => {
    $registry.get::<$type>()
  };
}

/// Resolves a dependency from a given registry, panicking if it is missing.
///
/// # Panics
///
/// Panics with a message naming the requested type when nothing is
/// registered for it.
#[macro_export]
macro_rules! resolve_from {
  ($registry:expr, trait $trait_ident:ident) => {
    $registry.resolve::<dyn $trait_ident>()
  };
  ($registry:expr, $type:ty) => {
    $registry.resolve::<$type>()
  };
}

/// Resolves a dependency from the global registry, returning an
/// `Option<Arc<T>>`.
///
/// # Examples
///
/// ```
/// use fibre_locator::maybe_resolve;
///
/// struct NeverRegistered;
/// assert!(maybe_resolve!(NeverRegistered).is_none());
/// ```
#[macro_export]
macro_rules! maybe_resolve {
  (trait $trait_ident:ident) => {
    $crate::maybe_resolve_from!($crate::global(), trait $trait_ident)
  };
  ($type:ty) => {
    $crate::maybe_resolve_from!($crate::global(), $type)
  };
}

/// Resolves a dependency from the global registry, panicking if it is
/// missing.
///
/// # Examples
///
/// ```
/// use fibre_locator::{global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().add_singleton_trait::<dyn Greeter>(|| Arc::new(EnglishGreeter));
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  (trait $trait_ident:ident) => {
    $crate::resolve_from!($crate::global(), trait $trait_ident)
  };
  ($type:ty) => {
    $crate::resolve_from!($crate::global(), $type)
  };
}
