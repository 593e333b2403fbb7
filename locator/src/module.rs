//! Registration modules: named, deferred bundles of registrations.

use crate::registry::Registry;
use std::any::type_name;
use std::borrow::Cow;
use std::fmt;

/// A unit of registrations that can be loaded into a [`Registry`].
///
/// Loading runs the module's registrations immediately. A module may resolve
/// dependencies registered before it, which is how services get wired
/// together by hand.
pub trait Module {
  /// A human readable name, used in logs. Defaults to the implementing type's
  /// name.
  fn name(&self) -> &str {
    type_name::<Self>()
  }

  /// Registers this module's dependencies into `registry`.
  fn load(&self, registry: &Registry);
}

impl<M: Module + ?Sized> Module for Box<M> {
  fn name(&self) -> &str {
    (**self).name()
  }

  fn load(&self, registry: &Registry) {
    (**self).load(registry)
  }
}

impl<M: Module + ?Sized> Module for &M {
  fn name(&self) -> &str {
    (**self).name()
  }

  fn load(&self, registry: &Registry) {
    (**self).load(registry)
  }
}

/// A module backed by a registration callback.
pub struct FnModule {
  name: Cow<'static, str>,
  register: Box<dyn Fn(&Registry) + Send + Sync>,
}

impl FnModule {
  pub fn new(
    name: impl Into<Cow<'static, str>>,
    register: impl Fn(&Registry) + Send + Sync + 'static,
  ) -> Self {
    Self {
      name: name.into(),
      register: Box::new(register),
    }
  }

  /// Boxes the module so it can sit in a list next to other module kinds.
  pub fn boxed(self) -> Box<dyn Module + Send + Sync> {
    Box::new(self)
  }
}

impl Module for FnModule {
  fn name(&self) -> &str {
    &self.name
  }

  fn load(&self, registry: &Registry) {
    (self.register)(registry)
  }
}

impl fmt::Debug for FnModule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FnModule").field("name", &self.name).finish()
  }
}

/// Creates a module from a registration callback.
///
/// The callback does not run until the module is loaded.
///
/// # Examples
///
/// ```
/// use fibre_locator::{module, Registry};
///
/// struct Config {
///   url: &'static str,
/// }
///
/// let config = module("config", |registry| {
///   registry.add_singleton(|| Config { url: "postgres://localhost" });
/// });
///
/// let registry = Registry::new();
/// assert!(registry.get::<Config>().is_none());
///
/// registry.load_modules([config]);
/// assert_eq!(registry.resolve::<Config>().url, "postgres://localhost");
/// ```
pub fn module(
  name: impl Into<Cow<'static, str>>,
  register: impl Fn(&Registry) + Send + Sync + 'static,
) -> FnModule {
  FnModule::new(name, register)
}
