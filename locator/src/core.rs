//! Core data structures shared by the registries.

use once_cell::sync::OnceCell;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies a registered type at runtime.
///
/// A key is derived from a type, never from a value. Two keys built for the
/// same type are always equal, and keys for different types never collide.
/// The type name is carried along for diagnostics only and takes no part in
/// equality or hashing.
#[derive(Clone, Copy)]
pub(crate) struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  /// Returns the key for `T`. Unsized types such as `dyn Trait` are allowed.
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  /// The fully qualified name of the type this key was built from.
  pub fn type_name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

/// A type-erased instance as held by the stores.
///
/// The payload is always an `Arc<T>` boxed as `dyn Any`, so it can be handed
/// back out by cloning the `Arc` after a checked downcast.
pub(crate) struct Entry {
  value: Box<dyn Any + Send + Sync>,
}

impl Entry {
  pub(crate) fn new<T: ?Sized + Any + Send + Sync>(instance: Arc<T>) -> Self {
    Self {
      value: Box::new(instance),
    }
  }

  /// Clones the shared instance out if the entry really holds an `Arc<T>`.
  pub(crate) fn shared<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.value.downcast_ref::<Arc<T>>().cloned()
  }

  /// Consumes a freshly produced entry, yielding the `Arc<T>` it holds.
  pub(crate) fn into_owned<T: ?Sized + Any + Send + Sync>(self) -> Option<Arc<T>> {
    self.value.downcast::<Arc<T>>().ok().map(|boxed| *boxed)
  }
}

pub(crate) type FactoryFn = dyn Fn() -> Entry + Send + Sync;

/// One occupied key in the singleton store.
///
/// An eager slot is reserved empty under the registry's write lock and then
/// filled by the registering thread alone, so a racing registration for the
/// same key finds it occupied and never runs its own factory. Until it is
/// filled, resolution treats the slot as absent. Lazy slots carry an
/// initialiser that runs on first resolution; `OnceCell` makes sure it runs
/// at most once even if several threads race for it.
pub(crate) struct SingletonSlot {
  cell: OnceCell<Entry>,
  init: Option<Box<FactoryFn>>,
}

impl SingletonSlot {
  pub(crate) fn pending() -> Self {
    Self {
      cell: OnceCell::new(),
      init: None,
    }
  }

  pub(crate) fn lazy(init: Box<FactoryFn>) -> Self {
    Self {
      cell: OnceCell::new(),
      init: Some(init),
    }
  }

  /// Returns the materialised instance, running a lazy initialiser if needed.
  ///
  /// Must not be called while the registry lock is held: the initialiser is
  /// user code and may resolve other dependencies.
  pub(crate) fn instance(&self) -> Option<&Entry> {
    match &self.init {
      Some(init) => Some(self.cell.get_or_init(|| init())),
      None => self.cell.get(),
    }
  }

  /// Fills a pending slot. Only the thread that reserved the slot calls this.
  pub(crate) fn fill(&self, build: impl FnOnce() -> Entry) {
    self.cell.get_or_init(build);
  }

  pub(crate) fn is_filled(&self) -> bool {
    self.cell.get().is_some()
  }

  pub(crate) fn is_lazy(&self) -> bool {
    self.init.is_some()
  }
}
