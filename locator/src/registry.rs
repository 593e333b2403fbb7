//! The thread-safe `Registry` and its registration and resolution methods.

use crate::core::{Entry, FactoryFn, SingletonSlot, TypeKey};
use crate::error::{ResolveError, Result};
use crate::module::Module;
use parking_lot::RwLock;
use std::any::{type_name, Any};
use std::collections::hash_map::{Entry as MapEntry, HashMap};
use std::fmt;
use std::mem;
use std::sync::Arc;

#[derive(Default)]
struct Stores {
  singletons: HashMap<TypeKey, Arc<SingletonSlot>>,
  factories: HashMap<TypeKey, Arc<FactoryFn>>,
}

/// An RAII guard over a reserved singleton slot.
///
/// If the factory filling the slot panics, dropping the guard removes the
/// still-empty slot so the key can be registered again.
struct Reservation<'a> {
  stores: &'a RwLock<Stores>,
  key: TypeKey,
  slot: Arc<SingletonSlot>,
}

impl Drop for Reservation<'_> {
  fn drop(&mut self) {
    if self.slot.is_filled() {
      return;
    }
    let mut stores = self.stores.write();
    // A reset may have dropped the reservation and let someone else take the key.
    if let MapEntry::Occupied(occupied) = stores.singletons.entry(self.key) {
      if Arc::ptr_eq(occupied.get(), &self.slot) {
        occupied.remove();
        tracing::debug!(type_name = self.key.type_name(), "singleton factory failed, slot released");
      }
    }
  }
}

/// A type-keyed dependency registry.
///
/// Every type is served either by a singleton (one shared instance for the
/// registry's lifetime) or by a factory (a new instance per resolution). When
/// both exist for a type, the singleton wins.
///
/// Both stores sit behind a single lock, so a resolution always sees either
/// the complete registration for a key or none of it. User closures never run
/// while that lock is held, which means a factory can resolve the
/// dependencies it needs from the same registry.
#[derive(Default)]
pub struct Registry {
  stores: RwLock<Stores>,
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn insert_singleton(&self, key: TypeKey, build: impl FnOnce() -> Entry) {
    // Reserve the key before building so a racing registration sees it taken
    // and never runs its own factory.
    let slot = match self.stores.write().singletons.entry(key) {
      MapEntry::Vacant(vacant) => vacant.insert(Arc::new(SingletonSlot::pending())).clone(),
      MapEntry::Occupied(_) => {
        tracing::debug!(type_name = key.type_name(), "singleton already registered, ignoring");
        return;
      }
    };

    let reservation = Reservation {
      stores: &self.stores,
      key,
      slot,
    };
    reservation.slot.fill(build);
    tracing::debug!(type_name = key.type_name(), "registered singleton");
  }

  fn insert_lazy_singleton(&self, key: TypeKey, init: Box<FactoryFn>) {
    let rejected = {
      let mut stores = self.stores.write();
      match stores.singletons.entry(key) {
        MapEntry::Vacant(vacant) => {
          vacant.insert(Arc::new(SingletonSlot::lazy(init)));
          None
        }
        MapEntry::Occupied(_) => Some(init),
      }
    };

    match rejected {
      None => tracing::debug!(type_name = key.type_name(), "registered lazy singleton"),
      Some(_) => tracing::debug!(type_name = key.type_name(), "singleton already registered, ignoring"),
    }
  }

  fn insert_factory(&self, key: TypeKey, factory: Arc<FactoryFn>) {
    let previous = self.stores.write().factories.insert(key, factory);
    tracing::debug!(
      type_name = key.type_name(),
      replaced = previous.is_some(),
      "registered factory"
    );
  }

  // --- PUBLIC API ---

  // --- Singleton Registration ---

  /// Registers a singleton for `T`, built right away by `factory`.
  ///
  /// If `T` already has a singleton the call does nothing and `factory` is
  /// never invoked: the first registration wins. The key is reserved before
  /// `factory` runs, so concurrent registrations for `T` invoke exactly one
  /// factory. While it runs, `T` resolves as if no singleton were registered.
  /// If `factory` panics the reservation is released.
  pub fn add_singleton<T: Any + Send + Sync>(&self, factory: impl FnOnce() -> T) {
    self.insert_singleton(TypeKey::of::<T>(), || Entry::new(Arc::new(factory())));
  }

  /// Registers an already constructed value as the singleton for `T`.
  pub fn add_instance<T: Any + Send + Sync>(&self, instance: T) {
    self.add_singleton(move || instance);
  }

  /// Registers a singleton served as the abstract type `I`, usually a
  /// `dyn Trait`.
  pub fn add_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl FnOnce() -> Arc<I>,
  ) {
    self.insert_singleton(TypeKey::of::<I>(), || Entry::new(factory()));
  }

  /// Registers a singleton for `T` that is built on its first resolution.
  ///
  /// The factory runs at most once, even when several threads resolve `T`
  /// for the first time concurrently. A factory that resolves its own type
  /// deadlocks.
  pub fn add_lazy_singleton<T: Any + Send + Sync>(
    &self,
    factory: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.insert_lazy_singleton(
      TypeKey::of::<T>(),
      Box::new(move || Entry::new(Arc::new(factory()))),
    );
  }

  pub fn add_lazy_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.insert_lazy_singleton(TypeKey::of::<I>(), Box::new(move || Entry::new(factory())));
  }

  // --- Factory Registration ---

  /// Registers a factory for `T`, replacing any previous factory for it.
  pub fn add_factory<T: Any + Send + Sync>(&self, factory: impl Fn() -> T + Send + Sync + 'static) {
    self.insert_factory(
      TypeKey::of::<T>(),
      Arc::new(move || Entry::new(Arc::new(factory()))),
    );
  }

  pub fn add_factory_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.insert_factory(TypeKey::of::<I>(), Arc::new(move || Entry::new(factory())));
  }

  // --- Resolution ---

  /// Resolves `T`, returning `None` when nothing is registered for it.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    let key = TypeKey::of::<T>();

    // Take both candidates under one lock so precedence is decided against a
    // single consistent view of the stores.
    let (slot, factory) = {
      let stores = self.stores.read();
      (
        stores.singletons.get(&key).cloned(),
        stores.factories.get(&key).cloned(),
      )
    };

    if let Some(slot) = slot {
      if let Some(instance) = slot.instance().and_then(Entry::shared::<T>) {
        let source = if slot.is_lazy() { "lazy singleton" } else { "singleton" };
        tracing::trace!(type_name = key.type_name(), source, "resolved dependency");
        return Some(instance);
      }
    }

    if let Some(instance) = factory.and_then(|factory| factory().into_owned::<T>()) {
      tracing::trace!(type_name = key.type_name(), source = "factory", "resolved dependency");
      return Some(instance);
    }

    tracing::trace!(type_name = key.type_name(), "dependency not registered");
    None
  }

  /// Resolves `T`, reporting a missing registration as an error.
  pub fn try_resolve<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.get::<T>().ok_or(ResolveError::Unresolved {
      type_name: type_name::<T>(),
    })
  }

  /// Resolves a required dependency.
  ///
  /// # Panics
  ///
  /// Panics if neither a singleton nor a factory is registered for `T`. A
  /// missing required dependency is a wiring mistake, not a runtime
  /// condition to recover from. Use [`Registry::get`] when absence is
  /// expected.
  #[track_caller]
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self) -> Arc<T> {
    match self.try_resolve::<T>() {
      Ok(instance) => instance,
      Err(err) => panic!("Failed to resolve required dependency: {}", err.type_name()),
    }
  }

  // --- Introspection ---

  /// Returns `true` if `T` has a singleton or a factory registered.
  pub fn contains<T: ?Sized + Any>(&self) -> bool {
    let key = TypeKey::of::<T>();
    let stores = self.stores.read();
    stores.singletons.contains_key(&key) || stores.factories.contains_key(&key)
  }

  /// The number of registrations across both stores.
  pub fn len(&self) -> usize {
    let stores = self.stores.read();
    stores.singletons.len() + stores.factories.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  // --- Lifecycle ---

  /// Loads modules into this registry, one after another in iteration order.
  ///
  /// A later module may replace factories registered by an earlier one, but
  /// never its singletons.
  pub fn load_modules<I>(&self, modules: I)
  where
    I: IntoIterator,
    I::Item: Module,
  {
    for module in modules {
      tracing::debug!(module = module.name(), "loading module");
      module.load(self);
    }
  }

  /// Removes every singleton and factory.
  ///
  /// Instances already handed out stay alive for as long as their holders
  /// keep them; the registry only drops its own references.
  pub fn reset(&self) {
    let (singletons, factories) = {
      let mut stores = self.stores.write();
      (
        mem::take(&mut stores.singletons),
        mem::take(&mut stores.factories),
      )
    };
    tracing::debug!(
      singletons = singletons.len(),
      factories = factories.len(),
      "registry reset"
    );
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let stores = self.stores.read();
    f.debug_struct("Registry")
      .field("singletons", &stores.singletons.keys().collect::<Vec<_>>())
      .field("factories", &stores.factories.keys().collect::<Vec<_>>())
      .finish()
  }
}
