//! A single-threaded, non-thread-safe dependency registry.

use crate::core::TypeKey;
use crate::error::{ResolveError, Result};
use std::any::{type_name, Any};
use std::collections::hash_map::{Entry as MapEntry, HashMap};
use std::rc::Rc;

// Local counterparts of the shared entries: `Rc` payloads, no `Send`/`Sync`.
type LocalEntry = Box<dyn Any>;
type LocalFactory = Box<dyn Fn() -> LocalEntry>;

/// A single-threaded registry with the same rules as [`Registry`](crate::Registry).
///
/// It stores `Rc` handles in plain `HashMap`s, so it can hold types that are
/// neither `Send` nor `Sync`.
///
/// # Note on API
///
/// Unlike the thread-safe `Registry`, registration methods take `&mut self`.
/// Singletons are always built eagerly; wire dependent services by resolving
/// first and moving the handles into the factory.
#[derive(Default)]
pub struct LocalRegistry {
  singletons: HashMap<TypeKey, LocalEntry>,
  factories: HashMap<TypeKey, LocalFactory>,
}

impl LocalRegistry {
  /// Creates a new, empty `LocalRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  fn insert_singleton(&mut self, key: TypeKey, build: impl FnOnce() -> LocalEntry) {
    match self.singletons.entry(key) {
      MapEntry::Vacant(vacant) => {
        vacant.insert(build());
        tracing::debug!(type_name = key.type_name(), "registered local singleton");
      }
      MapEntry::Occupied(_) => {
        tracing::debug!(type_name = key.type_name(), "local singleton already registered, ignoring");
      }
    }
  }

  // --- Singleton Registration ---
  pub fn add_singleton<T: Any>(&mut self, factory: impl FnOnce() -> T) {
    self.insert_singleton(TypeKey::of::<T>(), || -> LocalEntry {
      Box::new(Rc::new(factory()))
    });
  }

  pub fn add_instance<T: Any>(&mut self, instance: T) {
    self.add_singleton(move || instance);
  }

  pub fn add_singleton_trait<I: ?Sized + Any>(&mut self, factory: impl FnOnce() -> Rc<I>) {
    self.insert_singleton(TypeKey::of::<I>(), || -> LocalEntry { Box::new(factory()) });
  }

  // --- Factory Registration ---
  pub fn add_factory<T: Any>(&mut self, factory: impl Fn() -> T + 'static) {
    self
      .factories
      .insert(TypeKey::of::<T>(), Box::new(move || -> LocalEntry {
        Box::new(Rc::new(factory()))
      }));
  }

  pub fn add_factory_trait<I: ?Sized + Any>(&mut self, factory: impl Fn() -> Rc<I> + 'static) {
    self
      .factories
      .insert(TypeKey::of::<I>(), Box::new(move || -> LocalEntry { Box::new(factory()) }));
  }

  // --- Resolution ---

  /// Resolves `T`, returning `None` when nothing is registered for it.
  pub fn get<T: ?Sized + Any>(&self) -> Option<Rc<T>> {
    let key = TypeKey::of::<T>();

    let singleton = self
      .singletons
      .get(&key)
      .and_then(|entry| entry.downcast_ref::<Rc<T>>())
      .cloned();
    if singleton.is_some() {
      return singleton;
    }

    self
      .factories
      .get(&key)
      .and_then(|factory| factory().downcast::<Rc<T>>().ok())
      .map(|rc_in_a_box| *rc_in_a_box)
  }

  pub fn try_resolve<T: ?Sized + Any>(&self) -> Result<Rc<T>> {
    self.get::<T>().ok_or(ResolveError::Unresolved {
      type_name: type_name::<T>(),
    })
  }

  /// Resolves a required dependency.
  ///
  /// # Panics
  ///
  /// Panics if neither a singleton nor a factory is registered for `T`.
  #[track_caller]
  pub fn resolve<T: ?Sized + Any>(&self) -> Rc<T> {
    match self.try_resolve::<T>() {
      Ok(instance) => instance,
      Err(err) => panic!("Failed to resolve required dependency: {}", err.type_name()),
    }
  }

  pub fn contains<T: ?Sized + Any>(&self) -> bool {
    let key = TypeKey::of::<T>();
    self.singletons.contains_key(&key) || self.factories.contains_key(&key)
  }

  pub fn len(&self) -> usize {
    self.singletons.len() + self.factories.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Removes every singleton and factory.
  pub fn reset(&mut self) {
    tracing::debug!(
      singletons = self.singletons.len(),
      factories = self.factories.len(),
      "local registry reset"
    );
    self.singletons.clear();
    self.factories.clear();
  }
}
