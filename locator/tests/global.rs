//! Tests for the process-wide registry and the resolution macros.
//!
//! Every test here shares the global registry, so they run serially and
//! restart it on the way out.

use fibre_locator::{
  global, maybe_resolve, maybe_resolve_from, module, resolve, resolve_from, resolve_optional,
  restart, start, Registry,
};
use serial_test::serial;
use std::sync::Arc;
use std::thread;

// --- Test Fixtures ---

trait PrintsSomething: Send + Sync {
  fn print_something(&self) -> String;
}

struct A {
  name: &'static str,
}

impl A {
  fn do_something(&self) -> String {
    format!("{} doing something", self.name)
  }
}

struct B {
  greeting: String,
}

impl PrintsSomething for B {
  fn print_something(&self) -> String {
    self.greeting.clone()
  }
}

struct C {
  a: Option<Arc<A>>,
  b: Option<Arc<dyn PrintsSomething>>,
}

struct Unregistered;

/// Starts the global registry with the fixture module and restarts it when
/// dropped, so a failing assertion cannot leak state into the next test.
struct Started;

impl Started {
  fn new() -> Self {
    let fixtures = module("fixtures", |registry| {
      registry.add_factory_trait::<dyn PrintsSomething>(|| {
        Arc::new(B {
          greeting: "Something".to_string(),
        })
      });
      registry.add_singleton(|| A { name: "a" });
      registry.add_singleton(|| C {
        a: registry.get(),
        b: registry.get(),
      });
    });
    start([fixtures]);
    Started
  }
}

impl Drop for Started {
  fn drop(&mut self) {
    restart();
  }
}

// --- Facade Tests ---

#[test]
#[serial]
fn test_register_dependencies() {
  let _started = Started::new();

  let c = resolve_optional::<C>().expect("C should be registered");
  assert!(c.a.is_some());
  assert!(c.b.is_some());
  assert!(Arc::ptr_eq(c.a.as_ref().unwrap(), &resolve::<A>()));
}

#[test]
#[serial]
fn test_singleton() {
  let _started = Started::new();

  let a = resolve_optional::<A>().unwrap();
  let a2 = resolve_optional::<A>().unwrap();
  assert!(Arc::ptr_eq(&a, &a2));
}

#[test]
#[serial]
fn test_factory() {
  let _started = Started::new();

  let b = resolve_optional::<dyn PrintsSomething>().unwrap();
  let b2 = resolve_optional::<dyn PrintsSomething>().unwrap();
  assert!(!Arc::ptr_eq(&b, &b2));
  assert_eq!(b.print_something(), b2.print_something());
}

#[test]
#[serial]
fn test_resolve() {
  let _started = Started::new();

  let b = resolve::<dyn PrintsSomething>();
  assert_eq!(b.print_something(), "Something");
  let a = resolve::<A>();
  assert_eq!(a.do_something(), "a doing something");
}

#[test]
#[serial]
fn test_restart() {
  let _started = Started::new();
  assert!(resolve_optional::<A>().is_some());

  restart();

  assert!(resolve_optional::<A>().is_none());
  assert!(resolve_optional::<C>().is_none());
  assert!(resolve_optional::<dyn PrintsSomething>().is_none());
  assert!(global().is_empty());
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required dependency")]
fn test_resolve_after_restart_panics() {
  let _started = Started::new();
  restart();
  resolve::<A>();
}

#[test]
#[serial]
fn test_resolution_before_start_behaves_as_empty() {
  // No module ever registers this type, so the registry is empty for it
  // whatever the other tests have started.
  struct NeverStarted;

  assert!(resolve_optional::<NeverStarted>().is_none());
  assert!(maybe_resolve!(NeverStarted).is_none());
  assert!(global().try_resolve::<NeverStarted>().is_err());
}

#[test]
#[serial]
fn test_resolution_after_restart_behaves_as_empty() {
  let started = Started::new();
  assert!(resolve_optional::<A>().is_some());

  // Dropping the guard restarts the global registry.
  drop(started);
  assert!(resolve_optional::<A>().is_none());
  assert!(global().try_resolve::<A>().is_err());
}

#[test]
#[serial]
fn test_dependency_resolution_in_multiple_threads() {
  let _started = Started::new();

  thread::scope(|s| {
    for _ in 0..10 {
      s.spawn(|| {
        let b = resolve::<dyn PrintsSomething>();
        assert_eq!(b.print_something(), "Something");

        let a = resolve::<A>();
        assert_eq!(a.do_something(), "a doing something");
      });
    }
  });
}

// --- Macro Tests ---

#[test]
#[serial]
fn test_maybe_resolve_global() {
  let _started = Started::new();

  assert_eq!(maybe_resolve!(A).unwrap().name, "a");
  assert_eq!(
    maybe_resolve!(trait PrintsSomething).unwrap().print_something(),
    "Something"
  );

  assert!(maybe_resolve!(Unregistered).is_none());
  trait MissingTrait: Send + Sync {}
  assert!(maybe_resolve!(trait MissingTrait).is_none());
}

#[test]
#[serial]
fn test_resolve_global() {
  let _started = Started::new();

  assert_eq!(resolve!(A).name, "a");
  assert_eq!(resolve!(trait PrintsSomething).print_something(), "Something");
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required dependency")]
fn test_resolve_macro_panics_on_missing() {
  resolve!(Unregistered);
}

#[test]
fn test_macros_with_custom_registry() {
  let registry = Registry::new();
  registry.add_singleton(|| A { name: "custom" });
  registry.add_factory_trait::<dyn PrintsSomething>(|| {
    Arc::new(B {
      greeting: "custom greeting".to_string(),
    })
  });

  assert_eq!(maybe_resolve_from!(&registry, A).unwrap().name, "custom");
  assert!(maybe_resolve_from!(&registry, Unregistered).is_none());
  assert_eq!(
    resolve_from!(&registry, trait PrintsSomething).print_something(),
    "custom greeting"
  );
  assert_eq!(resolve_from!(&registry, A).name, "custom");
}

#[test]
fn test_custom_registry_is_isolated_from_global() {
  struct IsolatedMarker;

  let registry = Registry::new();
  registry.add_instance(IsolatedMarker);

  assert!(registry.contains::<IsolatedMarker>());
  assert!(resolve_optional::<IsolatedMarker>().is_none());
}
