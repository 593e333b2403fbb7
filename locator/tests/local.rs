use fibre_locator::{LocalRegistry, ResolveError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn test_local_singleton() {
  let mut registry = LocalRegistry::new();
  registry.add_singleton(|| "hello".to_string());

  let r1 = registry.get::<String>().unwrap();
  let r2 = registry.get::<String>().unwrap();

  assert_eq!(*r1, "hello");
  assert!(Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_factory() {
  let mut registry = LocalRegistry::new();
  // A Cell shows that each resolution gets its own instance.
  registry.add_factory(|| Cell::new(10));

  let r1 = registry.get::<Cell<i32>>().unwrap();
  let r2 = registry.get::<Cell<i32>>().unwrap();

  r1.set(20);

  assert_eq!(r1.get(), 20);
  assert_eq!(r2.get(), 10);
  assert!(!Rc::ptr_eq(&r1, &r2));
}

#[test]
fn test_local_registration_order_rules() {
  let mut registry = LocalRegistry::new();
  registry.add_factory(|| 1_u32);
  registry.add_factory(|| 2_u32);
  assert_eq!(*registry.resolve::<u32>(), 2);

  registry.add_singleton(|| 3_u32);
  registry.add_instance(4_u32);
  // The first singleton shadows both the factory and the later instance.
  assert_eq!(*registry.resolve::<u32>(), 3);
}

#[test]
fn test_local_trait_resolution() {
  trait Greeter {
    fn greet(&self) -> String;
  }
  struct English;
  impl Greeter for English {
    fn greet(&self) -> String {
      "Hello".to_string()
    }
  }
  struct Loud;
  impl Greeter for Loud {
    fn greet(&self) -> String {
      "HELLO".to_string()
    }
  }

  let mut registry = LocalRegistry::new();
  registry.add_factory_trait::<dyn Greeter>(|| Rc::new(Loud));
  assert_eq!(registry.resolve::<dyn Greeter>().greet(), "HELLO");

  registry.add_singleton_trait::<dyn Greeter>(|| Rc::new(English));
  assert_eq!(registry.resolve::<dyn Greeter>().greet(), "Hello");
}

#[test]
fn test_local_non_send_dependency_wiring() {
  // `Rc<RefCell<_>>` is neither Send nor Sync.
  struct EventLog {
    entries: Rc<RefCell<Vec<String>>>,
  }

  let mut registry = LocalRegistry::new();
  registry.add_instance(Rc::new(RefCell::new(Vec::<String>::new())));

  let shared = registry.resolve::<Rc<RefCell<Vec<String>>>>();
  registry.add_factory(move || EventLog {
    entries: (*shared).clone(),
  });

  registry.resolve::<EventLog>().entries.borrow_mut().push("first".into());
  registry.resolve::<EventLog>().entries.borrow_mut().push("second".into());

  let log = registry.resolve::<Rc<RefCell<Vec<String>>>>();
  assert_eq!(*log.borrow(), vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn test_local_reset_and_introspection() {
  let mut registry = LocalRegistry::new();
  registry.add_singleton(|| 1_i8);
  registry.add_factory(|| 2_i16);

  assert!(registry.contains::<i8>());
  assert!(registry.contains::<i16>());
  assert_eq!(registry.len(), 2);

  registry.reset();

  assert!(registry.is_empty());
  assert!(registry.get::<i8>().is_none());
  assert_eq!(
    registry.try_resolve::<i16>().unwrap_err(),
    ResolveError::Unresolved { type_name: "i16" }
  );
}

#[test]
#[should_panic(expected = "Failed to resolve required dependency")]
fn test_local_resolve_panics_on_missing() {
  struct Missing;
  LocalRegistry::new().resolve::<Missing>();
}
