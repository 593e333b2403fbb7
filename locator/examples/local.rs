use fibre_locator::LocalRegistry;
use std::cell::RefCell;
use std::rc::Rc;

// `Rc<RefCell<_>>` can't cross threads, so it lives in a LocalRegistry.
struct Counter {
  hits: Rc<RefCell<u32>>,
}

fn main() {
  let mut registry = LocalRegistry::new();
  registry.add_instance(Rc::new(RefCell::new(0_u32)));

  let hits = registry.resolve::<Rc<RefCell<u32>>>();
  registry.add_factory(move || Counter {
    hits: (*hits).clone(),
  });

  for _ in 0..3 {
    *registry.resolve::<Counter>().hits.borrow_mut() += 1;
  }

  let total = *registry.resolve::<Rc<RefCell<u32>>>().borrow();
  println!("Counted {total} hits");
  assert_eq!(total, 3);
}
