use fibre_locator::Registry;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn next_tracker(kind: &str) -> RequestTracker {
  println!("Creating {kind} RequestTracker...");
  RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  }
}

struct Tracked<const FACTORY: bool>(RequestTracker);

fn main() {
  let registry = Registry::new();

  // --- Singleton Registration ---
  // The factory runs once, right here.
  registry.add_singleton(|| Tracked::<false>(next_tracker("SINGLETON")));

  // --- Factory Registration ---
  // This factory runs on EVERY resolution.
  registry.add_factory(|| Tracked::<true>(next_tracker("FACTORY")));

  println!("--- Resolving Singletons ---");
  let s1 = registry.resolve::<Tracked<false>>();
  let s2 = registry.resolve::<Tracked<false>>();
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.0.id, s2.0.id);
  assert_eq!(s1.0.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");
  println!("Singleton instances are the same pointer, as expected.\n");

  println!("--- Resolving Factories ---");
  let f1 = registry.resolve::<Tracked<true>>();
  let f2 = registry.resolve::<Tracked<true>>();
  println!("Factory 1 ID: {}, Factory 2 ID: {}", f1.0.id, f2.0.id);
  assert_eq!(f1.0.id, 1);
  assert_eq!(f2.0.id, 2);
  assert!(!Arc::ptr_eq(&f1, &f2), "Factory instances should be different");
  println!("Factory instances are different pointers, as expected.");
}
