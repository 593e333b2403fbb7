use fibre_locator::{resolve, resolve_optional};
use std::panic;

struct UnregisteredService;

fn main() {
  // --- Using the panicking `resolve` ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve::<UnregisteredService>();
  });

  assert!(result.is_err(), "resolve should have panicked.");
  println!("Successfully caught the expected panic from resolve.");

  // --- Using the non-panicking `resolve_optional` ---
  println!("\nNow, attempting to resolve using `resolve_optional`...");

  match resolve_optional::<UnregisteredService>() {
    Some(_) => panic!("Should not have found the service!"),
    None => println!("Correctly received `None` for the missing service."),
  }
}
