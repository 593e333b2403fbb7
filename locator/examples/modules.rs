use fibre_locator::{global, module, FnModule, Registry};

struct Settings {
  greeting: &'static str,
}

// Builds the application's modules. Tests can hand the same modules to a
// private registry instead of the global one.
fn app_modules() -> Vec<FnModule> {
  vec![
    module("settings", |registry| {
      registry.add_instance(Settings { greeting: "Hello" });
    }),
    module("greeting", |registry| {
      let settings = registry.resolve::<Settings>();
      registry.add_factory(move || format!("{}, World!", settings.greeting));
    }),
  ]
}

fn main() {
  // --- Running against a private registry ---
  println!("--- Running with a private registry ---");
  let registry = Registry::new();
  registry.load_modules(app_modules());

  let message = registry.resolve::<String>();
  println!("Result: {}", message);
  assert_eq!(*message, "Hello, World!");

  // --- Verify Isolation ---
  assert!(
    global().get::<String>().is_none(),
    "Dependency should not have leaked into the global registry!"
  );
  println!("\nVerified that the private registry is isolated from the global one.");
}
