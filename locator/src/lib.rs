//! # Fibre Locator
//!
//! A thread-safe, type-keyed service locator for Rust.
//!
//! A [`Registry`] maps a type to either a **singleton**, one shared instance
//! handed out on every resolution, or a **factory**, which builds a new
//! instance each time. Registrations are grouped into [`Module`]s that are
//! loaded at startup; afterwards any code can resolve a dependency by type
//! without knowing how it was built.
//!
//! ## Core Concepts
//!
//! - **Registry**: holds singletons and factories behind a single lock. When a
//!   type has both, the singleton wins.
//! - **Singletons**: the first registration for a type wins; later ones are
//!   ignored. Lazy singletons are built on first resolution, at most once.
//! - **Factories**: the last registration for a type wins.
//! - **Modules**: named bundles of registrations, built with [`module`].
//! - **Global Registry**: a process-wide registry fronted by [`start`],
//!   [`resolve`], [`resolve_optional`] and [`restart`].
//! - **Resolution**: required resolution panics on a missing dependency,
//!   optional resolution returns `None`.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_locator::{module, resolve, resolve_optional, restart, start};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     "Hello, World!".to_string()
//!   }
//! }
//!
//! struct Banner {
//!   greeter: Arc<dyn Greeter>,
//! }
//!
//! let app = module("app", |registry| {
//!   registry.add_factory_trait::<dyn Greeter>(|| Arc::new(EnglishGreeter));
//!   // Factories may resolve what earlier registrations provided.
//!   registry.add_singleton(|| Banner {
//!     greeter: registry.resolve::<dyn Greeter>(),
//!   });
//! });
//!
//! start([app]);
//!
//! let banner = resolve::<Banner>();
//! assert_eq!(banner.greeter.greet(), "Hello, World!");
//!
//! restart();
//! assert!(resolve_optional::<Banner>().is_none());
//! ```
//!
//! ## Feature Flags
//!
//! - `local`: enables `LocalRegistry`, a single-threaded registry for types
//!   that are not `Send` or `Sync`.

mod core;
mod error;
mod global;
#[cfg(feature = "local")]
mod local_registry;
mod macros;
mod module;
mod registry;

pub use error::{ResolveError, Result};
pub use global::{global, resolve, resolve_optional, restart, start};
#[cfg(feature = "local")]
pub use local_registry::LocalRegistry;
pub use module::{module, FnModule, Module};
pub use registry::Registry;
