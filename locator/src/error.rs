use thiserror::Error;

/// Errors produced while resolving dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// A required dependency had neither a singleton nor a factory registered.
  ///
  /// This points at a wiring mistake made during startup. `Registry::resolve`
  /// and the `resolve!` macros turn it into a panic.
  #[error("dependency `{type_name}` is not registered")]
  Unresolved { type_name: &'static str },
}

impl ResolveError {
  /// The name of the type that could not be resolved.
  pub fn type_name(&self) -> &'static str {
    match self {
      ResolveError::Unresolved { type_name } => type_name,
    }
  }
}

/// A specialized `Result` type for `fibre_locator` operations.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
