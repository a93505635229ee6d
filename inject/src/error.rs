use thiserror::Error;

/// Discriminant of an [`Error`], for callers that only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  NotFound,
  DuplicateType,
  BadLifetime,
  AbstractValueNotSupported,
  ValueConstructionUnsupported,
  CyclicDependency,
  TypeMismatch,
  Factory,
}

/// The error type of every fallible container operation.
#[derive(Debug, Error)]
pub enum Error {
  #[error("no builder nor instance registered for type `{type_name}`")]
  NotFound { type_name: &'static str },

  #[error("a builder or instance is already registered for type `{type_name}`")]
  DuplicateType { type_name: &'static str },

  #[error("unexpected lifetime for type `{type_name}`: {reason}")]
  BadLifetime {
    type_name: &'static str,
    reason: &'static str,
  },

  #[error("type `{type_name}` is polymorphic and cannot be resolved by value")]
  AbstractValueNotSupported { type_name: &'static str },

  #[error("type `{type_name}` can only be handed out behind a shared handle")]
  ValueConstructionUnsupported { type_name: &'static str },

  #[error("circular dependency detected: {chain}")]
  CyclicDependency { chain: String },

  #[error("builder for `{expected}` produced an instance of `{found}`")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },

  #[error("factory for `{type_name}` failed: {source}")]
  Factory {
    type_name: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  /// Wraps a custom builder's own failure.
  pub fn factory<E>(type_name: &'static str, source: E) -> Self
  where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
  {
    Error::Factory {
      type_name,
      source: source.into(),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::NotFound { .. } => ErrorKind::NotFound,
      Error::DuplicateType { .. } => ErrorKind::DuplicateType,
      Error::BadLifetime { .. } => ErrorKind::BadLifetime,
      Error::AbstractValueNotSupported { .. } => ErrorKind::AbstractValueNotSupported,
      Error::ValueConstructionUnsupported { .. } => ErrorKind::ValueConstructionUnsupported,
      Error::CyclicDependency { .. } => ErrorKind::CyclicDependency,
      Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
      Error::Factory { .. } => ErrorKind::Factory,
    }
  }
}

/// A specialized `Result` type for `fibre_inject` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
