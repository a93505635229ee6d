//! Type-erased instance handles passed between builders and the container.

use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// How a caller wants to receive an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
  /// Behind an `Arc`, possibly shared with the container and other callers.
  Shared,
  /// As an owned value the container keeps no reference to.
  Value,
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mode::Shared => f.write_str("shared"),
      Mode::Value => f.write_str("value"),
    }
  }
}

/// An erased `Arc<T>`, where `T` may be unsized (`dyn Trait`).
///
/// The `Arc<T>` itself is boxed into an outer `Arc<dyn Any>` so that the
/// handle can be cloned without knowing `T`.
#[derive(Clone)]
pub struct SharedInstance {
  inner: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl SharedInstance {
  pub fn new<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) -> Self {
    Self {
      inner: Arc::new(instance),
      type_name: type_name::<T>(),
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Narrows the handle back to `Arc<T>`.
  pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
    self
      .inner
      .downcast_ref::<Arc<T>>()
      .cloned()
      .ok_or(Error::TypeMismatch {
        expected: type_name::<T>(),
        found: self.type_name,
      })
  }
}

impl fmt::Debug for SharedInstance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("SharedInstance").field(&self.type_name).finish()
  }
}

/// An erased owned value.
pub struct OwnedInstance {
  inner: Box<dyn Any + Send>,
  type_name: &'static str,
}

impl OwnedInstance {
  pub fn new<T: Send + 'static>(value: T) -> Self {
    Self {
      inner: Box::new(value),
      type_name: type_name::<T>(),
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Moves the value out as a `T`.
  pub fn downcast<T: Send + 'static>(self) -> Result<T> {
    let found = self.type_name;
    self
      .inner
      .downcast::<T>()
      .map(|value| *value)
      .map_err(|_| Error::TypeMismatch {
        expected: type_name::<T>(),
        found,
      })
  }
}

impl fmt::Debug for OwnedInstance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("OwnedInstance").field(&self.type_name).finish()
  }
}

/// Either form of instance, as returned by the erased
/// [`Container::resolve`](crate::Container::resolve).
#[derive(Debug)]
pub enum Instance {
  Shared(SharedInstance),
  Owned(OwnedInstance),
}

impl Instance {
  pub fn mode(&self) -> Mode {
    match self {
      Instance::Shared(_) => Mode::Shared,
      Instance::Owned(_) => Mode::Value,
    }
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Instance::Shared(shared) => shared.type_name(),
      Instance::Owned(owned) => owned.type_name(),
    }
  }

  pub(crate) fn into_shared(self, expected: &'static str) -> Result<SharedInstance> {
    match self {
      Instance::Shared(shared) => Ok(shared),
      Instance::Owned(owned) => Err(Error::TypeMismatch {
        expected,
        found: owned.type_name(),
      }),
    }
  }

  pub(crate) fn into_owned(self, expected: &'static str) -> Result<OwnedInstance> {
    match self {
      Instance::Owned(owned) => Ok(owned),
      Instance::Shared(shared) => Err(Error::TypeMismatch {
        expected,
        found: shared.type_name(),
      }),
    }
  }
}
