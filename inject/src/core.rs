//! Type keys and the per-thread resolution stack.

use crate::error::{Error, Result};
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};

thread_local! {
  // Keys currently being built on this thread, outermost first. Each key is
  // paired with the id of the container building it, so two containers can
  // build the same type inside one another without tripping the cycle check.
  static RESOLVING_STACK: RefCell<Vec<(u64, TypeKey)>> = const { RefCell::new(Vec::new()) };
}

/// Identifies a registered or requested type.
///
/// Equality and hashing only look at the `TypeId`; the type name is carried
/// along for error messages and logs.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.id
  }

  pub fn type_name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// An RAII guard marking a key as "being built" on the current thread.
///
/// Entering a key that is already on the stack for the same container means
/// the dependency graph loops back on itself; `enter` reports the chain
/// instead of recursing until the stack overflows. Dropping the guard pops
/// the key again, on success, error and unwind alike.
pub(crate) struct ResolutionGuard {
  container: u64,
  key: TypeKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(container: u64, key: TypeKey) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(start) = stack.iter().position(|entry| *entry == (container, key)) {
        let chain = stack[start..]
          .iter()
          .map(|(_, k)| k.type_name())
          .chain(std::iter::once(key.type_name()))
          .collect::<Vec<_>>()
          .join(" -> ");
        return Err(Error::CyclicDependency { chain });
      }
      stack.push((container, key));
      Ok(Self { container, key })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack
        .iter()
        .rposition(|entry| *entry == (self.container, self.key))
      {
        stack.remove(pos);
      }
    });
  }
}
