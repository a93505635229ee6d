//! Per-parameter resolution strategies for declared constructors.
//!
//! A registration lists one strategy per constructor parameter. At build
//! time each strategy produces the parameter's value, either by asking the
//! container for a dependency or by handing out a value captured when the
//! type was registered.

use crate::container::Container;
use crate::error::Result;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// One constructor parameter.
pub trait Argument: Send + Sync + 'static {
  /// The value handed to the constructor.
  type Output;

  fn resolve(&self, container: &Container) -> Result<Self::Output>;
}

/// An ordered list of [`Argument`]s, implemented for tuples.
pub trait Arguments: Send + Sync + 'static {
  type Output;

  /// Resolves every argument left to right, stopping at the first failure.
  fn resolve_all(&self, container: &Container) -> Result<Self::Output>;
}

/// Resolve the parameter as a shared `Arc<T>` dependency.
pub struct Shared<T: ?Sized>(PhantomData<fn() -> Arc<T>>);

impl<T: ?Sized> Shared<T> {
  pub fn new() -> Self {
    Self(PhantomData)
  }
}

impl<T: ?Sized> Default for Shared<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: ?Sized> Clone for Shared<T> {
  fn clone(&self) -> Self {
    Self::new()
  }
}

impl<T: ?Sized> fmt::Debug for Shared<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Shared<{}>", std::any::type_name::<T>())
  }
}

impl<T: ?Sized + Send + Sync + 'static> Argument for Shared<T> {
  type Output = Arc<T>;

  fn resolve(&self, container: &Container) -> Result<Arc<T>> {
    container.resolve_shared::<T>()
  }
}

/// Resolve the parameter as an owned `T`, moved out of a fresh build.
///
/// Only transient, non-polymorphic registrations can satisfy this.
pub struct Owned<T>(PhantomData<fn() -> T>);

impl<T> Owned<T> {
  pub fn new() -> Self {
    Self(PhantomData)
  }
}

impl<T> Default for Owned<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for Owned<T> {
  fn clone(&self) -> Self {
    Self::new()
  }
}

impl<T> fmt::Debug for Owned<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Owned<{}>", std::any::type_name::<T>())
  }
}

impl<T: Send + 'static> Argument for Owned<T> {
  type Output = T;

  fn resolve(&self, container: &Container) -> Result<T> {
    container.resolve_value::<T>()
  }
}

/// Use a value captured at registration; every build receives a clone.
#[derive(Debug, Clone)]
pub struct Literal<T>(T);

impl<T> Literal<T> {
  pub fn new(value: T) -> Self {
    Self(value)
  }

  pub fn get(&self) -> &T {
    &self.0
  }
}

impl<T: Clone + Send + Sync + 'static> Argument for Literal<T> {
  type Output = T;

  fn resolve(&self, _container: &Container) -> Result<T> {
    Ok(self.0.clone())
  }
}

/// Shorthand for [`Shared::new`].
pub fn shared<T: ?Sized>() -> Shared<T> {
  Shared::new()
}

/// Shorthand for [`Owned::new`].
pub fn owned<T>() -> Owned<T> {
  Owned::new()
}

/// Shorthand for [`Literal::new`].
pub fn literal<T>(value: T) -> Literal<T> {
  Literal::new(value)
}

impl Arguments for () {
  type Output = ();

  fn resolve_all(&self, _container: &Container) -> Result<()> {
    Ok(())
  }
}

macro_rules! impl_arguments {
  ($($arg:ident => $idx:tt),+) => {
    impl<$($arg: Argument),+> Arguments for ($($arg,)+) {
      type Output = ($($arg::Output,)+);

      fn resolve_all(&self, container: &Container) -> Result<Self::Output> {
        Ok(($(self.$idx.resolve(container)?,)+))
      }
    }
  };
}

impl_arguments!(A0 => 0);
impl_arguments!(A0 => 0, A1 => 1);
impl_arguments!(A0 => 0, A1 => 1, A2 => 2);
impl_arguments!(A0 => 0, A1 => 1, A2 => 2, A3 => 3);
impl_arguments!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4);
impl_arguments!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5);
impl_arguments!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6);
impl_arguments!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6, A7 => 7);
impl_arguments!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6, A7 => 7, A8 => 8);
impl_arguments!(
  A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6, A7 => 7, A8 => 8, A9 => 9
);
impl_arguments!(
  A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6, A7 => 7, A8 => 8, A9 => 9,
  A10 => 10
);
impl_arguments!(
  A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5, A6 => 6, A7 => 7, A8 => 8, A9 => 9,
  A10 => 10, A11 => 11
);
