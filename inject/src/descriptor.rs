//! Type descriptors: the declarative form of a registration.
//!
//! A descriptor names the type to build, the key it is registered under and
//! its [`Lifetime`]. Combined with a list of argument strategies and a
//! constructor in [`Container::register_type`](crate::Container::register_type),
//! it derives the matching builder:
//!
//! - [`Concrete<T>`] derives a [`ConcreteBuilder`] keyed by `T`.
//! - [`Polymorphic<B, T>`] derives a [`PolymorphicBuilder`] keyed by the base
//!   `B` (usually `dyn Trait`) that builds the implementation `T`.

use crate::args::Arguments;
use crate::builder::{Builder, ConcreteBuilder, PolymorphicBuilder};
use crate::core::TypeKey;
use crate::lifetime::Lifetime;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A registration-time declaration a builder can be derived from.
pub trait TypeDescriptor {
  /// The concrete type the constructor returns.
  type Target: Send + Sync + 'static;

  fn lifetime(&self) -> Lifetime;

  fn into_builder<A, F>(self, args: A, construct: F) -> Box<dyn Builder>
  where
    A: Arguments,
    F: Fn(A::Output) -> Self::Target + Send + Sync + 'static;
}

/// Declares a non-polymorphic type, registered under its own key.
pub struct Concrete<T> {
  lifetime: Lifetime,
  by_value: bool,
  _marker: PhantomData<fn() -> T>,
}

impl<T> Concrete<T> {
  pub fn new(lifetime: Lifetime) -> Self {
    Self {
      lifetime,
      by_value: true,
      _marker: PhantomData,
    }
  }

  pub fn transient() -> Self {
    Self::new(Lifetime::Transient)
  }

  pub fn singleton() -> Self {
    Self::new(Lifetime::Singleton)
  }

  /// Marks the type as never handed out by value: by-value resolution fails
  /// with `ValueConstructionUnsupported`.
  pub fn shared_only(mut self) -> Self {
    self.by_value = false;
    self
  }
}

impl<T> fmt::Debug for Concrete<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Concrete")
      .field("type", &std::any::type_name::<T>())
      .field("lifetime", &self.lifetime)
      .field("by_value", &self.by_value)
      .finish()
  }
}

impl<T: Send + Sync + 'static> TypeDescriptor for Concrete<T> {
  type Target = T;

  fn lifetime(&self) -> Lifetime {
    self.lifetime
  }

  fn into_builder<A, F>(self, args: A, construct: F) -> Box<dyn Builder>
  where
    A: Arguments,
    F: Fn(A::Output) -> T + Send + Sync + 'static,
  {
    let builder = ConcreteBuilder::new(args, construct);
    if self.by_value {
      Box::new(builder)
    } else {
      Box::new(builder.shared_only())
    }
  }
}

/// Declares an implementation `T` of the base `B`, registered under `B`.
///
/// `B` must be a type distinct from `T`, usually a trait object. Use
/// [`Concrete`] to register a type under its own key; debug builds panic on
/// a descriptor whose base and implementation coincide.
///
/// ```
/// use fibre_inject::{Container, Polymorphic};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {
///   fn now(&self) -> u64;
/// }
///
/// struct Fixed;
/// impl Clock for Fixed {
///   fn now(&self) -> u64 {
///     42
///   }
/// }
///
/// let container = Container::new();
/// container
///   .register_type(
///     Polymorphic::<dyn Clock, Fixed>::singleton(|c| c as Arc<dyn Clock>),
///     (),
///     |_| Fixed,
///   )
///   .unwrap();
///
/// assert_eq!(container.resolve_shared::<dyn Clock>().unwrap().now(), 42);
/// ```
pub struct Polymorphic<B: ?Sized, T> {
  lifetime: Lifetime,
  upcast: Box<dyn Fn(Arc<T>) -> Arc<B> + Send + Sync>,
}

impl<B, T> Polymorphic<B, T>
where
  B: ?Sized + Send + Sync + 'static,
  T: Send + Sync + 'static,
{
  pub fn new<U>(lifetime: Lifetime, upcast: U) -> Self
  where
    U: Fn(Arc<T>) -> Arc<B> + Send + Sync + 'static,
  {
    debug_assert_ne!(
      TypeKey::of::<B>(),
      TypeKey::of::<T>(),
      "Polymorphic base and implementation are the same type; use Concrete instead"
    );
    Self {
      lifetime,
      upcast: Box::new(upcast),
    }
  }

  pub fn transient<U>(upcast: U) -> Self
  where
    U: Fn(Arc<T>) -> Arc<B> + Send + Sync + 'static,
  {
    Self::new(Lifetime::Transient, upcast)
  }

  pub fn singleton<U>(upcast: U) -> Self
  where
    U: Fn(Arc<T>) -> Arc<B> + Send + Sync + 'static,
  {
    Self::new(Lifetime::Singleton, upcast)
  }
}

impl<B: ?Sized, T> fmt::Debug for Polymorphic<B, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Polymorphic")
      .field("base", &std::any::type_name::<B>())
      .field("type", &std::any::type_name::<T>())
      .field("lifetime", &self.lifetime)
      .finish()
  }
}

impl<B, T> TypeDescriptor for Polymorphic<B, T>
where
  B: ?Sized + Send + Sync + 'static,
  T: Send + Sync + 'static,
{
  type Target = T;

  fn lifetime(&self) -> Lifetime {
    self.lifetime
  }

  fn into_builder<A, F>(self, args: A, construct: F) -> Box<dyn Builder>
  where
    A: Arguments,
    F: Fn(A::Output) -> T + Send + Sync + 'static,
  {
    let upcast = self.upcast;
    Box::new(PolymorphicBuilder::new(args, construct, move |instance| {
      upcast(instance)
    }))
  }
}
