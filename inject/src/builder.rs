//! Builders: the construction recipes stored in the registry.

use crate::args::Arguments;
use crate::container::Container;
use crate::core::TypeKey;
use crate::error::{Error, Result};
use crate::instance::{Instance, Mode, OwnedInstance, SharedInstance};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// A factory able to produce instances of one declared type.
///
/// The container calls `build_shared` for shared resolutions and
/// `build_value` for by-value ones; a builder that cannot honor one of the
/// two forms reports it through the returned error. Builders receive the
/// container so they can resolve their own dependencies.
pub trait Builder: Send + Sync + 'static {
  /// The key the built instances are registered and resolved under.
  fn key(&self) -> TypeKey;

  fn build_shared(&self, container: &Container) -> Result<SharedInstance>;

  fn build_value(&self, container: &Container) -> Result<OwnedInstance>;
}

impl fmt::Debug for dyn Builder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Builder").field("key", &self.key()).finish()
  }
}

type Constructor<A, T> = Box<dyn Fn(<A as Arguments>::Output) -> T + Send + Sync>;

// --- Concrete ---

/// Builds a concrete `T` from a list of argument strategies.
pub struct ConcreteBuilder<T, A: Arguments> {
  args: A,
  construct: Constructor<A, T>,
  by_value: bool,
}

impl<T, A> ConcreteBuilder<T, A>
where
  T: Send + Sync + 'static,
  A: Arguments,
{
  pub fn new<F>(args: A, construct: F) -> Self
  where
    F: Fn(A::Output) -> T + Send + Sync + 'static,
  {
    Self {
      args,
      construct: Box::new(construct),
      by_value: true,
    }
  }

  /// Refuses by-value resolution; the type is only handed out behind an `Arc`.
  pub fn shared_only(mut self) -> Self {
    self.by_value = false;
    self
  }

  fn construct(&self, container: &Container) -> Result<T> {
    let args = self.args.resolve_all(container)?;
    Ok((self.construct)(args))
  }
}

impl<T, A> Builder for ConcreteBuilder<T, A>
where
  T: Send + Sync + 'static,
  A: Arguments,
{
  fn key(&self) -> TypeKey {
    TypeKey::of::<T>()
  }

  fn build_shared(&self, container: &Container) -> Result<SharedInstance> {
    Ok(SharedInstance::new(Arc::new(self.construct(container)?)))
  }

  fn build_value(&self, container: &Container) -> Result<OwnedInstance> {
    if !self.by_value {
      return Err(Error::ValueConstructionUnsupported {
        type_name: type_name::<T>(),
      });
    }
    Ok(OwnedInstance::new(self.construct(container)?))
  }
}

// --- Polymorphic ---

/// Builds a concrete `T` and hands it out as the shared base `Arc<B>`.
///
/// `B` is normally a trait object. The upcast function is the proof that `T`
/// implements it; for `dyn Trait` it is just `|t| t as Arc<dyn Trait>`.
pub struct PolymorphicBuilder<B: ?Sized, T, A: Arguments> {
  args: A,
  construct: Constructor<A, T>,
  upcast: Box<dyn Fn(Arc<T>) -> Arc<B> + Send + Sync>,
}

impl<B, T, A> PolymorphicBuilder<B, T, A>
where
  B: ?Sized + Send + Sync + 'static,
  T: Send + Sync + 'static,
  A: Arguments,
{
  pub fn new<F, U>(args: A, construct: F, upcast: U) -> Self
  where
    F: Fn(A::Output) -> T + Send + Sync + 'static,
    U: Fn(Arc<T>) -> Arc<B> + Send + Sync + 'static,
  {
    Self {
      args,
      construct: Box::new(construct),
      upcast: Box::new(upcast),
    }
  }
}

impl<B, T, A> Builder for PolymorphicBuilder<B, T, A>
where
  B: ?Sized + Send + Sync + 'static,
  T: Send + Sync + 'static,
  A: Arguments,
{
  fn key(&self) -> TypeKey {
    TypeKey::of::<B>()
  }

  fn build_shared(&self, container: &Container) -> Result<SharedInstance> {
    let args = self.args.resolve_all(container)?;
    let instance = Arc::new((self.construct)(args));
    Ok(SharedInstance::new((self.upcast)(instance)))
  }

  fn build_value(&self, _container: &Container) -> Result<OwnedInstance> {
    // Moving the implementation out would lose the base type it is
    // registered as.
    Err(Error::AbstractValueNotSupported {
      type_name: type_name::<B>(),
    })
  }
}

// --- Lambda ---

type LambdaFn = Box<dyn Fn(&Container, Mode) -> Result<Instance> + Send + Sync>;

/// A builder backed by a user function, for construction logic that does not
/// fit a declared argument list.
///
/// The function decides what each mode means for its type; the container
/// only checks that the returned instance has the requested form and type.
pub struct LambdaBuilder {
  key: TypeKey,
  build: LambdaFn,
}

impl LambdaBuilder {
  /// Wraps a raw `(container, mode) -> instance` function.
  pub fn new<F>(key: TypeKey, build: F) -> Self
  where
    F: Fn(&Container, Mode) -> Result<Instance> + Send + Sync + 'static,
  {
    Self {
      key,
      build: Box::new(build),
    }
  }

  /// A builder whose function produces a `T`, usable in both modes.
  pub fn owned<T, F>(build: F) -> Self
  where
    T: Send + Sync + 'static,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Self::new(TypeKey::of::<T>(), move |container, mode| {
      let value = build(container)?;
      Ok(match mode {
        Mode::Shared => Instance::Shared(SharedInstance::new(Arc::new(value))),
        Mode::Value => Instance::Owned(OwnedInstance::new(value)),
      })
    })
  }

  /// A builder whose function produces an `Arc<T>`; `T` may be a trait
  /// object. By-value resolution is refused.
  pub fn shared<T, F>(build: F) -> Self
  where
    T: ?Sized + Send + Sync + 'static,
    F: Fn(&Container) -> Result<Arc<T>> + Send + Sync + 'static,
  {
    Self::new(TypeKey::of::<T>(), move |container, mode| match mode {
      Mode::Shared => Ok(Instance::Shared(SharedInstance::new(build(container)?))),
      Mode::Value => Err(Error::ValueConstructionUnsupported {
        type_name: type_name::<T>(),
      }),
    })
  }
}

impl Builder for LambdaBuilder {
  fn key(&self) -> TypeKey {
    self.key
  }

  fn build_shared(&self, container: &Container) -> Result<SharedInstance> {
    (self.build)(container, Mode::Shared)?.into_shared(self.key.type_name())
  }

  fn build_value(&self, container: &Container) -> Result<OwnedInstance> {
    (self.build)(container, Mode::Value)?.into_owned(self.key.type_name())
  }
}

impl fmt::Debug for LambdaBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LambdaBuilder")
      .field("key", &self.key)
      .finish_non_exhaustive()
  }
}

// --- Prebuilt ---

/// Stands in for the builder of an instance registered directly. Its cache
/// slot is filled at registration, so it is never asked to build.
pub(crate) struct PrebuiltBuilder {
  key: TypeKey,
}

impl PrebuiltBuilder {
  pub(crate) fn new(key: TypeKey) -> Self {
    Self { key }
  }
}

impl Builder for PrebuiltBuilder {
  fn key(&self) -> TypeKey {
    self.key
  }

  fn build_shared(&self, _container: &Container) -> Result<SharedInstance> {
    Err(Error::BadLifetime {
      type_name: self.key.type_name(),
      reason: "a registered instance has no builder",
    })
  }

  fn build_value(&self, _container: &Container) -> Result<OwnedInstance> {
    Err(Error::BadLifetime {
      type_name: self.key.type_name(),
      reason: "a registered instance has no builder",
    })
  }
}

impl<B: Builder + ?Sized> Builder for Box<B> {
  fn key(&self) -> TypeKey {
    (**self).key()
  }

  fn build_shared(&self, container: &Container) -> Result<SharedInstance> {
    (**self).build_shared(container)
  }

  fn build_value(&self, container: &Container) -> Result<OwnedInstance> {
    (**self).build_value(container)
  }
}
