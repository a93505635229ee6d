//! The main `Container` struct and its associated methods.

use crate::args::Arguments;
use crate::builder::{Builder, PrebuiltBuilder};
use crate::config::ContainerBuilder;
use crate::core::{ResolutionGuard, TypeKey};
use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::instance::{Instance, Mode, OwnedInstance, SharedInstance};
use crate::lifetime::Lifetime;
use crate::policy::{DuplicatePolicy, Registration};
use crate::registry::{BuilderEntry, Registry};
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// The Inversion of Control (IoC) container.
///
/// Holds one builder entry per registered type and builds object graphs on
/// demand, resolving every declared dependency through itself. It is
/// thread-safe: registration and resolution both take `&self`, and a
/// singleton is built exactly once even when first requested from several
/// threads at the same time.
pub struct Container {
  id: u64,
  name: String,
  default_policy: DuplicatePolicy,
  registry: Registry,
}

impl Default for Container {
  fn default() -> Self {
    ContainerBuilder::new().build()
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("name", &self.name)
      .field("default_policy", &self.default_policy)
      .field("registrations", &self.registry.len())
      .finish()
  }
}

impl Container {
  /// Creates a new, empty `Container` with the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  pub(crate) fn from_builder(builder: ContainerBuilder) -> Self {
    let id = NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed);
    let name = builder
      .name
      .unwrap_or_else(|| format!("container-{}", id));
    debug!(container = %name, "creating container");
    Self {
      id,
      name,
      default_policy: builder.default_policy,
      registry: Registry::with_capacity(builder.expected_types),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn default_policy(&self) -> DuplicatePolicy {
    self.default_policy
  }

  /// Number of registered types.
  pub fn len(&self) -> usize {
    self.registry.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn contains<T: ?Sized + Any>(&self) -> bool {
    self.registry.contains(&TypeKey::of::<T>())
  }

  /// The lifetime `T` is registered with, if it is registered.
  pub fn lifetime_of<T: ?Sized + Any>(&self) -> Option<Lifetime> {
    self
      .registry
      .lookup(&TypeKey::of::<T>())
      .ok()
      .map(|entry| entry.lifetime)
  }

  // --- PRIVATE HELPERS ---

  fn install(&self, entry: BuilderEntry, policy: DuplicatePolicy) -> Result<Registration> {
    let type_name = entry.key.type_name();
    let lifetime = entry.lifetime;
    match self.registry.register(entry, policy) {
      Ok(outcome) => {
        debug!(
          container = %self.name,
          type_name,
          %lifetime,
          %policy,
          ?outcome,
          "registered type"
        );
        Ok(outcome)
      }
      Err(err) => {
        warn!(container = %self.name, type_name, %policy, "registration rejected: {}", err);
        Err(err)
      }
    }
  }

  fn build_transient(&self, entry: &BuilderEntry, mode: Mode) -> Result<Instance> {
    let _guard = ResolutionGuard::enter(self.id, entry.key).map_err(|err| {
      warn!(container = %self.name, "{}", err);
      err
    })?;
    let instance = match mode {
      Mode::Shared => Instance::Shared(entry.builder.build_shared(self)?),
      Mode::Value => Instance::Owned(entry.builder.build_value(self)?),
    };
    debug!(
      container = %self.name,
      type_name = entry.key.type_name(),
      lifetime = %entry.lifetime,
      %mode,
      "built transient instance"
    );
    Ok(instance)
  }

  fn singleton(&self, entry: &BuilderEntry) -> Result<SharedInstance> {
    if let Some(instance) = entry.slot.get() {
      return Ok(instance.clone());
    }
    let _guard = ResolutionGuard::enter(self.id, entry.key).map_err(|err| {
      warn!(container = %self.name, "{}", err);
      err
    })?;
    // A failed build leaves the slot empty, so the next request retries.
    entry
      .slot
      .get_or_try_init(|| {
        let instance = entry.builder.build_shared(self)?;
        debug!(
          container = %self.name,
          type_name = entry.key.type_name(),
          lifetime = %entry.lifetime,
          "built singleton instance"
        );
        Ok::<_, Error>(instance)
      })
      .cloned()
  }

  // --- PUBLIC API ---

  // --- Builder Registration ---

  /// Registers `builder` as transient under the default policy.
  pub fn register_transient(&self, builder: impl Builder) -> Result<Registration> {
    self.register_transient_with_policy(builder, self.default_policy)
  }

  pub fn register_transient_with_policy(
    &self,
    builder: impl Builder,
    policy: DuplicatePolicy,
  ) -> Result<Registration> {
    self.install(
      BuilderEntry::new(Lifetime::Transient, Box::new(builder)),
      policy,
    )
  }

  /// Registers `builder` as singleton under the default policy.
  pub fn register_singleton(&self, builder: impl Builder) -> Result<Registration> {
    self.register_singleton_with_policy(builder, self.default_policy)
  }

  pub fn register_singleton_with_policy(
    &self,
    builder: impl Builder,
    policy: DuplicatePolicy,
  ) -> Result<Registration> {
    self.install(
      BuilderEntry::new(Lifetime::Singleton, Box::new(builder)),
      policy,
    )
  }

  // --- Instance Registration ---

  /// Registers an already built value as the singleton instance of `T`.
  pub fn register_instance<T: Send + Sync + 'static>(&self, instance: T) -> Result<Registration> {
    self.register_shared_instance_with_policy(Arc::new(instance), self.default_policy)
  }

  pub fn register_instance_with_policy<T: Send + Sync + 'static>(
    &self,
    instance: T,
    policy: DuplicatePolicy,
  ) -> Result<Registration> {
    self.register_shared_instance_with_policy(Arc::new(instance), policy)
  }

  /// Registers an already shared instance, which may be a trait object, as the
  /// singleton instance of `T`.
  pub fn register_shared_instance<T: ?Sized + Send + Sync + 'static>(
    &self,
    instance: Arc<T>,
  ) -> Result<Registration> {
    self.register_shared_instance_with_policy(instance, self.default_policy)
  }

  pub fn register_shared_instance_with_policy<T: ?Sized + Send + Sync + 'static>(
    &self,
    instance: Arc<T>,
    policy: DuplicatePolicy,
  ) -> Result<Registration> {
    let builder = PrebuiltBuilder::new(TypeKey::of::<T>());
    self.install(
      BuilderEntry::prebuilt(Box::new(builder), SharedInstance::new(instance)),
      policy,
    )
  }

  // --- Declarative Registration ---

  /// Registers a type from its descriptor, argument strategies and
  /// constructor, under the default policy.
  ///
  /// ```
  /// use fibre_inject::{args, Concrete, Container};
  /// use std::sync::Arc;
  ///
  /// struct Config {
  ///   url: String,
  /// }
  ///
  /// struct Database {
  ///   config: Arc<Config>,
  ///   pool_size: usize,
  /// }
  ///
  /// let container = Container::new();
  /// container
  ///   .register_type(
  ///     Concrete::<Config>::singleton(),
  ///     (args::literal("postgres://localhost".to_string()),),
  ///     |(url,)| Config { url },
  ///   )
  ///   .unwrap();
  /// container
  ///   .register_type(
  ///     Concrete::<Database>::transient(),
  ///     (args::shared::<Config>(), args::literal(8usize)),
  ///     |(config, pool_size)| Database { config, pool_size },
  ///   )
  ///   .unwrap();
  ///
  /// let db = container.resolve_shared::<Database>().unwrap();
  /// assert_eq!(db.config.url, "postgres://localhost");
  /// assert_eq!(db.pool_size, 8);
  /// ```
  pub fn register_type<D, A, F>(&self, descriptor: D, args: A, construct: F) -> Result<Registration>
  where
    D: TypeDescriptor,
    A: Arguments,
    F: Fn(A::Output) -> D::Target + Send + Sync + 'static,
  {
    self.register_type_with_policy(descriptor, args, construct, self.default_policy)
  }

  pub fn register_type_with_policy<D, A, F>(
    &self,
    descriptor: D,
    args: A,
    construct: F,
    policy: DuplicatePolicy,
  ) -> Result<Registration>
  where
    D: TypeDescriptor,
    A: Arguments,
    F: Fn(A::Output) -> D::Target + Send + Sync + 'static,
  {
    let lifetime = descriptor.lifetime();
    let builder = descriptor.into_builder(args, construct);
    self.install(BuilderEntry::new(lifetime, builder), policy)
  }

  // --- Resolution ---

  /// Resolves `key` in the requested mode, returning the erased instance.
  ///
  /// Transient entries are built on every call. Singleton entries are built
  /// on their first shared resolution and cached; asking for a singleton by
  /// value fails with [`Error::BadLifetime`].
  pub fn resolve(&self, key: TypeKey, mode: Mode) -> Result<Instance> {
    trace!(container = %self.name, type_name = key.type_name(), %mode, "resolving");
    let entry = self.registry.lookup(&key)?;
    match (entry.lifetime, mode) {
      (Lifetime::Transient, _) => self.build_transient(&entry, mode),
      (Lifetime::Singleton, Mode::Shared) => self.singleton(&entry).map(Instance::Shared),
      (Lifetime::Singleton, Mode::Value) => Err(Error::BadLifetime {
        type_name: key.type_name(),
        reason: "a singleton cannot be handed out by value",
      }),
    }
  }

  /// Resolves `T` behind a shared handle.
  pub fn resolve_shared<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
    let key = TypeKey::of::<T>();
    self
      .resolve(key, Mode::Shared)?
      .into_shared(key.type_name())?
      .downcast::<T>()
  }

  /// Resolves `T` as an owned value.
  pub fn resolve_value<T: Send + 'static>(&self) -> Result<T> {
    let key = TypeKey::of::<T>();
    let owned: OwnedInstance = self.resolve(key, Mode::Value)?.into_owned(key.type_name())?;
    owned.downcast::<T>()
  }
}
