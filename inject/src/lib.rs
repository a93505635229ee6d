//! # Fibre Inject
//!
//! A thread-safe Inversion of Control container that builds object graphs
//! from declarative construction recipes.
//!
//! Every registered type gets a builder and a lifetime. Resolving a type runs
//! its builder, which in turn resolves each constructor argument through the
//! same container, so a single call builds the whole dependency graph.
//!
//! ## Core Concepts
//!
//! - **Container**: the type-keyed registry of builders, plus the singleton
//!   cache. Several independent containers can coexist.
//! - **Lifetime**: `Singleton` types are built once and shared; `Transient`
//!   types are built on every resolution.
//! - **Shared vs. value resolution**: `resolve_shared::<T>()` hands out an
//!   `Arc<T>`; `resolve_value::<T>()` moves a freshly built `T` out to the
//!   caller. Singletons and trait objects can only be resolved shared.
//! - **Descriptors**: [`Concrete`] and [`Polymorphic`] declare what to build;
//!   the [`args`] strategies declare where each constructor argument comes
//!   from.
//! - **Duplicate policy**: re-registering a type overrides it by default;
//!   [`DuplicatePolicy::Once`] and [`DuplicatePolicy::Ignore`] reject or skip
//!   the new registration instead.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{args, Concrete, Container, Polymorphic};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!   name: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     format!("Hello, {}!", self.name)
//!   }
//! }
//!
//! struct Reception {
//!   greeter: Arc<dyn Greeter>,
//! }
//!
//! let container = Container::new();
//!
//! // The implementation is registered under the trait it provides.
//! container
//!   .register_type(
//!     Polymorphic::<dyn Greeter, EnglishGreeter>::singleton(|g| g as Arc<dyn Greeter>),
//!     (args::literal("World".to_string()),),
//!     |(name,)| EnglishGreeter { name },
//!   )
//!   .unwrap();
//!
//! // Its dependency is resolved through the container by trait.
//! container
//!   .register_type(
//!     Concrete::<Reception>::transient(),
//!     (args::shared::<dyn Greeter>(),),
//!     |(greeter,)| Reception { greeter },
//!   )
//!   .unwrap();
//!
//! let reception = container.resolve_shared::<Reception>().unwrap();
//! assert_eq!(reception.greeter.greet(), "Hello, World!");
//! ```

#[cfg(feature = "ambient")]
pub mod ambient;
pub mod args;
mod builder;
mod config;
mod container;
mod core;
mod descriptor;
mod error;
mod instance;
mod lifetime;
mod macros;
mod policy;
mod registry;

pub use builder::{Builder, ConcreteBuilder, LambdaBuilder, PolymorphicBuilder};
pub use config::ContainerBuilder;
pub use container::Container;
pub use crate::core::TypeKey;
pub use descriptor::{Concrete, Polymorphic, TypeDescriptor};
pub use error::{Error, ErrorKind, Result};
pub use instance::{Instance, Mode, OwnedInstance, SharedInstance};
pub use lifetime::Lifetime;
pub use policy::{DuplicatePolicy, Registration};
