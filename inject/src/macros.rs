//! Public macros for ergonomic service resolution.

/// Resolves a service from a container, panicking if it cannot be built.
///
/// This is the shorthand for code that treats a missing or broken
/// registration as a programming error. Use the container's `resolve_*`
/// methods, or [`try_resolve!`], to handle failures instead.
///
/// - `resolve!(container, Type)` returns an `Arc<Type>`.
/// - `resolve!(container, trait Trait)` returns an `Arc<dyn Trait>`.
/// - `resolve!(container, value Type)` returns an owned `Type`.
///
/// # Panics
///
/// Panics with the resolution error if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use fibre_inject::{resolve, Container, LambdaBuilder};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
/// struct English;
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// let container = Container::new();
/// container.register_instance(String::from("hello")).unwrap();
/// container
///   .register_singleton(LambdaBuilder::shared::<dyn Greeter, _>(|_| {
///     Ok(Arc::new(English) as Arc<dyn Greeter>)
///   }))
///   .unwrap();
///
/// assert_eq!(*resolve!(container, String), "hello");
/// assert_eq!(resolve!(container, trait Greeter).greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  ($container:expr, trait $trait_ident:ident) => {
    $container
      .resolve_shared::<dyn $trait_ident>()
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service {}: {}",
          std::any::type_name::<dyn $trait_ident>(),
          err
        )
      })
  };

  ($container:expr, value $type:ty) => {
    $container
      .resolve_value::<$type>()
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required value {}: {}",
          std::any::type_name::<$type>(),
          err
        )
      })
  };

  ($container:expr, $type:ty) => {
    $container
      .resolve_shared::<$type>()
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service {}: {}",
          std::any::type_name::<$type>(),
          err
        )
      })
  };
}

/// Like [`resolve!`], but evaluates to an `Option`, discarding the error.
#[macro_export]
macro_rules! try_resolve {
  ($container:expr, trait $trait_ident:ident) => {
    $container.resolve_shared::<dyn $trait_ident>().ok()
  };

  ($container:expr, value $type:ty) => {
    $container.resolve_value::<$type>().ok()
  };

  ($container:expr, $type:ty) => {
    $container.resolve_shared::<$type>().ok()
  };
}
