use fibre_inject::{
  args, Concrete, ConcreteBuilder, Container, ErrorKind, Instance, LambdaBuilder, Lifetime, Mode,
  Polymorphic, PolymorphicBuilder, Registration, TypeKey,
};
use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Fixtures ---

// The trait must be Send + Sync for the container to accept it.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

impl std::fmt::Debug for dyn Greeter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("dyn Greeter")
  }
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

// --- Lookup ---

#[test]
fn test_unregistered_type_is_not_found() {
  let container = Container::new();

  let shared = container.resolve_shared::<SimpleService>().unwrap_err();
  let value = container.resolve_value::<SimpleService>().unwrap_err();
  let by_trait = container.resolve_shared::<dyn Greeter>().unwrap_err();

  assert_eq!(shared.kind(), ErrorKind::NotFound);
  assert_eq!(value.kind(), ErrorKind::NotFound);
  assert_eq!(by_trait.kind(), ErrorKind::NotFound);
  assert!(shared.to_string().contains("SimpleService"));
}

#[test]
fn test_introspection_reports_registrations() {
  let container = Container::new();
  assert!(container.is_empty());

  container
    .register_type(Concrete::<SimpleService>::singleton(), (), |_| SimpleService { id: 1 })
    .unwrap();
  container
    .register_type(
      Polymorphic::<dyn Greeter, EnglishGreeter>::transient(|g| g as Arc<dyn Greeter>),
      (),
      |_| EnglishGreeter,
    )
    .unwrap();

  assert_eq!(container.len(), 2);
  assert!(container.contains::<SimpleService>());
  assert!(container.contains::<dyn Greeter>());
  // The implementation is only reachable through its base.
  assert!(!container.contains::<EnglishGreeter>());
  assert_eq!(container.lifetime_of::<SimpleService>(), Some(Lifetime::Singleton));
  assert_eq!(container.lifetime_of::<dyn Greeter>(), Some(Lifetime::Transient));
  assert_eq!(container.lifetime_of::<String>(), None);
}

// --- Lifetimes ---

#[test]
fn test_transient_builds_a_new_instance_every_time() {
  static BUILT: AtomicUsize = AtomicUsize::new(0);

  // Arrange
  let container = Container::new();
  container
    .register_type(Concrete::<SimpleService>::transient(), (), |_| {
      let id = BUILT.fetch_add(1, Ordering::SeqCst) as u32;
      SimpleService { id }
    })
    .unwrap();

  // Act
  let r1 = container.resolve_shared::<SimpleService>().unwrap();
  let r2 = container.resolve_shared::<SimpleService>().unwrap();
  let r3 = container.resolve_value::<SimpleService>().unwrap();

  // Assert
  assert!(!Arc::ptr_eq(&r1, &r2));
  assert_eq!(r1.id, 0);
  assert_eq!(r2.id, 1);
  assert_eq!(r3, SimpleService { id: 2 });
  assert_eq!(BUILT.load(Ordering::SeqCst), 3);
}

#[test]
fn test_singleton_is_built_once_and_shared() {
  static BUILT: AtomicUsize = AtomicUsize::new(0);

  // Arrange
  let container = Container::new();
  container
    .register_type(Concrete::<SimpleService>::singleton(), (), |_| {
      BUILT.fetch_add(1, Ordering::SeqCst);
      SimpleService { id: 101 }
    })
    .unwrap();

  // Nothing is built at registration time.
  assert_eq!(BUILT.load(Ordering::SeqCst), 0);

  // Act
  let r1 = container.resolve_shared::<SimpleService>().unwrap();
  let r2 = container.resolve_shared::<SimpleService>().unwrap();

  // Assert
  assert_eq!(r1.id, 101);
  assert!(Arc::ptr_eq(&r1, &r2));
  assert_eq!(BUILT.load(Ordering::SeqCst), 1);
}

#[test]
fn test_singleton_cannot_be_resolved_by_value() {
  static BUILT: AtomicUsize = AtomicUsize::new(0);

  let container = Container::new();
  container
    .register_type(Concrete::<SimpleService>::singleton(), (), |_| {
      BUILT.fetch_add(1, Ordering::SeqCst);
      SimpleService { id: 7 }
    })
    .unwrap();

  // Before the singleton exists.
  let err = container.resolve_value::<SimpleService>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::BadLifetime);
  assert_eq!(BUILT.load(Ordering::SeqCst), 0);

  // After it has been cached.
  container.resolve_shared::<SimpleService>().unwrap();
  let err = container.resolve_value::<SimpleService>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::BadLifetime);
  assert_eq!(BUILT.load(Ordering::SeqCst), 1);
}

#[test]
fn test_shared_only_refuses_value_resolution() {
  let container = Container::new();
  container
    .register_type(Concrete::<SimpleService>::transient().shared_only(), (), |_| {
      SimpleService { id: 3 }
    })
    .unwrap();

  assert_eq!(container.resolve_shared::<SimpleService>().unwrap().id, 3);
  let err = container.resolve_value::<SimpleService>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValueConstructionUnsupported);
}

// --- Polymorphic ---

#[test]
fn test_polymorphic_singleton_resolves_by_base() {
  let container = Container::new();
  container
    .register_type(
      Polymorphic::<dyn Greeter, EnglishGreeter>::singleton(|g| g as Arc<dyn Greeter>),
      (),
      |_| EnglishGreeter,
    )
    .unwrap();

  let g1 = container.resolve_shared::<dyn Greeter>().unwrap();
  let g2 = container.resolve_shared::<dyn Greeter>().unwrap();

  assert_eq!(g1.greet(), "Hello!");
  assert!(Arc::ptr_eq(&g1, &g2));
}

#[test]
fn test_polymorphic_transient_is_shared_only() {
  let container = Container::new();
  container
    .register_type(
      Polymorphic::<dyn Greeter, EnglishGreeter>::transient(|g| g as Arc<dyn Greeter>),
      (),
      |_| EnglishGreeter,
    )
    .unwrap();

  let g1 = container.resolve_shared::<dyn Greeter>().unwrap();
  let g2 = container.resolve_shared::<dyn Greeter>().unwrap();
  assert!(!Arc::ptr_eq(&g1, &g2));

  // `dyn Greeter` is unsized, so by-value requests go through the erased API.
  let err = container
    .resolve(TypeKey::of::<dyn Greeter>(), Mode::Value)
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::AbstractValueNotSupported);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "use Concrete instead")]
fn test_polymorphic_base_must_differ_from_the_implementation() {
  let _ = Polymorphic::<SimpleService, SimpleService>::transient(|s| s);
}

// --- Builders ---

#[test]
fn test_concrete_builder_serves_both_modes() {
  let container = Container::new();
  container
    .register_transient(ConcreteBuilder::new((args::literal(5u32),), |(id,)| {
      SimpleService { id }
    }))
    .unwrap();

  // Act
  let shared = container
    .resolve(TypeKey::of::<SimpleService>(), Mode::Shared)
    .unwrap();
  let owned = container
    .resolve(TypeKey::of::<SimpleService>(), Mode::Value)
    .unwrap();

  // Assert
  assert_eq!(shared.mode(), Mode::Shared);
  assert_eq!(owned.mode(), Mode::Value);
  match owned {
    Instance::Owned(value) => {
      assert_eq!(value.downcast::<SimpleService>().unwrap(), SimpleService { id: 5 });
    }
    other => panic!("expected an owned instance, got {:?}", other),
  }
  match shared {
    Instance::Shared(handle) => assert_eq!(handle.downcast::<SimpleService>().unwrap().id, 5),
    other => panic!("expected a shared instance, got {:?}", other),
  }
}

#[test]
fn test_shared_only_concrete_builder_refuses_value_resolution() {
  let container = Container::new();
  container
    .register_transient(
      ConcreteBuilder::new((args::literal(5u32),), |(id,)| SimpleService { id }).shared_only(),
    )
    .unwrap();

  let s1 = container.resolve_shared::<SimpleService>().unwrap();
  let s2 = container.resolve_shared::<SimpleService>().unwrap();
  assert_eq!(s1.id, 5);
  assert!(!Arc::ptr_eq(&s1, &s2));

  let err = container.resolve_value::<SimpleService>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValueConstructionUnsupported);
}

#[test]
fn test_polymorphic_builder_registered_directly() {
  static BUILT: AtomicUsize = AtomicUsize::new(0);

  let container = Container::new();
  container
    .register_singleton(PolymorphicBuilder::new(
      (),
      |_| {
        BUILT.fetch_add(1, Ordering::SeqCst);
        EnglishGreeter
      },
      |g| g as Arc<dyn Greeter>,
    ))
    .unwrap();

  let g1 = container.resolve_shared::<dyn Greeter>().unwrap();
  let g2 = container.resolve_shared::<dyn Greeter>().unwrap();
  assert_eq!(g1.greet(), "Hello!");
  assert!(Arc::ptr_eq(&g1, &g2));
  assert_eq!(BUILT.load(Ordering::SeqCst), 1);
  assert_eq!(container.lifetime_of::<dyn Greeter>(), Some(Lifetime::Singleton));
  assert!(!container.contains::<EnglishGreeter>());

  let err = container
    .resolve(TypeKey::of::<dyn Greeter>(), Mode::Value)
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::AbstractValueNotSupported);
}

// --- Instances ---

#[test]
fn test_registered_instance_is_returned_unchanged() {
  let container = Container::new();
  let outcome = container.register_instance(SimpleService { id: 202 }).unwrap();
  assert_eq!(outcome, Registration::Installed);

  let r1 = container.resolve_shared::<SimpleService>().unwrap();
  let r2 = container.resolve_shared::<SimpleService>().unwrap();

  assert_eq!(r1.id, 202);
  assert!(Arc::ptr_eq(&r1, &r2));
  assert_eq!(container.lifetime_of::<SimpleService>(), Some(Lifetime::Singleton));
  let err = container.resolve_value::<SimpleService>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::BadLifetime);
}

#[test]
fn test_shared_instance_keeps_the_callers_arc() {
  let container = Container::new();
  let greeter: Arc<dyn Greeter> = Arc::new(EnglishGreeter);
  container.register_shared_instance(greeter.clone()).unwrap();

  let resolved = container.resolve_shared::<dyn Greeter>().unwrap();

  assert!(Arc::ptr_eq(&greeter, &resolved));
}

#[test]
fn test_resolving_arc_directly() {
  // Registering an Arc<T> as the instance type must not be confused with T.
  let shared_string = Arc::new("shared config data".to_string());
  let container = Container::new();
  container.register_instance(shared_string.clone()).unwrap();

  let resolved = container.resolve_shared::<Arc<String>>().unwrap();

  assert!(Arc::ptr_eq(&shared_string, &*resolved));
  assert!(!container.contains::<String>());
}

#[test]
fn test_drop_behavior_of_singletons() {
  static DROPPED: AtomicUsize = AtomicUsize::new(0);

  struct ConnectionPool;
  impl Drop for ConnectionPool {
    fn drop(&mut self) {
      DROPPED.fetch_add(1, Ordering::SeqCst);
    }
  }

  let container = Container::new();
  container
    .register_type(Concrete::<ConnectionPool>::singleton(), (), |_| ConnectionPool)
    .unwrap();

  let pool = container.resolve_shared::<ConnectionPool>().unwrap();
  drop(pool);
  // The container still holds the cached instance.
  assert_eq!(DROPPED.load(Ordering::SeqCst), 0);

  drop(container);
  assert_eq!(DROPPED.load(Ordering::SeqCst), 1);
}

// --- Lambda builders ---

#[test]
fn test_owned_lambda_serves_both_modes() {
  let container = Container::new();
  container
    .register_transient(LambdaBuilder::owned(|_| Ok(SimpleService { id: 9 })))
    .unwrap();

  assert_eq!(container.resolve_shared::<SimpleService>().unwrap().id, 9);
  assert_eq!(container.resolve_value::<SimpleService>().unwrap().id, 9);
}

#[test]
fn test_shared_lambda_refuses_value_resolution() {
  let container = Container::new();
  container
    .register_transient(LambdaBuilder::shared(|_| Ok(Arc::new(SimpleService { id: 4 }))))
    .unwrap();

  assert_eq!(container.resolve_shared::<SimpleService>().unwrap().id, 4);
  let err = container.resolve_value::<SimpleService>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValueConstructionUnsupported);
}

#[test]
fn test_lambda_resolves_its_own_dependencies() {
  let container = Container::new();
  container.register_instance(40u32).unwrap();
  container
    .register_singleton(LambdaBuilder::owned(|c| {
      let base = c.resolve_shared::<u32>()?;
      Ok(SimpleService { id: *base + 2 })
    }))
    .unwrap();

  assert_eq!(container.resolve_shared::<SimpleService>().unwrap().id, 42);
}

// --- Arguments ---

#[test]
fn test_literal_exposes_its_captured_value() {
  let retries = args::literal(3u32);
  let name = args::literal("primary".to_string());

  assert_eq!(retries.get(), &3);
  assert_eq!(name.get(), "primary");
}

#[test]
fn test_type_key_identifies_the_type() {
  let key = TypeKey::of::<SimpleService>();

  assert_eq!(key.type_id(), TypeId::of::<SimpleService>());
  assert_ne!(key.type_id(), TypeId::of::<u32>());
  assert_eq!(TypeKey::of::<dyn Greeter>().type_id(), TypeId::of::<dyn Greeter>());
  assert!(key.type_name().ends_with("SimpleService"));
}

#[test]
fn test_literal_arguments_are_cloned_per_build() {
  let container = Container::new();
  container
    .register_type(
      Concrete::<Vec<String>>::transient(),
      (args::literal(vec!["a".to_string()]), args::literal(2usize)),
      |(mut items, extra)| {
        for i in 0..extra {
          items.push(i.to_string());
        }
        items
      },
    )
    .unwrap();

  // Mutating the clone inside one build does not leak into the next.
  let first = container.resolve_value::<Vec<String>>().unwrap();
  let second = container.resolve_value::<Vec<String>>().unwrap();
  assert_eq!(first, vec!["a", "0", "1"]);
  assert_eq!(first, second);
}

#[test]
fn test_owned_argument_moves_a_fresh_value_in() {
  #[derive(Debug)]
  struct Token(usize);
  struct Session {
    token: Token,
  }

  static ISSUED: AtomicUsize = AtomicUsize::new(0);

  let container = Container::new();
  container
    .register_type(Concrete::<Token>::transient(), (), |_| {
      Token(ISSUED.fetch_add(1, Ordering::SeqCst))
    })
    .unwrap();
  container
    .register_type(
      Concrete::<Session>::transient(),
      (args::owned::<Token>(),),
      |(token,)| Session { token },
    )
    .unwrap();

  let s1 = container.resolve_value::<Session>().unwrap();
  let s2 = container.resolve_value::<Session>().unwrap();

  assert_eq!(s1.token.0, 0);
  assert_eq!(s2.token.0, 1);
}

#[test]
fn test_owned_argument_fails_on_a_singleton_dependency() {
  #[derive(Debug)]
  struct Config;
  #[derive(Debug)]
  struct Service {
    _config: Config,
  }

  let container = Container::new();
  container
    .register_type(Concrete::<Config>::singleton(), (), |_| Config)
    .unwrap();
  container
    .register_type(
      Concrete::<Service>::transient(),
      (args::owned::<Config>(),),
      |(config,)| Service { _config: config },
    )
    .unwrap();

  let err = container.resolve_shared::<Service>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::BadLifetime);
}

#[test]
fn test_missing_dependency_fails_the_whole_build() {
  static BUILT: AtomicUsize = AtomicUsize::new(0);

  #[derive(Debug)]
  struct Consumer;

  let container = Container::new();
  container
    .register_type(
      Concrete::<Consumer>::singleton(),
      (args::shared::<dyn Greeter>(),),
      |_| {
        BUILT.fetch_add(1, Ordering::SeqCst);
        Consumer
      },
    )
    .unwrap();

  let err = container.resolve_shared::<Consumer>().unwrap_err();

  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert!(err.to_string().contains("Greeter"));
  assert_eq!(BUILT.load(Ordering::SeqCst), 0);
}

// --- Isolation ---

#[test]
fn test_containers_are_isolated() {
  let first = Container::new();
  let second = Container::new();
  first.register_instance(SimpleService { id: 1 }).unwrap();

  assert!(first.resolve_shared::<SimpleService>().is_ok());
  assert_eq!(
    second.resolve_shared::<SimpleService>().unwrap_err().kind(),
    ErrorKind::NotFound
  );
  assert_ne!(first.name(), second.name());
}
