use fibre_inject::{resolve, try_resolve, Container, DuplicatePolicy, ErrorKind};
use std::panic;

struct UnregisteredService;

#[derive(Debug)]
struct Port(u16);

fn main() {
  let container = Container::new();

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(Container::new(), UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible API ---
  println!("\nNow, attempting to resolve using `resolve_shared`...");
  match container.resolve_shared::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err) => {
      assert_eq!(err.kind(), ErrorKind::NotFound);
      println!("Correctly received an error: {}", err);
    }
  }
  assert!(try_resolve!(container, UnregisteredService).is_none());

  // --- Duplicate registrations ---
  println!("\nRegistering the same type under each policy...");
  container.register_instance(Port(8080)).unwrap();

  let outcome = container
    .register_instance_with_policy(Port(9090), DuplicatePolicy::Ignore)
    .unwrap();
  println!("Ignore: {:?}, port stays {:?}", outcome, resolve!(container, Port));

  let err = container
    .register_instance_with_policy(Port(9090), DuplicatePolicy::Once)
    .unwrap_err();
  println!("Once: {}", err);

  let outcome = container.register_instance(Port(9090)).unwrap();
  println!("Override: {:?}, port is now {:?}", outcome, resolve!(container, Port));
}
