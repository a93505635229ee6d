use fibre_inject::{args, Concrete, Container, ContainerBuilder, DuplicatePolicy};

struct Config {
  source: &'static str,
}

struct Processor {
  config: std::sync::Arc<Config>,
}

// By accepting a `&Container`, the logic can run against a controlled environment.
fn process_data(container: &Container) -> String {
  let processor = container
    .resolve_shared::<Processor>()
    .expect("Processor not registered");
  format!("Processed: {}", processor.config.source.to_uppercase())
}

fn configure(container: &Container, source: &'static str) {
  container.register_instance(Config { source }).unwrap();
  container
    .register_type(
      Concrete::<Processor>::transient(),
      (args::shared::<Config>(),),
      |(config,)| Processor { config },
    )
    .unwrap();
}

fn main() {
  // --- Test Scenario ---
  println!("--- Running with a test container ---");
  let test_container = ContainerBuilder::new().name("test").build();
  configure(&test_container, "test data");
  let result = process_data(&test_container);
  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Production Scenario ---
  // A container that refuses silent overrides.
  println!("\n--- Running with a production container ---");
  let prod_container = ContainerBuilder::new()
    .name("production")
    .default_policy(DuplicatePolicy::Once)
    .expected_types(2)
    .build();
  configure(&prod_container, "production database");
  let result = process_data(&prod_container);
  println!("Result: {}", result);
  assert_eq!(result, "Processed: PRODUCTION DATABASE");

  // Re-registering under the production default is refused.
  assert!(prod_container
    .register_instance(Config { source: "oops" })
    .is_err());

  // The two containers share nothing.
  assert_eq!(process_data(&test_container), "Processed: TEST DATA");
  println!("\nContainers are isolated, as expected.");
}
