use fibre_inject::{args, resolve, Concrete, Container, Polymorphic};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger {
  prefix: String,
}
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[{}]: {}", self.prefix, message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  // Run with RUST_LOG=fibre_inject=debug to watch the container work.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let container = Container::builder().name("reports").build();

  // --- Registration ---

  // ConsoleLogger is built once and served as `Arc<dyn Logger>`.
  container
    .register_type(
      Polymorphic::<dyn Logger, ConsoleLogger>::singleton(|l| l as Arc<dyn Logger>),
      (args::literal("CONSOLE LOG".to_string()),),
      |(prefix,)| ConsoleLogger { prefix },
    )
    .unwrap();

  // ReportService never creates its logger; the container injects it.
  container
    .register_type(
      Concrete::<ReportService>::transient(),
      (args::shared::<dyn Logger>(),),
      |(logger,)| ReportService { logger },
    )
    .unwrap();

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!(container, ReportService);

  println!("Using the service...");
  report_service.generate_report();

  // Both resolutions share the one logger.
  let logger = resolve!(container, trait Logger);
  assert!(Arc::ptr_eq(&logger, &report_service.logger));
}
