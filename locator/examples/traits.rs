use fibre_locator::{module, resolve, start};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
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
  // --- Registration ---
  let logging = module("logging", |registry| {
    registry.add_singleton_trait::<dyn Logger>(|| Arc::new(ConsoleLogger));
  });

  // The report module resolves what the logging module provided.
  let reports = module("reports", |registry| {
    registry.add_singleton(|| ReportService {
      logger: registry.resolve::<dyn Logger>(),
    });
  });

  start([logging, reports]);

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve::<ReportService>();

  println!("Using the service...");
  report_service.generate_report();
}
