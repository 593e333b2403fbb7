use fibre_locator::global;
use std::thread;
use std::time::Duration;

struct ExpensiveClient {
  endpoint: String,
}

fn main() {
  // Nothing is built yet; the factory waits for the first resolution.
  global().add_lazy_singleton(|| {
    println!("Connecting ExpensiveClient (this happens once)...");
    thread::sleep(Duration::from_millis(20));
    ExpensiveClient {
      endpoint: "https://api.example.com".to_string(),
    }
  });

  thread::scope(|s| {
    for worker in 0..4 {
      s.spawn(move || {
        let client = global().resolve::<ExpensiveClient>();
        println!("worker {worker} uses {}", client.endpoint);
      });
    }
  });
}
