use fibre_inject::{resolve, Concrete, Container};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::thread;

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A per-request service holding the shared tracker.
struct Request {
  tracker: Arc<RequestTracker>,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let container = Container::new();

  // --- Singleton Registration ---
  // This constructor runs ONCE, however many threads ask for it.
  container
    .register_type(Concrete::<RequestTracker>::singleton(), (), |_| {
      println!("Creating SINGLETON RequestTracker...");
      RequestTracker {
        id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
      }
    })
    .unwrap();

  // --- Transient Registration ---
  // This constructor runs EVERY time a Request is resolved.
  container
    .register_type(
      Concrete::<Request>::transient(),
      (fibre_inject::args::shared::<RequestTracker>(),),
      |(tracker,)| {
        println!("Creating TRANSIENT Request...");
        Request { tracker }
      },
    )
    .unwrap();

  println!("--- Resolving from several threads ---");
  let shared = &container;
  let requests: Vec<Request> = thread::scope(|s| {
    let handles: Vec<_> = (0..4)
      .map(|_| s.spawn(move || resolve!(shared, value Request)))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  for request in &requests {
    assert_eq!(request.tracker.id, 0);
    assert!(Arc::ptr_eq(&request.tracker, &requests[0].tracker));
  }
  println!(
    "{} requests share tracker {}, as expected.",
    requests.len(),
    requests[0].tracker.id
  );

  // Singletons are only ever handed out shared.
  assert!(container.resolve_value::<RequestTracker>().is_err());
  println!("A by-value request for the singleton was refused.");
}
