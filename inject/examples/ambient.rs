use fibre_inject::{ambient, resolve, Concrete, ContainerBuilder};

struct Greeting(&'static str);

fn greet() -> String {
  // Any code in the process can reach the ambient container.
  let container = ambient::get().expect("ambient container not installed");
  resolve!(container, Greeting).0.to_string()
}

fn main() {
  let container = ambient::install(ContainerBuilder::new().name("app").build())
    .expect("ambient container already installed");
  container
    .register_type(Concrete::<Greeting>::singleton(), (), |_| {
      Greeting("Hello from the ambient container!")
    })
    .unwrap();

  let message = std::thread::spawn(greet).join().unwrap();
  println!("{}", message);
  assert_eq!(message, "Hello from the ambient container!");
}
