//! Stream lifecycle handlers dispatched through a shared registry.
//!
//! Run with `RUST_LOG=the_callback=trace cargo run -p the-callback --example
//! streams` to see registration and invocation events.

use std::{
  panic,
  sync::Arc,
  thread,
};

use parking_lot::RwLock;
use the_callback::{
  CallbackRegistry,
  Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Stream {
  Open,
  Close,
}

struct StreamService;

impl StreamService {
  fn open_stream(&self, id: String, buffers: i32) -> String {
    println!("opening {id} with {buffers} buffers");
    String::from("stream opened")
  }
}

fn main() -> Result<()> {
  env_logger::init();

  let registry = Arc::new(RwLock::new(CallbackRegistry::new()));
  {
    let mut registry = registry.write();
    registry.register(Stream::Close, |id: String| println!("closing {id}"));
    registry.register_method(Stream::Open, Arc::new(StreamService), StreamService::open_stream);
  }

  let worker = thread::spawn({
    let registry = registry.clone();
    move || registry.read().invoke(&Stream::Close, ("0xBEBEFF",))
  });

  let opened = registry
    .read()
    .invoke_as::<String>(&Stream::Open, ("X1234567X", 20))?;
  println!("{opened}");

  match worker.join() {
    Ok(result) => result,
    Err(payload) => panic::resume_unwind(payload),
  }
}
