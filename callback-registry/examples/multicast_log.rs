//! Multicast logging walkthrough
//!
//! Registers a screen logger twice and a counting logger once, then shows
//! the three invocation modes side by side.
//!
//! Usage:
//!   RUST_LOG=trace cargo run --example multicast_log

use callback_registry::{Action, Callable, Func, Registry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() {
    env_logger::init();

    let screen: Action<String> = Callable::new(|text: String| println!("Screen Log: {}", text));
    let written = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&written);
    let file: Action<String> = Callable::new(move |text: String| {
        counter.fetch_add(1, Ordering::SeqCst);
        println!("File Log: {}", text);
    });

    let mut log = Registry::with_callable(screen.clone());
    log += file;
    log += screen.clone();
    log.dispatch("System started".to_string());

    log -= &screen;
    log.dispatch("Screen logger removed once".to_string());
    println!("File logger ran {} time(s)", written.load(Ordering::SeqCst));

    let grades: Registry<i32, String> = [
        Func::new(|marks: i32| format!("raw {}", marks)),
        Func::new(|marks: i32| if marks >= 50 { "pass".to_string() } else { "fail".to_string() }),
    ]
    .into_iter()
    .collect();

    println!("all results:  {:?}", grades.invoke(72));
    println!("last result:  {:?}", grades.invoke_last(72));
    match grades.invoke_one(5, 72) {
        Ok(result) => println!("fifth result: {}", result),
        Err(e) => println!("fifth result: {}", e),
    }
}
