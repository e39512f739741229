//! Logging and callback-passing demonstrations
//!
//! Covers callables bound to a receiver, receiver-less callables, multicast
//! combination, callables passed as parameters, and callables returned from
//! functions.

use crate::config::AppConfig;
use crate::sinks::{emit, stamp, FileSink, LineSink};
use anyhow::Result;
use callback_registry::{Action, Callable, Func, Registry};
use std::sync::Arc;

/// Logging signature: text in, write outcome out
pub type LogCallback = Func<String, Result<()>>;

/// `amount -> ()` callback used by [`print_number`]
pub type PrintHelp = Action<i32>;

/// Receiver for the bound logging callables
pub struct Logger {
    console: Arc<dyn LineSink>,
    file: FileSink,
}

impl Logger {
    pub fn new(console: Arc<dyn LineSink>, file: FileSink) -> Self {
        Self { console, file }
    }

    pub fn log_to_screen(&self, text: String) -> Result<()> {
        self.console.write_line(&stamp(&text))
    }

    pub fn log_to_file(&self, text: String) -> Result<()> {
        self.file.write_line(&stamp(&text))?;
        self.console.write_line("Written into file (instance)")
    }
}

/// Logger with no receiver behind it
pub fn screen_logger(console: Arc<dyn LineSink>) -> LogCallback {
    Callable::new(move |text: String| console.write_line(&stamp(&text)))
}

/// Invoke whatever logger the caller hands in
pub fn log_text(callback: &LogCallback, message: &str) -> Result<()> {
    callback.call(message.to_string())
}

/// Multicast logging: screen + file, then receiver-less and parameter-passed
pub fn run_basic(config: &AppConfig, console: Arc<dyn LineSink>, text: &str) -> Result<()> {
    let log_file = FileSink::new(config.logging.resolve(&config.logging.log_file));
    log::info!("Logging to {:?}", log_file.path());

    let logger = Arc::new(Logger::new(Arc::clone(&console), log_file));
    let to_screen = Callable::bound(Arc::clone(&logger), Logger::log_to_screen);
    let to_file = Callable::bound(logger, Logger::log_to_file);

    let multi_log = Registry::with_callable(to_screen) + to_file.clone();
    multi_log.try_invoke(text.to_string())?;

    let static_log = screen_logger(Arc::clone(&console));
    static_log.call("Static method call example".to_string())?;

    log_text(&to_file, "Saved using delegate parameter")?;

    console.write_line("")?;
    console.write_line("---- Multicast Delegate ----")?;
    let screen = Arc::clone(&console);
    let file = Arc::clone(&console);
    let mut multicast: Registry<String, ()> = Registry::with_callable(Callable::new(move |msg: String| {
        emit(screen.as_ref(), &format!("Screen Log: {}", msg))
    }));
    multicast += Callable::new(move |msg: String| emit(file.as_ref(), &format!("File Log: {}", msg)));
    multicast.dispatch("System started".to_string());

    Ok(())
}

/// Receiver for the price callbacks
pub struct PriceBoard {
    console: Arc<dyn LineSink>,
}

impl PriceBoard {
    pub fn new(console: Arc<dyn LineSink>) -> Self {
        Self { console }
    }

    pub fn print(&self, price: i32) {
        emit(self.console.as_ref(), &format!("Price: {}", price));
    }

    pub fn cost(&self, cost: i32) {
        emit(self.console.as_ref(), &format!("Cost: {}", cost));
    }
}

/// Hand `amount` to a caller-supplied callback
pub fn print_number(amount: i32, callback: &PrintHelp) {
    callback.call(amount);
}

/// A function whose result is itself a callable
pub fn message_callback(console: Arc<dyn LineSink>) -> Action<String> {
    Callable::new(move |message: String| emit(console.as_ref(), &format!("Message: {}", message)))
}

pub fn run_callbacks(console: Arc<dyn LineSink>) -> Result<()> {
    let board = Arc::new(PriceBoard::new(Arc::clone(&console)));
    print_number(100, &Callable::bound(Arc::clone(&board), PriceBoard::print));
    print_number(200, &Callable::bound(board, PriceBoard::cost));

    message_callback(Arc::clone(&console)).call("Hello from Demo".to_string());

    console.write_line("")?;
    console.write_line("---- Delegate as Parameter ----")?;
    let number = Arc::clone(&console);
    let double = Arc::clone(&console);
    print_number(
        100,
        &Callable::new(move |n: i32| emit(number.as_ref(), &format!("Number: {}", n))),
    );
    print_number(
        200,
        &Callable::new(move |n: i32| emit(double.as_ref(), &format!("Double: {}", n * 2))),
    );

    Ok(())
}
