pub mod console_logger;
pub mod logger;
pub mod mock_logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, NullLogger};
pub use mock_logger::MockLogger;
