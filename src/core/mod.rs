mod args;
mod error;
mod logger;

pub use args::CliArgs;
pub use error::SweeperError;
pub use logger::setup_logging;
