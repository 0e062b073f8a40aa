mod config;
mod server;
mod session;

pub use config::Config;
pub use server::ServerConfig;
pub use session::SessionConfig;
