//! Core module - configuration, state, server lifecycle, rate limiting

pub mod config;
pub mod rate_limit;
mod server;
mod state;

pub use config::Config;
pub use server::Server;
pub use state::{ServerState, ShutdownHandle};
