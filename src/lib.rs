pub mod cli;
pub mod config;
pub mod devops;
pub mod error;
pub mod manager;

pub use error::{AdoError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
