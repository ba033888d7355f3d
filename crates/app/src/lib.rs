//! Tether - command line front end and composition root.
//!
//! The binary parses arguments, resolves [`ClientConfig`], wires
//! [`Services`] and runs one command.
//!
//! [`ClientConfig`]: tether_application::ClientConfig

pub mod cli;
pub mod commands;
pub mod error;
pub mod services;

pub use cli::{Cli, Command};
pub use error::AppError;
pub use services::Services;
