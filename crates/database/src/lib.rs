//! Persistence and services for event seating layouts.
//!
//! Every service is a unit struct whose associated functions take the
//! connection they run on. Multi-statement writes open their own transaction.

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod services;

pub use error::{ConfigError, ConnectError, LayoutError};
