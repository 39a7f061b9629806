//! Nick backend: a JSON status endpoint and the dashboard that displays it

pub mod agent;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod logger;
pub mod server;
pub mod status;

pub use app::App;
pub use error::{AppError, Result};
