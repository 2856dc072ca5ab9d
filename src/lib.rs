pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod services;

pub use app::{Application, RunSettings, RunSummary};
pub use error::{AppError, AppResult};
