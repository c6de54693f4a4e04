pub mod analyses;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod service;
pub mod translations;
pub mod upload;

pub use client::AnalysisClient;
pub use config::{LogFormat, ServiceConfig};
pub use error::{ClientError, ServiceError};
pub use service::{AppState, build_router};
pub use models::*;
