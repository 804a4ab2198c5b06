// Declaração dos nossos módulos
pub mod api;
pub mod common;
pub mod config;
pub mod flow;
pub mod models;
pub mod services;
pub mod storage;

// Reexporta o que a camada de UI consome direto.
pub use common::error::AppError;
pub use config::{AppConfig, AppState};
pub use flow::{EventFlow, Step, StepPosition};
pub use models::event::EventDraft;
