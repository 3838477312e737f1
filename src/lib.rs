//! Underwriting Engine - question library, underwriting models and questionnaire simulation
//!
//! This library provides:
//! - Question library and underwriting model records with JSON persistence
//! - Spreadsheet (CSV) import of the question library
//! - Model-scoped question visibility with conditionally revealed sub-questions
//! - Extra mortality loading aggregation per category and in total
//! - Underwriting decisions triggered by "Yes" answers

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod session;

// Re-export commonly used types
pub use catalog::{AnswerFormat, Question, QuestionCatalog};
pub use config::SimulatorConfig;
pub use engine::{DerivedState, LoadingSummary, ModelSelection, Simulator, TriggeredDecision};
pub use error::{CatalogError, SimulatorError};
pub use models::{ModelRegistry, UnderwritingModel};
pub use session::{AnswerSession, AnswerValue, SessionEvent};
