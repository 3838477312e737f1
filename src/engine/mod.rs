//! Underwriting rule evaluation: visibility, loadings and decisions

mod decisions;
mod loading;
mod selector;
mod simulator;
mod visibility;

pub use decisions::{decisions, TriggeredDecision};
pub use loading::{aggregate, question_qualifies, LoadingSummary};
pub use selector::ModelSelection;
pub use simulator::{DerivedState, Simulator};
pub use visibility::{
    reveals_sub_questions, sub_questions_of, visible_main_questions,
    visible_questions_by_category, CategoryView, VisibleQuestion,
};
