//! Questionnaire simulator
//!
//! Holds the pre-loaded catalog and registry for one simulation run together
//! with the current model selection and answer session. Every derived value is
//! recomputed from scratch on request.

use super::decisions::{decisions, TriggeredDecision};
use super::loading::aggregate;
use super::selector::ModelSelection;
use super::visibility::{visible_questions_by_category, CategoryView};
use crate::catalog::QuestionCatalog;
use crate::error::SimulatorError;
use crate::models::{ModelRegistry, UnderwritingModel};
use crate::session::{AnswerSession, AnswerValue, SessionEvent};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the questionnaire shows for the current session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedState {
    pub visible_questions_by_category: Vec<CategoryView>,
    pub by_category_loading: BTreeMap<String, f64>,
    pub total_loading: f64,
    pub decisions: Vec<TriggeredDecision>,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    catalog: QuestionCatalog,
    registry: ModelRegistry,
    selection: ModelSelection,
    session: AnswerSession,
}

impl Simulator {
    /// Start a run in unscoped mode with an empty session
    pub fn new(catalog: QuestionCatalog, registry: ModelRegistry) -> Self {
        Self {
            catalog,
            registry,
            selection: ModelSelection::NoModelSelected,
            session: AnswerSession::new(),
        }
    }

    /// Start a run with the configured bootstrap model, if the registry has it
    pub fn with_bootstrap(
        catalog: QuestionCatalog,
        registry: ModelRegistry,
        bootstrap_model_id: Option<i64>,
    ) -> Self {
        let selection = ModelSelection::bootstrap(&registry, bootstrap_model_id);
        Self {
            selection,
            ..Self::new(catalog, registry)
        }
    }

    /// Switch to model `id`, always clearing the session (even for the same model)
    pub fn select_model(&mut self, id: i64) -> Result<(), SimulatorError> {
        let model = self
            .registry
            .get(id)
            .cloned()
            .ok_or(SimulatorError::UnknownModel(id))?;

        log::debug!(
            "Selecting model {} ({}); discarding {} answers",
            id,
            model.label(),
            self.session.len()
        );
        self.selection = ModelSelection::Selected(model);
        self.apply(SessionEvent::Reset);
        Ok(())
    }

    /// Record raw input for a question
    ///
    /// Blank input clears the answer. Input for a question whose format has no
    /// questionnaire input is dropped.
    pub fn set_answer(&mut self, question_id: i64, raw: &str) -> Result<(), SimulatorError> {
        let question = self
            .catalog
            .get(question_id)
            .ok_or(SimulatorError::UnknownQuestion(question_id))?;

        if !question.answer_format.is_supported() {
            log::debug!(
                "Ignoring answer to question {}: unsupported format {:?}",
                question_id,
                question.answer_format.as_str()
            );
            return Ok(());
        }

        let event = match AnswerValue::parse(&question.answer_format, raw) {
            Some(value) => SessionEvent::Answered { question_id, value },
            None => SessionEvent::Cleared { question_id },
        };
        self.apply(event);
        Ok(())
    }

    /// Remove the answer for a question, if any
    pub fn clear_answer(&mut self, question_id: i64) {
        self.apply(SessionEvent::Cleared { question_id });
    }

    fn apply(&mut self, event: SessionEvent) {
        log::trace!("Session event: {:?}", event);
        let session = std::mem::take(&mut self.session);
        self.session = session.apply(event);
    }

    /// Recompute visible questions, loadings and decisions
    pub fn derived_state(&self) -> DerivedState {
        let loading = aggregate(&self.catalog, &self.session);
        DerivedState {
            visible_questions_by_category: visible_questions_by_category(
                &self.catalog,
                self.selection.model(),
                &self.session,
            ),
            by_category_loading: loading.by_category,
            total_loading: loading.total,
            decisions: decisions(&self.catalog, &self.session),
        }
    }

    pub fn selected_model(&self) -> Option<&UnderwritingModel> {
        self.selection.model()
    }

    pub fn selection(&self) -> &ModelSelection {
        &self.selection
    }

    pub fn session(&self) -> &AnswerSession {
        &self.session
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}
