//! Question library records and loading

mod data;
pub mod loader;

pub use data::{AnswerFormat, Question};
pub use loader::{
    import_questions_csv, import_questions_from_reader, load_questions,
    load_questions_from_reader, parse_answer_values, replace_question_by_id, save_questions,
};

use std::collections::HashMap;

/// Read-only question library used for one simulation run
///
/// Keeps questions in library order (section layout follows it) and indexes
/// them by `Id`, the canonical identity.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    by_id: HashMap<i64, usize>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (idx, question) in questions.iter().enumerate() {
            if by_id.insert(question.id, idx).is_some() {
                log::warn!("Duplicate question Id {}; keeping the last record", question.id);
            }
        }
        Self { questions, by_id }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a question by `Id`
    pub fn get(&self, id: i64) -> Option<&Question> {
        self.by_id.get(&id).map(|&idx| &self.questions[idx])
    }

    /// Questions in library order
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Questions with any field containing `term`, case-insensitive, in library order
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |question| question.matches_search(term))
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for question in &self.questions {
            if !seen.contains(&question.category.as_str()) {
                seen.push(question.category.as_str());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl From<Vec<Question>> for QuestionCatalog {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}
