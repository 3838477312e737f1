//! Extra mortality loading accumulated from an answer session
//!
//! Inclusion rule:
//! - Yes/No questions count their loading only when answered exactly "Yes".
//! - Every other supported format counts its loading on any non-blank answer,
//!   whatever the answer says ("No" typed into an open question counts too).
//! - Unsupported formats never count.
//!
//! The rule is asymmetric on purpose; tests pin both halves.

use crate::catalog::{AnswerFormat, Question, QuestionCatalog};
use crate::session::{AnswerSession, AnswerValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Loading totals for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadingSummary {
    /// Categories with a strictly positive sum
    pub by_category: BTreeMap<String, f64>,
    /// Sum across all categories
    pub total: f64,
}

/// Check if `answer` makes `question`'s loading count
pub fn question_qualifies(question: &Question, answer: Option<&AnswerValue>) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    match question.answer_format {
        AnswerFormat::YesNo => answer.is_yes(),
        AnswerFormat::Unsupported(_) => false,
        AnswerFormat::MultipleChoice | AnswerFormat::Integer | AnswerFormat::OpenEnded => {
            !answer.is_blank()
        }
    }
}

/// Recompute loadings from scratch for every answered question
///
/// Each answer resolves through the catalog's Id lookup, so a duplicated Id
/// counts once, against the record lookups return.
pub fn aggregate(catalog: &QuestionCatalog, session: &AnswerSession) -> LoadingSummary {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();

    for (question_id, answer) in session.iter() {
        let Some(question) = catalog.get(question_id) else {
            continue;
        };
        if question_qualifies(question, Some(answer)) {
            *sums.entry(question.category.as_str()).or_insert(0.0) += question.em_loading;
        }
    }

    // Float `sum()` starts from -0.0; the total must read as plain 0
    let total = sums.values().fold(0.0_f64, |acc, sum| acc + sum);
    let by_category = sums
        .into_iter()
        .filter(|(_, sum)| *sum > 0.0)
        .map(|(category, sum)| (category.to_string(), sum))
        .collect();

    LoadingSummary { by_category, total }
}
