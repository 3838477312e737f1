//! Answer session state for one simulation run
//!
//! The session is a value: every change goes through [`AnswerSession::apply`],
//! which consumes the old session and returns the next one. Loadings and
//! decisions are computed from a session, never stored in it.

use crate::catalog::AnswerFormat;
use serde::Serialize;
use std::collections::BTreeMap;

/// The literal answer that qualifies a Yes/No question, reveals sub-questions
/// and triggers decisions
pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// A single recorded answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum AnswerValue {
    Boolean(bool),
    Choice(String),
    Integer(i64),
    Text(String),
}

impl AnswerValue {
    /// Interpret raw input for a question of the given format
    ///
    /// Returns `None` for blank input and for formats the questionnaire has no
    /// input for. Yes/No questions only become `Boolean` on the exact labels
    /// "Yes" and "No"; anything else is kept as text.
    pub fn parse(format: &AnswerFormat, raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        match format {
            AnswerFormat::YesNo => Some(match raw {
                YES => AnswerValue::Boolean(true),
                NO => AnswerValue::Boolean(false),
                other => AnswerValue::Text(other.to_string()),
            }),
            AnswerFormat::MultipleChoice => Some(AnswerValue::Choice(raw.to_string())),
            AnswerFormat::Integer => Some(
                raw.trim()
                    .parse::<i64>()
                    .map(AnswerValue::Integer)
                    .unwrap_or_else(|_| AnswerValue::Text(raw.to_string())),
            ),
            AnswerFormat::OpenEnded => Some(AnswerValue::Text(raw.to_string())),
            AnswerFormat::Unsupported(_) => None,
        }
    }

    /// The answer as the questionnaire would display it
    pub fn as_text(&self) -> String {
        match self {
            AnswerValue::Boolean(true) => YES.to_string(),
            AnswerValue::Boolean(false) => NO.to_string(),
            AnswerValue::Choice(choice) => choice.clone(),
            AnswerValue::Integer(value) => value.to_string(),
            AnswerValue::Text(text) => text.clone(),
        }
    }

    /// Exactly "Yes", case sensitive, whatever the question's format
    pub fn is_yes(&self) -> bool {
        match self {
            AnswerValue::Boolean(value) => *value,
            AnswerValue::Choice(text) | AnswerValue::Text(text) => text == YES,
            AnswerValue::Integer(_) => false,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Boolean(_) | AnswerValue::Integer(_) => false,
            AnswerValue::Choice(text) | AnswerValue::Text(text) => text.trim().is_empty(),
        }
    }
}

/// Change applied to an answer session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Answered { question_id: i64, value: AnswerValue },
    Cleared { question_id: i64 },
    /// Drop every answer (model change)
    Reset,
}

/// Answers keyed by question `Id`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerSession {
    answers: BTreeMap<i64, AnswerValue>,
}

impl AnswerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next session
    pub fn apply(mut self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Answered { question_id, value } => {
                self.answers.insert(question_id, value);
            }
            SessionEvent::Cleared { question_id } => {
                self.answers.remove(&question_id);
            }
            SessionEvent::Reset => self.answers.clear(),
        }
        self
    }

    pub fn get(&self, question_id: i64) -> Option<&AnswerValue> {
        self.answers.get(&question_id)
    }

    /// Check if the recorded answer is exactly "Yes"
    pub fn is_yes(&self, question_id: i64) -> bool {
        self.get(question_id).is_some_and(AnswerValue::is_yes)
    }

    /// Answers in ascending question `Id` order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &AnswerValue)> {
        self.answers.iter().map(|(&id, value)| (id, value))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_parsing_is_exact() {
        let yes = AnswerValue::parse(&AnswerFormat::YesNo, "Yes").unwrap();
        let no = AnswerValue::parse(&AnswerFormat::YesNo, "No").unwrap();
        let lower = AnswerValue::parse(&AnswerFormat::YesNo, "yes").unwrap();

        assert_eq!(yes, AnswerValue::Boolean(true));
        assert_eq!(no, AnswerValue::Boolean(false));
        assert_eq!(lower, AnswerValue::Text("yes".to_string()));
        assert!(yes.is_yes());
        assert!(!no.is_yes());
        assert!(!lower.is_yes());
    }

    #[test]
    fn test_parse_by_format() {
        assert_eq!(
            AnswerValue::parse(&AnswerFormat::Integer, " 12 "),
            Some(AnswerValue::Integer(12))
        );
        assert_eq!(
            AnswerValue::parse(&AnswerFormat::Integer, "twelve"),
            Some(AnswerValue::Text("twelve".to_string()))
        );
        assert_eq!(
            AnswerValue::parse(&AnswerFormat::MultipleChoice, "Angina"),
            Some(AnswerValue::Choice("Angina".to_string()))
        );
        assert_eq!(AnswerValue::parse(&AnswerFormat::OpenEnded, "   "), None);
        assert_eq!(
            AnswerValue::parse(&AnswerFormat::Unsupported("Date".into()), "2020-01-01"),
            None
        );
    }

    #[test]
    fn test_text_yes_counts_as_yes() {
        let choice = AnswerValue::parse(&AnswerFormat::MultipleChoice, "Yes").unwrap();
        assert!(choice.is_yes());
        assert_eq!(choice.as_text(), "Yes");
        assert!(!AnswerValue::Integer(1).is_yes());
    }

    #[test]
    fn test_reducer_transitions() {
        let session = AnswerSession::new()
            .apply(SessionEvent::Answered { question_id: 2, value: AnswerValue::Boolean(true) })
            .apply(SessionEvent::Answered { question_id: 1, value: AnswerValue::Integer(3) });
        assert_eq!(session.len(), 2);
        assert!(session.is_yes(2));
        assert_eq!(session.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![1, 2]);

        let session = session.apply(SessionEvent::Answered {
            question_id: 2,
            value: AnswerValue::Boolean(false),
        });
        assert!(!session.is_yes(2));

        let session = session.apply(SessionEvent::Cleared { question_id: 1 });
        assert!(session.get(1).is_none());

        let session = session.apply(SessionEvent::Reset);
        assert!(session.is_empty());
    }
}
