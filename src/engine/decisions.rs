//! Underwriting decisions triggered by "Yes" answers

use super::visibility::by_question_number;
use crate::catalog::{Question, QuestionCatalog};
use crate::session::AnswerSession;
use serde::Serialize;

/// A decision surfaced by an answered question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredDecision {
    pub question_id: i64,
    pub question_number: f64,
    pub question_text: String,
    pub decision: String,
}

/// Decisions for every question answered exactly "Yes" that carries a decision
///
/// Ordered by question number, then `Id`. Answers for questions missing from
/// the catalog, or with a format the questionnaire cannot answer, are ignored.
pub fn decisions(catalog: &QuestionCatalog, session: &AnswerSession) -> Vec<TriggeredDecision> {
    let mut triggered: Vec<&Question> = session
        .iter()
        .filter(|(_, answer)| answer.is_yes())
        .filter_map(|(question_id, _)| catalog.get(question_id))
        .filter(|question| question.answer_format.is_supported())
        .filter(|question| question.has_decision())
        .collect();
    triggered.sort_by(|a, b| by_question_number(a, b));

    triggered
        .into_iter()
        .filter_map(|question| {
            question.decision_text().map(|decision| TriggeredDecision {
                question_id: question.id,
                question_number: question.question_number,
                question_text: question.question_text.clone(),
                decision: decision.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AnswerFormat;
    use crate::session::{AnswerValue, SessionEvent};

    fn yes(session: AnswerSession, question_id: i64) -> AnswerSession {
        session.apply(SessionEvent::Answered {
            question_id,
            value: AnswerValue::Boolean(true),
        })
    }

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Question::new(1, "Medical", 4.0, "Cancer?", AnswerFormat::YesNo).with_decision("Decline"),
            Question::new(2, "Medical", 1.0, "Heart condition?", AnswerFormat::YesNo)
                .with_decision(" Refer to CMO "),
            Question::new(3, "Lifestyle", 2.0, "Smoker?", AnswerFormat::YesNo).with_decision(""),
            Question::new(4, "Lifestyle", 3.0, "Hobbies", AnswerFormat::OpenEnded)
                .with_decision("Hazardous pursuits questionnaire"),
        ])
    }

    #[test]
    fn test_ordered_by_question_number_not_answer_order() {
        let catalog = catalog();
        let session = yes(yes(AnswerSession::new(), 1), 2);

        let found = decisions(&catalog, &session);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].question_id, 2);
        assert_eq!(found[0].decision, "Refer to CMO");
        assert_eq!(found[1].question_id, 1);
        assert_eq!(found[1].question_text, "Cancer?");
    }

    #[test]
    fn test_blank_decisions_and_non_yes_answers_are_skipped() {
        let catalog = catalog();
        let session = yes(AnswerSession::new(), 3).apply(SessionEvent::Answered {
            question_id: 1,
            value: AnswerValue::Boolean(false),
        });
        assert!(decisions(&catalog, &session).is_empty());
    }

    #[test]
    fn test_open_question_triggers_only_on_literal_yes() {
        let catalog = catalog();
        let text = |raw: &str| SessionEvent::Answered {
            question_id: 4,
            value: AnswerValue::Text(raw.to_string()),
        };

        let session = AnswerSession::new().apply(text("skydiving"));
        assert!(decisions(&catalog, &session).is_empty());

        let session = session.apply(text("Yes"));
        assert_eq!(decisions(&catalog, &session).len(), 1);
    }

    #[test]
    fn test_unsupported_format_never_decides() {
        let catalog = QuestionCatalog::new(vec![Question::new(
            9,
            "Travel",
            6.0,
            "Travel date",
            AnswerFormat::Unsupported("Date".into()),
        )
        .with_decision("Decline")]);
        let session = AnswerSession::new().apply(SessionEvent::Answered {
            question_id: 9,
            value: AnswerValue::Text("Yes".to_string()),
        });
        assert!(decisions(&catalog, &session).is_empty());
    }

    #[test]
    fn test_unknown_question_ids_are_ignored() {
        let session = yes(AnswerSession::new(), 42);
        assert!(decisions(&catalog(), &session).is_empty());
        assert!(decisions(&QuestionCatalog::empty(), &session).is_empty());
    }
}
