//! Which questions are currently in play
//!
//! A model scopes main questions by their whole question number. Sub-questions
//! are never scoped directly: they show under a visible main question once
//! that question is answered exactly "Yes".

use crate::catalog::{Question, QuestionCatalog};
use crate::models::UnderwritingModel;
use crate::session::AnswerSession;
use serde::Serialize;
use std::cmp::Ordering;

/// A visible main question and the sub-questions it currently reveals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleQuestion {
    pub question: Question,
    pub sub_questions: Vec<Question>,
}

/// Visible questions of one questionnaire section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub category: String,
    pub questions: Vec<VisibleQuestion>,
}

/// Question number ascending, `Id` as tie-break
pub(crate) fn by_question_number(a: &Question, b: &Question) -> Ordering {
    a.question_number
        .total_cmp(&b.question_number)
        .then(a.id.cmp(&b.id))
}

/// Main questions of `category` in scope for `model`, ordered by question number
///
/// With no model selected every main question of the category is visible.
pub fn visible_main_questions<'a>(
    catalog: &'a QuestionCatalog,
    model: Option<&UnderwritingModel>,
    category: &str,
) -> Vec<&'a Question> {
    let mut questions: Vec<&Question> = catalog
        .iter()
        .filter(|q| q.category == category && q.is_main())
        .filter(|q| model.map_or(true, |m| m.includes(q.main_number())))
        .collect();
    questions.sort_by(|a, b| by_question_number(a, b));
    questions
}

/// Sub-questions grouped under main question `main_number`, ordered by question number
pub fn sub_questions_of(catalog: &QuestionCatalog, main_number: i64) -> Vec<&Question> {
    let mut questions: Vec<&Question> = catalog
        .iter()
        .filter(|q| q.is_sub_question_of(main_number))
        .collect();
    questions.sort_by(|a, b| by_question_number(a, b));
    questions
}

/// Sub-questions show only when the main question's answer is exactly "Yes"
pub fn reveals_sub_questions(question: &Question, session: &AnswerSession) -> bool {
    session.is_yes(question.id)
}

/// Per category, the visible main questions and their revealed sub-questions
///
/// Categories keep library order; a category with nothing visible is left out.
pub fn visible_questions_by_category(
    catalog: &QuestionCatalog,
    model: Option<&UnderwritingModel>,
    session: &AnswerSession,
) -> Vec<CategoryView> {
    catalog
        .categories()
        .into_iter()
        .filter_map(|category| {
            let questions: Vec<VisibleQuestion> = visible_main_questions(catalog, model, category)
                .into_iter()
                .map(|main| {
                    let sub_questions = if reveals_sub_questions(main, session) {
                        sub_questions_of(catalog, main.main_number())
                            .into_iter()
                            .cloned()
                            .collect()
                    } else {
                        Vec::new()
                    };
                    VisibleQuestion {
                        question: main.clone(),
                        sub_questions,
                    }
                })
                .collect();

            if questions.is_empty() {
                None
            } else {
                Some(CategoryView {
                    category: category.to_string(),
                    questions,
                })
            }
        })
        .collect()
}
