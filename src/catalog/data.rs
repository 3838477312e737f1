//! Question records matching the question library format

use serde::{Deserialize, Serialize};

/// How a question is answered in the questionnaire
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnswerFormat {
    /// Yes/No radio choice
    YesNo,
    /// One of the question's `Answer_Values`
    MultipleChoice,
    /// Whole number entry
    Integer,
    /// Free text
    OpenEnded,
    /// Any label the questionnaire has no input for (raw label kept)
    Unsupported(String),
}

impl AnswerFormat {
    /// Get the label as stored in the question library
    pub fn as_str(&self) -> &str {
        match self {
            AnswerFormat::YesNo => "Yes/No",
            AnswerFormat::MultipleChoice => "Multiple Choice",
            AnswerFormat::Integer => "Integer",
            AnswerFormat::OpenEnded => "Open Ended",
            AnswerFormat::Unsupported(label) => label,
        }
    }

    /// Whether the questionnaire offers an input for this format
    pub fn is_supported(&self) -> bool {
        !matches!(self, AnswerFormat::Unsupported(_))
    }
}

impl From<String> for AnswerFormat {
    fn from(label: String) -> Self {
        match label.trim() {
            "Yes/No" | "YesNo" => AnswerFormat::YesNo,
            "Multiple Choice" | "MultipleChoice" => AnswerFormat::MultipleChoice,
            "Integer" => AnswerFormat::Integer,
            "Open Ended" | "OpenEnded" => AnswerFormat::OpenEnded,
            _ => AnswerFormat::Unsupported(label),
        }
    }
}

impl From<&str> for AnswerFormat {
    fn from(label: &str) -> Self {
        AnswerFormat::from(label.to_string())
    }
}

impl From<AnswerFormat> for String {
    fn from(format: AnswerFormat) -> Self {
        format.as_str().to_string()
    }
}

/// A single question from the question library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier
    #[serde(rename = "Id")]
    pub id: i64,

    /// Questionnaire section (e.g. "Medical", "Lifestyle")
    #[serde(rename = "category")]
    pub category: String,

    /// Display number; whole numbers are main questions, 3.1, 3.2 belong to 3
    #[serde(rename = "Question_Number")]
    pub question_number: f64,

    #[serde(rename = "Question_Text")]
    pub question_text: String,

    #[serde(rename = "Answer_Format")]
    pub answer_format: AnswerFormat,

    /// Options for multiple choice questions (empty otherwise)
    #[serde(rename = "Answer_Values", default)]
    pub answer_values: Vec<String>,

    /// Extra mortality loading added when the answer qualifies
    #[serde(rename = "EMLoading", default)]
    pub em_loading: f64,

    /// Underwriting decision surfaced when the question is answered "Yes"
    #[serde(rename = "Decision", default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
}

impl Question {
    /// Create a question with no loading and no decision
    pub fn new(
        id: i64,
        category: impl Into<String>,
        question_number: f64,
        question_text: impl Into<String>,
        answer_format: AnswerFormat,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            question_number,
            question_text: question_text.into(),
            answer_format,
            answer_values: Vec::new(),
            em_loading: 0.0,
            decision: None,
        }
    }

    /// Set the extra mortality loading
    pub fn with_loading(mut self, em_loading: f64) -> Self {
        self.em_loading = em_loading;
        self
    }

    /// Set the decision text
    pub fn with_decision(mut self, decision: impl Into<String>) -> Self {
        self.decision = Some(decision.into());
        self
    }

    /// Set the multiple choice options
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answer_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Main questions have a whole question number
    pub fn is_main(&self) -> bool {
        self.question_number.fract() == 0.0
    }

    /// Integer part of the question number (the main question it groups under)
    pub fn main_number(&self) -> i64 {
        self.question_number.floor() as i64
    }

    /// Check if this is a sub-question of main question `main_number`
    pub fn is_sub_question_of(&self, main_number: i64) -> bool {
        !self.is_main() && self.main_number() == main_number
    }

    /// Decision text, if present and not blank
    pub fn decision_text(&self) -> Option<&str> {
        self.decision
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn has_decision(&self) -> bool {
        self.decision_text().is_some()
    }

    /// Case-insensitive match of `term` against any field, as the library grid search does
    ///
    /// An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }

        let mut fields = vec![
            self.id.to_string(),
            self.category.clone(),
            self.question_number.to_string(),
            self.question_text.clone(),
            self.answer_format.as_str().to_string(),
            self.answer_values.join(","),
            self.em_loading.to_string(),
        ];
        fields.extend(self.decision.clone());

        fields.iter().any(|field| field.to_lowercase().contains(&term))
    }

    /// "3.1. Question text" as shown in the questionnaire
    pub fn display_label(&self) -> String {
        format!("{}. {}", self.question_number, self.question_text)
    }
}
