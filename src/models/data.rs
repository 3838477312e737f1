//! Underwriting model records matching the model registry format

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Product-scoped underwriting model
///
/// Age and sum assured bounds are carried for display only; they are not
/// checked against an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingModel {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Tenant")]
    pub tenant: String,

    #[serde(rename = "Currency", default)]
    pub currency: String,

    #[serde(rename = "Product")]
    pub product: String,

    #[serde(rename = "Minimum_Age", default)]
    pub minimum_age: u32,

    #[serde(rename = "Maximum_Age", default)]
    pub maximum_age: u32,

    #[serde(rename = "Minimum_Sum_Assured", default)]
    pub minimum_sum_assured: f64,

    #[serde(rename = "Maximum_Sum_Assured", default)]
    pub maximum_sum_assured: f64,

    /// Main question numbers this model puts in play
    #[serde(rename = "Questions_Included", default)]
    pub questions_included: BTreeSet<i64>,
}

impl UnderwritingModel {
    /// Create a model scoped to the given main question numbers
    pub fn new<I>(id: i64, tenant: impl Into<String>, product: impl Into<String>, questions: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            id,
            tenant: tenant.into(),
            currency: String::new(),
            product: product.into(),
            minimum_age: 0,
            maximum_age: 0,
            minimum_sum_assured: 0.0,
            maximum_sum_assured: 0.0,
            questions_included: questions.into_iter().collect(),
        }
    }

    /// Check if main question `main_number` is in scope
    pub fn includes(&self, main_number: i64) -> bool {
        self.questions_included.contains(&main_number)
    }

    /// Case-insensitive match of `term` against any field; an empty term matches everything
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }

        let questions = self
            .questions_included
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        [
            self.id.to_string(),
            self.tenant.clone(),
            self.currency.clone(),
            self.product.clone(),
            self.minimum_age.to_string(),
            self.maximum_age.to_string(),
            self.minimum_sum_assured.to_string(),
            self.maximum_sum_assured.to_string(),
            questions,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// "Tenant / Product (Currency)"
    pub fn label(&self) -> String {
        if self.currency.is_empty() {
            format!("{} / {}", self.tenant, self.product)
        } else {
            format!("{} / {} ({})", self.tenant, self.product, self.currency)
        }
    }
}
