//! Underwriting model registry

mod data;
pub mod loader;

pub use data::UnderwritingModel;
pub use loader::{
    load_models, load_models_from_reader, parse_questions_included, replace_model_by_id, save_models,
};

/// Read-only registry of underwriting models for one simulation run
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<UnderwritingModel>,
}

impl ModelRegistry {
    pub fn new(models: Vec<UnderwritingModel>) -> Self {
        Self { models }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a model by `Id` (first match wins)
    pub fn get(&self, id: i64) -> Option<&UnderwritingModel> {
        self.models.iter().find(|model| model.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnderwritingModel> {
        self.models.iter()
    }

    /// Models with any field containing `term`, case-insensitive
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a UnderwritingModel> + 'a {
        self.models.iter().filter(move |model| model.matches_search(term))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl From<Vec<UnderwritingModel>> for ModelRegistry {
    fn from(models: Vec<UnderwritingModel>) -> Self {
        Self::new(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_registry() {
        let mut gbp = UnderwritingModel::new(2, "Beta Assurance", "Critical Illness", [3]);
        gbp.currency = "GBP".to_string();
        let registry = ModelRegistry::new(vec![UnderwritingModel::new(1, "Acme Life", "Term", [1, 2]), gbp]);

        let ids = |term: &str| registry.search(term).map(|m| m.id).collect::<Vec<_>>();
        assert_eq!(ids("acme"), vec![1]);
        assert_eq!(ids("gbp"), vec![2]);
        assert_eq!(ids("illness"), vec![2]);
        assert_eq!(ids(""), vec![1, 2]);
        assert!(ids("whole life").is_empty());
    }
}
