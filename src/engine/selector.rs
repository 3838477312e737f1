//! Active underwriting model selection

use crate::models::{ModelRegistry, UnderwritingModel};

/// Which model, if any, scopes the questionnaire
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModelSelection {
    /// Unscoped: every main question is visible
    #[default]
    NoModelSelected,
    Selected(UnderwritingModel),
}

impl ModelSelection {
    /// Initial selection on simulator entry
    ///
    /// Picks the configured bootstrap model when the registry has it, otherwise
    /// starts unscoped.
    pub fn bootstrap(registry: &ModelRegistry, bootstrap_id: Option<i64>) -> Self {
        match bootstrap_id {
            Some(id) => match registry.get(id) {
                Some(model) => {
                    log::debug!("Bootstrapping with model {} ({})", id, model.label());
                    ModelSelection::Selected(model.clone())
                }
                None => {
                    log::warn!("Bootstrap model {} not in registry; starting unscoped", id);
                    ModelSelection::NoModelSelected
                }
            },
            None => ModelSelection::NoModelSelected,
        }
    }

    pub fn model(&self) -> Option<&UnderwritingModel> {
        match self {
            ModelSelection::NoModelSelected => None,
            ModelSelection::Selected(model) => Some(model),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, ModelSelection::Selected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModelRegistry {
        ModelRegistry::new(vec![
            UnderwritingModel::new(1, "Acme", "Term", [1, 2]),
            UnderwritingModel::new(2, "Acme", "Critical Illness", [3]),
        ])
    }

    #[test]
    fn test_bootstrap_picks_configured_model() {
        let selection = ModelSelection::bootstrap(&registry(), Some(2));
        assert!(selection.is_selected());
        assert_eq!(selection.model().map(|m| m.id), Some(2));
    }

    #[test]
    fn test_bootstrap_falls_back_to_unscoped() {
        assert_eq!(
            ModelSelection::bootstrap(&registry(), Some(9)),
            ModelSelection::NoModelSelected
        );
        assert_eq!(
            ModelSelection::bootstrap(&registry(), None),
            ModelSelection::NoModelSelected
        );
        assert!(ModelSelection::bootstrap(&ModelRegistry::empty(), Some(1)).model().is_none());
    }
}
