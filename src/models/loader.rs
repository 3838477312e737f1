//! Load and save the underwriting model registry

use super::UnderwritingModel;
use crate::catalog::loader::leading_integer;
use crate::error::CatalogError;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Load all underwriting models from a JSON array file
pub fn load_models<P: AsRef<Path>>(path: P) -> Result<Vec<UnderwritingModel>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| CatalogError::io(path, err))?;
    let models = load_models_from_reader(BufReader::new(file))?;
    log::info!("Loaded {} underwriting models from {}", models.len(), path.display());
    Ok(models)
}

/// Load underwriting models from any reader
pub fn load_models_from_reader<R: Read>(reader: R) -> Result<Vec<UnderwritingModel>, CatalogError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Overwrite the model registry file with the whole collection
pub fn save_models<P: AsRef<Path>>(path: P, models: &[UnderwritingModel]) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| CatalogError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, models)?;
    writer.flush().map_err(|err| CatalogError::io(path, err))?;
    log::info!("Wrote {} underwriting models to {}", models.len(), path.display());
    Ok(())
}

/// Replace every model sharing `model.id` with `model`
///
/// Returns false when no model has that Id; nothing is added.
pub fn replace_model_by_id(models: &mut [UnderwritingModel], model: UnderwritingModel) -> bool {
    let mut replaced = false;
    for existing in models.iter_mut().filter(|existing| existing.id == model.id) {
        *existing = model.clone();
        replaced = true;
    }
    replaced
}

/// Parse "1, 2, 5" into main question numbers; entries without a leading integer are dropped
pub fn parse_questions_included(input: &str) -> BTreeSet<i64> {
    input.split(',').filter_map(leading_integer).collect()
}
