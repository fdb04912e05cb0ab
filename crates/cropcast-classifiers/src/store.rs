//! Opaque persistence for fitted models.
//!
//! The artifact layout is private to this module; the only contract is
//! that `load_model(save_model(m))` predicts exactly like `m`.
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::forest::ClassifierModel;

/// Serialize a fitted model to `path`.
pub fn save_model<P: AsRef<Path>>(model: &ClassifierModel, path: P) -> Result<()> {
    let json = serde_json::to_string(model).context("Failed to serialize model")?;
    std::fs::write(&path, json).with_context(|| {
        format!(
            "Failed to write model artifact: {}",
            path.as_ref().display()
        )
    })?;
    Ok(())
}

/// Restore a model persisted by `save_model`.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ClassifierModel> {
    let content = std::fs::read_to_string(&path).with_context(|| {
        format!(
            "Failed to read model artifact: {}",
            path.as_ref().display()
        )
    })?;
    let model = serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse model artifact: {}",
            path.as_ref().display()
        )
    })?;
    Ok(model)
}
