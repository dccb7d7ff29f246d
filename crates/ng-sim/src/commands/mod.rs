use std::error::Error;
use std::fs;
use std::path::Path;

use ng_core::IntMatrix;
use serde::{Deserialize, Serialize};

pub mod construct;
pub mod sample;
pub mod version;

/// Constructor input read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub out_degree: Vec<i64>,
    pub in_degree: Vec<i64>,
    /// Missing means no cell is pinned.
    #[serde(default)]
    pub fixed: Option<Vec<Vec<i64>>>,
}

impl Instance {
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn fixed_matrix(&self) -> Result<IntMatrix, Box<dyn Error>> {
        match &self.fixed {
            Some(rows) if !rows.is_empty() => Ok(IntMatrix::from_rows(rows)?),
            _ => Ok(IntMatrix::zeros(self.out_degree.len(), self.in_degree.len())),
        }
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)?;
    Ok(())
}
