use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ResampleFilter, TargetSize};

/// Resize/blur parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeParams {
    pub size: TargetSize,
    /// Gaussian blur radius applied after resizing; None or 0 means no blur
    pub radius: Option<u32>,
    pub filter: ResampleFilter,
    /// Lowercase extensions to process; empty means any known image format
    pub extensions: Vec<String>,
    /// joblib-style worker count: -1 uses every core
    pub n_jobs: i32,
    pub continue_on_error: bool,
    #[serde(skip)]
    pub progress: bool,
}

impl Default for ResizeParams {
    fn default() -> Self {
        Self {
            size: TargetSize::default(),
            radius: None,
            filter: ResampleFilter::default(),
            extensions: vec!["png".to_string()],
            n_jobs: -1,
            continue_on_error: false,
            progress: false,
        }
    }
}

/// Crop pair generation parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropPairParams {
    /// Minimum crop side; images whose short side does not exceed it get no crops
    pub crop_size_min: u32,
    pub lq_size: u32,
    pub gt_size: u32,
    pub num_crops: usize,
    pub n_jobs: i32,
    /// Fixed seed for reproducible crops; None draws from the OS
    pub seed: Option<u64>,
    pub filter: ResampleFilter,
    pub extensions: Vec<String>,
    pub continue_on_error: bool,
    #[serde(skip)]
    pub progress: bool,
}

impl Default for CropPairParams {
    fn default() -> Self {
        Self {
            crop_size_min: 128,
            lq_size: 64,
            gt_size: 128,
            num_crops: 2,
            n_jobs: -1,
            seed: None,
            filter: ResampleFilter::default(),
            extensions: Vec::new(),
            continue_on_error: false,
            progress: false,
        }
    }
}

impl CropPairParams {
    /// Reject sizes that cannot produce an image
    pub fn validate(&self) -> Result<()> {
        for (arg, value) in [("lq_size", self.lq_size), ("gt_size", self.gt_size)] {
            if value == 0 {
                return Err(Error::InvalidArgument {
                    arg,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Read parameters from a JSON file; missing fields take their defaults.
pub fn load_params<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
