//! Shared types used across srprep.
//! Includes the `WIDTHxHEIGHT` target size and the `ResampleFilter` choice.
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Resampling kernel used when resizing.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
    Lanczos3,
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleFilter::Nearest => write!(f, "nearest"),
            ResampleFilter::Bilinear => write!(f, "bilinear"),
            ResampleFilter::Bicubic => write!(f, "bicubic"),
            ResampleFilter::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

/// Exact output dimensions in pixels. Parsed from and rendered as `WIDTHxHEIGHT`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::ZeroSize {
                size: format!("{width}x{height}"),
            });
        }
        Ok(Self { width, height })
    }

    pub fn square(side: u32) -> Result<Self> {
        Self::new(side, side)
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

impl FromStr for TargetSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSize {
            value: s.to_string(),
        };
        let lowered = s.trim().to_ascii_lowercase();
        let (w, h) = lowered.split_once('x').ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
        Self::new(width, height)
    }
}

impl TryFrom<String> for TargetSize {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TargetSize> for String {
    fn from(size: TargetSize) -> Self {
        size.to_string()
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
