use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};

/// Tunables for the whole detection pipeline.
///
/// The defaults reproduce the reference behaviour; every field can be
/// overridden from a `.toml` or `.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectorConfig {
    /// Use this cut point instead of Otsu's method
    pub fixed_threshold: Option<u8>,
    /// Cut point used when Otsu finds no valid split
    pub fallback_threshold: u8,
    /// Smallest region area ever accepted, in pixels
    pub min_area_floor: u32,
    /// Image area divisor for the resolution-scaled area filter
    #[schemars(range(min = 1))]
    pub min_area_divisor: u32,
    pub corners: CornerConfig,
    pub classifier: ClassifierConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            fixed_threshold: None,
            fallback_threshold: 127,
            min_area_floor: 50,
            min_area_divisor: 15_000,
            corners: CornerConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Border sampling used to count sharp turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CornerConfig {
    /// The sampling step is `border_len / samples_per_contour`
    #[schemars(range(min = 1))]
    pub samples_per_contour: usize,
    /// Lower bound for the sampling step
    #[schemars(range(min = 1))]
    pub min_step: usize,
    /// Turn angles strictly inside (min_angle, max_angle) radians count as corners
    pub min_angle: f64,
    pub max_angle: f64,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            samples_per_contour: 50,
            min_step: 2,
            min_angle: 0.4,
            max_angle: 1.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClassifierConfig {
    /// 4-5 corner regions above this circularity are rectangles, else pentagons
    pub rectangle_min_circularity: f64,
    pub star_max_fill_ratio: f64,
    pub star_max_circularity: f64,
    /// Confidence reported for every accepted shape
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rectangle_min_circularity: 0.70,
            star_max_fill_ratio: 0.55,
            star_max_circularity: 0.6,
            confidence: 0.9,
        }
    }
}

impl DetectorConfig {
    /// Load from a `.toml` or `.json` file, dispatching on the extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(ShapeError::UnsupportedFormat(path.display().to_string())),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_area_divisor == 0 {
            return Err(ShapeError::InvalidConfig(
                "min_area_divisor must be greater than zero".into(),
            ));
        }
        if self.corners.samples_per_contour == 0 || self.corners.min_step == 0 {
            return Err(ShapeError::InvalidConfig(
                "corner sampling needs samples_per_contour >= 1 and min_step >= 1".into(),
            ));
        }
        let (lo, hi) = (self.corners.min_angle, self.corners.max_angle);
        if !(0.0..=PI).contains(&lo) || !(0.0..=PI).contains(&hi) || lo >= hi {
            return Err(ShapeError::InvalidConfig(format!(
                "corner angle band ({lo}, {hi}) must be increasing and within [0, pi]"
            )));
        }
        if !(0.0..=1.0).contains(&self.classifier.confidence) {
            return Err(ShapeError::InvalidConfig(format!(
                "confidence {} is outside [0, 1]",
                self.classifier.confidence
            )));
        }
        Ok(())
    }

    /// Minimum accepted region area for a `width` x `height` image
    pub fn min_area(&self, width: u32, height: u32) -> f64 {
        crate::algorithms::min_region_area(width, height, self.min_area_floor, self.min_area_divisor)
    }
}
