//! Batch accuracy evaluation against a labelled image set.
//!
//! Each image is run through the pipeline once and the kind of its largest
//! detected shape is compared with the label. Images that fail to load are
//! recorded and skipped; they never abort the batch.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::{
    error::{Result, ShapeError},
    io::load_rgba,
    pipeline::Pipeline,
    types::ShapeKind,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LabeledSample {
    /// Image path, relative paths resolve against the manifest's directory
    pub path: PathBuf,
    pub expected: ShapeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationManifest {
    pub samples: Vec<LabeledSample>,
}

impl EvaluationManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let mut manifest: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(ShapeError::UnsupportedFormat(path.display().to_string())),
        };

        if let Some(base) = path.parent() {
            for sample in &mut manifest.samples {
                if sample.path.is_relative() {
                    sample.path = base.join(&sample.path);
                }
            }
        }

        Ok(manifest)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SampleOutcome {
    Correct,
    Misclassified { predicted: ShapeKind },
    NoShape,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SampleReport {
    pub name: String,
    pub expected: ShapeKind,
    pub shape_count: usize,
    pub outcome: SampleOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KindAccuracy {
    pub kind: ShapeKind,
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationReport {
    pub samples: Vec<SampleReport>,
}

impl EvaluationReport {
    pub fn total(&self) -> usize {
        self.samples.len()
    }

    pub fn correct(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.outcome == SampleOutcome::Correct)
            .count()
    }

    /// Fraction of correct samples; 0.0 for an empty report
    pub fn accuracy(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.total() as f64
    }

    /// Accuracy split by expected kind, for kinds present in the set
    pub fn per_kind(&self) -> Vec<KindAccuracy> {
        ShapeKind::iter()
            .filter_map(|kind| {
                let samples: Vec<_> = self.samples.iter().filter(|s| s.expected == kind).collect();
                if samples.is_empty() {
                    return None;
                }
                Some(KindAccuracy {
                    kind,
                    correct: samples
                        .iter()
                        .filter(|s| s.outcome == SampleOutcome::Correct)
                        .count(),
                    total: samples.len(),
                })
            })
            .collect()
    }
}

pub struct Evaluator<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> Evaluator<'a> {
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn evaluate_image(&self, name: &str, image: &RgbaImage, expected: ShapeKind) -> SampleReport {
        let (shape_count, outcome) = match self.pipeline.process_image(image) {
            Ok(result) => {
                let outcome = match result.largest_shape() {
                    Some(shape) if shape.kind == expected => SampleOutcome::Correct,
                    Some(shape) => SampleOutcome::Misclassified { predicted: shape.kind },
                    None => SampleOutcome::NoShape,
                };
                (result.shapes.len(), outcome)
            }
            Err(e) => (0, SampleOutcome::Failed { error: e.to_string() }),
        };

        debug!(name, %expected, ?outcome, "evaluated sample");
        SampleReport {
            name: name.to_string(),
            expected,
            shape_count,
            outcome,
        }
    }

    pub fn evaluate_manifest(&self, manifest: &EvaluationManifest) -> EvaluationReport {
        let samples = manifest
            .samples
            .iter()
            .map(|sample| {
                let name = sample.path.display().to_string();
                match load_rgba(&sample.path) {
                    Ok(image) => self.evaluate_image(&name, &image, sample.expected),
                    Err(e) => {
                        warn!(path = %name, error = %e, "skipping sample");
                        SampleReport {
                            name,
                            expected: sample.expected,
                            shape_count: 0,
                            outcome: SampleOutcome::Failed { error: e.to_string() },
                        }
                    }
                }
            })
            .collect();

        EvaluationReport { samples }
    }
}
