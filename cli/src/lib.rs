use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use shapes::{
    save_annotated, DetectionResult, DetectorConfig, EvaluationManifest, EvaluationReport,
    Evaluator, PipelineBuilder, SampleOutcome, ShapeDetectorCommand, ShapeError,
};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Inputs of the `detect` subcommand
#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub threshold: Option<u8>,
    pub output: Option<PathBuf>,
    pub annotate: Option<PathBuf>,
}

/// Defaults unless a config file is given
pub fn load_config(path: Option<&Path>) -> Result<DetectorConfig> {
    match path {
        Some(path) => {
            info!("Loading detector config from {}", path.display());
            Ok(DetectorConfig::from_file(path)?)
        }
        None => Ok(DetectorConfig::default()),
    }
}

pub fn run_detect(options: &DetectOptions) -> Result<DetectionResult> {
    let mut config = load_config(options.config.as_deref())?;
    if options.threshold.is_some() {
        config.fixed_threshold = options.threshold;
    }

    let image = shapes::load_rgba(&options.input)?;
    info!(
        "Loaded {} ({}x{})",
        options.input.display(),
        image.width(),
        image.height()
    );

    let pipeline = PipelineBuilder::from_config(&config).build();
    info!("{}", pipeline.info());
    let result = pipeline.process_image(&image)?;

    if let Some(output) = &options.output {
        result.save_json(output)?;
        info!("Wrote detection result to {}", output.display());
    }

    if let Some(annotate) = &options.annotate {
        save_annotated(&image, &result, annotate)?;
        info!("Wrote annotated image to {}", annotate.display());
    }

    Ok(result)
}

pub fn run_evaluate(manifest: &Path, config: Option<&Path>) -> Result<EvaluationReport> {
    let config = load_config(config)?;
    let manifest = EvaluationManifest::from_file(manifest)?;
    info!("Evaluating {} labelled images", manifest.samples.len());

    let pipeline = PipelineBuilder::from_config(&config).build();
    Ok(Evaluator::new(&pipeline).evaluate_manifest(&manifest))
}

/// Pretty-printed JSON schemas of the config file and the command enum
pub fn schemas() -> Result<String> {
    let config = schemars::schema_for!(DetectorConfig);
    let command = ShapeDetectorCommand::schema();
    Ok(format!(
        "{}\n{}",
        serde_json::to_string_pretty(&config)?,
        serde_json::to_string_pretty(&command)?
    ))
}

pub fn format_summary(result: &DetectionResult) -> String {
    let mut out = format!(
        "{} shape(s) in {}x{} image (threshold {}, {:.1} ms)\n",
        result.shapes.len(),
        result.image_width,
        result.image_height,
        result.threshold,
        result.processing_time_ms
    );

    for (i, shape) in result.shapes.iter().enumerate() {
        let bbox = shape.bounding_box;
        let _ = writeln!(
            out,
            "  #{i} {:<9} area={:<7} box=({}, {}, {}x{}) center=({:.1}, {:.1}) confidence={:.2}",
            shape.kind.to_string(),
            shape.area,
            bbox.x,
            bbox.y,
            bbox.width,
            bbox.height,
            shape.center.x,
            shape.center.y,
            shape.confidence
        );
    }

    out
}

pub fn format_report(report: &EvaluationReport) -> String {
    let mut out = String::new();

    for sample in &report.samples {
        let verdict = match &sample.outcome {
            SampleOutcome::Correct => "ok".to_string(),
            SampleOutcome::Misclassified { predicted } => format!("got {predicted}"),
            SampleOutcome::NoShape => "no shape found".to_string(),
            SampleOutcome::Failed { error } => format!("failed: {error}"),
        };
        let _ = writeln!(out, "  {} [{}] {}", sample.name, sample.expected, verdict);
    }

    for kind in report.per_kind() {
        let _ = writeln!(out, "  {:<9} {}/{}", kind.kind.to_string(), kind.correct, kind.total);
    }

    let _ = writeln!(
        out,
        "Accuracy: {}/{} ({:.1}%)",
        report.correct(),
        report.total(),
        report.accuracy() * 100.0
    );
    out
}
