use std::{path::Path, sync::Arc};

use image::RgbaImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    config::DetectorConfig,
    error::{Result, ShapeError},
    io::{load_rgba, load_rgba_from_bytes},
    pipeline::{builder::PipelineBuilder, MinArea, Pipeline},
    types::DetectionResult,
};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum ShapeDetectorCommand {
    /// Detect shapes with the configured pipeline
    #[serde(rename = "detect_shapes")]
    DetectShapes,

    /// Detect shapes using a fixed global threshold instead of Otsu
    #[serde(rename = "detect_shapes_with_threshold")]
    DetectShapesWithThreshold {
        #[schemars(range(min = 0, max = 255))]
        threshold: u8,
    },

    /// Detect shapes with an explicit minimum region area
    #[serde(rename = "detect_shapes_with_min_area")]
    DetectShapesWithMinArea {
        #[schemars(range(min = 1))]
        min_area: u32,
    },
}

impl ShapeDetectorCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ShapeDetectorCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DetectShapes => "Detect and classify shapes with the configured pipeline",
            Self::DetectShapesWithThreshold { .. } => "Detect shapes using a fixed global threshold instead of Otsu's method",
            Self::DetectShapesWithMinArea { .. } => "Detect shapes keeping only regions of at least the given pixel area",
        }
    }
}

/// Holds one loaded image and runs detection commands against it
#[derive(Clone)]
pub struct ShapeDetector {
    image: Option<RgbaImage>,
    config: DetectorConfig,
    pipeline: Arc<Pipeline>,
}

impl ShapeDetector {
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        let pipeline = PipelineBuilder::from_config(&config).build();
        Self {
            image: None,
            config,
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.image = Some(load_rgba(path)?);
        Ok(())
    }

    pub fn load_image_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.image = Some(load_rgba_from_bytes(bytes)?);
        Ok(())
    }

    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn execute(&self, command: ShapeDetectorCommand) -> Result<DetectionResult> {
        let image = self.image.as_ref().ok_or(ShapeError::NoImageLoaded)?;

        match command {
            ShapeDetectorCommand::DetectShapes => self.pipeline.process_image(image),
            ShapeDetectorCommand::DetectShapesWithThreshold { threshold } => {
                PipelineBuilder::from_config(&self.config)
                    .with_fixed_threshold(threshold)
                    .build()
                    .process_image(image)
            }
            ShapeDetectorCommand::DetectShapesWithMinArea { min_area } => {
                PipelineBuilder::from_config(&self.config)
                    .with_min_area(MinArea::Fixed(min_area))
                    .build()
                    .process_image(image)
            }
        }
    }
}

impl Default for ShapeDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn block_image() -> RgbaImage {
        let mut image = RgbaImage::from_pixel(60, 60, Rgba([255, 255, 255, 255]));
        for y in 10..30 {
            for x in 10..40 {
                image.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
        // 3x3 speck below the default minimum area
        for y in 50..53 {
            for x in 50..53 {
                image.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
        image
    }

    #[test]
    fn test_execute_without_image() {
        let detector = ShapeDetector::new();
        let err = detector.execute(ShapeDetectorCommand::DetectShapes).unwrap_err();
        assert!(matches!(err, ShapeError::NoImageLoaded));
    }

    #[test]
    fn test_detect_shapes_command() {
        let mut detector = ShapeDetector::new();
        detector.set_image(block_image());

        let result = detector.execute(ShapeDetectorCommand::DetectShapes).unwrap();
        assert_eq!(result.shapes.len(), 1);
        assert_eq!(result.shapes[0].area, 600);
    }

    #[test]
    fn test_min_area_command_keeps_speck() {
        let mut detector = ShapeDetector::new();
        detector.set_image(block_image());

        let result = detector
            .execute(ShapeDetectorCommand::DetectShapesWithMinArea { min_area: 5 })
            .unwrap();
        assert_eq!(result.shapes.len(), 2);
        assert_eq!(result.shapes[1].area, 9);
    }

    #[test]
    fn test_threshold_command_overrides_otsu() {
        let mut detector = ShapeDetector::new();
        detector.set_image(block_image());

        // nothing is darker than 10
        let result = detector
            .execute(ShapeDetectorCommand::DetectShapesWithThreshold { threshold: 10 })
            .unwrap();
        assert_eq!(result.threshold, 10);
        assert!(result.shapes.is_empty());
    }

    #[test]
    fn test_command_serde_and_names() {
        let command = ShapeDetectorCommand::DetectShapesWithThreshold { threshold: 90 };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["type"], "detect_shapes_with_threshold");
        assert_eq!(json["params"]["threshold"], 90);

        let parsed: ShapeDetectorCommand = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, command);

        assert_eq!(command.to_string(), "detect_shapes_with_threshold");
        assert_eq!(ShapeDetectorCommand::command_names().len(), 3);
        assert!(ShapeDetectorCommand::schema().schema.subschemas.is_some());
    }
}
