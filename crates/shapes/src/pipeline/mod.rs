pub mod builder;

use std::time::Instant;

use image::RgbaImage;
use tracing::{debug, trace};

use crate::{
    algorithms::{binarize, min_region_area, to_grayscale, Histogram},
    error::Result,
    traits::{RegionExtractor, ShapeClassifier, ThresholdSelector},
    types::DetectionResult,
};

/// Grayscale -> threshold -> binarize -> segment/classify, strictly in order
pub struct Pipeline {
    threshold_selector: Box<dyn ThresholdSelector>,
    region_extractor: Box<dyn RegionExtractor>,
    classifier: Box<dyn ShapeClassifier>,
    min_area: MinArea,
}

/// Region area filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinArea {
    /// `max(floor, width * height / divisor)`
    Scaled { floor: u32, divisor: u32 },
    Fixed(u32),
}

impl MinArea {
    pub fn for_image(&self, width: u32, height: u32) -> f64 {
        match *self {
            Self::Scaled { floor, divisor } => min_region_area(width, height, floor, divisor),
            Self::Fixed(area) => area as f64,
        }
    }
}

impl Default for MinArea {
    fn default() -> Self {
        Self::Scaled { floor: 50, divisor: 15_000 }
    }
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        threshold_selector: Box<dyn ThresholdSelector>,
        region_extractor: Box<dyn RegionExtractor>,
        classifier: Box<dyn ShapeClassifier>,
        min_area: MinArea,
    ) -> Self {
        Self {
            threshold_selector,
            region_extractor,
            classifier,
            min_area,
        }
    }

    /// Run every stage over an interleaved RGBA buffer
    pub fn process(&self, rgba: &[u8], width: u32, height: u32) -> Result<DetectionResult> {
        let started = Instant::now();

        // Step 1: intensity image
        let gray = to_grayscale(rgba, width, height)?;

        // Step 2: global cut point
        let histogram = Histogram::from_image(&gray);
        let threshold = self.threshold_selector.select_threshold(&histogram);

        // Step 3: dark pixels become foreground
        let mask = binarize(&gray, threshold);
        debug!(threshold, foreground = mask.foreground_count(), "binarized {width}x{height} image");

        // Step 4: segment, filter and classify
        let regions = self.region_extractor.extract_regions(&mask);
        let min_area = self.min_area.for_image(width, height);

        let mut shapes = Vec::new();
        for region in &regions {
            if (region.area() as f64) < min_area {
                trace!(area = region.area(), min_area, "dropping small region");
                continue;
            }

            let shape = self.classifier.classify(region, &mask);
            debug!(kind = %shape.kind, area = shape.area, "accepted region");
            shapes.push(shape);
        }

        debug!(regions = regions.len(), shapes = shapes.len(), "detection finished");

        Ok(DetectionResult {
            shapes,
            image_width: width,
            image_height: height,
            threshold,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    pub fn process_image(&self, image: &RgbaImage) -> Result<DetectionResult> {
        self.process(image.as_raw(), image.width(), image.height())
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        let area = match self.min_area {
            MinArea::Scaled { floor, divisor } => format!("max({floor}, W*H/{divisor})"),
            MinArea::Fixed(area) => area.to_string(),
        };
        format!("Pipeline: grayscale -> threshold -> binarize -> flood fill -> classify, min area {area}")
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Run the default pipeline over an RGBA buffer
pub fn detect_shapes(rgba: &[u8], width: u32, height: u32) -> Result<DetectionResult> {
    Pipeline::default().process(rgba, width, height)
}
