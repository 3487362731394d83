use crate::{
    algorithms::{FixedThreshold, FloodFillExtractor, HeuristicClassifier, OtsuThreshold},
    config::DetectorConfig,
    pipeline::{MinArea, Pipeline},
    traits::{RegionExtractor, ShapeClassifier, ThresholdSelector},
};

/// Builder for creating detection pipelines with a fluent API
pub struct PipelineBuilder {
    threshold_selector: Option<Box<dyn ThresholdSelector>>,
    region_extractor: Option<Box<dyn RegionExtractor>>,
    classifier: Option<Box<dyn ShapeClassifier>>,
    min_area: MinArea,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            threshold_selector: None,
            region_extractor: None,
            classifier: None,
            min_area: MinArea::default(),
        }
    }

    /// Builder preloaded with every component a config describes
    pub fn from_config(config: &DetectorConfig) -> Self {
        let builder = Self::new()
            .with_classifier(HeuristicClassifier {
                corners: config.corners.clone(),
                rules: config.classifier.clone(),
            })
            .with_min_area(MinArea::Scaled {
                floor: config.min_area_floor,
                divisor: config.min_area_divisor,
            });

        match config.fixed_threshold {
            Some(threshold) => builder.with_fixed_threshold(threshold),
            None => builder.with_threshold_selector(OtsuThreshold {
                fallback: config.fallback_threshold,
            }),
        }
    }

    /// Set the threshold selector (replaces any existing one)
    pub fn with_threshold_selector<T>(mut self, selector: T) -> Self
    where
        T: ThresholdSelector + 'static,
    {
        self.threshold_selector = Some(Box::new(selector));
        self
    }

    /// Skip Otsu and cut at a fixed intensity
    pub fn with_fixed_threshold(self, threshold: u8) -> Self {
        self.with_threshold_selector(FixedThreshold { threshold })
    }

    /// Set the region extractor (replaces any existing one)
    pub fn with_region_extractor<E>(mut self, extractor: E) -> Self
    where
        E: RegionExtractor + 'static,
    {
        self.region_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the classifier (replaces any existing one)
    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: ShapeClassifier + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self
    }

    pub fn with_min_area(mut self, min_area: MinArea) -> Self {
        self.min_area = min_area;
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let threshold_selector = self
            .threshold_selector
            .unwrap_or_else(|| Box::new(OtsuThreshold::default()));

        let region_extractor = self
            .region_extractor
            .unwrap_or_else(|| Box::new(FloodFillExtractor));

        let classifier = self
            .classifier
            .unwrap_or_else(|| Box::new(HeuristicClassifier::default()));

        Pipeline::new(threshold_selector, region_extractor, classifier, self.min_area)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
