use crate::{
    algorithms::{BinaryMask, Histogram, Region},
    types::DetectedShape,
};

/// Trait for global threshold selection
pub trait ThresholdSelector: Send + Sync {
    /// Pick the cut point: intensities strictly below it become foreground
    fn select_threshold(&self, histogram: &Histogram) -> u8;
}

/// Trait for connected-region segmentation of a binary mask
pub trait RegionExtractor: Send + Sync {
    /// Extract every foreground region, in discovery order
    fn extract_regions(&self, mask: &BinaryMask) -> Vec<Region>;
}

/// Trait for turning one region into a labelled shape
pub trait ShapeClassifier: Send + Sync {
    fn classify(&self, region: &Region, mask: &BinaryMask) -> DetectedShape;
}
