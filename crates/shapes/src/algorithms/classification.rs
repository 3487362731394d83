use tracing::trace;

use crate::{
    algorithms::{BinaryMask, Region, RegionMetrics},
    config::{ClassifierConfig, CornerConfig},
    traits::ShapeClassifier,
    types::{DetectedShape, ShapeKind},
};

/// Rule table over corner count, circularity and fill ratio; first match wins.
///
/// Six or seven corners fall through every band and land on circle.
pub fn classify_metrics(
    corners: usize,
    circularity: f64,
    fill_ratio: f64,
    config: &ClassifierConfig,
) -> ShapeKind {
    match corners {
        0..=3 => ShapeKind::Triangle,
        4..=5 if circularity > config.rectangle_min_circularity => ShapeKind::Rectangle,
        4..=5 => ShapeKind::Pentagon,
        c if c > 7
            && fill_ratio < config.star_max_fill_ratio
            && circularity < config.star_max_circularity =>
        {
            ShapeKind::Star
        }
        _ => ShapeKind::Circle,
    }
}

/// Corner / circularity / fill-ratio classifier
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    pub corners: CornerConfig,
    pub rules: ClassifierConfig,
}

impl ShapeClassifier for HeuristicClassifier {
    fn classify(&self, region: &Region, mask: &BinaryMask) -> DetectedShape {
        let metrics = RegionMetrics::measure(region, mask, &self.corners);
        let kind = classify_metrics(
            metrics.corners,
            metrics.circularity,
            metrics.fill_ratio,
            &self.rules,
        );
        trace!(?kind, ?metrics, "classified region");

        let bounding_box = region.bounding_box();
        DetectedShape {
            kind,
            confidence: self.rules.confidence,
            bounding_box,
            center: bounding_box.center(),
            area: metrics.area,
        }
    }
}
