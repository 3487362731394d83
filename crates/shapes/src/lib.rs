//! # Shape Detection Library
//!
//! Classifies dark, filled geometric shapes in a raster image as circle,
//! triangle, rectangle, pentagon or star using plain geometric heuristics.
//!
//! ## Pipeline
//!
//! 1. **Grayscale**: RGBA buffer to BT.601 intensity
//! 2. **Threshold**: Otsu's method picks one global cut point
//! 3. **Binarize**: pixels darker than the cut become foreground
//! 4. **Segment & classify**: 4-connected flood fill, area filter, border
//!    corner sampling, circularity and fill ratio feed a rule table
//!
//! Every stage sits behind a trait so it can be swapped through
//! [`PipelineBuilder`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shapes::{Pipeline, load_rgba};
//!
//! let image = load_rgba("shapes.png")?;
//! let result = Pipeline::default().process_image(&image)?;
//!
//! for shape in &result.shapes {
//!     println!("{} at {:?}", shape.kind, shape.bounding_box);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use shapes::{MinArea, Pipeline};
//!
//! let pipeline = Pipeline::builder()
//!     .with_fixed_threshold(100)
//!     .with_min_area(MinArea::Fixed(200))
//!     .build();
//! # let _ = pipeline;
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;
pub mod manager;
pub mod evaluation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{Result, ShapeError};
pub use types::*;
pub use config::{ClassifierConfig, CornerConfig, DetectorConfig};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, MinArea, detect_shapes, builder::PipelineBuilder};
pub use io::*;
pub use manager::{ShapeDetector, ShapeDetectorCommand};
pub use evaluation::{EvaluationManifest, EvaluationReport, Evaluator, LabeledSample, SampleOutcome};
