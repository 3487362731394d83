pub mod grayscale;
pub mod threshold;
pub mod segmentation;
pub mod geometry;
pub mod classification;

pub use grayscale::*;
pub use threshold::*;
pub use segmentation::*;
pub use geometry::*;
pub use classification::*;
