pub mod annotate;
pub mod export;
pub mod loader;

pub use annotate::*;
pub use loader::*;
