pub mod enricher;

pub use enricher::*;
