pub mod canvas;
pub mod summary_service;

pub use canvas::SummarySnapshot;
pub use summary_service::{SummaryService, SummaryServiceTrait};
