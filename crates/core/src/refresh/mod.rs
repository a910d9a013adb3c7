pub mod refresh_service;

pub use refresh_service::{RefreshError, RefreshReport, RefreshService, RefreshServiceTrait};
