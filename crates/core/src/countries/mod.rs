pub mod countries_model;
pub mod countries_service;
pub mod countries_traits;

#[cfg(test)]
pub mod testing;

pub use countries_model::*;
pub use countries_service::*;
pub use countries_traits::*;
