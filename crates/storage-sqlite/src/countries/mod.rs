pub mod model;
pub mod repository;

pub use model::CountryDB;
pub use repository::CountryRepository;
