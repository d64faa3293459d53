pub mod catalog;
pub mod nestoria;
pub mod traits;
pub mod types;

pub use catalog::CatalogSource;
pub use nestoria::NestoriaSource;
pub use traits::ListingSource;
pub use types::ListingQuery;
