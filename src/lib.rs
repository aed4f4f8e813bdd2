pub mod config;
pub mod error;
pub mod routes;
pub mod scoring;
pub mod store;
pub mod types;
pub mod validation;

pub use routes::routes;
pub use store::Store;
