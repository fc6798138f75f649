// Product catalog module
// Validation, duplicate checks and transactional persistence of products

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

#[cfg(test)]
pub mod memory;

pub use repository::PgProductStore;
pub use service::ProductService;
