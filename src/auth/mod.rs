// Accounts module
// Registration, login with a SHA-256 password digest and JWT bearer tokens

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

#[cfg(test)]
pub mod memory;

pub use repository::PgUserStore;
pub use service::UserService;
pub use token::TokenService;
