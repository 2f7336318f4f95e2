pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod render;
pub mod storage;

pub use config::Config;
pub use error::VaultError;
