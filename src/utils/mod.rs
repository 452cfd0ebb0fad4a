pub mod error;
pub mod file;
pub mod logger;
pub mod validation;
