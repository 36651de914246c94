pub mod config;
pub mod error;

pub use config::AbsaConfig;
pub use error::AbsaError;
