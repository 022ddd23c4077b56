//! Access-token model and the client-credentials token manager.

pub mod manager;
pub mod token;

pub use manager::*;
pub use token::*;
