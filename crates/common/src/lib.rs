//! Helpers shared by the server crate and the binary: logging setup,
//! startup filesystem checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;
