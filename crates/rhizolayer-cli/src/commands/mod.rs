pub mod boundary;
pub mod config;
pub mod pipeline;
pub mod traits;
