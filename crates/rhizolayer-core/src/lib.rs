pub mod boundary;
pub mod consts;
pub mod error;
pub mod filter;
pub mod frame;
pub mod io;
pub mod merge;
pub mod pipeline;
pub mod records;
pub mod stats;
pub mod traits;
