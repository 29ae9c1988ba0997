pub mod archive;
pub mod cluster;
pub mod error;
pub mod filter;
pub mod options;
pub mod runner;
