pub mod cliopt;
pub mod common;
pub mod encoder;
pub mod error;
pub mod model;
pub mod output;
pub mod runner;
