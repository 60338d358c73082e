pub mod cli;
pub mod cmd;
pub mod config;
pub mod input;
pub mod logging;
