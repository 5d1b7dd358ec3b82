pub mod cli_args;
pub mod config;
pub mod logging;
