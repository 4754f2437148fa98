//! Command-line front end for the `dialog` and `llm` crates.

pub mod cli;
pub mod logging;
pub mod output;
pub mod run;

pub use cli::Cli;
pub use logging::init_logging;
pub use run::run;
