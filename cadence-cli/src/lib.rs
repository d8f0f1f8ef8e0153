pub mod infrastructure;

mod error;

pub use error::{CliError, Result};
pub use infrastructure::LogConfig;
