pub mod observability;

pub use observability::LogConfig;
