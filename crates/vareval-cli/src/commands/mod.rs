//! Command implementations.

pub mod classify;
pub mod config;
pub mod criteria;

pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::criteria::execute_criteria;
