/// Error display tests.
pub mod error;
