//! Configuration access port trait.

use crate::domain::error::CompounderError;

/// Read-only view of the run configuration.
///
/// Numeric getters fall back to `default` only when the key is absent. A key
/// that is present but does not parse is a `ConfigInvalid` error.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, CompounderError>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, CompounderError>;
}
