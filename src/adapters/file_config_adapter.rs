//! INI file configuration adapter.

use crate::domain::error::CompounderError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;
use std::str::FromStr;

pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut ini = Ini::new();
        ini.load(path).map_err(std::io::Error::other)?;
        Ok(Self { ini })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut ini = Ini::new();
        ini.read(content.to_string())?;
        Ok(Self { ini })
    }

    fn parse_or<T: FromStr>(
        &self,
        section: &str,
        key: &str,
        default: T,
        kind: &str,
    ) -> Result<T, CompounderError> {
        let Some(raw) = self.ini.get(section, key) else {
            return Ok(default);
        };
        raw.trim()
            .parse()
            .map_err(|_| CompounderError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("expected {kind}, got '{}'", raw.trim()),
            })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, CompounderError> {
        self.parse_or(section, key, default, "an integer")
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> Result<f64, CompounderError> {
        self.parse_or(section, key, default, "a number")
    }
}
