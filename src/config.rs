use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Backend base URL, e.g. `https://abcd.supabase.co`.
    #[serde(default)]
    pub url: String,
    /// API key sent as both `apikey` and bearer token.
    #[serde(default)]
    pub key: String,

    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_table() -> String {
    "posts".to_owned()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(".postboard.log")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            table: default_table(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Reads the YAML config at `path`. With `allow_missing`, an absent file
    /// yields the defaults instead of an error.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Self, AppError> {
        let file = match File::open(path) {
            Ok(f) => BufReader::new(f),
            Err(e) if allow_missing && e.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(e) => return Err(AppError::ConfigOpen(e)),
        };

        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, AppError> {
        let cfg: Self = serde_yaml::from_reader(reader).map_err(AppError::ConfigParse)?;
        Ok(cfg)
    }

    /// Checks the fields the REST gateway needs.
    pub fn require_remote(&self) -> Result<(), AppError> {
        if self.url.is_empty() {
            return Err(AppError::ConfigMissing("url"));
        }
        if self.key.is_empty() {
            return Err(AppError::ConfigMissing("key"));
        }

        Ok(())
    }
}
