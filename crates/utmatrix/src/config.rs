use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest length a vector (and therefore a matrix dimension) may be built with.
pub const MAX_SIZE: usize = 100_000_000;

/// Construction limits applied when building containers.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    max_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits { max_size: MAX_SIZE }
    }
}

impl Limits {
    /// Limits with a custom maximum length. Values above [`MAX_SIZE`] are clamped.
    pub fn new(max_size: usize) -> Self {
        if max_size > MAX_SIZE {
            log::warn!(
                "Limits max_size {} exceeds hard limit {}, clamping",
                max_size,
                MAX_SIZE
            );
        }
        Limits {
            max_size: max_size.min(MAX_SIZE),
        }
    }

    /// Effective maximum length, never above [`MAX_SIZE`].
    pub fn max_size(&self) -> usize {
        self.max_size.min(MAX_SIZE)
    }

    /// Parse limits from a JSON object.
    ///
    /// Missing or invalid fields fall back to their defaults with a warning;
    /// only malformed JSON is an error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let partial: serde_json::Value =
            serde_json::from_str(json).context("Failed to parse limits JSON")?;
        let mut limits = Limits::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        limits.$field = parsed;
                    } else {
                        log::warn!(
                            "Limits invalid value for '{}', using default: {:?}",
                            stringify!($field),
                            limits.$field
                        );
                    }
                } else {
                    log::warn!(
                        "Limits missing field '{}', using default: {:?}",
                        stringify!($field),
                        limits.$field
                    );
                }
            };
        }

        load_or_default!(max_size);

        Ok(Limits::new(limits.max_size))
    }

    /// Read and parse a JSON limits file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read limits file {}", path.display()))?;
        Self::from_json_str(&json)
    }
}
