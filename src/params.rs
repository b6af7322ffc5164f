//! Task parameters and their string-map and TOML forms.

use std::{
    collections::HashMap,
    num::{ParseFloatError, ParseIntError},
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::datasets::SplitConfig;

pub const KEY_DATASET_FOLDER: &str = "dataset_folder";
pub const KEY_SPLIT_RATIO: &str = "dataset_split_ratio";
pub const KEY_SPLIT_DATASET: &str = "split_dataset";
pub const KEY_OUTPUT_FOLDER: &str = "output_folder";
pub const KEY_SEED: &str = "seed";

/// Errors raised while applying parameter values.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("Missing parameter `{0}`")]
    Missing(&'static str),
    #[error("Parameter `{key}` is not a number ({value}): {source}")]
    InvalidFloat {
        key: &'static str,
        value: String,
        source: ParseFloatError,
    },
    #[error("Split ratio must be in (0, 1], got {0}")]
    RatioOutOfRange(f64),
    #[error("Seed must be a non-negative integer, got {value}: {source}")]
    InvalidSeed {
        value: String,
        source: ParseIntError,
    },
    #[error("Parameter `{key}` is not a boolean: {value}")]
    InvalidBool { key: &'static str, value: String },
    #[error("Failed to read parameter file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse parameter file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parameters of the dataset classification task.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetClassificationParam {
    /// Root folder holding one subfolder per class.
    pub dataset_folder: PathBuf,
    /// Fraction of each class copied to `train/`.
    pub dataset_split_ratio: f64,
    /// When false the dataset folder is passed through untouched.
    pub split_dataset: bool,
    /// Where to write the split; a timestamped sibling of the dataset folder when unset.
    pub output_folder: Option<PathBuf>,
    pub seed: u64,
    /// Set when new values are applied, cleared once the task has run.
    #[serde(skip)]
    pub update: bool,
}

impl Default for DatasetClassificationParam {
    fn default() -> Self {
        Self {
            dataset_folder: PathBuf::new(),
            dataset_split_ratio: 0.8,
            split_dataset: false,
            output_folder: None,
            seed: 42,
            update: false,
        }
    }
}

impl DatasetClassificationParam {
    /// Applies values from a string map, as handed over by a host application.
    ///
    /// All keys are required. Nothing is modified if any value is rejected.
    pub fn set_values(&mut self, values: &HashMap<String, String>) -> Result<(), ParamError> {
        let get = |key: &'static str| {
            values
                .get(key)
                .map(String::as_str)
                .ok_or(ParamError::Missing(key))
        };

        let dataset_folder = PathBuf::from(get(KEY_DATASET_FOLDER)?);
        let ratio = get(KEY_SPLIT_RATIO)?;
        let ratio = ratio
            .trim()
            .parse::<f64>()
            .map_err(|source| ParamError::InvalidFloat {
                key: KEY_SPLIT_RATIO,
                value: ratio.to_string(),
                source,
            })?;
        let split_dataset = parse_bool(KEY_SPLIT_DATASET, get(KEY_SPLIT_DATASET)?)?;
        let output_folder = non_empty_path(get(KEY_OUTPUT_FOLDER)?);
        let seed = get(KEY_SEED)?;
        let seed = seed
            .trim()
            .parse::<u64>()
            .map_err(|source| ParamError::InvalidSeed {
                value: seed.to_string(),
                source,
            })?;

        *self = Self {
            dataset_folder,
            dataset_split_ratio: check_ratio(ratio)?,
            split_dataset,
            output_folder,
            seed,
            update: true,
        };
        Ok(())
    }

    /// String map view of the parameters, accepted back by [`Self::set_values`].
    pub fn get_values(&self) -> HashMap<String, String> {
        let output_folder = self
            .output_folder
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        HashMap::from([
            (
                KEY_DATASET_FOLDER.to_string(),
                self.dataset_folder.display().to_string(),
            ),
            (
                KEY_SPLIT_RATIO.to_string(),
                self.dataset_split_ratio.to_string(),
            ),
            (
                KEY_SPLIT_DATASET.to_string(),
                self.split_dataset.to_string(),
            ),
            (KEY_OUTPUT_FOLDER.to_string(), output_folder),
            (KEY_SEED.to_string(), self.seed.to_string()),
        ])
    }

    /// Loads parameters from a TOML file. Absent fields keep their defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParamError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ParamError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut param: Self = toml::from_str(&text).map_err(|source| ParamError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        check_ratio(param.dataset_split_ratio)?;
        param.output_folder = param
            .output_folder
            .take()
            .filter(|p| !p.as_os_str().is_empty());
        param.update = true;
        Ok(param)
    }

    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            ratio: self.dataset_split_ratio,
            seed: self.seed,
        }
    }
}

/// Accepts ratios in `(0, 1]`.
pub fn check_ratio(ratio: f64) -> Result<f64, ParamError> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(ratio)
    } else {
        Err(ParamError::RatioOutOfRange(ratio))
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ParamError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        _ => Err(ParamError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| PathBuf::from(value))
}
