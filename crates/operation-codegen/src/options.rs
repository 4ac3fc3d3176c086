// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Options of a generation run. Usually read from a toml file; the command
/// line may override individual values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Text stamped into the header comment of every generated file, before the timestamp.
    pub header_marker: String,
    /// One level of indentation in generated code.
    pub indent: String,
    /// Directory generated sources are written to.
    pub output_path: String,
    /// Verbosity level for logging.
    pub verbosity_level: LevelFilter,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            header_marker: "Code generated by opgen. Do not edit.".to_string(),
            indent: "  ".to_string(),
            output_path: "generated".to_string(),
            verbosity_level: LevelFilter::Info,
        }
    }
}

impl GeneratorOptions {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}
