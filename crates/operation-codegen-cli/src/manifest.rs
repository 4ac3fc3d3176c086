// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Manifest of annotated operation classes, the element model `opgen`
//! generates from.

use anyhow::Context;
use operation_codegen::modifiers::{Modifier, ModifierSet};
use operation_codegen::{MethodData, MethodKey, SourceElement, SourceType};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "type")]
    pub types: Vec<OperationType>,
}

/// A class annotated for operation generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationType {
    /// Fully-qualified name, nested classes separated by `.`.
    pub name: String,
    /// Package of the class. Defaults to everything before the last `.` of
    /// `name`, which is wrong for nested classes.
    pub package: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Origin reported with diagnostics.
    pub location: Option<String>,
    /// Superclass of the generated operator.
    pub operator_base: Option<String>,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default = "void")]
    pub returns: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

fn void() -> String {
    "void".to_string()
}

impl Manifest {
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }
}

impl OperationType {
    pub fn method_data(&self) -> Vec<MethodData> {
        self.methods
            .iter()
            .map(|m| MethodData {
                key: MethodKey::new(
                    self.name.as_str(),
                    m.name.as_str(),
                    m.parameters.iter().map(|p| p.ty.as_str()),
                ),
                parameter_names: m.parameters.iter().map(|p| p.name.clone()).collect(),
                return_type: m.returns.clone(),
            })
            .collect()
    }
}

impl SourceElement for OperationType {
    fn qualified_name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Option<String> {
        self.location.clone()
    }
}

impl SourceType for OperationType {
    fn package_name(&self) -> &str {
        match &self.package {
            Some(package) => package,
            None => self.name.rsplit_once('.').map_or("", |(package, _)| package),
        }
    }

    fn modifiers(&self) -> ModifierSet {
        self.modifiers.iter().copied().collect()
    }
}
