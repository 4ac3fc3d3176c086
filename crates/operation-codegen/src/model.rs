// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Generation model: the description of one class to generate.

use crate::env::{SourceElement, SourceType};
use crate::loader_ids::LoaderIds;
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a source method: declaring type, name and parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey {
    pub declaring_type: String,
    pub name: String,
    pub parameter_types: Vec<String>,
}

impl MethodKey {
    pub fn new<T>(declaring_type: impl Into<String>, name: impl Into<String>, parameter_types: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}({})",
            self.declaring_type,
            self.name,
            self.parameter_types.join(", ")
        )
    }
}

/// A source method selected for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodData {
    pub key: MethodKey,
    /// Parameter names, parallel to `key.parameter_types`.
    pub parameter_names: Vec<String>,
    pub return_type: String,
}

impl MethodData {
    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// `(type, name)` pairs of the method parameters.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.key
            .parameter_types
            .iter()
            .zip(&self.parameter_names)
            .map(|(ty, name)| (ty.as_str(), name.as_str()))
    }
}

/// Everything needed to emit one generated class.
///
/// Imports and the superclass may be adjusted after construction; emission
/// borrows the model immutably.
pub struct GenerationModel<'a> {
    source: &'a dyn SourceType,
    class_name: String,
    package_name: String,
    methods: Vec<MethodData>,
    imports: BTreeSet<String>,
    extends_class: Option<String>,
}

impl<'a> GenerationModel<'a> {
    pub fn new(source: &'a dyn SourceType, methods: Vec<MethodData>, suffix: &str) -> Self {
        let package_name = source.package_name().to_string();
        let class_name =
            naming::generated_class_name(&package_name, source.qualified_name(), suffix);
        Self {
            source,
            class_name,
            package_name,
            methods,
            imports: BTreeSet::new(),
            extends_class: None,
        }
    }

    pub fn source(&self) -> &'a dyn SourceType {
        self.source
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn fqcn(&self) -> String {
        naming::fqcn(&self.package_name, &self.class_name)
    }

    pub fn methods(&self) -> &[MethodData] {
        &self.methods
    }

    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    pub fn extends_class(&self) -> Option<&str> {
        self.extends_class.as_deref()
    }

    /// Add imports; already present names are absorbed.
    pub fn add_imports<I>(&mut self, imports: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
    }

    pub fn set_extends_class(&mut self, name: impl Into<String>) {
        self.extends_class = Some(name.into());
    }

    /// Process-wide loader id of `method`.
    pub fn loader_id(&self, method: &MethodData) -> u32 {
        LoaderIds::global().loader_id(&method.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::{Modifier, ModifierSet};

    struct Ops;

    impl SourceElement for Ops {
        fn qualified_name(&self) -> &str {
            "com.example.Ops"
        }
    }

    impl SourceType for Ops {
        fn package_name(&self) -> &str {
            "com.example"
        }

        fn modifiers(&self) -> ModifierSet {
            [Modifier::Public].into_iter().collect()
        }
    }

    fn method(name: &str) -> MethodData {
        MethodData {
            key: MethodKey::new("com.example.Ops", name, vec!["int"]),
            parameter_names: vec!["id".to_string()],
            return_type: "java.lang.String".to_string(),
        }
    }

    #[test]
    fn test_names_are_derived_on_construction() {
        let model = GenerationModel::new(&Ops, vec![], "$$Loader");
        assert_eq!(model.class_name(), "Ops$$Loader");
        assert_eq!(model.package_name(), "com.example");
        assert_eq!(model.fqcn(), "com.example.Ops$$Loader");
    }

    #[test]
    fn test_add_imports_absorbs_duplicates() {
        let mut model = GenerationModel::new(&Ops, vec![], "$$Loader");
        model.add_imports(["java.util.List", "java.util.Map"]);
        model.add_imports(vec!["java.util.List".to_string()]);
        let imports: Vec<_> = model.imports().iter().map(String::as_str).collect();
        assert_eq!(imports, vec!["java.util.List", "java.util.Map"]);
    }

    #[test]
    fn test_extends_class_last_write_wins() {
        let mut model = GenerationModel::new(&Ops, vec![], "$$Loader");
        assert_eq!(model.extends_class(), None);
        model.set_extends_class("a.Base");
        model.set_extends_class("b.Base");
        assert_eq!(model.extends_class(), Some("b.Base"));
    }

    #[test]
    fn test_loader_id_is_shared_between_models() {
        let methods = vec![method("modelSharedId")];
        let loader = GenerationModel::new(&Ops, methods.clone(), "$$Loader");
        let operator = GenerationModel::new(&Ops, methods, "$$Operator");
        assert_eq!(
            loader.loader_id(&loader.methods()[0]),
            operator.loader_id(&operator.methods()[0])
        );
    }

    #[test]
    fn test_method_parameters() {
        let m = method("load");
        assert_eq!(m.parameters().collect::<Vec<_>>(), vec![("int", "id")]);
        assert_eq!(m.key.to_string(), "com.example.Ops#load(int)");
    }
}
