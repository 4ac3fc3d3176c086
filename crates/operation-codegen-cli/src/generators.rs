// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! The two classes generated for every operations type.
//!
//! The loader publishes one constant per operation method; the operator
//! dispatches calls under the same ids. Both ask the process-wide registry,
//! so they agree without referencing each other.

use crate::manifest::OperationType;
use operation_codegen::emit::SourceWriter;
use operation_codegen::modifiers::{constructor_modifiers, Modifier, ModifierSet};
use operation_codegen::{ClassGenerator, GenerationModel, MethodData, SourceElement, SourceType};
use itertools::Itertools;
use std::io;

pub const LOADER_SUFFIX: &str = "$$Loader";
pub const OPERATOR_SUFFIX: &str = "$$Operator";

const DISPATCHER: &str = "opgen.runtime.Dispatcher";

fn modifiers(items: &[Modifier]) -> ModifierSet {
    items.iter().copied().collect()
}

/// `loadUser` -> `LOAD_USER`. Overloaded methods get their id appended.
fn constant_name(model: &GenerationModel<'_>, method: &MethodData) -> String {
    let mut name = String::new();
    for (i, c) in method.name().chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            name.push('_');
        }
        name.extend(c.to_uppercase());
    }
    let overloaded = model
        .methods()
        .iter()
        .filter(|m| m.name() == method.name())
        .count()
        > 1;
    if overloaded {
        name.push_str(&format!("_{}", model.loader_id(method)));
    }
    name
}

pub struct LoaderGenerator<'a> {
    model: GenerationModel<'a>,
}

impl<'a> LoaderGenerator<'a> {
    pub fn new(source: &'a OperationType) -> Self {
        Self {
            model: GenerationModel::new(source, source.method_data(), LOADER_SUFFIX),
        }
    }
}

impl ClassGenerator for LoaderGenerator<'_> {
    fn model(&self) -> &GenerationModel<'_> {
        &self.model
    }

    fn class_doc(&self, w: &mut SourceWriter<'_>) -> io::Result<()> {
        w.emit_javadoc(&format!(
            "Loader ids of {{@link {}}}.",
            self.model.source().qualified_name()
        ))
    }

    fn write_class_body(&self, w: &mut SourceWriter<'_>) -> io::Result<()> {
        let source = self.model.source();
        let source_type = source.qualified_name();
        let class_name = self.model.class_name();

        let constant = modifiers(&[Modifier::Public, Modifier::Static, Modifier::Final]);
        for method in self.model.methods() {
            let id = self.model.loader_id(method).to_string();
            w.emit_field("int", &constant_name(&self.model, method), &constant, Some(id.as_str()))?;
        }
        if !self.model.methods().is_empty() {
            w.emit_empty_line()?;
        }

        w.emit_field(
            source_type,
            "operations",
            &modifiers(&[Modifier::Private, Modifier::Final]),
            None,
        )?;
        w.emit_empty_line()?;

        let ctor = constructor_modifiers(&source.modifiers());
        w.begin_method(None, class_name, &ctor, &[(source_type, "operations")])?;
        w.emit_statement("this.operations = operations")?;
        w.end_method()?;
        w.emit_empty_line()?;

        w.begin_method(
            Some(source_type),
            "getOperations",
            &modifiers(&[Modifier::Public]),
            &[],
        )?;
        w.emit_statement("return operations")?;
        w.end_method()
    }
}

pub struct OperatorGenerator<'a> {
    model: GenerationModel<'a>,
}

impl<'a> OperatorGenerator<'a> {
    pub fn new(source: &'a OperationType) -> Self {
        let mut model = GenerationModel::new(source, source.method_data(), OPERATOR_SUFFIX);
        model.add_imports([DISPATCHER]);
        if let Some(base) = &source.operator_base {
            model.set_extends_class(base.as_str());
        }
        Self { model }
    }
}

impl ClassGenerator for OperatorGenerator<'_> {
    fn model(&self) -> &GenerationModel<'_> {
        &self.model
    }

    fn write_class_body(&self, w: &mut SourceWriter<'_>) -> io::Result<()> {
        w.emit_field(
            DISPATCHER,
            "dispatcher",
            &modifiers(&[Modifier::Private, Modifier::Final]),
            None,
        )?;
        w.emit_empty_line()?;

        let ctor = constructor_modifiers(&self.model.source().modifiers());
        w.begin_method(None, self.model.class_name(), &ctor, &[(DISPATCHER, "dispatcher")])?;
        w.emit_statement("this.dispatcher = dispatcher")?;
        w.end_method()?;

        for method in self.model.methods() {
            w.emit_empty_line()?;
            let params: Vec<(&str, &str)> = method.parameters().collect();
            w.begin_method(
                Some("void"),
                method.name(),
                &modifiers(&[Modifier::Public]),
                &params,
            )?;
            let args = std::iter::once(self.model.loader_id(method).to_string())
                .chain(method.parameter_names.iter().cloned())
                .join(", ");
            w.emit_statement(&format!("dispatcher.dispatch({args})"))?;
            w.end_method()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use chrono::{NaiveDate, NaiveDateTime};
    use operation_codegen::{render_to_string, GeneratorOptions, LoaderIds, MethodKey};

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn manifest() -> Manifest {
        Manifest::from_toml_str(
            r#"
            [[type]]
            name = "com.example.GeneratorsTestOps"
            modifiers = ["public"]
            operator_base = "com.example.BaseOperator"

            [[type.methods]]
            name = "loadUser"
            parameters = [{ name = "id", type = "long" }, { name = "tag", type = "java.lang.String" }]

            [[type.methods]]
            name = "save"
            parameters = [{ name = "user", type = "com.other.User" }]

            [[type.methods]]
            name = "save"
            "#,
        )
        .unwrap()
    }

    fn id(name: &str, params: &[&str]) -> u32 {
        LoaderIds::global().loader_id(&MethodKey::new(
            "com.example.GeneratorsTestOps",
            name,
            params.iter().copied(),
        ))
    }

    #[test]
    fn test_loader_class() {
        let manifest = manifest();
        let generator = LoaderGenerator::new(&manifest.types[0]);
        let text = render_to_string(&generator, &GeneratorOptions::default(), &instant()).unwrap();

        let load = id("loadUser", &["long", "java.lang.String"]);
        let save_user = id("save", &["com.other.User"]);
        let save = id("save", &[]);
        assert!(text.contains("/**\n * Loader ids of {@link com.example.GeneratorsTestOps}.\n */\npublic class GeneratorsTestOps$$Loader {\n"));
        assert!(text.contains(&format!("  public static final int LOAD_USER = {load};\n")));
        assert!(text.contains(&format!("  public static final int SAVE_{save_user} = {save_user};\n")));
        assert!(text.contains(&format!("  public static final int SAVE_{save} = {save};\n")));
        assert!(text.contains("  private final GeneratorsTestOps operations;\n"));
        assert!(text.contains("  public GeneratorsTestOps$$Loader(final GeneratorsTestOps operations) {\n    this.operations = operations;\n  }\n"));
        assert!(text.contains("  public GeneratorsTestOps getOperations() {\n    return operations;\n  }\n}\n"));
    }

    #[test]
    fn test_operator_class() {
        let manifest = manifest();
        let generator = OperatorGenerator::new(&manifest.types[0]);
        let text = render_to_string(&generator, &GeneratorOptions::default(), &instant()).unwrap();

        let load = id("loadUser", &["long", "java.lang.String"]);
        let save_user = id("save", &["com.other.User"]);
        assert!(text.contains("import opgen.runtime.Dispatcher;\n"));
        assert!(text.contains("public class GeneratorsTestOps$$Operator extends BaseOperator {\n"));
        assert!(text.contains("  private final Dispatcher dispatcher;\n"));
        assert!(text.contains(&format!(
            "  public void loadUser(final long id, final String tag) {{\n    dispatcher.dispatch({load}, id, tag);\n  }}\n"
        )));
        assert!(text.contains(&format!(
            "  public void save(final com.other.User user) {{\n    dispatcher.dispatch({save_user}, user);\n  }}\n"
        )));
    }

    #[test]
    fn test_constant_name() {
        let manifest = manifest();
        let generator = LoaderGenerator::new(&manifest.types[0]);
        let model = generator.model();
        assert_eq!(constant_name(model, &model.methods()[0]), "LOAD_USER");
    }
}
