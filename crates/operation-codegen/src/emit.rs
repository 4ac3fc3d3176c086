// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Emission engine: renders the scaffolding shared by every generated class
//! and delegates the class body to the concrete generator.

use crate::env::SourceType;
use crate::java_writer::JavaWriter;
use crate::model::GenerationModel;
use crate::modifiers::class_modifiers;
use crate::options::GeneratorOptions;
use chrono::NaiveDateTime;
use std::io::{self, Write};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writer handed to generators while a class is rendered.
pub type SourceWriter<'a> = JavaWriter<&'a mut dyn Write>;

/// A generator of one kind of class.
pub trait ClassGenerator {
    fn model(&self) -> &GenerationModel<'_>;

    /// Class level documentation, written right before the type header.
    fn class_doc(&self, _w: &mut SourceWriter<'_>) -> io::Result<()> {
        Ok(())
    }

    /// Write the members of the class. The writer is positioned inside the
    /// type body and must be left there.
    fn write_class_body(&self, w: &mut SourceWriter<'_>) -> io::Result<()>;
}

/// Render the compilation unit of `generator` into `out`.
pub fn render<G>(
    generator: &G,
    out: &mut dyn Write,
    options: &GeneratorOptions,
    timestamp: &NaiveDateTime,
) -> io::Result<()>
where
    G: ClassGenerator + ?Sized,
{
    let model = generator.model();
    let mut w: SourceWriter<'_> = JavaWriter::with_indent(out, &options.indent);

    w.emit_single_line_comment(&format!(
        "{} {}",
        options.header_marker,
        timestamp.format(TIMESTAMP_FORMAT)
    ))?;
    w.emit_package(model.package_name())?;
    if !model.imports().is_empty() {
        w.emit_imports(model.imports())?;
        w.emit_empty_line()?;
    }

    generator.class_doc(&mut w)?;
    w.begin_type(
        model.class_name(),
        "class",
        &class_modifiers(&model.source().modifiers()),
        model.extends_class(),
    )?;
    w.emit_empty_line()?;

    generator.write_class_body(&mut w)?;

    w.end_type()
}

/// Render to a string.
pub fn render_to_string<G>(
    generator: &G,
    options: &GeneratorOptions,
    timestamp: &NaiveDateTime,
) -> io::Result<String>
where
    G: ClassGenerator + ?Sized,
{
    let mut out = Vec::new();
    render(generator, &mut out, options, timestamp)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SourceElement;
    use crate::modifiers::{constructor_modifiers, Modifier, ModifierSet};
    use chrono::NaiveDate;

    struct Ops {
        modifiers: ModifierSet,
    }

    impl SourceElement for Ops {
        fn qualified_name(&self) -> &str {
            "com.example.Foo"
        }
    }

    impl SourceType for Ops {
        fn package_name(&self) -> &str {
            "com.example"
        }

        fn modifiers(&self) -> ModifierSet {
            self.modifiers.clone()
        }
    }

    struct Empty<'a> {
        model: GenerationModel<'a>,
    }

    impl ClassGenerator for Empty<'_> {
        fn model(&self) -> &GenerationModel<'_> {
            &self.model
        }

        fn write_class_body(&self, w: &mut SourceWriter<'_>) -> io::Result<()> {
            let name = self.model.class_name().to_string();
            let mods = constructor_modifiers(&self.model.source().modifiers());
            w.begin_method(None, &name, &mods, &[])?;
            w.end_method()
        }
    }

    struct Documented<'a>(Empty<'a>);

    impl ClassGenerator for Documented<'_> {
        fn model(&self) -> &GenerationModel<'_> {
            self.0.model()
        }

        fn class_doc(&self, w: &mut SourceWriter<'_>) -> io::Result<()> {
            w.emit_javadoc("Generated loader.")
        }

        fn write_class_body(&self, w: &mut SourceWriter<'_>) -> io::Result<()> {
            self.0.write_class_body(w)
        }
    }

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap()
    }

    fn ops(modifiers: &[Modifier]) -> Ops {
        Ops {
            modifiers: modifiers.iter().copied().collect(),
        }
    }

    #[test]
    fn test_full_unit() {
        let source = ops(&[Modifier::Public, Modifier::Static, Modifier::Abstract]);
        let mut model = GenerationModel::new(&source, vec![], "Loader");
        model.add_imports(["java.util.List"]);
        let text = render_to_string(&Empty { model }, &GeneratorOptions::default(), &instant()).unwrap();
        assert_eq!(
            text,
            "// Code generated by opgen. Do not edit. 2024-03-09 07:05:01\n\
             package com.example;\n\
             \n\
             import java.util.List;\n\
             \n\
             public abstract class FooLoader {\n\
             \n  \
             public FooLoader() {\n  \
             }\n\
             }\n"
        );
    }

    #[test]
    fn test_extends_and_class_doc() {
        let source = ops(&[Modifier::Protected]);
        let mut model = GenerationModel::new(&source, vec![], "Loader");
        model.add_imports(["org.runtime.BaseLoader"]);
        model.set_extends_class("org.runtime.BaseLoader");
        let text = render_to_string(
            &Documented(Empty { model }),
            &GeneratorOptions::default(),
            &instant(),
        )
        .unwrap();
        assert!(text.contains("/**\n * Generated loader.\n */\nprotected class FooLoader extends BaseLoader {\n"));
        assert!(text.contains("  FooLoader() {\n"));
    }

    #[test]
    fn test_no_imports_single_separator() {
        let source = ops(&[Modifier::Public]);
        let model = GenerationModel::new(&source, vec![], "Loader");
        let text = render_to_string(&Empty { model }, &GeneratorOptions::default(), &instant()).unwrap();
        assert!(text.starts_with(
            "// Code generated by opgen. Do not edit. 2024-03-09 07:05:01\n\
             package com.example;\n\
             \n\
             public class FooLoader {\n"
        ));
    }

    #[test]
    fn test_same_instant_same_bytes() {
        let source = ops(&[Modifier::Public]);
        let mut model = GenerationModel::new(&source, vec![], "Loader");
        model.add_imports(["b.B", "a.A", "c.C"]);
        let generator = Empty { model };
        let options = GeneratorOptions::default();
        let first = render_to_string(&generator, &options, &instant()).unwrap();
        let second = render_to_string(&generator, &options, &instant()).unwrap();
        assert_eq!(first, second);
        let a = first.find("import a.A;").unwrap();
        let c = first.find("import c.C;").unwrap();
        assert!(a < c);
    }
}
