// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Line-based writer for generating Java source with proper indentation.

use crate::modifiers::{Modifier, ModifierSet};
use crate::naming::simple_name;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::io::{self, Write};

static QUALIFIED_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)+").expect("qualified type pattern")
});

const DEFAULT_INDENT: &str = "  ";

/// Writer for one Java compilation unit.
///
/// Tracks indentation and remembers the package and imports of the file so
/// that type names can be emitted in their shortest unambiguous form.
pub struct JavaWriter<W: Write> {
    out: W,
    indent_unit: String,
    indent: usize,
    at_line_start: bool,
    package: String,
    imported: BTreeSet<String>,
}

impl<W: Write> JavaWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_indent(out, DEFAULT_INDENT)
    }

    pub fn with_indent(out: W, indent_unit: &str) -> Self {
        Self {
            out,
            indent_unit: indent_unit.to_string(),
            indent: 0,
            at_line_start: true,
            package: String::new(),
            imported: BTreeSet::new(),
        }
    }

    /// Write a string, handling indentation at line starts.
    /// Empty lines are left without indentation.
    pub fn write(&mut self, s: &str) -> io::Result<()> {
        for (i, segment) in s.split('\n').enumerate() {
            if i > 0 {
                self.out.write_all(b"\n")?;
                self.at_line_start = true;
            }
            if segment.is_empty() {
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent {
                    self.out.write_all(self.indent_unit.as_bytes())?;
                }
                self.at_line_start = false;
            }
            self.out.write_all(segment.as_bytes())?;
        }
        Ok(())
    }

    /// Write a complete line (adds newline at end).
    pub fn line(&mut self, s: &str) -> io::Result<()> {
        self.write(s)?;
        self.write("\n")
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn emit_empty_line(&mut self) -> io::Result<()> {
        self.write("\n")
    }

    pub fn emit_single_line_comment(&mut self, text: &str) -> io::Result<()> {
        self.line(&format!("// {text}"))
    }

    /// Emit the package clause. Nothing is written for the default package.
    pub fn emit_package(&mut self, package: &str) -> io::Result<()> {
        self.package = package.to_string();
        if package.is_empty() {
            return Ok(());
        }
        self.line(&format!("package {package};"))?;
        self.emit_empty_line()
    }

    /// Emit one import statement per name, in sorted order.
    pub fn emit_imports<I, T>(&mut self, imports: I) -> io::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let sorted: BTreeSet<String> = imports
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        for name in sorted {
            self.line(&format!("import {name};"))?;
            self.imported.insert(name);
        }
        Ok(())
    }

    /// Emit a javadoc block, one ` * ` line per line of `text`.
    pub fn emit_javadoc(&mut self, text: &str) -> io::Result<()> {
        self.line("/**")?;
        for doc_line in text.lines() {
            if doc_line.is_empty() {
                self.line(" *")?;
            } else {
                self.line(&format!(" * {doc_line}"))?;
            }
        }
        self.line(" */")
    }

    /// Open a type declaration and indent its body.
    pub fn begin_type(
        &mut self,
        name: &str,
        kind: &str,
        modifiers: &ModifierSet,
        extends: Option<&str>,
    ) -> io::Result<()> {
        let mut header = modifier_prefix(modifiers);
        header.push_str(&format!("{kind} {name}"));
        if let Some(base) = extends {
            header.push_str(&format!(" extends {}", self.compress_type(base)));
        }
        header.push_str(" {");
        self.line(&header)?;
        self.indent();
        Ok(())
    }

    pub fn end_type(&mut self) -> io::Result<()> {
        self.dedent();
        self.line("}")
    }

    /// Open a method. A missing return type declares a constructor named `name`.
    pub fn begin_method(
        &mut self,
        return_type: Option<&str>,
        name: &str,
        modifiers: &ModifierSet,
        parameters: &[(&str, &str)],
    ) -> io::Result<()> {
        let mut header = modifier_prefix(modifiers);
        if let Some(ty) = return_type {
            header.push_str(&self.compress_type(ty));
            header.push(' ');
        }
        let params = parameters
            .iter()
            .map(|(ty, param)| format!("final {} {}", self.compress_type(ty), param))
            .join(", ");
        header.push_str(&format!("{name}({params}) {{"));
        self.line(&header)?;
        self.indent();
        Ok(())
    }

    pub fn end_method(&mut self) -> io::Result<()> {
        self.end_type()
    }

    pub fn emit_field(
        &mut self,
        ty: &str,
        name: &str,
        modifiers: &ModifierSet,
        initial_value: Option<&str>,
    ) -> io::Result<()> {
        let mut decl = modifier_prefix(modifiers);
        decl.push_str(&format!("{} {}", self.compress_type(ty), name));
        if let Some(value) = initial_value {
            decl.push_str(&format!(" = {value}"));
        }
        decl.push(';');
        self.line(&decl)
    }

    pub fn emit_statement(&mut self, statement: &str) -> io::Result<()> {
        self.line(&format!("{statement};"))
    }

    /// Shorten every qualified type in `ty` that is imported, lives in
    /// `java.lang`, or lives in the package of this file.
    ///
    /// An imported simple name shadows implicitly visible types, so a
    /// same-package or `java.lang` type with that simple name stays qualified.
    pub fn compress_type(&self, ty: &str) -> String {
        QUALIFIED_TYPE
            .replace_all(ty, |caps: &Captures| {
                let name = &caps[0];
                if self.imported.contains(name) {
                    return simple_name(name).to_string();
                }
                let package = name.rsplit_once('.').map_or("", |(pkg, _)| pkg);
                let implicit = package == "java.lang"
                    || (!self.package.is_empty() && package == self.package);
                let shadowed = self
                    .imported
                    .iter()
                    .any(|import| simple_name(import) == simple_name(name));
                if implicit && !shadowed {
                    simple_name(name).to_string()
                } else {
                    name.to_string()
                }
            })
            .into_owned()
    }

    /// Get the underlying writer (consumes self).
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn modifier_prefix(modifiers: &ModifierSet) -> String {
    modifiers
        .iter()
        .map(Modifier::as_str)
        .map(|m| format!("{m} "))
        .collect()
}
