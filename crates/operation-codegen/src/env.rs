// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Interfaces consumed from the host processing environment.

use crate::modifiers::ModifierSet;
use std::io;

/// An element of the source program that generated code can be traced back to.
pub trait SourceElement {
    /// Fully-qualified name of the element, e.g. `com.example.Operations`.
    fn qualified_name(&self) -> &str;

    /// Human readable origin (file, line) used when reporting diagnostics.
    fn location(&self) -> Option<String> {
        None
    }
}

/// A source type annotated for operation generation.
pub trait SourceType: SourceElement {
    /// Package the type lives in; empty for the default package.
    fn package_name(&self) -> &str;

    fn modifiers(&self) -> ModifierSet;
}

/// A writable generated source file. `close` releases the underlying resource.
pub trait OutputFile: io::Write {
    fn close(&mut self) -> io::Result<()>;

    /// Release the file and remove whatever was written so far. Called
    /// instead of `close` when generation of the file failed.
    fn discard(&mut self) -> io::Result<()>;
}

/// The processing environment generation runs inside.
pub trait Environment {
    /// Open a new source file for the class `fqcn`, originating from `origin`.
    fn create_source_file(
        &self,
        fqcn: &str,
        origin: &dyn SourceElement,
    ) -> io::Result<Box<dyn OutputFile>>;

    /// Report an error-severity diagnostic against `origin`.
    fn report_error(&self, message: &str, origin: &dyn SourceElement);
}
