// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Filesystem backed environment for running generation outside a compiler.

use crate::env::{Environment, OutputFile, SourceElement};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::{self, SimpleFiles};
use codespan_reporting::term::{self, termcolor::WriteColor};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Writes generated sources below a root directory, one `.java` file per
/// class laid out by package, and collects reported errors.
pub struct FsEnvironment {
    root: PathBuf,
    created: Mutex<BTreeSet<String>>,
    diagnostics: Mutex<Vec<Diagnostic<usize>>>,
}

impl FsEnvironment {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: Mutex::new(BTreeSet::new()),
            diagnostics: Mutex::new(vec![]),
        }
    }

    /// Path the source of `fqcn` is written to.
    pub fn source_path(&self, fqcn: &str) -> PathBuf {
        let (package, class_name) = fqcn.rsplit_once('.').unwrap_or(("", fqcn));
        let mut path = self.root.clone();
        path.extend(package.split('.').filter(|segment| !segment.is_empty()));
        path.push(format!("{class_name}.java"));
        path
    }

    /// Fully-qualified names of all files created so far, including files
    /// discarded after a failed generation.
    pub fn created_files(&self) -> Vec<String> {
        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic<usize>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_errors(&self) -> bool {
        !self
            .diagnostics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }

    /// Print the collected diagnostics.
    pub fn report_diag(&self, writer: &mut dyn WriteColor) -> Result<(), files::Error> {
        let files: SimpleFiles<String, String> = SimpleFiles::new();
        let config = term::Config::default();
        for diag in self.diagnostics() {
            term::emit(writer, &config, &files, &diag)?;
        }
        Ok(())
    }
}

impl Environment for FsEnvironment {
    fn create_source_file(
        &self,
        fqcn: &str,
        _origin: &dyn SourceElement,
    ) -> io::Result<Box<dyn OutputFile>> {
        // Like a compiler filer, a type may only be generated once per run.
        if !self
            .created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(fqcn.to_string())
        {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("attempt to recreate a file for type {fqcn}"),
            ));
        }
        let path = self.source_path(fqcn);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        Ok(Box::new(FsOutputFile {
            path,
            out: Some(BufWriter::new(file)),
        }))
    }

    fn report_error(&self, message: &str, origin: &dyn SourceElement) {
        let mut notes = vec![format!("in {}", origin.qualified_name())];
        if let Some(location) = origin.location() {
            notes.push(format!("at {location}"));
        }
        let diag = Diagnostic::error().with_message(message).with_notes(notes);
        self.diagnostics
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(diag);
    }
}

struct FsOutputFile {
    path: PathBuf,
    out: Option<BufWriter<File>>,
}

impl FsOutputFile {
    fn inner(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.out
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "output file already closed"))
    }
}

impl Write for FsOutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner()?.flush()
    }
}

impl OutputFile for FsOutputFile {
    fn close(&mut self) -> io::Result<()> {
        match self.out.take() {
            Some(mut out) => out.flush(),
            None => Ok(()),
        }
    }

    fn discard(&mut self) -> io::Result<()> {
        // Buffered bytes are dropped unwritten; the file itself goes away.
        if let Some(out) = self.out.take() {
            let _ = out.into_parts();
        }
        fs::remove_file(&self.path)
    }
}
