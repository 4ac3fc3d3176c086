// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! File sink: writes one generated class through the environment.
//!
//! Failures are reported as diagnostics against the source type and never
//! propagate, so one broken class cannot stop the rest of a batch.

use crate::emit::{render, ClassGenerator};
use crate::env::{Environment, OutputFile, SourceElement, SourceType};
use crate::error::EmitError;
use crate::options::GeneratorOptions;
use chrono::Local;
use log::{debug, warn};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    Generated,
    Failed,
}

/// Output file that is closed when dropped, on every exit path.
struct OpenFile {
    file: Box<dyn OutputFile>,
    fqcn: String,
}

impl OpenFile {
    /// Drop the partially written file. The close on drop still runs.
    fn discard(&mut self) {
        if let Err(e) = self.file.discard() {
            debug!("ignoring error while discarding {}: {}", self.fqcn, e);
        }
    }
}

impl Write for OpenFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl Drop for OpenFile {
    fn drop(&mut self) {
        if let Err(e) = self.file.close() {
            debug!("ignoring error while closing {}: {}", self.fqcn, e);
        }
    }
}

/// The source type seen as the element generated files originate from.
struct Origin<'a>(&'a dyn SourceType);

impl SourceElement for Origin<'_> {
    fn qualified_name(&self) -> &str {
        self.0.qualified_name()
    }

    fn location(&self) -> Option<String> {
        self.0.location()
    }
}

/// Generate the class described by `generator` into a new source file.
pub fn generate_code<G>(
    env: &dyn Environment,
    generator: &G,
    options: &GeneratorOptions,
) -> GenerationStatus
where
    G: ClassGenerator + ?Sized,
{
    let model = generator.model();
    let origin = Origin(model.source());

    match write_source_file(env, generator, &origin, options) {
        Ok(()) => {
            debug!("generated {}", model.fqcn());
            GenerationStatus::Generated
        }
        Err(err) => {
            warn!("generation of {} failed: {}", model.fqcn(), err);
            env.report_error(
                &format!(
                    "Cannot generate loader for base class {}: {}",
                    origin.qualified_name(),
                    err
                ),
                &origin,
            );
            GenerationStatus::Failed
        }
    }
}

fn write_source_file<G>(
    env: &dyn Environment,
    generator: &G,
    origin: &Origin<'_>,
    options: &GeneratorOptions,
) -> Result<(), EmitError>
where
    G: ClassGenerator + ?Sized,
{
    let fqcn = generator.model().fqcn();
    let file = env
        .create_source_file(&fqcn, origin)
        .map_err(|source| EmitError::SinkAcquisition {
            fqcn: fqcn.clone(),
            source,
        })?;
    let mut out = OpenFile {
        file,
        fqcn: fqcn.clone(),
    };

    let timestamp = Local::now().naive_local();
    let written = render(generator, &mut out, options, &timestamp)
        .map_err(|source| EmitError::Render {
            fqcn: fqcn.clone(),
            source,
        })
        .and_then(|()| {
            out.flush().map_err(|source| EmitError::Flush {
                fqcn: fqcn.clone(),
                source,
            })
        });
    if written.is_err() {
        out.discard();
    }
    written
}
