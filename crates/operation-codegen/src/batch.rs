// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::emit::ClassGenerator;
use crate::env::Environment;
use crate::options::GeneratorOptions;
use crate::sink::{generate_code, GenerationStatus};
use log::info;

/// Outcome of a generation batch, by fully-qualified generated class name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub generated: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Run every generator. A failing class is reported and skipped; the others
/// are still generated.
pub fn generate_all(
    env: &dyn Environment,
    generators: &[&dyn ClassGenerator],
    options: &GeneratorOptions,
) -> BatchReport {
    let mut report = BatchReport::default();
    for generator in generators {
        let fqcn = generator.model().fqcn();
        match generate_code(env, *generator, options) {
            GenerationStatus::Generated => report.generated.push(fqcn),
            GenerationStatus::Failed => report.failed.push(fqcn),
        }
    }
    info!(
        "generated {} classes, {} failed",
        report.generated.len(),
        report.failed.len()
    );
    report
}
