// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use std::io;
use thiserror::Error;

/// Failures of a single class emission.
///
/// These never leave the file sink: they are turned into a diagnostic
/// against the source type and the rest of the batch carries on.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The environment refused to open the output file.
    #[error("cannot open output file for {fqcn}: {source}")]
    SinkAcquisition {
        fqcn: String,
        #[source]
        source: io::Error,
    },

    /// Writing the rendered source failed.
    #[error("cannot write {fqcn}: {source}")]
    Render {
        fqcn: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot flush {fqcn}: {source}")]
    Flush {
        fqcn: String,
        #[source]
        source: io::Error,
    },
}
