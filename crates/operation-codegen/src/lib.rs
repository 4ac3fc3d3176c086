// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Source generation core for asynchronous operation loader classes.
//!
//! A [`GenerationModel`] describes one Java class to generate from an annotated
//! operations class. A [`ClassGenerator`] supplies the class body, the emission
//! engine renders the shared scaffolding around it, and the file sink writes the
//! result through a host [`Environment`], turning failures into diagnostics.

pub mod batch;
pub mod emit;
pub mod env;
pub mod error;
pub mod host;
pub mod java_writer;
pub mod loader_ids;
pub mod model;
pub mod modifiers;
pub mod naming;
pub mod options;
pub mod sink;

pub use batch::{generate_all, BatchReport};
pub use emit::{render, render_to_string, ClassGenerator};
pub use env::{Environment, OutputFile, SourceElement, SourceType};
pub use error::EmitError;
pub use java_writer::JavaWriter;
pub use loader_ids::LoaderIds;
pub use model::{GenerationModel, MethodData, MethodKey};
pub use modifiers::Modifier;
pub use options::GeneratorOptions;
pub use sink::{generate_code, GenerationStatus};
