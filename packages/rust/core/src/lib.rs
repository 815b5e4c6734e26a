//! Tutorial compilation for stepdoc.
//!
//! This crate turns an ordered list of step directories plus an overview
//! directory into linked markdown pages: one per step and an `index.md`.
//! The pipeline ([`pipeline::compile_tutorial`]) only reads; writing is done
//! separately by [`writer::write_documents`].

pub mod metadata;
pub mod navigation;
pub mod overview;
pub mod pipeline;
pub mod resources;
pub mod step;
pub mod writer;
