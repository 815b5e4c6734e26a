//! End-to-end compile: overview → assemble steps → link → index.
//!
//! The pipeline is pure with respect to output: it returns every document and
//! leaves persistence to [`crate::writer`]. A fatal error anywhere means no
//! documents are returned at all.

use std::time::{Duration, Instant};

use tracing::{info, instrument};

use stepdoc_shared::{Document, Overview, ResourceLayout, Result, StepDoc, StepId};

use crate::navigation::link_steps;
use crate::overview::{assemble_overview, load_overview};
use crate::resources::ResourceSource;
use crate::step::assemble_step;

/// Output of a successful compile.
#[derive(Debug, Clone)]
pub struct CompiledTutorial {
    /// The parsed overview.
    pub overview: Overview,
    /// One document per step in input order, followed by `index.md`.
    pub documents: Vec<Document>,
    /// Number of steps compiled.
    pub step_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each step is assembled.
    fn step_assembled(&self, id: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &CompiledTutorial);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn step_assembled(&self, _id: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &CompiledTutorial) {}
}

/// Assemble every step in order (pass 1). Stops at the first failing step.
pub fn assemble_steps<S: ResourceSource + ?Sized>(
    source: &S,
    layout: &ResourceLayout,
    steps: &[StepId],
    tutorial_name: &str,
    progress: &dyn ProgressReporter,
) -> Result<Vec<StepDoc>> {
    let mut docs = Vec::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        docs.push(assemble_step(source, layout, step, tutorial_name)?);
        progress.step_assembled(&step.id, i + 1, steps.len());
    }
    Ok(docs)
}

/// Run the full compile.
///
/// 1. Load the overview (its name titles every page)
/// 2. Assemble each step
/// 3. Append prev/next navigation
/// 4. Render the index
#[instrument(skip_all, fields(steps = steps.len()))]
pub fn compile_tutorial<S: ResourceSource + ?Sized>(
    source: &S,
    layout: &ResourceLayout,
    steps: &[StepId],
    progress: &dyn ProgressReporter,
) -> Result<CompiledTutorial> {
    let start = Instant::now();

    progress.phase("Reading overview");
    let overview = load_overview(source, layout)?;
    info!(tutorial = %overview.name, "compiling tutorial");

    progress.phase("Assembling steps");
    let assembled = assemble_steps(source, layout, steps, &overview.name, progress)?;

    progress.phase("Linking steps");
    let linked = link_steps(assembled);

    let index = assemble_overview(&overview, &linked);
    let step_count = linked.len();

    let mut documents: Vec<Document> = linked.into_iter().map(Document::from).collect();
    documents.push(index);

    let result = CompiledTutorial {
        overview,
        documents,
        step_count,
        elapsed: start.elapsed(),
    };

    info!(
        steps = result.step_count,
        documents = result.documents.len(),
        "tutorial compiled"
    );
    progress.done(&result);

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
