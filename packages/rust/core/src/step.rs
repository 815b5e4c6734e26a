//! Step page assembly.
//!
//! Builds one step's markdown page from the files in its directory:
//!
//! ```text
//! # <tutorial name>
//! ## <step name>
//! <description body>
//!
//! ### Source              (first source match, optional)
//! ### Test code           (test driver, optional)
//! ### Run command         (optional)
//! ### Run output          (required)
//! ```

use std::path::Path;

use tracing::{debug, instrument};

use stepdoc_markdown::{code_block, heading, section};
use stepdoc_shared::{ResourceLayout, Result, StepDoc, StepId, StepdocError};

use crate::metadata::parse_text;
use crate::resources::{Resource, ResourceSource};

/// Metadata key holding a page's display name.
pub const NAME_KEY: &str = "name";

/// Assemble the page for `step` without navigation links.
///
/// Fails with `ResourceNotFound` when the description or run output is absent
/// and with `MissingMetadata` when the description has no `name`. Every other
/// resource is optional.
#[instrument(skip_all, fields(step = %step.id))]
pub fn assemble_step<S: ResourceSource + ?Sized>(
    source: &S,
    layout: &ResourceLayout,
    step: &StepId,
    tutorial_name: &str,
) -> Result<StepDoc> {
    let dir = step.dir.as_path();

    let desc = require(source, dir, &layout.description_file)?;
    let parsed = parse_text(&desc.content, layout.metadata_marker);
    let name = parsed.require(NAME_KEY, &desc.path)?.to_string();

    let mut out = String::new();
    out.push_str(&heading(tutorial_name, 1));
    out.push_str(&heading(&name, 2));
    out.push_str(&parsed.body);
    out.push('\n');

    if let Some(src) = source.find_first(dir, &layout.source_pattern)? {
        debug!(path = %src.path.display(), "adding source");
        push_listing(&mut out, "Source", &src);
    }

    if let Some(file) = &layout.test_description_file {
        if let Some(test_desc) = source.read(dir, file)? {
            debug!(path = %test_desc.path.display(), "adding test description");
            out.push_str(&test_desc.content);
            out.push('\n');
        }
    }

    if let Some(test) = source.read(dir, &layout.test_driver_file)? {
        debug!(path = %test.path.display(), "adding test code");
        push_listing(&mut out, "Test code", &test);
    }

    match source.read(dir, &layout.run_command_file)? {
        Some(cmd) => {
            out.push('\n');
            out.push_str(&section("Run command"));
            out.push_str(&code_block(&cmd.content));
            out.push('\n');
        }
        None => debug!(file = %layout.run_command_file, "no run command"),
    }

    let output = require(source, dir, &layout.run_output_file)?;
    out.push('\n');
    out.push_str(&section("Run output"));
    out.push_str(&code_block(&output.content));
    out.push('\n');

    debug!(name = %name, len = out.len(), "step assembled");

    Ok(StepDoc {
        id: step.id.clone(),
        name,
        body: out,
    })
}

/// Read a resource that must exist.
pub(crate) fn require<S: ResourceSource + ?Sized>(
    source: &S,
    dir: &Path,
    name: &str,
) -> Result<Resource> {
    source
        .read(dir, name)?
        .ok_or_else(|| StepdocError::not_found(dir.join(name)))
}

/// Section heading, the file's path on its own line, then the fenced content.
fn push_listing(out: &mut String, title: &str, resource: &Resource) {
    out.push_str(&section(title));
    out.push_str(&resource.path.display().to_string());
    out.push('\n');
    out.push_str(&code_block(&resource.content));
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
