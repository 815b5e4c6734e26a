//! Core domain types for stepdoc tutorials.

use std::path::{Path, PathBuf};

/// Filename of the generated overview page.
pub const INDEX_FILENAME: &str = "index.md";

/// Output filename for a step, also used as the href of every link to it.
pub fn step_output_filename(id: &str) -> String {
    format!("out_{id}.md")
}

// ---------------------------------------------------------------------------
// StepId
// ---------------------------------------------------------------------------

/// Identifies one tutorial step and where its resources live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepId {
    /// Unique identifier; the basis of the output filename.
    pub id: String,
    /// Directory holding the step's resources.
    pub dir: PathBuf,
}

impl StepId {
    /// Build a step from a command-line directory argument.
    ///
    /// Trailing separators are dropped from the identifier so `step1/` and
    /// `step1` produce the same output filename.
    pub fn from_arg(arg: &str) -> Self {
        let trimmed = arg.trim_end_matches(['/', '\\']);
        let id = if trimmed.is_empty() { arg } else { trimmed };
        Self {
            id: id.to_string(),
            dir: PathBuf::from(arg),
        }
    }

    /// The implicit step used when no directories are given: resources are
    /// read from `.` and the identifier is the directory's own name.
    pub fn current_dir(cwd: &Path) -> Self {
        let id = cwd
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "step".to_string());
        Self {
            id,
            dir: PathBuf::from("."),
        }
    }

    /// The step's output filename (`out_<id>.md`).
    pub fn output_filename(&self) -> String {
        step_output_filename(&self.id)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

// ---------------------------------------------------------------------------
// Assembled content
// ---------------------------------------------------------------------------

/// A reference to another generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Link text (the target's display name).
    pub label: String,
    /// Target filename.
    pub target: String,
}

/// One assembled step page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDoc {
    /// Step identifier.
    pub id: String,
    /// Display name from the `name` metadata key.
    pub name: String,
    /// Markdown body.
    pub body: String,
}

impl StepDoc {
    /// Output filename for this step.
    pub fn output_filename(&self) -> String {
        step_output_filename(&self.id)
    }

    /// A link pointing at this step's page.
    pub fn nav_link(&self) -> NavLink {
        NavLink {
            label: self.name.clone(),
            target: self.output_filename(),
        }
    }
}

/// The tutorial overview, parsed from the overview directory's description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    /// Tutorial display name; used as the top heading on every page.
    pub name: String,
    /// Overview body text.
    pub body: String,
}

/// A finished markdown document ready for the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Output filename, relative to the output directory.
    pub filename: String,
    /// Markdown content.
    pub content: String,
}

impl From<StepDoc> for Document {
    fn from(doc: StepDoc) -> Self {
        Self {
            filename: step_output_filename(&doc.id),
            content: doc.body,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_filename_format() {
        assert_eq!(step_output_filename("step1"), "out_step1.md");
        assert_eq!(StepId::from_arg("step1").output_filename(), "out_step1.md");
    }

    #[test]
    fn from_arg_trims_trailing_separator() {
        let step = StepId::from_arg("step2/");
        assert_eq!(step.id, "step2");
        assert_eq!(step.dir, PathBuf::from("step2/"));
    }

    #[test]
    fn current_dir_uses_last_component() {
        let step = StepId::current_dir(Path::new("/home/me/tutorial/step3"));
        assert_eq!(step.id, "step3");
        assert_eq!(step.dir, PathBuf::from("."));
    }

    #[test]
    fn step_doc_links_and_converts() {
        let doc = StepDoc {
            id: "s1".into(),
            name: "Step One".into(),
            body: "body".into(),
        };
        let link = doc.nav_link();
        assert_eq!(link.label, "Step One");
        assert_eq!(link.target, "out_s1.md");

        let document = Document::from(doc);
        assert_eq!(document.filename, "out_s1.md");
        assert_eq!(document.content, "body");
    }
}
