//! Markdown rendering primitives for tutorial pages.
//!
//! Every helper returns a fragment that ends with a newline (except [`link`],
//! which is inline), so fragments can be pushed onto a page buffer in order.

/// Code fence used for every embedded file.
const FENCE: &str = "```";

/// Default heading level for page sections (`### Source`, `### Run output`, ...).
pub const SECTION_LEVEL: usize = 3;

/// Render an ATX heading: `#`×level, a space, the text, newline.
pub fn heading(text: &str, level: usize) -> String {
    format!("{} {text}\n", "#".repeat(level))
}

/// Render a section heading at [`SECTION_LEVEL`].
pub fn section(text: &str) -> String {
    heading(text, SECTION_LEVEL)
}

/// Fence `content` as a code block.
///
/// The closing fence always starts on its own line, even when `content` lacks
/// a trailing newline.
pub fn code_block(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2 * FENCE.len() + 3);
    out.push_str(FENCE);
    out.push('\n');
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(FENCE);
    out.push('\n');
    out
}

/// Render an inline link: `[label](target)`.
pub fn link(label: &str, target: &str) -> String {
    format!("[{label}]({target})")
}

/// Render one entry of an ordered list (1-based `index`) pointing at `target`.
pub fn numbered_link(index: usize, label: &str, target: &str) -> String {
    format!("{index}. {}\n", link(label, target))
}

/// Direction of a navigation reference between adjacent pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Next,
    Prev,
}

impl NavDirection {
    fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Prev => "Prev",
        }
    }
}

/// Render a navigation line such as `Next: [Step Two](out_s2.md)`.
pub fn nav_line(direction: NavDirection, label: &str, target: &str) -> String {
    format!("{}: {}\n", direction.label(), link(label, target))
}
