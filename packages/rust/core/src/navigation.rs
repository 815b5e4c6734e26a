//! Prev/next links between adjacent steps.
//!
//! Linking runs after every step has been assembled: a page's links need the
//! display names of its neighbours, which are only known once their
//! descriptions have been parsed.

use tracing::{debug, instrument};

use stepdoc_markdown::{NavDirection, nav_line};
use stepdoc_shared::{NavLink, StepDoc};

/// Neighbours of one step in the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepNav {
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// Compute the neighbours of every position in `docs`.
pub fn neighbours(docs: &[StepDoc]) -> Vec<StepNav> {
    let links: Vec<NavLink> = docs.iter().map(StepDoc::nav_link).collect();

    (0..links.len())
        .map(|i| StepNav {
            prev: i.checked_sub(1).map(|p| links[p].clone()),
            next: links.get(i + 1).cloned(),
        })
        .collect()
}

/// Append the navigation text for `nav` to `body`.
///
/// `Next:` comes first; `Prev:` follows, separated by a blank line.
pub fn append_nav(body: &mut String, nav: &StepNav) {
    if let Some(next) = &nav.next {
        body.push_str(&nav_line(NavDirection::Next, &next.label, &next.target));
    }
    if let Some(prev) = &nav.prev {
        body.push('\n');
        body.push_str(&nav_line(NavDirection::Prev, &prev.label, &prev.target));
    }
}

/// Append prev/next links to each step, preserving order.
#[instrument(skip_all, fields(steps = docs.len()))]
pub fn link_steps(mut docs: Vec<StepDoc>) -> Vec<StepDoc> {
    let navs = neighbours(&docs);
    for (doc, nav) in docs.iter_mut().zip(&navs) {
        append_nav(&mut doc.body, nav);
    }
    debug!("navigation links appended");
    docs
}
