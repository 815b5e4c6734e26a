//! Overview (index page) parsing and rendering.

use std::path::Path;

use tracing::{debug, instrument};

use stepdoc_markdown::{heading, numbered_link, section};
use stepdoc_shared::{Document, INDEX_FILENAME, Overview, ResourceLayout, Result, StepDoc};

use crate::metadata::parse_text;
use crate::resources::ResourceSource;
use crate::step::{NAME_KEY, require};

/// Read the overview description from `layout.overview_dir`.
///
/// The description must exist and carry a `name`; that name titles every page.
#[instrument(skip_all, fields(dir = %layout.overview_dir))]
pub fn load_overview<S: ResourceSource + ?Sized>(
    source: &S,
    layout: &ResourceLayout,
) -> Result<Overview> {
    let dir = Path::new(&layout.overview_dir);
    let desc = require(source, dir, &layout.description_file)?;
    let parsed = parse_text(&desc.content, layout.metadata_marker);
    let name = parsed.require(NAME_KEY, &desc.path)?.to_string();

    debug!(name = %name, "overview loaded");

    Ok(Overview {
        name,
        body: parsed.body,
    })
}

/// Render the index page: title, overview body, then a numbered list of steps
/// in the order given.
pub fn assemble_overview(overview: &Overview, steps: &[StepDoc]) -> Document {
    let mut out = heading(&overview.name, 1);
    out.push_str(&overview.body);
    out.push_str(&section("Steps"));

    for (i, step) in steps.iter().enumerate() {
        out.push_str(&numbered_link(i + 1, &step.name, &step.output_filename()));
    }

    Document {
        filename: INDEX_FILENAME.to_string(),
        content: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::InMemoryResources;
    use stepdoc_shared::StepdocError;

    fn step(id: &str, name: &str) -> StepDoc {
        StepDoc {
            id: id.into(),
            name: name.into(),
            body: String::new(),
        }
    }

    #[test]
    fn load_overview_parses_name_and_body() {
        let res = InMemoryResources::new()
            .with("overview/desc.txt", "% name: My Tutorial\nLearn things.\n");
        let overview = load_overview(&res, &ResourceLayout::default()).unwrap();
        assert_eq!(overview.name, "My Tutorial");
        assert_eq!(overview.body, "Learn things.\n");
    }

    #[test]
    fn load_overview_missing_name() {
        let res = InMemoryResources::new().with("overview/desc.txt", "No metadata here.\n");
        let err = load_overview(&res, &ResourceLayout::default()).unwrap_err();
        assert!(matches!(err, StepdocError::MissingMetadata { .. }));
    }

    #[test]
    fn load_overview_missing_description() {
        let res = InMemoryResources::new();
        let err = load_overview(&res, &ResourceLayout::default()).unwrap_err();
        assert!(matches!(err, StepdocError::ResourceNotFound { .. }));
    }

    #[test]
    fn index_lists_steps_in_order() {
        let overview = Overview {
            name: "My Tutorial".into(),
            body: "Learn things.\n".into(),
        };
        let doc = assemble_overview(
            &overview,
            &[step("s1", "Step One"), step("s2", "Step Two")],
        );

        assert_eq!(doc.filename, "index.md");
        assert_eq!(
            doc.content,
            "# My Tutorial\nLearn things.\n### Steps\n\
             1. [Step One](out_s1.md)\n\
             2. [Step Two](out_s2.md)\n"
        );
    }

    #[test]
    fn index_numbering_matches_count() {
        let overview = Overview {
            name: "T".into(),
            body: String::new(),
        };
        let steps: Vec<StepDoc> = (0..7).map(|i| step(&format!("s{i}"), &format!("S{i}"))).collect();
        let doc = assemble_overview(&overview, &steps);

        let entries: Vec<&str> = doc.content.lines().filter(|l| l.contains("](out_")).collect();
        assert_eq!(entries.len(), 7);
        for (i, line) in entries.iter().enumerate() {
            assert_eq!(*line, format!("{}. [S{i}](out_s{i}.md)", i + 1));
        }
    }

    #[test]
    fn index_with_no_steps() {
        let overview = Overview {
            name: "Empty".into(),
            body: String::new(),
        };
        let doc = assemble_overview(&overview, &[]);
        assert_eq!(doc.content, "# Empty\n### Steps\n");
    }
}
