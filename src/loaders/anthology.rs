//! Anthology XML records.
//!
//! Both volume layouts are accepted:
//!
//! ```xml
//! <volume id="N19"><paper id="1001">...<url>N19-1001</url></paper></volume>
//! <collection id="2020.acl"><volume id="main"><paper id="1">...</paper></volume></collection>
//! ```
//!
//! The `<url>` text is the anthology ID when present, otherwise it is
//! derived from the enclosing element IDs.

use std::path::Path;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::{read_input, AgendaError, Result};
use crate::metadata::{MetadataStore, RejectedRecord};
use crate::models::{Author, ItemMetadata};
use crate::utils::normalize_whitespace;

pub const ANTHOLOGY_BASE_URL: &str = "https://www.aclweb.org/anthology";

pub fn load_file(path: &Path, store: &mut MetadataStore, diag: &mut Diagnostics) -> Result<usize> {
    let text = read_input(path)?;
    let count = load_str(&text, path, store, diag)?;
    debug!("Loaded {} anthology records from {}", count, path.display());
    Ok(count)
}

/// Parse one anthology XML document into `store`. Returns the number of
/// usable records.
pub fn load_str(
    text: &str,
    path: &Path,
    store: &mut MetadataStore,
    diag: &mut Diagnostics,
) -> Result<usize> {
    let doc = Document::parse(text)
        .map_err(|e| AgendaError::parse(path, e.pos().row as usize, e.to_string()))?;

    let mut count = 0;
    for paper in doc.descendants().filter(|n| n.has_tag_name("paper")) {
        let line = doc.text_pos_at(paper.range().start).row as usize;

        let Some(id) = anthology_id(paper) else {
            diag.warn(
                WarningKind::SkippedRecord,
                format!("{}:{}: paper without an anthology id, skipped", path.display(), line),
            );
            continue;
        };

        let title = child(paper, "title").map(flatten_text).unwrap_or_default();
        if title.is_empty() {
            diag.warn(
                WarningKind::SkippedRecord,
                format!("{}:{}: anthology paper {} has no title", path.display(), line, id),
            );
            store.reject_anthology(
                id,
                RejectedRecord {
                    path: path.to_path_buf(),
                    line,
                    reason: "record has no title".into(),
                },
            );
            continue;
        }

        let authors = paper
            .children()
            .filter(|n| n.has_tag_name("author"))
            .filter_map(parse_author)
            .collect();

        let url = canonical_url(paper, &id);
        let metadata = ItemMetadata {
            title,
            authors,
            abstract_text: child(paper, "abstract").map(flatten_text).unwrap_or_default(),
            pdf_url: Some(format!("{}.pdf", url)),
            url: Some(url),
            video_url: child(paper, "video").and_then(video_href),
        };

        store.insert_anthology(id, metadata);
        count += 1;
    }

    Ok(count)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// All text below a node with inline markup (`<fixed-case>`, `<tex-math>`)
/// flattened and whitespace collapsed.
fn flatten_text(node: Node) -> String {
    let raw: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    normalize_whitespace(&raw)
}

/// Text below a node, leaving out anything inside `skip` elements
fn flatten_text_except(node: Node, skip: &str) -> String {
    let raw: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter(|n| !n.ancestors().any(|a| a.has_tag_name(skip)))
        .filter_map(|n| n.text())
        .collect();
    normalize_whitespace(&raw)
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// An absolute `<url>` names the paper in its last path segment.
fn id_from_url(url: &str) -> String {
    if !is_absolute(url) {
        return url.to_string();
    }
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim_end_matches(".pdf")
        .to_string()
}

fn anthology_id(paper: Node) -> Option<String> {
    if let Some(url) = child(paper, "url").map(flatten_text) {
        let id = id_from_url(&url);
        if !id.is_empty() {
            return Some(id);
        }
    }

    let paper_id = paper.attribute("id")?;
    let volume = paper.ancestors().find(|n| n.has_tag_name("volume"))?;
    let volume_id = volume.attribute("id")?;

    match volume.ancestors().find(|n| n.has_tag_name("collection")) {
        Some(collection) => {
            let collection_id = collection.attribute("id")?;
            Some(format!("{}-{}.{}", collection_id, volume_id, paper_id))
        }
        None => Some(format!("{}-{}", volume_id, paper_id)),
    }
}

fn canonical_url(paper: Node, id: &str) -> String {
    let explicit = child(paper, "url").map(flatten_text).unwrap_or_default();
    if is_absolute(&explicit) {
        explicit.trim_end_matches(".pdf").to_string()
    } else {
        format!("{}/{}", ANTHOLOGY_BASE_URL, id)
    }
}

fn parse_author(node: Node) -> Option<Author> {
    let first = child(node, "first").map(flatten_text).unwrap_or_default();
    let last = child(node, "last").map(flatten_text).unwrap_or_default();

    let name = if first.is_empty() && last.is_empty() {
        flatten_text_except(node, "affiliation")
    } else {
        normalize_whitespace(&format!("{} {}", first, last))
    };
    if name.is_empty() {
        return None;
    }

    let affiliation = child(node, "affiliation")
        .map(flatten_text)
        .filter(|a| !a.is_empty());

    Some(Author {
        first: Some(first).filter(|f| !f.is_empty()),
        last: Some(last).filter(|l| !l.is_empty()),
        ..Author::new(name, affiliation)
    })
}

fn video_href(node: Node) -> Option<String> {
    node.attribute("href")
        .map(str::trim)
        .map(str::to_string)
        .or_else(|| Some(flatten_text(node)))
        .filter(|v| !v.is_empty())
}
