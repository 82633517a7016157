//! Wiki-link scanning and rewriting.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::splice;
use crate::domain::{Link, ParseLinkError};

static WIKI_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

/// One `[[...]]` occurrence in a document.
#[derive(Debug, Clone)]
pub struct WikiLinkSpan {
    /// Byte range of the whole bracketed occurrence, brackets included.
    pub range: Range<usize>,
    /// The parsed link, or why the inner text was rejected.
    pub parsed: Result<Link, ParseLinkError>,
}

/// Finds every `[[...]]` span in `doc`, left to right.
///
/// Spans never cross a line break. Duplicates are all reported.
pub fn scan_wiki_links(doc: &str) -> Vec<WikiLinkSpan> {
    WIKI_LINK_RE
        .captures_iter(doc)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(WikiLinkSpan {
                range: whole.range(),
                parsed: Link::parse(inner.as_str()),
            })
        })
        .collect()
}

/// Replaces each valid wiki-link with its Markdown form.
///
/// Malformed links stay in the text verbatim.
///
/// ```
/// use vaultsite::syntax::rewrite_wiki_links;
///
/// assert_eq!(
///     rewrite_wiki_links("See [[Other Note|this]] and [[#nope]]."),
///     "See [this](other-note.html) and [[#nope]]."
/// );
/// ```
pub fn rewrite_wiki_links(doc: &str) -> String {
    replace_wiki_links(doc, &scan_wiki_links(doc))
}

/// Replaces previously scanned spans of `doc`.
pub(crate) fn replace_wiki_links(doc: &str, spans: &[WikiLinkSpan]) -> String {
    let replacements = spans.iter().filter_map(|span| match &span.parsed {
        Ok(link) => Some((span.range.clone(), link.to_markdown_link())),
        Err(_) => None,
    });
    splice(doc, replacements)
}
