//! Rewriting of Obsidian-flavored inline syntax into portable Markdown/HTML.
//!
//! Every pass finds byte spans first and then substitutes them in a single
//! left-to-right sweep, so replaced text is never scanned again by the same
//! pass. Passes run in a fixed order: wiki-links, tags, block references.

mod block_ref;
pub mod code;
mod tag;
mod wikilink;

use std::ops::Range;

pub use block_ref::{anchor_span, rewrite_block_refs};
pub use tag::{rewrite_tags, tag_span};
pub use wikilink::{WikiLinkSpan, rewrite_wiki_links, scan_wiki_links};

pub(crate) use wikilink::replace_wiki_links;

/// Runs the full rewrite pipeline over a document.
///
/// The pipeline is idempotent: rewriting its own output changes nothing.
///
/// ```
/// use vaultsite::syntax::rewrite;
///
/// let out = rewrite("See [[Other Note]] for more. #important text ^ref1");
/// assert!(out.contains("[Other Note](other-note.html)"));
/// assert!(out.contains(r#"<span class="tag">important</span>"#));
/// assert!(out.contains(r#"<span id="ref1"></span>"#));
/// ```
pub fn rewrite(doc: &str) -> String {
    rewrite_scanned(doc, &scan_wiki_links(doc))
}

/// Runs the pipeline using wiki-link spans already scanned from `doc`.
pub fn rewrite_scanned(doc: &str, spans: &[WikiLinkSpan]) -> String {
    let linked = replace_wiki_links(doc, spans);
    let tagged = rewrite_tags(&linked);
    rewrite_block_refs(&tagged)
}

/// Applies sorted, non-overlapping replacements to `doc`.
fn splice<I>(doc: &str, replacements: I) -> String
where
    I: IntoIterator<Item = (Range<usize>, String)>,
{
    let mut out = String::with_capacity(doc.len());
    let mut cursor = 0;

    for (range, replacement) in replacements {
        debug_assert!(range.start >= cursor, "replacements must not overlap");
        out.push_str(&doc[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }

    out.push_str(&doc[cursor..]);
    out
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
