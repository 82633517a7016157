//! Block reference (`^id`) rewriting.

use std::sync::LazyLock;

use regex::Regex;

use super::code::{code_regions, in_regions};
use super::{escape_html, splice};

static BLOCK_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m) \^(\S+?)\r?$").unwrap());

/// Converts trailing ` ^id` markers into empty anchor spans.
///
/// The marker must end its line. The id is every non-whitespace character
/// after the caret, so other notes can link to it with `[[Note#^id]]`.
///
/// ```
/// use vaultsite::syntax::rewrite_block_refs;
///
/// assert_eq!(
///     rewrite_block_refs("An important line ^key-point\nNext"),
///     "An important line<span id=\"key-point\"></span>\nNext"
/// );
/// ```
pub fn rewrite_block_refs(doc: &str) -> String {
    let code = code_regions(doc);

    let replacements = BLOCK_REF_RE.captures_iter(doc).filter_map(|caps| {
        let whole = caps.get(0)?;
        let id = caps.get(1)?;
        if in_regions(&code, whole.start()) {
            return None;
        }
        // Keep a CRLF line ending intact.
        let end = if whole.as_str().ends_with('\r') {
            whole.end() - 1
        } else {
            whole.end()
        };
        Some((whole.start()..end, anchor_span(id.as_str())))
    });

    splice(doc, replacements)
}

/// Returns the empty anchor span for a block id.
pub fn anchor_span(id: &str) -> String {
    format!("<span id=\"{}\"></span>", escape_html(id))
}
