//! Inline `#tag` rewriting.

use std::sync::LazyLock;

use regex::Regex;

use super::code::{code_regions, in_regions};
use super::{escape_html, splice};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[ \t])#([\p{L}_]+)").unwrap());

/// Converts inline tags into styled spans.
///
/// A tag is `#` followed by Unicode letters or underscores, preceded by a
/// space or tab or standing at the start of a line. The preceding whitespace
/// is consumed along with the `#`. Tags inside code are left alone.
///
/// ```
/// use vaultsite::syntax::rewrite_tags;
///
/// assert_eq!(
///     rewrite_tags("Filed under #reading today"),
///     r#"Filed under<span class="tag">reading</span> today"#
/// );
/// ```
pub fn rewrite_tags(doc: &str) -> String {
    let code = code_regions(doc);

    let replacements = TAG_RE.captures_iter(doc).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.get(2)?;
        // `name` starts right after the `#`.
        if in_regions(&code, name.start() - 1) {
            return None;
        }
        Some((whole.range(), tag_span(name.as_str())))
    });

    splice(doc, replacements)
}

/// Returns the HTML span for a tag name.
pub fn tag_span(name: &str) -> String {
    format!("<span class=\"tag\">{}</span>", escape_html(name))
}
