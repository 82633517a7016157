//! Slug generation for output filenames and link targets.

/// Converts a title to a URL-friendly slug.
///
/// - Converts to lowercase
/// - Collapses every run of non-alphanumeric characters into one hyphen
/// - Trims leading/trailing hyphens
/// - Returns "untitled" for empty results
///
/// Alphanumeric is Unicode-aware, so titles in any script keep their letters.
/// The same function names the generated `.html` files and builds wiki-link
/// hrefs; the two must never diverge.
///
/// # Examples
///
/// ```
/// use vaultsite::infra::slugify;
///
/// assert_eq!(slugify("API Design"), "api-design");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        return "untitled".to_string();
    }

    slug
}

/// Returns the output filename for a slug.
///
/// ```
/// use vaultsite::infra::html_filename;
///
/// assert_eq!(html_filename("api-design"), "api-design.html");
/// ```
pub fn html_filename(slug: &str) -> String {
    format!("{}.html", slug)
}
