//! Turning notes into HTML: renderer backends, page templates, themes and
//! whole-site generation.

mod html;
pub mod site;
pub mod template;
mod theme;

pub use html::{
    MarkdownRenderer, PandocRenderer, PulldownRenderer, RenderError, RenderFeatures, RendererKind,
    markdown_to_html,
};
pub use site::{FailedNote, SiteConfig, SiteResult, generate_site};
pub use template::{
    DEFAULT_INDEX_TEMPLATE, DEFAULT_NOTE_TEMPLATE, PageLink, render_index_page, render_note_page,
};
pub use theme::{THEME_DARK, THEME_DEFAULT, get_theme_css};
