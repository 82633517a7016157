//! Markdown to HTML conversion behind a pluggable renderer.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use clap::ValueEnum;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, html};
use serde::Deserialize;
use thiserror::Error;

use crate::infra::slugify;

/// Renderer features a note page relies on.
///
/// A backend honors each flag as far as it can; flags it cannot switch off
/// (CommonMark always recognizes fenced code, for instance) are approximated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFeatures {
    /// Render single newlines as `<br />`.
    pub break_on_newline: bool,
    /// Fenced code blocks with a language hint class.
    pub fenced_code_blocks: bool,
    /// Give every heading an `id` slug so `Note#Heading` links resolve.
    pub header_ids: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// GFM pipe tables.
    pub tables: bool,
    /// Lists may start directly below a paragraph line.
    pub cuddled_lists: bool,
    /// Markdown is parsed inside raw HTML blocks.
    pub markdown_in_html: bool,
    /// `_` never produces emphasis (safe for snake_case and TeX).
    ///
    /// Only the pulldown backend honours this fully. Pandoc gets
    /// `intraword_underscores`, which still renders `_emphasis_`.
    pub code_friendly: bool,
    /// `[^1]` footnotes.
    pub footnotes: bool,
}

impl Default for RenderFeatures {
    fn default() -> Self {
        Self {
            break_on_newline: true,
            fenced_code_blocks: true,
            header_ids: true,
            strikethrough: true,
            tables: true,
            cuddled_lists: true,
            markdown_in_html: true,
            code_friendly: true,
            footnotes: true,
        }
    }
}

/// Errors from a renderer backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to run renderer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("renderer '{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("renderer '{program}' produced output that is not UTF-8")]
    InvalidOutput { program: String },
}

/// A Markdown-to-HTML backend.
pub trait MarkdownRenderer {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Converts a Markdown document to an HTML fragment.
    fn render(&self, markdown: &str, features: &RenderFeatures) -> Result<String, RenderError>;
}

/// Available renderer backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Built-in CommonMark renderer (pulldown-cmark)
    #[default]
    Pulldown,
    /// External `pandoc` executable
    Pandoc,
}

impl RendererKind {
    /// Creates the renderer for this backend.
    pub fn build(self) -> Box<dyn MarkdownRenderer> {
        match self {
            RendererKind::Pulldown => Box::new(PulldownRenderer),
            RendererKind::Pandoc => Box::new(PandocRenderer::new()),
        }
    }
}

/// In-process renderer built on pulldown-cmark.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl MarkdownRenderer for PulldownRenderer {
    fn name(&self) -> &str {
        "pulldown"
    }

    fn render(&self, markdown: &str, features: &RenderFeatures) -> Result<String, RenderError> {
        Ok(render_pulldown(markdown, features))
    }
}

/// Converts markdown text to HTML with every feature enabled.
///
/// # Example
///
/// ```
/// use vaultsite::export::markdown_to_html;
///
/// let html = markdown_to_html("# Hello\n\nWorld");
/// assert!(html.contains(r#"<h1 id="hello">Hello</h1>"#));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    render_pulldown(markdown, &RenderFeatures::default())
}

fn render_pulldown(markdown: &str, features: &RenderFeatures) -> String {
    let mut options = Options::empty();
    if features.tables {
        options.insert(Options::ENABLE_TABLES);
    }
    if features.footnotes {
        options.insert(Options::ENABLE_FOOTNOTES);
    }
    if features.strikethrough {
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }
    options.insert(Options::ENABLE_TASKLISTS);

    let mut events: Vec<Event> = Vec::new();
    // One entry per open emphasis/strong: true when it was written with `_`.
    let mut underscore_stack: Vec<bool> = Vec::new();
    // Heading being buffered so its text can become the id.
    let mut heading: Option<(HeadingLevel, Vec<Event>)> = None;
    let mut used_ids: HashMap<String, usize> = HashMap::new();

    for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
        let event = match event {
            Event::SoftBreak if features.break_on_newline => Event::HardBreak,
            Event::Start(tag @ (Tag::Emphasis | Tag::Strong)) if features.code_friendly => {
                let underscored = markdown[range.start..].starts_with('_');
                underscore_stack.push(underscored);
                if underscored {
                    Event::Text(delimiter(&tag).into())
                } else {
                    Event::Start(tag)
                }
            }
            Event::End(tag @ (Tag::Emphasis | Tag::Strong)) if features.code_friendly => {
                if underscore_stack.pop().unwrap_or(false) {
                    Event::Text(delimiter(&tag).into())
                } else {
                    Event::End(tag)
                }
            }
            Event::Start(Tag::Heading(level, None, _)) if features.header_ids => {
                heading = Some((level, Vec::new()));
                continue;
            }
            Event::End(Tag::Heading(..)) if heading.is_some() => {
                if let Some((level, inner)) = heading.take() {
                    let id = unique_id(&mut used_ids, &slugify(&heading_text(&inner)));
                    let tag = heading_tag(level);
                    events.push(Event::Html(format!("<{} id=\"{}\">", tag, id).into()));
                    events.extend(inner);
                    events.push(Event::Html(format!("</{}>\n", tag).into()));
                }
                continue;
            }
            other => other,
        };

        match heading.as_mut() {
            Some((_, inner)) => inner.push(event),
            None => events.push(event),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn delimiter(tag: &Tag) -> &'static str {
    match tag {
        Tag::Strong => "__",
        _ => "_",
    }
}

fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

fn unique_id(used: &mut HashMap<String, usize>, base: &str) -> String {
    let count = used.entry(base.to_string()).or_insert(0);
    let id = if *count == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    id
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

/// Renderer that pipes the document through an external `pandoc`.
#[derive(Debug, Clone)]
pub struct PandocRenderer {
    program: PathBuf,
}

impl PandocRenderer {
    /// Uses `pandoc` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("pandoc")
    }

    /// Uses a specific pandoc executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the pandoc `--from` format for a feature set.
    pub fn input_format(features: &RenderFeatures) -> String {
        let extensions = [
            ("hard_line_breaks", features.break_on_newline),
            ("backtick_code_blocks", features.fenced_code_blocks),
            ("fenced_code_attributes", features.fenced_code_blocks),
            ("auto_identifiers", features.header_ids),
            ("strikeout", features.strikethrough),
            ("pipe_tables", features.tables),
            ("lists_without_preceding_blankline", features.cuddled_lists),
            ("markdown_in_html_blocks", features.markdown_in_html),
            // Closest pandoc has; standalone `_x_` is still emphasis.
            ("intraword_underscores", features.code_friendly),
            ("footnotes", features.footnotes),
        ];

        let mut format = String::from("markdown");
        for (name, enabled) in extensions {
            format.push(if enabled { '+' } else { '-' });
            format.push_str(name);
        }
        format
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Default for PandocRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for PandocRenderer {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn render(&self, markdown: &str, features: &RenderFeatures) -> Result<String, RenderError> {
        let spawn_error = |source| RenderError::Spawn {
            program: self.program_name(),
            source,
        };

        let mut child = Command::new(&self.program)
            .arg("--from")
            .arg(Self::input_format(features))
            .arg("--to")
            .arg("html")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // stdin is dropped at the end of this block so pandoc sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(markdown.as_bytes()),
            None => Ok(()),
        };

        // Reap the child even if the write failed.
        let output = child.wait_with_output().map_err(spawn_error)?;
        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.program_name(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(spawn_error)?;

        String::from_utf8(output.stdout).map_err(|_| RenderError::InvalidOutput {
            program: self.program_name(),
        })
    }
}
