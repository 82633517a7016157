//! Page templates wrapping rendered notes.

use anyhow::Result;
use chrono::{DateTime, Local};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::domain::Note;

/// Template for a single note page.
///
/// `content` is the rendered `<div id="content">` fragment and is inserted
/// unescaped; everything else is escaped.
pub const DEFAULT_NOTE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title }} - {{ site_title }}</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <article>
        <header>
            <nav class="breadcrumb"><a href="index.html">{{ site_title }}</a></nav>
            <h1>{{ title }}</h1>
        </header>
        <main>
            {{ content|safe }}
        </main>
        {% if backlinks %}
        <section class="backlinks" aria-label="Backlinks">
            <h2>Linked from</h2>
            <ul>
            {% for link in backlinks %}
                <li><a href="{{ link.href }}">{{ link.title }}</a></li>
            {% endfor %}
            </ul>
        </section>
        {% endif %}
    </article>
    <footer>
        <a href="index.html">&larr; Back to index</a>
    </footer>
</body>
</html>
"##;

/// Template for the site index page.
pub const DEFAULT_INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ site_title }}</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <header>
        <h1>{{ site_title }}</h1>
        <p class="note-count">{{ notes | length }} note{% if notes | length != 1 %}s{% endif %}</p>
    </header>
    <main>
        <section class="notes-list" aria-label="All notes">
            <ul>
            {% for note in notes %}
                <li><a href="{{ note.href }}">{{ note.title }}</a></li>
            {% endfor %}
            </ul>
        </section>
    </main>
    <footer>
        <p>Generated <time datetime="{{ generated_iso }}">{{ generated }}</time></p>
    </footer>
</body>
</html>
"##;

/// A link to a generated page, as handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub title: String,
    pub href: String,
}

impl PageLink {
    /// Points at the page generated for `note`.
    pub fn to_note(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            href: note.html_filename(),
        }
    }
}

// The `.html` names turn on minijinja's HTML auto-escaping.
fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("note.html", DEFAULT_NOTE_TEMPLATE)?;
    env.add_template("index.html", DEFAULT_INDEX_TEMPLATE)?;
    Ok(env)
}

/// Renders a full page for a note around its HTML fragment.
pub fn render_note_page(
    note: &Note,
    content: &str,
    backlinks: &[PageLink],
    site_title: &str,
) -> Result<String> {
    let env = environment()?;
    let html = env.get_template("note.html")?.render(context! {
        site_title => site_title,
        title => note.title(),
        content => content,
        backlinks => backlinks,
    })?;
    Ok(html)
}

/// Renders the index page listing `notes` in the given order.
pub fn render_index_page(
    notes: &[PageLink],
    site_title: &str,
    generated: DateTime<Local>,
) -> Result<String> {
    let env = environment()?;
    let html = env.get_template("index.html")?.render(context! {
        site_title => site_title,
        notes => notes,
        generated => generated.format("%Y-%m-%d %H:%M").to_string(),
        generated_iso => generated.to_rfc3339(),
    })?;
    Ok(html)
}
