//! Markup dispatch: which renderer, if any, turns a file into HTML.
//!
//! The extension table here decides whether a blob becomes a renderable
//! `Document` or is served as an opaque download. Matching is an exact,
//! case sensitive comparison of everything from the last dot onwards.

use std::fmt;
use std::sync::LazyLock;

use comrak::Options;
use maud::html;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Opening tag comrak emits for a fenced block with a language.
const CODE_OPEN: &str = "<code class=\"language-";
const CODE_CLOSE: &str = "</code>";

/// A pure function from document text to HTML.
pub type RenderFn = fn(&str) -> String;

#[derive(Clone, Copy)]
pub struct Renderer {
    name: &'static str,
    render: RenderFn,
}

impl Renderer {
    pub const fn new(name: &'static str, render: RenderFn) -> Self {
        Self { name, render }
    }

    pub const fn markdown() -> Self {
        Self::new("markdown", render_markdown)
    }

    pub const fn text() -> Self {
        Self::new("text", render_text)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn render(&self, text: &str) -> String {
        (self.render)(text)
    }
}

impl PartialEq for Renderer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Renderer {}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Renderer").field(&self.name).finish()
    }
}

/// Extension to renderer table.
#[derive(Debug, Clone)]
pub struct MarkupRegistry {
    table: Vec<(String, Renderer)>,
}

impl Default for MarkupRegistry {
    fn default() -> Self {
        Self {
            table: vec![
                (".md".to_string(), Renderer::markdown()),
                (".txt".to_string(), Renderer::text()),
            ],
        }
    }
}

impl MarkupRegistry {
    /// Default table plus extra extensions rendered as Markdown.
    pub fn with_markdown_extensions<S: AsRef<str>>(extensions: &[S]) -> Self {
        let mut registry = Self::default();
        for extension in extensions {
            registry.register(extension.as_ref(), Renderer::markdown());
        }
        registry
    }

    /// Adds or replaces the renderer for `extension` (including the dot).
    pub fn register(&mut self, extension: &str, renderer: Renderer) {
        match self.table.iter_mut().find(|(ext, _)| ext == extension) {
            Some(slot) => slot.1 = renderer,
            None => self.table.push((extension.to_string(), renderer)),
        }
    }

    pub fn renderer_for(&self, filename: &str) -> Option<Renderer> {
        let extension = &filename[filename.rfind('.')?..];
        self.table
            .iter()
            .find(|(ext, _)| ext == extension)
            .map(|(_, renderer)| *renderer)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|(ext, _)| ext.as_str())
    }
}

/// GitHub flavoured Markdown, with fenced code blocks highlighted.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    let html = comrak::markdown_to_html(text, &options);
    highlight_code_blocks(&html)
}

/// Replaces the body of every `language-*` code block with `hljs-` classed
/// spans. Blocks without a language are left alone.
fn highlight_code_blocks(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find(CODE_OPEN) {
        let tail = &rest[start + CODE_OPEN.len()..];
        let Some((language, tail)) = tail.split_once("\">") else {
            break;
        };
        let Some((code, tail)) = tail.split_once(CODE_CLOSE) else {
            break;
        };

        result.push_str(&rest[..start]);
        result.push_str(CODE_OPEN);
        result.push_str(language);
        result.push_str("\">");
        result.push_str(&highlight_code(code, language));
        result.push_str(CODE_CLOSE);
        rest = tail;
    }

    result.push_str(rest);
    result
}

/// `escaped` is code as comrak wrote it; it is returned unchanged when the
/// language is unknown or highlighting fails.
fn highlight_code(escaped: &str, language: &str) -> String {
    let Some(syntax) = SYNTAX_SET.find_syntax_by_token(language) else {
        return escaped.to_string();
    };

    let code = unescape_html(escaped);
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        &SYNTAX_SET,
        ClassStyle::SpacedPrefixed { prefix: "hljs-" },
    );
    for line in LinesWithEndings::from(&code) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::warn!(language, error = %err, "syntax highlighting failed");
            return escaped.to_string();
        }
    }
    generator.finalize()
}

fn unescape_html(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Escapes each line and joins them with `<br>`.
pub fn render_text(text: &str) -> String {
    html! {
        @for (i, line) in text.lines().enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
    .into_string()
}
