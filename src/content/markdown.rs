//! Markdown rendering with syntax highlighting

use super::blocks::{self, Block, ListKind};
use super::highlight::{Highlighter, NoHighlighter, SyntectHighlighter};
use super::inline::render_inline;
use crate::config::{MarkdownConfig, MarkdownEngine, StyleClasses};
use crate::helpers::{html_escape, open_tag, safe_url};
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd,
};

/// Markdown renderer with syntax highlighting and style hooks
pub struct MarkdownRenderer {
    highlighter: Box<dyn Highlighter>,
    classes: StyleClasses,
    default_language: String,
    engine: MarkdownEngine,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with the default configuration
    pub fn new() -> Self {
        Self::from_config(&MarkdownConfig::default())
    }

    /// Create from the `markdown` section of the site config
    pub fn from_config(config: &MarkdownConfig) -> Self {
        let highlighter: Box<dyn Highlighter> = if config.highlight.enable {
            Box::new(SyntectHighlighter::new(&config.highlight.theme))
        } else {
            Box::new(NoHighlighter)
        };

        Self {
            highlighter,
            classes: config.classes.clone(),
            default_language: config.default_language.clone(),
            engine: config.engine,
        }
    }

    /// Replace the syntax highlighter
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        match self.engine {
            MarkdownEngine::Builtin => self.render_builtin(markdown),
            MarkdownEngine::Commonmark => self.render_commonmark(markdown),
        }
    }

    fn render_builtin(&self, markdown: &str) -> String {
        blocks::parse(markdown)
            .iter()
            .map(|block| self.render_block(block))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_block(&self, block: &Block<'_>) -> String {
        let classes = &self.classes;
        match block {
            Block::Heading { level, text } => {
                let tag = format!("h{}", level);
                format!(
                    "{}{}</{}>",
                    open_tag(&tag, classes.heading(*level)),
                    render_inline(text, classes),
                    tag
                )
            }
            Block::Code { lang, code } => {
                self.code_block(code, lang.unwrap_or(&self.default_language))
            }
            Block::Table { header, rows } => self.table(header, rows),
            Block::List { kind, items } => {
                let (tag, mut out) = match kind {
                    ListKind::Bullet => ("ul", open_tag("ul", &classes.bullet_list)),
                    ListKind::Ordered(start) => ("ol", ordered_list_tag(*start, classes)),
                };
                for item in items {
                    out.push_str("<li>");
                    out.push_str(&render_inline(item, classes));
                    out.push_str("</li>");
                }
                out.push_str(&format!("</{}>", tag));
                out
            }
            Block::Quote(text) => format!(
                "{}{}</blockquote>",
                open_tag("blockquote", &classes.blockquote),
                render_inline(text, classes)
            ),
            Block::Rule => open_tag("hr", &classes.rule),
            Block::Paragraph(text) => format!(
                "{}{}</p>",
                open_tag("p", &classes.paragraph),
                render_inline(text, classes)
            ),
        }
    }

    fn table(&self, header: &[&str], rows: &[Vec<&str>]) -> String {
        let classes = &self.classes;
        let mut out = open_tag("div", &classes.table_wrapper);
        out.push_str(&open_tag("table", &classes.table));

        out.push_str("<thead><tr>");
        for cell in header {
            out.push_str(&open_tag("th", &classes.table_header));
            out.push_str(&render_inline(cell, classes));
            out.push_str("</th>");
        }
        out.push_str("</tr></thead><tbody>");

        for row in rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str(&open_tag("td", &classes.table_cell));
                out.push_str(&render_inline(cell, classes));
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }

        out.push_str("</tbody></table></div>");
        out
    }

    /// Highlight a code block, falling back to an escaped plain block
    fn code_block(&self, code: &str, lang: &str) -> String {
        let code = code.trim();
        match self.highlighter.highlight(code, lang) {
            Ok(highlighted) => format!(
                "{}{}</div>",
                open_tag("div", &self.classes.highlighted_code_block),
                highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting as {} failed, using plain block: {}", lang, e);
                format!(
                    r#"{}<pre><code class="language-{}">{}</code></pre></div>"#,
                    open_tag("div", &self.classes.code_block),
                    html_escape(lang),
                    html_escape(code)
                )
            }
        }
    }

    fn render_commonmark(&self, markdown: &str) -> String {
        // Front-matter is stripped before rendering, so no metadata blocks
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);
        let classes = &self.classes;

        let mut events: Vec<Event> = Vec::new();
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();
        let mut in_table_head = false;

        for event in parser {
            if code_block_lang.is_some() {
                match event {
                    Event::Text(text) => code_block_content.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let lang = code_block_lang.take().unwrap_or_default();
                        let html = self.code_block(&code_block_content, &lang);
                        events.push(Event::Html(CowStr::from(html + "\n")));
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string)
                            .unwrap_or_default(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    code_block_lang = Some(if lang.is_empty() {
                        self.default_language.clone()
                    } else {
                        lang
                    });
                    code_block_content.clear();
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    let level = heading_level(level);
                    let tag = format!("h{}", level);
                    events.push(Event::Html(open_tag(&tag, classes.heading(level)).into()));
                }
                Event::Start(Tag::Paragraph) if !classes.paragraph.is_empty() => {
                    events.push(Event::Html(open_tag("p", &classes.paragraph).into()));
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => {
                    let dest = if link_type == LinkType::Email {
                        format!("mailto:{}", dest_url)
                    } else {
                        dest_url.to_string()
                    };
                    let mut tag = format!(r#"<a href="{}""#, html_escape(safe_url(&dest)));
                    if !title.is_empty() {
                        tag.push_str(&format!(r#" title="{}""#, html_escape(&title)));
                    }
                    if !classes.link.is_empty() {
                        tag.push_str(&format!(r#" class="{}""#, html_escape(&classes.link)));
                    }
                    tag.push('>');
                    events.push(Event::InlineHtml(tag.into()));
                }
                Event::Start(Tag::BlockQuote(_)) => {
                    events.push(Event::Html(
                        format!("{}\n", open_tag("blockquote", &classes.blockquote)).into(),
                    ));
                }
                Event::Start(Tag::List(None)) => {
                    events.push(Event::Html(
                        format!("{}\n", open_tag("ul", &classes.bullet_list)).into(),
                    ));
                }
                Event::Start(Tag::List(Some(start))) => {
                    let tag = ordered_list_tag(start, classes);
                    events.push(Event::Html(format!("{}\n", tag).into()));
                }
                Event::Start(Tag::Table(_)) => {
                    let html = format!(
                        "{}{}\n",
                        open_tag("div", &classes.table_wrapper),
                        open_tag("table", &classes.table)
                    );
                    events.push(Event::Html(html.into()));
                }
                Event::End(TagEnd::Table) => {
                    events.push(Event::Html("</tbody></table></div>\n".into()));
                }
                Event::Start(Tag::TableHead) => {
                    in_table_head = true;
                    events.push(Event::Start(Tag::TableHead));
                }
                Event::End(TagEnd::TableHead) => {
                    in_table_head = false;
                    events.push(Event::End(TagEnd::TableHead));
                }
                Event::Start(Tag::TableCell) => {
                    let cell = if in_table_head {
                        open_tag("th", &classes.table_header)
                    } else {
                        open_tag("td", &classes.table_cell)
                    };
                    events.push(Event::Html(cell.into()));
                }
                Event::Code(code) => {
                    let html = format!(
                        "{}{}</code>",
                        open_tag("code", &classes.inline_code),
                        html_escape(&code)
                    );
                    events.push(Event::InlineHtml(html.into()));
                }
                Event::Rule => {
                    events.push(Event::Html(format!("{}\n", open_tag("hr", &classes.rule)).into()));
                }
                // Raw HTML in the source is shown, never interpreted
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `<ol>` opening tag, with `start` when the first item is not 1
fn ordered_list_tag(start: u64, classes: &StyleClasses) -> String {
    if start == 1 {
        open_tag("ol", &classes.ordered_list)
    } else {
        open_tag(&format!(r#"ol start="{}""#, start), &classes.ordered_list)
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
