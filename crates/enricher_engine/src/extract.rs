use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use scraper::{Html, Selector};

use enricher_core::ExtractionResult;

/// Elements whose text never reaches the rendered page.
const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template", "svg"];

/// Elements that start a new line of rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// The extraction agent: turns the active page's markup into `{content, html}`.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractionResult;
}

/// Captures the rendered body text and the full serialized document.
///
/// - `content`: visible text of `<body>`, one line per block element,
///   whitespace collapsed; hidden and script-like elements are skipped
/// - `html`: the document element's outer markup
///
/// Either field is absent when empty. Reading never mutates the document.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor;

impl Extractor for DocumentExtractor {
    fn extract(&self, html: &str) -> ExtractionResult {
        if html.trim().is_empty() {
            return ExtractionResult::default();
        }

        let doc = Html::parse_document(html);
        let mut text = RenderedText::default();
        match Selector::parse("body")
            .ok()
            .and_then(|sel| doc.select(&sel).next())
        {
            Some(body) => collect_text(*body, &mut text),
            None => collect_text(*doc.root_element(), &mut text),
        }

        ExtractionResult::from_parts(text.finish(), doc.root_element().html())
    }
}

/// Walks the subtree iteratively so nesting depth never touches the call stack.
fn collect_text(root: NodeRef<'_, Node>, out: &mut RenderedText) {
    let mut skipping: Option<NodeId> = None;
    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => {
                if skipping.is_some() {
                    continue;
                }
                match node.value() {
                    Node::Text(text) => out.push_words(text),
                    Node::Element(element) => {
                        let name = element.name();
                        if SKIPPED_ELEMENTS.contains(&name) || element.attr("hidden").is_some() {
                            skipping = Some(node.id());
                        } else if BLOCK_ELEMENTS.contains(&name) {
                            out.break_line();
                        }
                    }
                    _ => {}
                }
            }
            Edge::Close(node) => {
                if skipping == Some(node.id()) {
                    skipping = None;
                } else if skipping.is_none() && is_block(node) {
                    out.break_line();
                }
            }
        }
    }
}

fn is_block(node: NodeRef<'_, Node>) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| BLOCK_ELEMENTS.contains(&element.name()))
}

#[derive(Default)]
struct RenderedText {
    lines: Vec<String>,
    current: String,
}

impl RenderedText {
    fn push_words(&mut self, text: &str) {
        for word in text.split_whitespace() {
            if !self.current.is_empty() {
                self.current.push(' ');
            }
            self.current.push_str(word);
        }
    }

    fn break_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}
