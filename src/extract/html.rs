use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Node, Selector};

/// Compiles a CSS selector, reporting the offending text on failure
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Elements that start and end a rendered line
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "option", "p", "pre", "section", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Flattens the page body into its rendered text lines.
///
/// Block elements, table cells and `<br>` break lines; inline text within a
/// block is joined and whitespace-collapsed. Script and style contents are
/// skipped.
pub fn text_lines(doc: &Html) -> Vec<String> {
    let root = match body(doc) {
        Some(body) => body,
        None => doc.root_element(),
    };

    let mut lines = Vec::new();
    let mut current = String::new();
    collect_lines(root, &mut current, &mut lines);
    flush_line(&mut current, &mut lines);
    lines
}

fn collect_lines(element: ElementRef<'_>, current: &mut String, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if matches!(name, "script" | "style" | "noscript" | "template") {
                continue;
            }
            if name == "br" {
                flush_line(current, lines);
                continue;
            }

            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                flush_line(current, lines);
            }
            collect_lines(child_element, current, lines);
            if block {
                flush_line(current, lines);
            }
        } else if let Node::Text(text) = child.value() {
            current.push_str(text);
        }
    }
}

fn flush_line(current: &mut String, lines: &mut Vec<String>) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}

/// Text of the first `h1`..`h4` heading in document order
pub fn first_heading(doc: &Html) -> Option<String> {
    let headings = Selector::parse("h1, h2, h3, h4").unwrap();
    doc.select(&headings).next().map(element_text)
}

/// Whitespace-normalized text content of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn body(doc: &Html) -> Option<ElementRef<'_>> {
    let body = Selector::parse("body").unwrap();
    doc.select(&body).next()
}
