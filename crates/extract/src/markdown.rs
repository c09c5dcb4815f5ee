//! HTML to Markdown conversion.
//!
//! Conversion is a fixed sequence of whole-fragment rewrite passes, each one
//! parsing the output of the previous pass, replacing every element of one
//! tag class with its flattened Markdown rendering, and re-serializing the
//! rest of the fragment untouched. The pass order below is a contract, not
//! an artifact: running headings before bold, for example, would flatten
//! `<h2><strong>x</strong></h2>` to `## x` instead of `## **x**`, because
//! replacing an element always collapses its subtree to plain text.
//!
//! Anything not covered by a pass (images, tables, spans, ...) is dropped at
//! the final text-extraction step, keeping only its descendant text.
//! Malformed input gets html5ever's best-effort recovery; this function does
//! not fail.

use std::fmt::Write;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

/// The rewrite passes, in required order.
const PASSES: [Pass; 8] = [
    Pass::Bold,
    Pass::Italic,
    Pass::Link,
    Pass::Blockquote,
    Pass::LineBreak,
    Pass::UnorderedList,
    Pass::OrderedList,
    Pass::Heading,
];

/// Elements that may not have children or an end tag. Serializing these with
/// an end tag would corrupt later passes (html5ever reads `</br>` as a
/// second `<br>`).
const VOID_ELEMENTS: [&str; 14] =
    ["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr"];

/// Converts an HTML fragment into Markdown-flavored plain text.
///
/// Nested markup inside a replaced element is flattened to its text content;
/// this is accepted lossy behavior, one rewrite per tag class.
///
/// # Examples
///
/// ```rust
/// use ljarc_extract::convert;
/// assert_eq!(convert("<h2>Title</h2>"), "## Title");
/// assert_eq!(convert("read <a href=\"u\"><em>this</em></a>"), "read [*this*](u)");
/// ```
pub fn convert(html: &str) -> String {
    let mut html = html.to_string();
    for pass in PASSES {
        html = rewrite(&html, pass);
    }
    // Whatever tags remain are stripped here, keeping descendant text.
    Html::parse_fragment(&html).root_element().text().collect()
}

/// One whole-fragment rewrite: replaces every element matched by `pass`,
/// re-serializes everything else.
fn rewrite(html: &str, pass: Pass) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    for child in fragment.root_element().children() {
        serialize(child, pass, &mut out);
    }
    out
}

fn serialize(node: NodeRef<'_, Node>, pass: Pass, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_escaped(&text.text, out),
        Node::Element(element) => {
            let Some(element_ref) = ElementRef::wrap(node) else {
                return;
            };
            if pass.matches(element_ref) {
                pass.replace(element_ref, out);
                return;
            }
            let name = element.name();
            out.push('<');
            out.push_str(name);
            for (attr, value) in element.attrs() {
                let _ = write!(out, " {attr}=\"{}\"", escape_attr(value));
            }
            out.push('>');
            if !VOID_ELEMENTS.contains(&name) {
                for child in node.children() {
                    serialize(child, pass, out);
                }
                let _ = write!(out, "</{name}>");
            }
        },
        // Comments, doctypes and processing instructions do not survive.
        _ => {},
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Bold,
    Italic,
    Link,
    Blockquote,
    LineBreak,
    UnorderedList,
    OrderedList,
    Heading,
}

impl Pass {
    fn matches(self, element: ElementRef<'_>) -> bool {
        let name = element.value().name();
        match self {
            Self::Bold => matches!(name, "strong" | "b"),
            Self::Italic => matches!(name, "em" | "i"),
            // Anchors without a target are left alone and stripped at the end.
            Self::Link => name == "a" && element.value().attr("href").is_some(),
            Self::Blockquote => name == "blockquote",
            Self::LineBreak => name == "br",
            Self::UnorderedList => name == "ul",
            Self::OrderedList => name == "ol",
            Self::Heading => matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6"),
        }
    }

    /// Emits the Markdown rendering of a matched element.
    fn replace(self, element: ElementRef<'_>, out: &mut String) {
        match self {
            Self::UnorderedList => replace_list(element, false, out),
            Self::OrderedList => replace_list(element, true, out),
            Self::Bold => push_escaped(&format!("**{}**", flatten(element)), out),
            Self::Italic => push_escaped(&format!("*{}*", flatten(element)), out),
            Self::Link => {
                let href = element.value().attr("href").unwrap_or_default();
                push_escaped(&format!("[{}]({href})", flatten(element)), out);
            },
            Self::Blockquote => push_escaped(&format!("> {}", flatten(element)), out),
            Self::LineBreak => out.push('\n'),
            Self::Heading => {
                // Level is the digit in the tag name; matches() only lets
                // h1 through h6 reach this point.
                let level = usize::from(element.value().name().as_bytes()[1] - b'0');
                push_escaped(&format!("{} {}", "#".repeat(level), flatten(element)), out);
            },
        }
    }
}

/// Rewrites a list container: direct-child items become one line each, and
/// the container is unwrapped, so any remaining children stay live for
/// later passes.
fn replace_list(element: ElementRef<'_>, ordered: bool, out: &mut String) {
    let items: Vec<String> = element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .enumerate()
        .map(|(index, item)| {
            if ordered {
                format!("{}. {}", index + 1, flatten(item))
            } else {
                format!("- {}", flatten(item))
            }
        })
        .collect();
    push_escaped(&items.join("\n"), out);
    for child in element.children() {
        let is_item = ElementRef::wrap(child).is_some_and(|el| el.value().name() == "li");
        if !is_item {
            serialize(child, if ordered { Pass::OrderedList } else { Pass::UnorderedList }, out);
        }
    }
}

/// Concatenated text content of a subtree, structure discarded.
fn flatten(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Escapes replacement and retained text so the next parse round-trips it.
fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}
