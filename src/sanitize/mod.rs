//! HTML to plain text conversion for markup-bearing recipe fields.

use regex::Regex;
use scraper::{ElementRef, Node};
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Anything an HTML parser would open a tag, comment or doctype for.
static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z/!?][^>]*>?").expect("Invalid HTML tag regex"));

/// Upper bound on re-rendering escaped markup such as `&amp;lt;b&amp;gt;`.
const MAX_PASSES: usize = 4;

/// Elements that start a new block of text when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Elements whose content is never readable text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Renders an HTML fragment as plain text.
///
/// All tags are dropped and entities decoded. Markup that only appears
/// after decoding (`&lt;b&gt;`) is dropped as well. Block-level elements and
/// `<br>` separate words, and every whitespace run collapses to a single
/// space. The output is rendered again until it stops changing, so applying
/// this twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use recipe_finder::sanitize::html_to_text;
///
/// assert_eq!(html_to_text("<p>Mix <b>well</b>.</p>"), "Mix well.");
/// assert_eq!(html_to_text("<ol><li>Boil</li><li>Serve</li></ol>"), "Boil Serve");
/// ```
pub fn html_to_text(html: &str) -> String {
    let mut text = render_once(html);
    for _ in 1..MAX_PASSES {
        let next = render_once(&text);
        if next == text {
            break;
        }
        text = next;
    }
    text
}

/// One parse of `html`. Entity-escaped markup decodes to tag-shaped text,
/// which is removed here so it never reaches the output.
fn render_once(html: &str) -> String {
    let fragment = scraper::Html::parse_fragment(html);
    let mut raw = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut raw);

    let raw = HTML_TAG_REGEX.replace_all(&raw, " ");
    WHITESPACE_REGEX.replace_all(raw.trim(), " ").into_owned()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }

            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push(' ');
            }
            collect_text(child_element, out);
            if block {
                out.push(' ');
            }
        } else if let Node::Text(text) = child.value() {
            out.push_str(text);
        }
    }
}
