//! HTML to markdown conversion for scraped catalogue entries
//!
//! Covers what the catalogue actually uses: headings, paragraphs, nested
//! lists, links, emphasis and line breaks. Everything else is reduced to its
//! text.

use scraper::{ElementRef, Node};

/// Tags whose entire subtree is ignored
const SKIP_TAGS: [&str; 5] = ["script", "style", "noscript", "svg", "template"];

/// Containers that only group blocks
const CONTAINER_TAGS: [&str; 8] = [
    "div", "section", "article", "main", "header", "footer", "aside", "blockquote",
];

/// Convert the children of `element` to markdown blocks separated by blank lines
pub fn element_to_markdown(element: ElementRef<'_>) -> String {
    let mut blocks = Vec::new();
    collect_blocks(element, &mut blocks);
    blocks.join("\n\n")
}

/// Plain text of an element with collapsed whitespace
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
        .trim()
        .to_string()
}

fn collect_blocks(parent: ElementRef<'_>, blocks: &mut Vec<String>) {
    let mut pending = String::new();

    for child in parent.children() {
        if let Node::Text(text) = child.value() {
            pending.push_str(&collapse_whitespace(text));
            continue;
        }
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };

        let name = element.value().name();
        if SKIP_TAGS.contains(&name) {
            continue;
        }

        if let Some(level) = heading_level(name) {
            flush(&mut pending, blocks);
            let text = normalize_lines(&inline_children(element));
            if !text.is_empty() {
                blocks.push(format!("{} {}", "#".repeat(level), text));
            }
        } else if name == "p" {
            flush(&mut pending, blocks);
            pending.push_str(&inline_children(element));
            flush(&mut pending, blocks);
        } else if name == "ul" || name == "ol" {
            flush(&mut pending, blocks);
            let list = render_list(element, 0);
            if !list.is_empty() {
                blocks.push(list);
            }
        } else if CONTAINER_TAGS.contains(&name) {
            flush(&mut pending, blocks);
            collect_blocks(element, blocks);
        } else {
            pending.push_str(&inline_element(element));
        }
    }

    flush(&mut pending, blocks);
}

fn flush(pending: &mut String, blocks: &mut Vec<String>) {
    let text = normalize_lines(pending);
    if !text.is_empty() {
        blocks.push(text);
    }
    pending.clear();
}

fn render_list(list: ElementRef<'_>, depth: usize) -> String {
    let ordered = list.value().name() == "ol";
    let indent = "    ".repeat(depth);
    let mut lines = Vec::new();

    let items = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|item| item.value().name() == "li");

    for (index, item) in items.enumerate() {
        let marker = if ordered {
            format!("{}.", index + 1)
        } else {
            "-".to_string()
        };

        let mut text = String::new();
        let mut nested = Vec::new();
        for child in item.children() {
            match ElementRef::wrap(child) {
                Some(element) if matches!(element.value().name(), "ul" | "ol") => {
                    nested.push(render_list(element, depth + 1));
                }
                Some(element) => text.push_str(&inline_element(element)),
                None => {
                    if let Node::Text(fragment) = child.value() {
                        text.push_str(&collapse_whitespace(fragment));
                    }
                }
            }
        }

        lines.push(format!("{}{} {}", indent, marker, normalize_lines(&text)));
        lines.extend(nested.into_iter().filter(|list| !list.is_empty()));
    }

    lines.join("\n")
}

fn inline_children(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            out.push_str(&inline_element(child_element));
        } else if let Node::Text(text) = child.value() {
            out.push_str(&collapse_whitespace(text));
        }
    }
    out
}

fn inline_element(element: ElementRef<'_>) -> String {
    let name = element.value().name();
    if SKIP_TAGS.contains(&name) {
        return String::new();
    }

    match name {
        "br" => "\n".to_string(),
        "strong" | "b" => emphasize(&inline_children(element), "**"),
        "em" | "i" => emphasize(&inline_children(element), "_"),
        "code" => emphasize(&inline_children(element), "`"),
        "a" => {
            let text = inline_children(element);
            match element.value().attr("href") {
                Some(href) if !text.trim().is_empty() => {
                    surround(&text, &format!("[{}]({})", text.trim(), href.trim()))
                }
                _ => text,
            }
        }
        "p" | "li" | "div" => format!(" {} ", inline_children(element)),
        _ if heading_level(name).is_some() => format!(" {} ", inline_children(element)),
        _ => inline_children(element),
    }
}

fn emphasize(text: &str, marker: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return text.to_string();
    }
    surround(text, &format!("{marker}{trimmed}{marker}"))
}

/// Keep the outer spacing of `original` around `replacement`
fn surround(original: &str, replacement: &str) -> String {
    let leading = if original.starts_with(' ') { " " } else { "" };
    let trailing = if original.ends_with(' ') { " " } else { "" };
    format!("{leading}{replacement}{trailing}")
}

fn heading_level(name: &str) -> Option<usize> {
    name.strip_prefix('h')
        .and_then(|level| level.parse::<usize>().ok())
        .filter(|level| (1..=6).contains(level))
}

/// Collapse whitespace runs into single spaces
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
            }
            prev_was_whitespace = true;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Trim each `<br>` separated line and join them with markdown hard breaks
fn normalize_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| collapse_whitespace(line).trim().to_string())
        .collect::<Vec<_>>()
        .join("  \n")
        .trim()
        .to_string()
}
