// src/core/html.rs
//
// Anchor-driven lookups over an element tree. The site has no stable ids, so
// values are found by the label text next to them and by a few CSS classes.
// Everything here is written against the small `Node` trait; the `scraper`
// implementation lives at the bottom of the file.

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::config::consts::NESTED_VALUE_CLASS;
use crate::core::sanitize::{normalize_ws, strip_label_colon};
use crate::error::Result;

/// The traversal surface the extractors need from a parsed document.
/// Only element nodes are ever returned; text nodes are skipped.
pub trait Node: Copy {
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    /// Concatenated text of the element and all its descendants, unnormalized.
    fn text_content(&self) -> String;
    fn parent_element(&self) -> Option<Self>;
    fn element_children(&self) -> Vec<Self>;
    fn next_element(&self) -> Option<Self>;
    fn prev_element(&self) -> Option<Self>;
    /// All descendant elements in document order, excluding `self`.
    fn element_descendants(&self) -> Vec<Self>;

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }

    fn is_leaf(&self) -> bool {
        self.element_children().is_empty()
    }

    fn normalized_text(&self) -> String {
        normalize_ws(&self.text_content())
    }
}

/* ---------------- Predicates ---------------- */

#[derive(Clone, Copy, Debug)]
pub enum TextMatch<'p> {
    Exact(&'p str),
    Prefix(&'p str),
    Pattern(&'p Regex),
}

impl TextMatch<'_> {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            TextMatch::Exact(want) => text == *want,
            TextMatch::Prefix(p) => text.starts_with(p),
            TextMatch::Pattern(re) => re.is_match(text),
        }
    }
}

/// Tag + class + text predicate. Unset parts match anything.
/// A text predicate only ever matches leaf elements, so a container whose
/// whole text happens to equal a label is never mistaken for the label.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anchor<'p> {
    pub tag: Option<&'p str>,
    pub class: Option<&'p str>,
    pub text: Option<TextMatch<'p>>,
}

impl<'p> Anchor<'p> {
    pub fn any() -> Self { Self::default() }

    pub fn tag(tag: &'p str) -> Self {
        Self { tag: Some(tag), ..Self::default() }
    }

    pub fn with_class(mut self, class: &'p str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_text(mut self, text: TextMatch<'p>) -> Self {
        self.text = Some(text);
        self
    }

    pub fn matches<N: Node>(&self, node: N) -> bool {
        if let Some(tag) = self.tag {
            if !node.tag_name().eq_ignore_ascii_case(tag) { return false; }
        }
        if let Some(class) = self.class {
            if !node.has_class(class) { return false; }
        }
        match &self.text {
            Some(m) => node.is_leaf() && m.matches(&node.normalized_text()),
            None => true,
        }
    }
}

/* ---------------- Search ---------------- */

pub fn find_all<N: Node>(root: N, anchor: &Anchor) -> Vec<N> {
    root.element_descendants()
        .into_iter()
        .filter(|n| anchor.matches(*n))
        .collect()
}

pub fn find_first<N: Node>(root: N, anchor: &Anchor) -> Option<N> {
    root.element_descendants()
        .into_iter()
        .find(|n| anchor.matches(*n))
}

/// Every leaf element whose normalized text is exactly `label`.
pub fn find_by_label<N: Node>(root: N, label: &str) -> Vec<N> {
    find_all(root, &Anchor::any().with_text(TextMatch::Exact(label)))
}

/// Text of the element that holds a label's value: the next element sibling,
/// or the `displayName` span nested inside it when there is one.
/// `None` when there is no sibling or its text is blank.
pub fn value_after_label<N: Node>(label: N) -> Option<String> {
    let sibling = label.next_element()?;
    let holder = sibling
        .element_descendants()
        .into_iter()
        .find(|n| n.has_class(NESTED_VALUE_CLASS))
        .unwrap_or(sibling);
    let text = holder.normalized_text();
    (!text.is_empty()).then_some(text)
}

/// Inverse of `value_after_label`: the label preceding a value, without its
/// trailing colon.
pub fn label_before_value<N: Node>(value: N) -> Option<String> {
    let label = strip_label_colon(&value.prev_element()?.text_content());
    (!label.is_empty()).then_some(label)
}

/// First value found after any `label` under `root`.
pub fn labelled_value<N: Node>(root: N, label: &str) -> Option<String> {
    find_by_label(root, label).into_iter().find_map(value_after_label)
}

/* ---------------- Sections & tables ---------------- */

/// Parse only the content strictly between two literal markers.
pub fn extract_bounded_section(content: &str, start: &str, end: &str) -> Result<Html> {
    let begin = content
        .find(start)
        .ok_or_else(|| content_err!("section start marker {start:?}"))?
        + start.len();
    let stop = content[begin..]
        .find(end)
        .ok_or_else(|| content_err!("section end marker {end:?}"))?
        + begin;
    Ok(Html::parse_fragment(&content[begin..stop]))
}

/// Rows of `table` after skipping `skip` header rows, each cut to its first
/// `width` cells. A row with fewer cells fails the whole table.
pub fn extract_table_rows<N: Node>(table: N, skip: usize, width: usize) -> Result<Vec<Vec<String>>> {
    let rows = find_all(table, &Anchor::tag("tr"));
    let mut out = Vec::with_capacity(rows.len().saturating_sub(skip));
    for (i, row) in rows.into_iter().enumerate().skip(skip) {
        let cells: Vec<String> = row
            .element_children()
            .into_iter()
            .filter(|c| {
                let t = c.tag_name();
                t.eq_ignore_ascii_case("td") || t.eq_ignore_ascii_case("th")
            })
            .take(width)
            .map(|c| c.normalized_text())
            .collect();
        if cells.len() < width {
            return Err(content_err!("{width} cells in table row {i}, found {}", cells.len()));
        }
        out.push(cells);
    }
    Ok(out)
}

/* ---------------- scraper backend ---------------- */

impl<'a> Node for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn element_children(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn next_element(&self) -> Option<Self> {
        self.next_siblings().find_map(ElementRef::wrap)
    }

    fn prev_element(&self) -> Option<Self> {
        self.prev_siblings().find_map(ElementRef::wrap)
    }

    fn element_descendants(&self) -> Vec<Self> {
        self.descendants().skip(1).filter_map(ElementRef::wrap).collect()
    }
}
