//! Node matching by tag name and class membership.
//!
//! Scans walk candidates in document order and skip every node the matcher
//! rejects, including nodes without a class attribute. Only an exhausted scan
//! is reported, as `None`, and the caller turns that into its own error.

use scraper::ElementRef;

pub trait NodeMatcher {
    fn matches(&self, node: &ElementRef<'_>) -> bool;
}

/// Matches elements of one tag that carry every listed class.
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    tag: String,
    classes: Vec<String>,
}

impl ClassMatcher {
    pub fn new(tag: &str, class: &str) -> Self {
        Self::all(tag, &[class.to_string()])
    }

    pub fn all(tag: &str, classes: &[String]) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: classes.to_vec(),
        }
    }
}

impl NodeMatcher for ClassMatcher {
    fn matches(&self, node: &ElementRef<'_>) -> bool {
        node.value().name() == self.tag && self.classes.iter().all(|c| has_class(node, c))
    }
}

/// Matches any element carrying `class`, whatever its tag.
#[derive(Debug, Clone)]
pub struct HasClass(pub String);

impl NodeMatcher for HasClass {
    fn matches(&self, node: &ElementRef<'_>) -> bool {
        has_class(node, &self.0)
    }
}

/// Matches any element with the given tag.
#[derive(Debug, Clone)]
pub struct Tag(pub &'static str);

impl NodeMatcher for Tag {
    fn matches(&self, node: &ElementRef<'_>) -> bool {
        node.value().name() == self.0
    }
}

fn has_class(node: &ElementRef<'_>, class: &str) -> bool {
    node.value().classes().any(|c| c == class)
}

/// First descendant of `root` (excluding `root`) accepted by `matcher`.
pub fn find_first<'a>(root: ElementRef<'a>, matcher: &impl NodeMatcher) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|node| matcher.matches(node))
}

/// First value `inspect` yields for a descendant accepted by `matcher`.
///
/// A matched node for which `inspect` returns `None` lacks the expected inner
/// structure and is skipped like a mismatch.
pub fn find_map_first<'a, T>(
    root: ElementRef<'a>,
    matcher: &impl NodeMatcher,
    mut inspect: impl FnMut(ElementRef<'a>) -> Option<T>,
) -> Option<T> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|node| matcher.matches(node))
        .find_map(|node| inspect(node))
}

/// Direct child elements of `parent` accepted by `matcher`, in order.
pub fn matching_children<'a>(
    parent: ElementRef<'a>,
    matcher: &impl NodeMatcher,
) -> Vec<ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|node| matcher.matches(node))
        .collect()
}

/// The node right after `node`'s opening tag, skipping whitespace-only text.
pub fn first_child_element<'a>(node: ElementRef<'a>) -> Option<ElementRef<'a>> {
    node.children()
        .find(|child| match child.value().as_text() {
            Some(text) => !text.trim().is_empty(),
            None => child.value().is_element(),
        })
        .and_then(ElementRef::wrap)
}

pub fn class_list(node: &ElementRef<'_>) -> Vec<String> {
    node.value().classes().map(str::to_string).collect()
}

/// Text content with runs of whitespace collapsed.
pub fn text_of(node: &ElementRef<'_>) -> String {
    node.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
