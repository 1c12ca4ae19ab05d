use super::error::{ExtractError, ExtractResult};
use super::matcher::{find_first, matching_children, ClassMatcher, HasClass};
use crate::config::MarkupConfig;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Finds the results container and the listing nodes directly inside it.
#[derive(Debug, Clone)]
pub struct ListingLocator {
    container: ClassMatcher,
    item: HasClass,
}

impl ListingLocator {
    pub fn new(markup: &MarkupConfig) -> Self {
        Self {
            container: ClassMatcher::all(&markup.container_tag, &markup.container_classes),
            item: HasClass(markup.item_class.clone()),
        }
    }

    pub fn container<'a>(&self, doc: &'a Html) -> ExtractResult<ElementRef<'a>> {
        find_first(doc.root_element(), &self.container).ok_or(ExtractError::StructureNotFound)
    }

    /// Listing nodes in document order.
    pub fn items<'a>(&self, doc: &'a Html) -> ExtractResult<Vec<ElementRef<'a>>> {
        let container = self.container(doc)?;
        let items = matching_children(container, &self.item);
        debug!(
            "Results container has {} children, {} listing items",
            container.children().filter_map(ElementRef::wrap).count(),
            items.len()
        );

        if items.is_empty() {
            return Err(ExtractError::NoItemsFound);
        }
        Ok(items)
    }
}
