use tracing::{debug, warn};

use crate::fetch::{FetchError, ListingSource, load_listing};
use crate::listing::{ItemType, ListItem, group_and_sort_list_items, sort_newest_first};
use crate::matcher::filter_by_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<ListItem>),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Identifies one load of a view; completions carrying an older ticket are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// One listing page of the browser: branches, builds or files under `path`.
#[derive(Debug)]
pub struct ListingView {
    path: String,
    item_type: ItemType,
    title: String,
    state: LoadState,
    search_text: String,
    generation: u64,
    mounted: bool,
}

impl ListingView {
    pub fn new(path: impl Into<String>, item_type: ItemType, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            item_type,
            title: title.into(),
            state: LoadState::Loading,
            search_text: String::new(),
            generation: 0,
            mounted: true,
        }
    }

    /// View opened by selecting `item`; only directories can be opened.
    pub fn child(&self, item: &ListItem) -> Option<ListingView> {
        item.is_directory()
            .then(|| ListingView::new(item.link(), self.item_type.next(), item.display_name()))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    #[cfg(test)]
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Loaded items matching the current search text, in display order.
    pub fn visible_items(&self) -> Vec<&ListItem> {
        match &self.state {
            LoadState::Loaded(items) => filter_by_name(items, &self.search_text),
            _ => Vec::new(),
        }
    }

    pub fn begin_load(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.generation)
    }

    /// Apply a finished fetch. Returns `false` when the result was discarded
    /// because the view is gone or a newer load was started.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<ListItem>, FetchError>) -> bool {
        if !self.mounted || ticket.0 != self.generation {
            debug!(path = %self.path, "discarding stale listing result");
            return false;
        }

        self.state = match result {
            Ok(items) => LoadState::Loaded(arrange(self.item_type, items)),
            Err(err) => {
                warn!(path = %self.path, %err, "listing failed to load");
                LoadState::Failed(err.to_string())
            }
        };
        true
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub async fn load(&mut self, source: &dyn ListingSource) {
        let ticket = self.begin_load();
        let result = load_listing(source, &self.path, self.item_type).await;
        self.complete(ticket, result);
    }
}

/// File listings are grouped by type; branches and builds keep every item,
/// newest first.
fn arrange(item_type: ItemType, mut items: Vec<ListItem>) -> Vec<ListItem> {
    match item_type {
        ItemType::File => group_and_sort_list_items(&items),
        ItemType::Branch | ItemType::Build => {
            sort_newest_first(&mut items);
            items
        }
    }
}
