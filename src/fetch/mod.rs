pub mod models;
pub use models::{HttpSource, ListingSource};

use tracing::{debug, info};

use crate::listing::{ERROR_LOGS_DIR, ItemType, ListItem, parse_listing};

/// A listing could not be retrieved. Distinct from a page with no entries.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("failed to GET '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// `base` with exactly one trailing separator.
pub fn directory_url(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}

/// Location of a build listing's failed-build sub-listing.
pub fn error_logs_url(base: &str) -> String {
    format!("{}{ERROR_LOGS_DIR}", directory_url(base))
}

/// Fetch and parse the listing at `base_path`.
///
/// A build listing that carries an `ErrorLogs/` entry is completed with a
/// second fetch: the entry itself is removed and the builds listed under
/// `ErrorLogs/` are appended, their links pointing into that directory. A
/// failure of either request fails the whole load.
pub async fn load_listing(
    source: &dyn ListingSource,
    base_path: &str,
    item_type: ItemType,
) -> Result<Vec<ListItem>, FetchError> {
    let base = directory_url(base_path);
    let html = source.fetch(&base).await?;
    let mut items = parse_listing(&html, &base, item_type);
    debug!(url = %base, count = items.len(), "listing parsed");

    if item_type != ItemType::Build || !items.iter().any(ListItem::is_error_logs_marker) {
        return Ok(items);
    }

    items.retain(|item| !item.is_error_logs_marker());

    let failed_base = error_logs_url(&base);
    let failed_html = source.fetch(&failed_base).await?;
    let failed: Vec<ListItem> = parse_listing(&failed_html, &failed_base, ItemType::Build)
        .into_iter()
        .filter(|item| !item.is_error_logs_marker())
        .collect();
    info!(url = %failed_base, count = failed.len(), "spliced failed builds");

    items.extend(failed);
    Ok(items)
}
