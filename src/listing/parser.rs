use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

use super::{ItemType, ListItem, Timestamp};

/// Header, separator and parent-directory rows the server template puts
/// ahead of the entries.
const HEADER_ROWS: usize = 3;

/// Zero-based index of the last-modified cell within a row.
const LAST_MODIFIED_CELL: usize = 2;

fn row_regex() -> &'static Regex {
    static ROW_RE: OnceLock<Regex> = OnceLock::new();
    ROW_RE.get_or_init(|| Regex::new(r"(?i)<tr(?:\s[^>]*)?>").expect("invalid table row regex"))
}

fn cell_regex() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| Regex::new(r"(?i)<td(?:\s[^>]*)?>").expect("invalid table cell regex"))
}

fn anchor_regex() -> &'static Regex {
    static ANCHOR_RE: OnceLock<Regex> = OnceLock::new();
    ANCHOR_RE.get_or_init(|| Regex::new(r"(?i)<a(?:\s[^>]*)?>").expect("invalid anchor regex"))
}

fn row_end_regex() -> &'static Regex {
    static ROW_END_RE: OnceLock<Regex> = OnceLock::new();
    ROW_END_RE.get_or_init(|| Regex::new(r"(?i)</tr\s*>").expect("invalid row end regex"))
}

fn cell_end_regex() -> &'static Regex {
    static CELL_END_RE: OnceLock<Regex> = OnceLock::new();
    CELL_END_RE.get_or_init(|| Regex::new(r"(?i)</td\s*>").expect("invalid cell end regex"))
}

fn anchor_end_regex() -> &'static Regex {
    static ANCHOR_END_RE: OnceLock<Regex> = OnceLock::new();
    ANCHOR_END_RE.get_or_init(|| Regex::new(r"(?i)</a\s*>").expect("invalid anchor end regex"))
}

fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"))
}

/// Inner HTML of every element opened by `open`.
///
/// An element ends at its closing tag, or at the next opening tag of the same
/// kind when the closing tag was left out.
fn element_bodies<'a>(html: &'a str, open: &Regex, close: &Regex) -> Vec<&'a str> {
    let opens: Vec<(usize, usize)> = open.find_iter(html).map(|m| (m.start(), m.end())).collect();

    opens
        .iter()
        .enumerate()
        .map(|(idx, &(_, body_start))| {
            let next_open = opens.get(idx + 1).map_or(html.len(), |&(start, _)| start);
            let close_at = close.find_at(html, body_start).map_or(html.len(), |m| m.start());
            &html[body_start..close_at.min(next_open)]
        })
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Visible text of an HTML fragment: tags removed, entities decoded, trimmed.
fn visible_text(fragment: &str) -> String {
    let stripped = tag_regex().replace_all(fragment, "");
    decode_entities(&stripped).trim().to_string()
}

/// Parse one directory-listing page into items.
///
/// Rows without a hyperlink, with empty link text, or whose link does not
/// form an absolute URL are dropped. A page without rows yields an empty
/// vector.
pub fn parse_listing(html: &str, base_path: &str, item_type: ItemType) -> Vec<ListItem> {
    let rows = element_bodies(html, row_regex(), row_end_regex());
    debug!(rows = rows.len(), base_path, %item_type, "parsing listing");

    rows.into_iter()
        .skip(HEADER_ROWS)
        .filter_map(|row| parse_row(row, base_path, item_type))
        .collect()
}

fn parse_row(row: &str, base_path: &str, item_type: ItemType) -> Option<ListItem> {
    let anchor = element_bodies(row, anchor_regex(), anchor_end_regex()).into_iter().next()?;

    let name = visible_text(anchor);
    if name.is_empty() {
        debug!(base_path, "dropping row with empty link text");
        return None;
    }

    let link = format!("{base_path}{name}");
    if let Err(err) = Url::parse(&link) {
        debug!(%link, %err, "dropping row with unusable link");
        return None;
    }

    let last_modified = element_bodies(row, cell_regex(), cell_end_regex())
        .into_iter()
        .nth(LAST_MODIFIED_CELL)
        .map_or(Timestamp::INVALID, |cell| Timestamp::parse(&visible_text(cell)));

    Some(ListItem::new(name, link, item_type, last_modified))
}
