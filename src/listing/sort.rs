use super::{FileType, ListItem};

/// File-type groups emitted after directories, in display order.
const FILE_GROUP_ORDER: &[&str] = &["zip", "txt", "log", "unknown"];

/// Stable newest-first sort. Items with an invalid timestamp go last.
pub fn sort_newest_first(items: &mut [ListItem]) {
    items.sort_by(|a, b| b.last_modified().cmp(&a.last_modified()));
}

/// Directories first, then the `zip`, `txt`, `log` and `unknown` groups, each
/// newest first.
///
/// Items of any other file type (`failed`, `html`, ...) are not part of the
/// result.
pub fn group_and_sort_list_items(items: &[ListItem]) -> Vec<ListItem> {
    let groups = std::iter::once(FileType::Directory.as_str()).chain(FILE_GROUP_ORDER.iter().copied());

    let mut out = Vec::with_capacity(items.len());
    for group in groups {
        let mut members: Vec<ListItem> = items
            .iter()
            .filter(|item| item.file_type().as_str() == group)
            .cloned()
            .collect();
        sort_newest_first(&mut members);
        out.extend(members);
    }
    out
}
