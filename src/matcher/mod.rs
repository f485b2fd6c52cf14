use crate::listing::ListItem;

/// Case-insensitive subsequence match: every character of `needle` must occur
/// in `haystack`, in order, each after the previous match.
pub fn fuzzy_match(haystack: &str, needle: &str) -> bool {
    let hay = haystack.to_lowercase();
    let mut remaining = hay.chars();

    needle
        .to_lowercase()
        .chars()
        .all(|wanted| remaining.by_ref().any(|c| c == wanted))
}

/// Items whose name fuzzy-matches `needle`, in their original order.
pub fn filter_by_name<'a>(items: &'a [ListItem], needle: &str) -> Vec<&'a ListItem> {
    items.iter().filter(|item| fuzzy_match(item.name(), needle)).collect()
}
