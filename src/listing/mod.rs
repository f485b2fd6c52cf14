mod item;
mod parser;
mod sort;
mod timestamp;

pub use item::{ERROR_LOGS_DIR, FileType, ItemType, ListItem};
pub use parser::parse_listing;
pub use sort::{group_and_sort_list_items, sort_newest_first};
pub use timestamp::Timestamp;
