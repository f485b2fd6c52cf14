mod view;

pub use view::{ListingView, LoadState};

use anyhow::Result;
use std::fmt;
use tracing::debug;

use crate::fetch::ListingSource;
use crate::helpers::{choose_one, prompt_line, spinner};
use crate::install::{self, InstallStatus};
use crate::listing::{ItemType, ListItem};
use crate::settings::Settings;

/// Text shown next to an item in menus and `list` output.
pub fn describe(item: &ListItem) -> String {
    let note = match item.item_type() {
        ItemType::Build if item.is_failed_build() => "Build Failed".to_string(),
        ItemType::Branch | ItemType::Build => String::new(),
        ItemType::File => item.file_type().to_string(),
    };
    let modified = item.last_modified().to_string();
    format!("{:<48} {:<16} {}", item.display_name(), modified, note)
        .trim_end()
        .to_string()
}

#[derive(Debug, Clone)]
enum Entry {
    Item(ListItem),
    Search,
    ClearSearch,
    Back,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Item(item) => f.write_str(&describe(item)),
            Entry::Search => f.write_str("/ Search..."),
            Entry::ClearSearch => f.write_str("/ Clear search"),
            Entry::Back => f.write_str("< Back"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Open,
    ShowUrl,
    Install,
    Back,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Open => "Open",
            Action::ShowUrl => "Show URL",
            Action::Install => "Install this build",
            Action::Back => "< Back",
        })
    }
}

fn is_installable(item: &ListItem, settings: &Settings) -> bool {
    item.item_type() == ItemType::File && item.file_type().as_str() == settings.installable_extension()
}

fn actions_for(item: &ListItem, settings: &Settings) -> Vec<Action> {
    let mut actions = Vec::new();
    if item.is_directory() {
        actions.push(Action::Open);
    }
    if is_installable(item, settings) {
        actions.push(Action::Install);
    }
    actions.push(Action::ShowUrl);
    actions.push(Action::Back);
    actions
}

fn entries_for(view: &ListingView) -> Vec<Entry> {
    let mut entries = vec![Entry::Search];
    if !view.search_text().is_empty() {
        entries.push(Entry::ClearSearch);
    }
    entries.extend(view.visible_items().into_iter().cloned().map(Entry::Item));
    entries.push(Entry::Back);
    entries
}

fn menu_title(view: &ListingView) -> String {
    let count = view.visible_items().len();
    if view.search_text().is_empty() {
        format!("{} ({count})", view.title())
    } else {
        format!("{} ({count}) matching '{}'", view.title(), view.search_text())
    }
}

/// Interactive branch -> build -> file browser.
///
/// Returns the install status when the user installed a build, `None` when
/// they backed out of the root listing.
pub async fn browse(source: &dyn ListingSource, settings: &Settings) -> Result<Option<InstallStatus>> {
    let mut stack = vec![ListingView::new(settings.root_url(), ItemType::Branch, "Branches")];

    while let Some(view) = stack.last_mut() {
        if view.state().is_loading() {
            let pb = spinner(format!("Loading {}", view.path()));
            view.load(source).await;
            pb.finish_and_clear();
        }

        let failure = match view.state() {
            LoadState::Failed(msg) => Some(msg.clone()),
            _ => None,
        };
        if let Some(msg) = failure {
            println!("Something went wrong: {msg}");
            leave(&mut stack);
            continue;
        }

        match choose_one(&menu_title(view), entries_for(view))? {
            None | Some(Entry::Back) => leave(&mut stack),
            Some(Entry::Search) => {
                let text = prompt_line(&format!("Search {}", view.title().to_lowercase()))?;
                view.set_search_text(text);
            }
            Some(Entry::ClearSearch) => view.set_search_text(""),
            Some(Entry::Item(item)) => {
                let title = format!("{} ({})", item.display_name(), item.link());
                match choose_one(&title, actions_for(&item, settings))? {
                    Some(Action::Open) => {
                        if let Some(child) = view.child(&item) {
                            stack.push(child);
                        }
                    }
                    Some(Action::ShowUrl) => println!("{}", item.link()),
                    Some(Action::Install) => {
                        let status = install::wizard::run(item.link(), settings.properties_keys())?;
                        return Ok(Some(status));
                    }
                    Some(Action::Back) | None => {}
                }
            }
        }
    }

    Ok(None)
}

fn leave(stack: &mut Vec<ListingView>) {
    if let Some(mut view) = stack.pop() {
        debug!(path = view.path(), "leaving listing");
        view.unmount();
    }
}
