use crate::catalogue::{compare_names, Game};
use crate::category::Category;

/// Category tab shown above the list. `Any` shows the whole catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Any,
    Only(Category),
}

impl Tab {
    /// Every tab in display order.
    pub const ALL: [Tab; 5] = [
        Tab::Any,
        Tab::Only(Category::Games),
        Tab::Only(Category::Ubisoft),
        Tab::Only(Category::Classics),
        Tab::Only(Category::Monthly),
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Only(category) => category.key(),
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "any" => Some(Self::Any),
            other => Category::from_key(other).map(Self::Only),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Only(category) => category.display_name(),
        }
    }

    pub fn matches(&self, game: &Game) -> bool {
        match self {
            Self::Any => true,
            Self::Only(category) => game.in_category(*category),
        }
    }
}

/// Applies the tab, then the search text, then sorts by name.
///
/// A query that is blank after trimming matches everything; otherwise the
/// query as typed must appear somewhere in the name, ignoring case.
pub fn filter_games<'a>(games: &'a [Game], tab: Tab, query: &str) -> Vec<&'a Game> {
    let needle = (!query.trim().is_empty()).then(|| query.to_lowercase());

    let mut list: Vec<&Game> = games
        .iter()
        .filter(|g| tab.matches(g))
        .filter(|g| match &needle {
            Some(needle) => g.name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    list.sort_by(|a, b| compare_names(&a.name, &b.name));
    list
}

/// Headline above the grid, e.g. `3 titles available this month (of 120)`.
pub fn summary(visible: usize, total: usize) -> String {
    if total > 0 && visible != total {
        format!("{visible} titles available this month (of {total})")
    } else {
        format!("{visible} titles available this month")
    }
}
