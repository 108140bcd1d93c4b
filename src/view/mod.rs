//! Client-side catalogue browser: fetch once, then filter locally.

use crate::catalogue::Game;

pub mod client;
pub mod debounce;
pub mod filter;

#[cfg(test)]
mod tests;

pub use client::{CatalogueClient, HttpCatalogueClient, ViewError};
pub use debounce::{debounce, SEARCH_QUIET_PERIOD};
pub use filter::{filter_games, summary, Tab};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Loaded(Vec<Game>),
    Error(String),
}

/// Holds the fetched catalogue plus the active tab and debounced query.
///
/// `Loading` moves to `Loaded` or `Error` when a fetch settles. Retrying
/// clears the error first, so the view is `Loading` again while the new
/// attempt is in flight.
pub struct CatalogueView<C> {
    client: C,
    state: ViewState,
    tab: Tab,
    query: String,
}

impl<C: CatalogueClient> CatalogueView<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: ViewState::Loading,
            tab: Tab::Any,
            query: String::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Enters `Loading`, dropping any previous error.
    pub fn begin_fetch(&mut self) {
        self.state = ViewState::Loading;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<Game>, ViewError>) {
        self.state = match result {
            Ok(games) => {
                tracing::debug!(games = games.len(), "catalogue loaded");
                ViewState::Loaded(games)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load catalogue");
                ViewState::Error(e.to_string())
            }
        };
    }

    /// Initial load.
    pub async fn load(&mut self) {
        self.begin_fetch();
        let result = self.client.fetch_games().await;
        self.finish_fetch(result);
    }

    /// Manual recovery from the error state. Same request as [`Self::load`].
    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Applies a debounced query. A different query puts the tab back to `Any`.
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.tab = Tab::Any;
        }
    }

    pub fn total(&self) -> usize {
        match &self.state {
            ViewState::Loaded(games) => games.len(),
            _ => 0,
        }
    }

    /// The render list. Empty unless loaded.
    pub fn visible(&self) -> Vec<&Game> {
        match &self.state {
            ViewState::Loaded(games) => filter_games(games, self.tab, &self.query),
            _ => Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        summary(self.visible().len(), self.total())
    }
}
