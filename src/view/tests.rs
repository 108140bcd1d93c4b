use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hyper::StatusCode;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use super::*;
use crate::category::Category;

fn game(id: u64, name: &str, categories: &[Category]) -> Game {
    Game {
        id,
        name: name.to_string(),
        image_url: format!("https://img/{id}.png"),
        categories: categories.to_vec(),
    }
}

fn catalogue() -> Vec<Game> {
    vec![
        game(1, "Assassin's Creed Valhalla", &[Category::Ubisoft]),
        game(2, "Mario", &[Category::Games]),
        game(3, "Zelda", &[Category::Classics]),
        game(4, "Ghost of Tsushima", &[Category::Games, Category::Monthly]),
        game(5, "zelda II", &[Category::Monthly]),
    ]
}

/// Answers each fetch with the next scripted outcome.
struct ScriptedClient {
    outcomes: Mutex<VecDeque<Result<Vec<Game>, StatusCode>>>,
}

impl ScriptedClient {
    fn new(outcomes: Vec<Result<Vec<Game>, StatusCode>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }
}

#[async_trait]
impl CatalogueClient for ScriptedClient {
    async fn fetch_games(&self) -> Result<Vec<Game>, ViewError> {
        let next = self.outcomes.lock().unwrap().pop_front();
        match next {
            Some(Ok(games)) => Ok(games),
            Some(Err(status)) => Err(ViewError::Status(status)),
            None => panic!("unexpected fetch"),
        }
    }
}

fn loaded_view() -> CatalogueView<ScriptedClient> {
    let mut view = CatalogueView::new(ScriptedClient::new(vec![]));
    view.finish_fetch(Ok(catalogue()));
    view
}

fn visible_names<C: CatalogueClient>(view: &CatalogueView<C>) -> Vec<&str> {
    view.visible().iter().map(|g| g.name.as_str()).collect()
}

#[tokio::test]
async fn test_load_success() {
    let mut view = CatalogueView::new(ScriptedClient::new(vec![Ok(catalogue())]));

    assert_eq!(view.state(), &ViewState::Loading);
    assert!(view.visible().is_empty());

    view.load().await;

    assert!(matches!(view.state(), ViewState::Loaded(games) if games.len() == 5));
    assert_eq!(view.error(), None);
    assert_eq!(view.summary(), "5 titles available this month");
}

#[tokio::test]
async fn test_error_then_retry() {
    let mut view = CatalogueView::new(ScriptedClient::new(vec![
        Err(StatusCode::INTERNAL_SERVER_ERROR),
        Ok(catalogue()),
    ]));

    view.load().await;

    assert_eq!(
        view.error(),
        Some("Failed to load data (500 Internal Server Error)")
    );
    assert!(view.visible().is_empty());

    view.begin_fetch();
    assert_eq!(view.state(), &ViewState::Loading);
    assert_eq!(view.error(), None);

    view.retry().await;

    assert_eq!(view.total(), 5);
    assert_eq!(view.error(), None);
}

#[test]
fn test_filter_by_tab() {
    let mut view = loaded_view();

    view.set_tab(Tab::Only(Category::Monthly));
    assert_eq!(visible_names(&view), vec!["Ghost of Tsushima", "zelda II"]);
    assert_eq!(view.summary(), "2 titles available this month (of 5)");

    view.set_tab(Tab::Only(Category::Ubisoft));
    assert_eq!(visible_names(&view), vec!["Assassin's Creed Valhalla"]);

    view.set_tab(Tab::Any);
    assert_eq!(visible_names(&view).len(), 5);
}

#[test]
fn test_tab_filter_is_exact() {
    let games = catalogue();

    for tab in Tab::ALL.into_iter().skip(1) {
        let Tab::Only(category) = tab else {
            unreachable!()
        };

        let filtered = filter_games(&games, tab, "");
        assert!(filtered.iter().all(|g| g.in_category(category)));

        let expected = games.iter().filter(|g| g.in_category(category)).count();
        assert_eq!(filtered.len(), expected);
    }
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let games = vec![game(1, "Zelda", &[Category::Games]), game(2, "Mario", &[Category::Classics])];

    for tab in [Tab::Any, Tab::Only(Category::Games)] {
        let names: Vec<&str> = filter_games(&games, tab, "zel")
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zelda"]);
    }

    assert_eq!(filter_games(&games, Tab::Any, "ZEL").len(), 1);
    assert_eq!(filter_games(&games, Tab::Any, "   ").len(), 2);
    assert!(filter_games(&games, Tab::Any, "sonic").is_empty());
}

#[test]
fn test_filter_sorts_by_name() {
    let games = vec![
        game(1, "zelda II", &[]),
        game(2, "Abzu", &[]),
        game(3, "Zelda", &[]),
    ];

    let names: Vec<&str> = filter_games(&games, Tab::Any, "")
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(names, vec!["Abzu", "Zelda", "zelda II"]);
}

#[test]
fn test_new_query_resets_tab() {
    let mut view = loaded_view();

    view.set_tab(Tab::Only(Category::Classics));
    view.set_query("");
    assert_eq!(view.tab(), Tab::Only(Category::Classics));

    view.set_query("zel");
    assert_eq!(view.tab(), Tab::Any);
    assert_eq!(visible_names(&view), vec!["Zelda", "zelda II"]);

    view.set_tab(Tab::Only(Category::Classics));
    view.set_query("zel");
    assert_eq!(view.tab(), Tab::Only(Category::Classics));
    assert_eq!(visible_names(&view), vec!["Zelda"]);
}

#[test]
fn test_tab_keys() {
    for tab in Tab::ALL {
        assert_eq!(Tab::from_key(tab.key()), Some(tab));
    }

    assert_eq!(Tab::from_key("everything"), None);
    assert_eq!(Tab::Only(Category::Ubisoft).label(), "Ubisoft+ classics");
}

#[test]
fn test_summary() {
    assert_eq!(summary(0, 0), "0 titles available this month");
    assert_eq!(summary(3, 3), "3 titles available this month");
    assert_eq!(summary(0, 3), "0 titles available this month (of 3)");
}

#[tokio::test(start_paused = true)]
async fn test_debounce_emits_after_quiet_period() {
    let (tx, rx) = mpsc::channel(8);
    let mut debounced = debounce(ReceiverStream::new(rx), SEARCH_QUIET_PERIOD);
    let start = Instant::now();

    tokio::spawn(async move {
        for text in ["z", "ze", "zel"] {
            tx.send(text).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(700)).await;
        tx.send("zelda").await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    assert_eq!(debounced.next().await, Some("zel"));
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(600), "{elapsed:?}");

    assert_eq!(debounced.next().await, Some("zelda"));
    assert!(start.elapsed() >= Duration::from_millis(1300));
}

#[tokio::test(start_paused = true)]
async fn test_debounce_flushes_on_end() {
    let (tx, rx) = mpsc::channel(8);
    let mut debounced = debounce(ReceiverStream::new(rx), SEARCH_QUIET_PERIOD);
    let start = Instant::now();

    tx.send("mario").await.unwrap();
    drop(tx);

    assert_eq!(debounced.next().await, Some("mario"));
    assert!(start.elapsed() < SEARCH_QUIET_PERIOD);
    assert_eq!(debounced.next().await, None);
}
