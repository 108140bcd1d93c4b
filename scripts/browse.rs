//! Terminal browser for a running catalogue service.
//!
//! Fetches the catalogue once, then reads commands from stdin:
//! `:tab <any|games|ubisoft|classics|monthly>`, `:retry`, `:clear`, `:quit`.
//! Any other line is search text and is applied after the search quiet period.
//!
//! Run with: cargo run --bin psplus-browse -- http://127.0.0.1:8000

use anyhow::Context as _;
use psplus_catalogue::view::{
    debounce, CatalogueClient, CatalogueView, HttpCatalogueClient, Tab, ViewState,
    SEARCH_QUIET_PERIOD,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_stream::wrappers::{LinesStream, ReceiverStream};
use tokio_stream::StreamExt;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

enum Command {
    Tab(Tab),
    Retry,
    Clear,
    Quit,
    Search(String),
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let Some(command) = line.trim().strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("tab"), Some(key)) => match Tab::from_key(key) {
                Some(tab) => Self::Tab(tab),
                None => Self::Unknown(format!("unknown tab '{key}'")),
            },
            (Some("retry"), None) => Self::Retry,
            (Some("clear"), None) => Self::Clear,
            (Some("quit" | "q"), None) => Self::Quit,
            _ => Self::Unknown(format!("unknown command '{command}'")),
        }
    }
}

fn render<C: CatalogueClient>(view: &CatalogueView<C>) {
    println!();

    match view.state() {
        ViewState::Loading => {
            println!("loading...");
            return;
        }
        ViewState::Error(message) => {
            println!("Failed to load. {message}  (type :retry)");
            return;
        }
        ViewState::Loaded(_) => {}
    }

    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|t| {
            if *t == view.tab() {
                format!("[{}]", t.label())
            } else {
                t.label().to_string()
            }
        })
        .collect();

    println!("{}", tabs.join("  "));
    if !view.query().trim().is_empty() {
        println!("search: {}", view.query());
    }
    println!("{}", view.summary());

    let visible = view.visible();
    if visible.is_empty() {
        println!("No games found");
        return;
    }

    for game in visible {
        let categories: Vec<&str> = game.categories.iter().map(|c| c.key()).collect();
        println!("  {}  ({})", game.name, categories.join(", "));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PSPLUS_URL").ok())
        .unwrap_or_else(|| "http://127.0.0.1:8000".to_string());

    let http_client = reqwest::Client::builder()
        .build()
        .context("http client")?;
    let client = HttpCatalogueClient::new(http_client, &base_url);

    println!("PS Plus Extra Games ({})", client.url());

    let mut view = CatalogueView::new(client);
    render(&view);
    view.load().await;
    render(&view);

    let (query_tx, query_rx) = mpsc::channel(16);
    let mut queries = debounce(ReceiverStream::new(query_rx), SEARCH_QUIET_PERIOD);
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());

    loop {
        tokio::select! {
            line = lines.next() => {
                let Some(line) = line else { break };
                let line = line.context("reading stdin")?;

                match Command::parse(&line) {
                    Command::Tab(tab) => {
                        view.set_tab(tab);
                        render(&view);
                    }
                    Command::Retry => {
                        view.begin_fetch();
                        render(&view);
                        view.retry().await;
                        render(&view);
                    }
                    Command::Clear => query_tx.send(String::new()).await?,
                    Command::Quit => break,
                    Command::Search(text) => query_tx.send(text).await?,
                    Command::Unknown(message) => eprintln!("{message}"),
                }
            }
            Some(query) = queries.next() => {
                view.set_query(&query);
                render(&view);
            }
        }
    }

    Ok(())
}
