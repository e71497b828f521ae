//! # Harry Potter Explorer CLI Entry Point
//!
//! This is the main entry point for the explorer TUI.
//!
//! ## Overview
//!
//! Pick a category (characters, spells, houses, books), type a search and
//! press Enter. Results from the public Potter API are listed on the left and
//! the selected record is shown as a card on the right.
//!
//! ## Usage
//!
//! ```bash
//! # Start the TUI
//! hp-explorer
//!
//! # Start on spells and search right away
//! hp-explorer --category spells --query lumos
//!
//! # Print results to stdout and exit
//! hp-explorer --category houses --print
//! ```
//!
//! ## Key Bindings
//!
//! - `/` / `s` - Edit the search text (`Enter` submits, `Esc` stops editing)
//! - `Enter` - Submit the search
//! - `Tab` / `→` / `l` - Next category, `Shift+Tab` / `←` / `h` - previous
//! - `1`-`4` - Jump to a category
//! - `j` / `Down`, `k` / `Up` - Move through results
//! - `t` - Cycle theme (saved to the config file)
//! - `i` - Show/hide info modal
//! - `q` / `Q` - Quit

use hp_explorer::api::{Category, ContentClient, ContentSource};
use hp_explorer::config::Config;
use hp_explorer::controller::{Intent, Phase, QueryController};
use hp_explorer::logging;
use hp_explorer::ui::{self, Action, App, Card};
use hp_explorer::ui::theme::Theme;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// Harry Potter Explorer - search characters, spells, houses and books
#[derive(Parser, Debug)]
#[command(name = "hp-explorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse the Wizarding World from your terminal", long_about = None)]
struct Args {
    /// Category to start on (characters, spells, houses, books)
    #[arg(short, long, value_name = "CATEGORY")]
    category: Option<Category>,

    /// Search text to submit on startup
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Base URL of the content API
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Locale segment of the API path
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Theme to use for this run
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run the search, print the results and exit
    #[arg(long)]
    print: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Try to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);

        // Call the original panic hook
        original_hook(panic_info);
    }));

    // Run the application and ensure cleanup happens
    let result = run_application(args).await;

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

/// Load the config file and apply command-line overrides.
fn resolve_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    let (mut config, config_path) = match &args.config {
        Some(path) => (Config::load_from(path)?, Some(path.clone())),
        None => (Config::load(), Config::config_path().ok()),
    };

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(locale) = &args.locale {
        config.locale = locale.clone();
    }
    if let Some(category) = args.category {
        config.default_category = category;
    }
    if let Some(theme) = &args.theme {
        config.theme = theme.clone();
    }

    Ok((config, config_path))
}

fn resolve_theme(name: &str) -> Theme {
    match Theme::by_name(name) {
        Some(theme) => theme.clone(),
        None => {
            warn!(theme = name, "unknown theme, using default");
            Theme::default_theme().clone()
        }
    }
}

async fn run_application(args: Args) -> Result<()> {
    let (config, config_path) = resolve_config(&args)?;

    match logging::log_file_path() {
        Ok(path) => {
            if let Err(e) = logging::init_logging(&config.log_level, &path) {
                eprintln!("Warning: Could not initialize logging: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: Could not initialize logging: {}", e),
    }
    info!(base_url = %config.base_url, locale = %config.locale, "starting");

    let client = ContentClient::new(&config.base_url, &config.locale, config.request_timeout())?;
    let mut controller = QueryController::new(client, config.default_category)
        .with_query_reset(config.clear_query_on_category_change);

    if let Some(query) = &args.query {
        controller.dispatch(Intent::ChangeQueryText(query.clone()));
    }

    if args.print {
        return print_results(&mut controller).await;
    }

    if args.query.is_some() {
        controller.dispatch(Intent::SubmitSearch);
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(controller.state(), resolve_theme(&config.theme));

    // Run the app and ensure cleanup happens even on error
    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(
        &mut terminal,
        &mut app,
        &mut controller,
        &mut event_reader,
        config_path.as_deref(),
    );

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    Ok(())
}

/// One-shot mode: submit, wait, print cards.
async fn print_results<S: ContentSource>(controller: &mut QueryController<S>) -> Result<()> {
    controller.dispatch(Intent::SubmitSearch);
    controller.wait_for_completion().await;

    let state = controller.state();
    let cards: Vec<Card> = state.visible_results().iter().map(Card::from_record).collect();

    if cards.is_empty() {
        let message = state.visible_error().unwrap_or("No results found.").to_string();
        // an empty result set is a notice, not a failure
        if state.phase == Phase::Success {
            println!("{}", message);
            return Ok(());
        }
        return Err(anyhow!(message));
    }

    for card in &cards {
        println!("{}", card.title);
        for line in card.detail_lines() {
            println!("    {}", line);
        }
        println!();
    }

    Ok(())
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// Save the chosen theme without picking up command-line overrides.
///
/// A config file that cannot be read is left alone rather than replaced.
fn persist_theme(config_path: &Path, theme: &Theme) -> Result<()> {
    let mut saved = Config::load_from(config_path)?;
    saved.theme = theme.name.to_string();
    saved.save_to(config_path)
}

/// Apply one terminal event to the app and controller.
fn handle_event<S: ContentSource>(
    app: &mut App,
    controller: &mut QueryController<S>,
    event: &Event,
    config_path: Option<&Path>,
) {
    let Event::Key(key) = event else {
        return;
    };
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.handle_key(*key) {
        Some(Action::Dispatch(intent)) => {
            controller.dispatch(intent);
            app.sync(controller.state());
        }
        Some(Action::ThemeChanged) => {
            if let Some(path) = config_path {
                if let Err(e) = persist_theme(path, &app.theme) {
                    warn!(error = %e, "failed to save theme");
                }
            }
        }
        Some(Action::Quit) | None => {}
    }
}

fn run_app<S: ContentSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    controller: &mut QueryController<S>,
    event_reader: &mut dyn EventReader,
    config_path: Option<&Path>,
) -> Result<()> {
    loop {
        // Pick up any fetches that finished since the last frame
        if controller.drain_completions() {
            app.sync(controller.state());
        }
        app.on_tick();

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Poll faster while loading so the spinner animates
        let poll_timeout = if app.query.is_loading() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };

        if let Some(event) = event_reader.read_event(poll_timeout)? {
            handle_event(app, controller, &event, config_path);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use hp_explorer::api::{FetchError, Record, SearchRequest, Spell};
    use std::collections::VecDeque;
    use tempfile::TempDir;

    /// Mock event reader for testing that returns a predetermined sequence of events
    struct MockEventReader {
        events: VecDeque<Event>,
    }

    impl MockEventReader {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: VecDeque::from(events),
            }
        }
    }

    impl EventReader for MockEventReader {
        fn read_event(&mut self, _timeout: Duration) -> Result<Option<Event>> {
            Ok(self.events.pop_front())
        }
    }

    /// Source that answers every request with one spell named after the query
    struct EchoSource;

    impl ContentSource for EchoSource {
        async fn fetch(&self, request: &SearchRequest) -> Result<Vec<Record>, FetchError> {
            Ok(vec![Record::Spell(Spell {
                spell: Some(request.query.clone()),
                ..Spell::default()
            })])
        }
    }

    /// Helper to create a key event
    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn base_args() -> Args {
        Args {
            category: None,
            query: None,
            base_url: None,
            locale: None,
            theme: None,
            config: None,
            print: false,
        }
    }

    #[test]
    fn test_mock_event_reader() {
        let mut reader = MockEventReader::new(vec![
            key_event(KeyCode::Char('a')),
            key_event(KeyCode::Enter),
        ]);

        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).expect("read"),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Char('a'),
                ..
            }))
        ));
        assert!(matches!(
            reader.read_event(Duration::from_millis(10)).expect("read"),
            Some(Event::Key(KeyEvent {
                code: KeyCode::Enter,
                ..
            }))
        ));
        assert!(reader
            .read_event(Duration::from_millis(10))
            .expect("read")
            .is_none());
    }

    #[test]
    fn test_args_parse_category() {
        let args = Args::parse_from(["hp-explorer", "--category", "spells", "-q", "lumos"]);
        assert_eq!(args.category, Some(Category::Spells));
        assert_eq!(args.query.as_deref(), Some("lumos"));
        assert!(!args.print);
    }

    #[test]
    fn test_args_reject_unknown_category() {
        let result = Args::try_parse_from(["hp-explorer", "--category", "wands"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("config.json");
        Config {
            theme: "Ravenclaw".to_string(),
            ..Config::default()
        }
        .save_to(&path)
        .expect("save");

        let args = Args {
            category: Some(Category::Books),
            base_url: Some("http://localhost:9999".to_string()),
            config: Some(path.clone()),
            ..base_args()
        };
        let (config, config_path) = resolve_config(&args).expect("resolve");
        assert_eq!(config.default_category, Category::Books);
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.theme, "Ravenclaw");
        assert_eq!(config_path, Some(path));
    }

    #[test]
    fn test_resolve_theme_falls_back() {
        assert_eq!(resolve_theme("hufflepuff").name, "Hufflepuff");
        assert_eq!(resolve_theme("durmstrang").name, "Gryffindor");
    }

    #[tokio::test]
    async fn test_run_application_rejects_bad_base_url() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let args = Args {
            base_url: Some("not a url".to_string()),
            config: Some(temp_dir.path().join("config.json")),
            print: true,
            ..base_args()
        };
        let err = run_application(args).await.expect_err("bad url");
        assert!(err.to_string().contains("Invalid API base URL"));
    }

    #[tokio::test]
    async fn test_handle_event_types_and_submits() {
        let mut controller = QueryController::new(EchoSource, Category::Characters);
        let mut app = App::new(controller.state(), Theme::default_theme().clone());
        let mut reader = MockEventReader::new(vec![
            key_event(KeyCode::Char('2')),
            key_event(KeyCode::Char('/')),
            key_event(KeyCode::Char('N')),
            key_event(KeyCode::Char('o')),
            key_event(KeyCode::Char('x')),
            key_event(KeyCode::Enter),
        ]);

        while let Some(event) = reader.read_event(Duration::ZERO).expect("read") {
            handle_event(&mut app, &mut controller, &event, None);
        }

        assert_eq!(app.query.category, Category::Spells);
        assert_eq!(app.query.search_query, "Nox");
        assert!(app.query.is_loading());
        assert!(!app.editing);

        controller.wait_for_completion().await;
        app.sync(controller.state());
        assert_eq!(app.selected_card().map(|c| c.title.as_str()), Some("Nox"));
    }

    #[tokio::test]
    async fn test_handle_event_theme_is_persisted() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("config.json");
        let mut controller = QueryController::new(EchoSource, Category::Characters);
        let mut app = App::new(controller.state(), Theme::default_theme().clone());

        handle_event(
            &mut app,
            &mut controller,
            &key_event(KeyCode::Char('t')),
            Some(&path),
        );

        let saved = Config::load_from(&path).expect("load");
        assert_eq!(saved.theme, "Slytherin");
    }

    #[tokio::test]
    async fn test_handle_event_theme_keeps_unreadable_config() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("config.json");
        let original =
            r#"{"base_url":"http://my-mirror:9000","locale":"es","log_level":"debug","loglevel":"x"}"#;
        std::fs::write(&path, original).expect("write config");

        let mut controller = QueryController::new(EchoSource, Category::Characters);
        let mut app = App::new(controller.state(), Theme::default_theme().clone());

        handle_event(
            &mut app,
            &mut controller,
            &key_event(KeyCode::Char('t')),
            Some(&path),
        );

        // theme still changes for this session
        assert_eq!(app.theme.name, "Slytherin");
        let contents = std::fs::read_to_string(&path).expect("read config");
        assert_eq!(contents, original);
    }

    #[tokio::test]
    async fn test_print_results_reports_failure() {
        struct FailingSource;
        impl ContentSource for FailingSource {
            async fn fetch(&self, _request: &SearchRequest) -> Result<Vec<Record>, FetchError> {
                Err(FetchError::Http { status: 500 })
            }
        }

        let mut controller = QueryController::new(FailingSource, Category::Books);
        let err = print_results(&mut controller).await.expect_err("failure");
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_print_results_succeeds() {
        let mut controller = QueryController::new(EchoSource, Category::Spells);
        controller.dispatch(Intent::ChangeQueryText("Lumos".to_string()));
        print_results(&mut controller).await.expect("print");
        assert_eq!(controller.state().results.len(), 1);
    }
}
