use crate::api::Category;
use crate::ui::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

const SEARCH_PLACEHOLDER: &str = "Search (e.g., Harry, Expelliarmus)...";

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;

    // Paint the theme background across the whole frame
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        frame.area(),
    );

    // Header + Tabs + Search + Body + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(3), // Category tabs
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);
    render_tabs(frame, app, main_chunks[1]);
    render_search(frame, app, main_chunks[2]);
    render_body(frame, app, main_chunks[3]);
    render_footer(frame, app, main_chunks[4]);

    if app.show_info {
        render_info_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header_text = vec![
        Line::from(Span::styled(
            "⚡ Harry Potter Explorer ⚡",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Discover the Wizarding World",
            Style::default()
                .fg(theme.fg)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.selection_bg));

    frame.render_widget(header, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let titles: Vec<Line> = Category::ALL
        .iter()
        .map(|c| Line::from(format!("{} {}", c.emoji(), c.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.query.category.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Category ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .style(Style::default().fg(theme.fg_dim))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );

    frame.render_widget(tabs, area);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let border_color = if app.editing {
        theme.accent
    } else {
        theme.fg_dim
    };

    let line = if app.query.search_query.is_empty() && !app.editing {
        Line::from(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(theme.fg_dim),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.query.search_query.clone(),
            Style::default().fg(theme.fg),
        )];
        if app.editing {
            spans.push(Span::styled("█", Style::default().fg(theme.secondary)));
        }
        Line::from(spans)
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 🔍 Search ")
            .border_style(Style::default().fg(border_color)),
    );

    frame.render_widget(search, area);
}

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if app.query.is_loading() {
        let loading = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Consulting the library...", app.spinner()),
                Style::default().fg(theme.success),
            )),
        ])
        .alignment(Alignment::Center)
        .block(results_block(app));
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = app.query.visible_error() {
        let message = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(theme.error),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(results_block(app));
        frame.render_widget(message, area);
        return;
    }

    let cards = app.visible_cards();
    if cards.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Press / to type a search, Enter to look up {}",
                    app.query.category.label().to_lowercase()
                ),
                Style::default().fg(theme.fg_dim),
            )),
        ])
        .alignment(Alignment::Center)
        .block(results_block(app));
        frame.render_widget(hint, area);
        return;
    }

    // Split body into result list (left) and card details (right)
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| ListItem::new(card.title.clone()))
        .collect();

    let list = List::new(items)
        .block(results_block(app))
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, body_chunks[0], &mut list_state);

    render_card(frame, app, body_chunks[1]);
}

fn results_block(app: &App) -> Block<'static> {
    let count = app.visible_cards().len();
    let title = if count > 0 {
        format!(" {} {} ({}) ", app.query.category.emoji(), app.query.category.label(), count)
    } else {
        format!(" {} {} ", app.query.category.emoji(), app.query.category.label())
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(app.theme.accent))
}

fn render_card(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let text = match app.selected_card() {
        Some(card) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    card.title.clone(),
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            for field in &card.details {
                let line = match field.label {
                    Some(label) => Line::from(vec![
                        Span::styled(format!("{}: ", label), Style::default().fg(theme.fg_dim)),
                        Span::styled(field.value.clone(), Style::default().fg(theme.fg)),
                    ]),
                    None => Line::from(Span::styled(
                        field.value.clone(),
                        Style::default()
                            .fg(theme.fg)
                            .add_modifier(Modifier::ITALIC),
                    )),
                };
                lines.push(line);
            }
            lines
        }
        None => vec![Line::from("No item selected")],
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 📜 Details ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.editing {
        "[Type] Edit search  [Enter] Search  [Ctrl+u] Clear  [Esc] Done"
    } else {
        "[/] Search  [Enter] Submit  [←→/Tab] Category  [1-4] Jump  [↑↓/jk] Navigate  [t] Theme  [i] Info  [q] Quit"
    };

    let footer = Paragraph::new(help_text).style(Style::default().fg(app.theme.fg_dim));

    frame.render_widget(footer, area);
}

fn render_info_modal(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 50, frame.area());

    let text = vec![
        Line::from(Span::styled(
            "Harry Potter Explorer",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Version: {}", env!("CARGO_PKG_VERSION"))),
        Line::from(format!("Theme: {}", theme.name)),
        Line::from(format!("Category: {}", app.query.category.label())),
        Line::from(""),
        Line::from("Data from the public Potter API."),
        Line::from(""),
        Line::from(Span::styled(
            "[i/Esc] Close",
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let modal = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ℹ Info ")
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.bg)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FetchError, House, Record, SearchRequest};
    use crate::controller::{Phase, QueryState};
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| render(f, app)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn app_with(state: QueryState) -> App {
        let mut app = App::new(QueryState::new(state.category), Theme::default_theme().clone());
        app.sync(state);
        app
    }

    #[test]
    fn test_renders_placeholder_and_tabs() {
        let app = app_with(QueryState::new(Category::Characters));
        let screen = draw(&app);
        assert!(screen.contains("Harry Potter Explorer"));
        assert!(screen.contains("Search (e.g., Harry, Expelliarmus)..."));
        assert!(screen.contains("Characters"));
        assert!(screen.contains("Books"));
    }

    #[test]
    fn test_renders_error_verbatim() {
        let mut state = QueryState::new(Category::Spells);
        state.complete(
            &SearchRequest::new(Category::Spells, "x"),
            Err(FetchError::Http { status: 503 }),
        );
        let app = app_with(state);
        let screen = draw(&app);
        assert!(screen.contains("503"));
    }

    #[test]
    fn test_renders_loading_instead_of_results() {
        let mut state = QueryState::new(Category::Houses);
        state.phase = Phase::Loading;
        let app = app_with(state);
        let screen = draw(&app);
        assert!(screen.contains("Consulting the library"));
    }

    #[test]
    fn test_renders_selected_card() {
        let mut state = QueryState::new(Category::Houses);
        state.complete(
            &SearchRequest::new(Category::Houses, ""),
            Ok(vec![Record::House(House {
                house: Some("Hufflepuff".to_string()),
                founder: Some("Helga Hufflepuff".to_string()),
                ..House::default()
            })]),
        );
        let app = app_with(state);
        let screen = draw(&app);
        assert!(screen.contains("Hufflepuff"));
        assert!(screen.contains("Founder: "));
        assert!(screen.contains("Helga Hufflepuff"));
    }
}
