use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use relay_catalog::presentation::HEADING;
use serde_json::Value;
use std::io;

const PAGE: u16 = 10;

pub struct App {
    pub product_id: String,
    pub body: String,
    pub scroll: u16,
}

impl App {
    pub fn new(product_id: impl Into<String>, props: &Value) -> Self {
        let body = serde_json::to_string_pretty(props).unwrap_or_else(|_| props.to_string());
        Self {
            product_id: product_id.into(),
            body,
            scroll: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.body.lines().count().max(1) - 1;
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        self.scroll = self.scroll.saturating_add(PAGE).min(self.max_scroll());
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(PAGE);
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, event::read);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B, E>(terminal: &mut Terminal<B>, app: &mut App, mut next_event: E) -> io::Result<()>
where
    B: ratatui::backend::Backend,
    E: FnMut() -> io::Result<Event>,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = next_event()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.scroll = 0,
                KeyCode::End => app.scroll = app.max_scroll(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(0),    // JSON dump
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_heading(f, chunks[0]);
    render_dump(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_heading(f: &mut Frame, area: Rect) {
    let heading = Paragraph::new(Line::from(Span::styled(
        HEADING,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(heading, area);
}

fn render_dump(f: &mut Frame, area: Rect, app: &App) {
    let dump = Paragraph::new(app.body.as_str())
        .block(
            Block::default()
                .title(format!(" {} ", app.product_id))
                .borders(Borders::ALL),
        )
        .scroll((app.scroll, 0));

    f.render_widget(dump, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let status = Line::from(vec![
        Span::styled(" q ", Style::default().fg(Color::Black).bg(Color::Gray)),
        Span::raw(" quit  "),
        Span::styled(" j/k ", Style::default().fg(Color::Black).bg(Color::Gray)),
        Span::raw(" scroll  "),
        Span::raw(format!("line {}/{}", app.scroll + 1, app.max_scroll() + 1)),
    ]);

    f.render_widget(Paragraph::new(status).block(Block::default().borders(Borders::ALL)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::collections::VecDeque;

    fn key(code: KeyCode) -> io::Result<Event> {
        Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn props() -> Value {
        json!({
            "product": {
                "id": "UHJvZHVjdDpwXzA=",
                "name": "Camisa Polo",
                "categories": { "edges": [{ "node": { "name": "camisetas" } }] },
                "brand": { "name": "Nike" }
            }
        })
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_scroll_bounds() {
        let mut app = App::new("p_0", &props());
        let last = app.max_scroll();
        assert!(last > 0);

        app.scroll_up();
        assert_eq!(app.scroll, 0);

        app.scroll_down();
        assert_eq!(app.scroll, 1);

        for _ in 0..100 {
            app.page_down();
        }
        assert_eq!(app.scroll, last);

        app.page_up();
        assert_eq!(app.scroll, last.saturating_sub(PAGE));
    }

    #[test]
    fn test_render_heading_and_dump() {
        let app = App::new("p_0", &props());
        let text = screen(&app);

        assert!(text.contains("Product"));
        assert!(text.contains("p_0"));
        assert!(text.contains("Camisa Polo"));
        assert!(text.contains("quit"));
    }

    #[test]
    fn test_render_null_product() {
        let app = App::new("p_9", &json!({ "product": null }));
        let text = screen(&app);

        assert!(text.contains("\"product\": null"));
        assert_eq!(app.max_scroll(), 2);
    }

    #[test]
    fn test_event_loop_scrolls_then_quits() {
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        let mut app = App::new("p_0", &props());
        let mut events: VecDeque<io::Result<Event>> =
            VecDeque::from(vec![key(KeyCode::Char('j')), key(KeyCode::Down), key(KeyCode::Char('q'))]);

        let res = run_app(&mut terminal, &mut app, || events.pop_front().unwrap());

        assert!(res.is_ok());
        assert_eq!(app.scroll, 2);
    }

    #[test]
    fn test_event_loop_returns_read_errors() {
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        let mut app = App::new("p_0", &props());

        let res = run_app(&mut terminal, &mut app, || Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty gone")));

        let err = res.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
