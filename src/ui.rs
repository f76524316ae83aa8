use crate::config::Config;
use crate::markers::Marker;
use crate::model::{DayKey, Todo, TodoId};
use crate::session::{EditState, Session, SubmitOutcome};
use anyhow::Result;
use chrono::{Datelike, Duration as ChronoDuration, Local, Months, NaiveDate, Weekday};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::collections::BTreeMap;
use std::io::{stdout, Stdout};
use std::time::Duration;

const SKY_BLUE: Color = Color::Rgb(135, 206, 235);
const DOT: &str = "•";

pub fn run(session: Session, config: Config, cursor: NaiveDate) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(session, config, cursor, Local::now().date_naive());
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

pub fn day_key(date: NaiveDate) -> DayKey {
    date.format("%Y-%m-%d").to_string()
}

struct App {
    session: Session,
    config: Config,
    today: NaiveDate,
    cursor: NaiveDate,
    focus: Focus,
    mode: Mode,
    list_state: ListState,
    status: String,
}

enum Mode {
    Normal,
    ConfirmDelete { todo_id: TodoId },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Calendar,
    Input,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Calendar => Focus::Input,
            Focus::Input => Focus::List,
            Focus::List => Focus::Calendar,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Calendar => Focus::List,
            Focus::Input => Focus::Calendar,
            Focus::List => Focus::Input,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Focus::Calendar => "calendar",
            Focus::Input => "input",
            Focus::List => "list",
        }
    }
}

impl App {
    fn new(session: Session, config: Config, cursor: NaiveDate, today: NaiveDate) -> Self {
        let status = if session.selected_day().is_empty() {
            "Pick a day on the calendar (Enter) and start typing".to_string()
        } else {
            format!("Selected {}", session.selected_day())
        };
        App {
            session,
            config,
            today,
            cursor,
            focus: Focus::Calendar,
            mode: Mode::Normal,
            list_state: ListState::default(),
            status,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Dispatches one key. Returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if let Mode::ConfirmDelete { .. } = self.mode {
            self.handle_confirm_key(key);
            return false;
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return false;
            }
            KeyCode::Esc => {
                if self.session.cancel_edit() {
                    self.status = "Edit canceled".into();
                } else if self.focus == Focus::Input {
                    self.focus = Focus::Calendar;
                }
                return false;
            }
            _ => {}
        }
        let quit = match self.focus {
            Focus::Calendar => self.handle_calendar_key(key),
            Focus::Input => {
                self.handle_input_key(key);
                false
            }
            Focus::List => self.handle_list_key(key),
        };
        self.clamp_selection();
        quit
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Left | KeyCode::Char('h') => self.shift_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.shift_cursor(-7),
            KeyCode::Down | KeyCode::Char('j') => self.shift_cursor(7),
            KeyCode::PageUp | KeyCode::Char('[') => self.shift_month(-1),
            KeyCode::PageDown | KeyCode::Char(']') => self.shift_month(1),
            KeyCode::Char('t') => self.cursor = self.today,
            KeyCode::Enter | KeyCode::Char(' ') => self.press_day(),
            KeyCode::Char('i') | KeyCode::Char('a') => self.focus = Focus::Input,
            _ => {}
        }
        false
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter && !key.modifiers.contains(KeyModifiers::ALT) {
            self.submit();
            return;
        }
        let input = self.session.input_mut();
        match key.code {
            KeyCode::Enter => input.insert_char('\n'),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Up => input.move_up(),
            KeyCode::Down => input.move_down(),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(),
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    input.insert_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => self.prev_todo(),
            KeyCode::Down | KeyCode::Char('j') => self.next_todo(),
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = self.current_todo_id() {
                    if self.is_being_edited(&id) {
                        self.status = "Finish or cancel the edit first (Esc)".into();
                        return false;
                    }
                    self.session.toggle(&id);
                    let done = self
                        .session
                        .store()
                        .get(&id)
                        .map(|t| t.completed)
                        .unwrap_or(false);
                    self.status = if done {
                        "Marked done".into()
                    } else {
                        "Marked not done".into()
                    };
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.current_todo_id() {
                    self.session.edit_todo(&id);
                    self.focus = Focus::Input;
                    self.status = "Editing: Enter saves, Esc cancels".into();
                } else {
                    self.status = "No task selected to edit".into();
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.current_todo_id() {
                    if self.is_being_edited(&id) {
                        self.status = "Finish or cancel the edit first (Esc)".into();
                    } else if self.config.confirm_delete {
                        self.status = "Delete? (y to confirm, n/Esc to cancel)".into();
                        self.mode = Mode::ConfirmDelete { todo_id: id };
                    } else {
                        self.delete(&id);
                    }
                } else {
                    self.status = "No task selected to delete".into();
                }
            }
            _ => {}
        }
        false
    }

    /// The edited item shows the input in place of its controls, so it can
    /// be neither toggled nor deleted until the edit ends.
    fn is_being_edited(&self, id: &str) -> bool {
        self.session.editing_id() == Some(id)
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let todo_id = match &self.mode {
            Mode::ConfirmDelete { todo_id } => todo_id.clone(),
            Mode::Normal => return,
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.delete(&todo_id);
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Delete canceled".into();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
        self.clamp_selection();
    }

    fn press_day(&mut self) {
        self.session.select_day(day_key(self.cursor));
        self.list_state.select(Some(0));
        self.status = format!("Selected {}", self.session.selected_day());
    }

    fn submit(&mut self) {
        self.status = match self.session.submit() {
            SubmitOutcome::Added(_) => {
                let count = self.visible_len();
                self.list_state.select(Some(count.saturating_sub(1)));
                "Added task".into()
            }
            SubmitOutcome::Updated(_) => "Updated task".into(),
            SubmitOutcome::Vanished(_) => "Task no longer exists; edit discarded".into(),
            SubmitOutcome::Ignored => "Type something first".into(),
        };
    }

    fn delete(&mut self, id: &str) {
        if self.session.remove(id) {
            self.status = "Deleted task".into();
        } else {
            self.status = "Task already gone".into();
        }
    }

    fn shift_cursor(&mut self, days: i64) {
        if let Some(date) = self.cursor.checked_add_signed(ChronoDuration::days(days)) {
            self.cursor = date;
        }
    }

    fn shift_month(&mut self, months: i32) {
        let shifted = if months < 0 {
            self.cursor
                .checked_sub_months(Months::new(months.unsigned_abs()))
        } else {
            self.cursor.checked_add_months(Months::new(months as u32))
        };
        if let Some(date) = shifted {
            self.cursor = date;
        }
    }

    fn visible_len(&self) -> usize {
        self.session.visible_todos().count()
    }

    fn current_todo_id(&self) -> Option<TodoId> {
        let idx = self.list_state.selected().unwrap_or(0);
        self.session.visible_todos().nth(idx).map(|t| t.id.clone())
    }

    fn prev_todo(&mut self) {
        let idx = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(idx.saturating_sub(1)));
    }

    fn next_todo(&mut self) {
        let idx = self.list_state.selected().unwrap_or(0);
        if idx + 1 < self.visible_len() {
            self.list_state.select(Some(idx + 1));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let idx = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(idx));
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(layout[1]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(body[1]);

        let markers = self.session.markers();
        self.draw_calendar(f, body[0], &markers);
        self.draw_form(f, right[0]);
        self.draw_todos(f, right[1]);
        self.draw_footer(f, layout[2]);

        if let Mode::ConfirmDelete { todo_id } = &self.mode {
            self.draw_confirm(f, todo_id);
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let selected = if self.session.selected_day().is_empty() {
            "no day selected".to_string()
        } else {
            self.session.selected_day().to_string()
        };
        let mut spans = vec![
            Span::styled(
                "daymark ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(selected, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  •  "),
            Span::styled(
                if self.session.store().is_empty() {
                    "no tasks yet".to_string()
                } else {
                    format!("{} task(s) total", self.session.store().len())
                },
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("focus {}", self.focus.label()),
                Style::default().fg(Color::Magenta),
            ),
        ];
        if let EditState::Editing(_) = self.session.edit_state() {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                "editing",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_calendar(
        &self,
        f: &mut ratatui::Frame<'_>,
        area: Rect,
        markers: &BTreeMap<DayKey, Marker>,
    ) {
        let focused = self.focus == Focus::Calendar;
        let cursor = self.cursor;
        let month_start =
            NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), 1).unwrap_or(cursor);
        let days = days_in_month(month_start.year(), month_start.month());
        let week_start = self.config.week_start.weekday();
        let start_offset = days_from(week_start, month_start.weekday());

        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            format!("{} {}", month_start.format("%B"), month_start.year()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        let header_spans: Vec<Span<'static>> = week_headings(week_start)
            .into_iter()
            .map(|h| Span::styled(format!(" {:<3}", h), Style::default().fg(Color::Gray)))
            .collect();
        lines.push(Line::from(header_spans));

        let mut day: i32 = 1 - start_offset as i32;
        while day <= days as i32 {
            let mut spans = Vec::new();
            for _ in 0..7 {
                let date = if day < 1 || day > days as i32 {
                    None
                } else {
                    NaiveDate::from_ymd_opt(month_start.year(), month_start.month(), day as u32)
                };
                match date {
                    Some(date) => {
                        let marker = markers.get(&day_key(date)).copied().unwrap_or_default();
                        spans.extend(self.calendar_cell(date, marker, focused));
                    }
                    None => spans.push(Span::raw("    ")),
                }
                day += 1;
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(DOT, Style::default().fg(Color::Red)),
            Span::styled(" has tasks   ", Style::default().fg(Color::DarkGray)),
            Span::styled("  ", Style::default().bg(SKY_BLUE)),
            Span::styled(" selected", Style::default().fg(Color::DarkGray)),
        ]));

        let block = Block::default()
            .title(Span::styled(
                "Calendar",
                Style::default()
                    .fg(if focused { Color::Cyan } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn calendar_cell(&self, date: NaiveDate, marker: Marker, focused: bool) -> Vec<Span<'static>> {
        let mut style = Style::default().fg(Color::Gray);
        if date == self.today {
            style = style.fg(Color::LightYellow).add_modifier(Modifier::BOLD);
        }
        if marker.selected {
            style = style.bg(SKY_BLUE).fg(Color::Black);
        }
        if date == self.cursor {
            style = style.add_modifier(if focused {
                Modifier::REVERSED
            } else {
                Modifier::UNDERLINED
            });
        }
        let dot = if marker.marked { DOT } else { " " };
        vec![
            Span::raw(" "),
            Span::styled(format!("{:>2}", date.day()), style),
            Span::styled(dot, Style::default().fg(Color::Red)),
        ]
    }

    fn draw_form(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Input;
        let label_width = u16::try_from(self.config.submit_label.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_mul(2)
            .saturating_add(4);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(label_width)])
            .split(area);

        let input = self.session.input();
        let lines: Vec<Line<'static>> = if input.value().is_empty() {
            let caret = if focused { "▌" } else { "" };
            vec![Line::from(vec![
                Span::styled(caret, Style::default().fg(Color::Cyan)),
                Span::styled(
                    self.config.placeholder.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ])]
        } else {
            let text = if focused {
                input.with_caret()
            } else {
                input.value().to_string()
            };
            text.split('\n')
                .map(|line| {
                    Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(if focused { Color::Cyan } else { Color::White }),
                    ))
                })
                .collect()
        };
        let title = match self.session.edit_state() {
            EditState::Editing(_) => "Edit Task",
            EditState::Idle => "New Task",
        };
        let field = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(if focused { Color::Cyan } else { Color::Gray })
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused {
                    Color::Cyan
                } else {
                    Color::DarkGray
                })),
        );
        f.render_widget(field, chunks[0]);

        let button = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                self.config.submit_label.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(SKY_BLUE)),
        )
        .style(Style::default().bg(SKY_BLUE));
        f.render_widget(button, chunks[1]);
    }

    fn draw_todos(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::List;
        let editing = self.session.editing_id().map(str::to_string);
        let selected_idx = self.list_state.selected();
        let items: Vec<ListItem<'static>> = self
            .session
            .visible_todos()
            .enumerate()
            .map(|(idx, todo)| {
                if editing.as_deref() == Some(todo.id.as_str()) {
                    editing_item(self.session.input().value())
                } else {
                    todo_item(todo, focused && selected_idx == Some(idx))
                }
            })
            .collect();
        let count = items.len();
        let day = self.session.selected_day();
        let title = if day.is_empty() {
            format!("Tasks without a day ({})", count)
        } else {
            format!("Tasks for {} ({})", day, count)
        };
        let items = if items.is_empty() {
            vec![ListItem::new(Span::styled(
                "No tasks",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            items
        };

        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default()
                    .fg(if focused { Color::Cyan } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let mut list = List::new(items).block(block);
        if focused {
            list = list.highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)));
        }
        if count == 0 {
            self.list_state.select(None);
        }
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, bottom[0]);

        let detail = Paragraph::new(self.day_summary()).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("Day"),
        );
        f.render_widget(detail, bottom[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color));
        let mut spans = vec![key("Tab", Color::LightCyan), Span::raw(" focus  ")];
        match self.focus {
            Focus::Calendar => spans.extend([
                key("←↑↓→ / h j k l", Color::LightCyan),
                Span::raw(" move  "),
                key("[ ]", Color::LightCyan),
                Span::raw(" month  "),
                key("t", Color::LightCyan),
                Span::raw(" today  "),
                key("Enter", Color::LightGreen),
                Span::raw(" select day  "),
                key("q", Color::LightRed),
                Span::raw(" quit"),
            ]),
            Focus::Input => spans.extend([
                key("Enter", Color::LightGreen),
                Span::raw(" save  "),
                key("Alt+Enter", Color::LightCyan),
                Span::raw(" newline  "),
                key("Esc", Color::LightRed),
                Span::raw(" cancel"),
            ]),
            Focus::List => spans.extend([
                key("↑↓ / j k", Color::LightCyan),
                Span::raw(" browse  "),
                key("Space", Color::LightGreen),
                Span::raw(" done  "),
                key("e", Color::LightYellow),
                Span::raw(" edit  "),
                key("d", Color::LightRed),
                Span::raw(" delete  "),
                key("q", Color::LightRed),
                Span::raw(" quit"),
            ]),
        }
        Line::from(spans)
    }

    fn day_summary(&self) -> Line<'static> {
        let (total, done) = self
            .session
            .visible_todos()
            .fold((0, 0), |(total, done), t| {
                (total + 1, done + usize::from(t.completed))
            });
        Line::from(vec![
            Span::styled(
                format!("{} task(s)", total),
                Style::default().fg(Color::White),
            ),
            Span::raw("  "),
            Span::styled(format!("{} done", done), Style::default().fg(Color::Green)),
        ])
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, todo_id: &str) {
        let area = centered_rect(50, 30, f.size());
        let text = self
            .session
            .store()
            .get(todo_id)
            .map(|t| first_line(&t.text))
            .unwrap_or_else(|| todo_id.to_string());
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", text),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(28)
}

/// Number of days from `start` forward to `day` within one week.
fn days_from(start: Weekday, day: Weekday) -> u32 {
    (7 + day.num_days_from_monday() - start.num_days_from_monday()) % 7
}

fn week_headings(start: Weekday) -> Vec<&'static str> {
    let mut day = start;
    let mut out = Vec::with_capacity(7);
    for _ in 0..7 {
        out.push(match day {
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
            Weekday::Sun => "Su",
        });
        day = day.succ();
    }
    out
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

fn todo_item(todo: &Todo, selected: bool) -> ListItem<'static> {
    let check = if todo.completed { "[x] " } else { "[ ] " };
    let text_style = if todo.completed {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };
    let mut lines = Vec::new();
    for (idx, line) in todo.text.split('\n').enumerate() {
        let prefix = if idx == 0 {
            Span::styled(check, Style::default().fg(Color::LightGreen))
        } else {
            Span::raw("    ")
        };
        let mut spans = vec![prefix, Span::styled(line.to_string(), text_style)];
        if idx == 0 && selected {
            spans.push(Span::styled(
                "  (e)dit (d)elete",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }
    ListItem::new(lines)
}

fn editing_item(buffer: &str) -> ListItem<'static> {
    let style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::ITALIC);
    let lines: Vec<Line<'static>> = buffer
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            let prefix = if idx == 0 { "✎   " } else { "    " };
            Line::from(vec![
                Span::styled(prefix, Style::default().fg(Color::LightYellow)),
                Span::styled(line.to_string(), style),
            ])
        })
        .collect();
    ListItem::new(lines)
}
