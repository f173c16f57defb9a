//! Terminal UI example using crossterm and ratatui.
//!
//! This example demonstrates how to integrate focus_mode into a terminal
//! application: a small writing pad where a session keeps you typing until
//! you press Esc fifteen times. Run with: cargo run --example tui_crossterm

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use focus_mode::{
    Command, Disposition, Engine, InputEvent, KeyCode, KeyEvent, Mode, Modifiers, Position,
    traits::TextOps,
    word,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use ropey::Rope;
use std::io;
use unicode_segmentation::UnicodeSegmentation;

/// Text buffer implementation using ropey
struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    fn new() -> Self {
        Self {
            rope: Rope::from(
                "Welcome to the focus_mode demo.\n\nPress 'w' to start a writing session.\nWhile writing, Backspace and the arrow keys are swallowed;\nCtrl+Backspace deletes the previous word once per burst;\nfifteen Esc presses end the session.\nPress 'q' to quit.\n",
            ),
        }
    }

    fn apply_command(&mut self, cmd: &Command) {
        if let Command::Delete { range } = cmd {
            let start_idx = self.position_to_char_idx(range.start);
            let end_idx = self.position_to_char_idx(range.end);
            self.rope.remove(start_idx..end_idx);
        }
    }

    fn insert_char(&mut self, pos: Position, ch: char) {
        let idx = self.position_to_char_idx(pos);
        self.rope.insert_char(idx, ch);
    }

    fn position_to_char_idx(&self, pos: Position) -> usize {
        if pos.line >= self.rope.len_lines() as u32 {
            return self.rope.len_chars();
        }
        let line_start_idx = self.rope.line_to_char(pos.line as usize);
        let mut char_idx = line_start_idx;
        for (char_count, grapheme) in self.line_text(pos.line).graphemes(true).enumerate() {
            if char_count >= pos.col as usize {
                break;
            }
            char_idx += grapheme.chars().count();
        }
        char_idx
    }

    fn line_text(&self, line: u32) -> String {
        if line < self.rope.len_lines() as u32 {
            let mut s = self.rope.line(line as usize).to_string();
            if s.ends_with('\n') {
                s.pop();
            }
            s
        } else {
            String::new()
        }
    }
}

impl TextOps for RopeBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_len(&self, line: u32) -> u32 {
        self.line_text(line).graphemes(true).count() as u32
    }

    fn prev_word_start(&self, pos: Position) -> Position {
        Position {
            line: pos.line,
            col: word::prev_word_start(&self.line_text(pos.line), pos.col),
        }
    }
}

struct App {
    engine: Engine,
    buffer: RopeBuffer,
    cursor: Position,
    message: String,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        let mut app = Self {
            engine: Engine::new(),
            buffer: RopeBuffer::new(),
            cursor: Position::ZERO,
            message: String::new(),
            should_quit: false,
        };
        app.update_message();
        app
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        let Some(input) = convert_crossterm_event(event) else {
            return;
        };

        let (disposition, commands) = self.engine.handle_event(&self.buffer, self.cursor, input);
        for cmd in &commands {
            match cmd {
                Command::Delete { range } => {
                    self.buffer.apply_command(cmd);
                    self.cursor = range.start;
                    // The deletion is a text change like any other.
                    let _ = self
                        .engine
                        .handle_event(&self.buffer, self.cursor, InputEvent::TextChanged);
                }
                Command::SwitchMode(_) => {}
            }
        }

        if disposition == Disposition::PassThrough {
            self.handle_host_key(input);
        }
        self.update_message();
    }

    /// Default key handling: insertion while writing, navigation and
    /// session control while in normal mode.
    fn handle_host_key(&mut self, input: InputEvent) {
        let InputEvent::Key(key) = input else { return };

        if let KeyCode::Char(c) = key.code {
            if self.engine.mode() == Mode::Normal {
                match c {
                    'q' => self.should_quit = true,
                    'w' => {
                        let _ = self.engine.enable().expect("default configuration is valid");
                    }
                    _ => {}
                }
                return;
            }
            self.buffer.insert_char(self.cursor, c);
            self.cursor.col += 1;
            self.notify_text_changed();
            return;
        }

        match key.code {
            KeyCode::Enter if self.engine.mode() == Mode::Writing => {
                self.buffer.insert_char(self.cursor, '\n');
                self.cursor = Position {
                    line: self.cursor.line + 1,
                    col: 0,
                };
                self.notify_text_changed();
            }
            KeyCode::Left => self.cursor.col = self.cursor.col.saturating_sub(1),
            KeyCode::Right => {
                self.cursor.col = (self.cursor.col + 1).min(self.buffer.line_len(self.cursor.line));
            }
            KeyCode::Up => {
                self.cursor.line = self.cursor.line.saturating_sub(1);
                self.cursor = self.buffer.clamp(self.cursor);
            }
            KeyCode::Down => {
                self.cursor.line =
                    (self.cursor.line + 1).min(self.buffer.line_count().saturating_sub(1));
                self.cursor = self.buffer.clamp(self.cursor);
            }
            _ => {}
        }
    }

    fn notify_text_changed(&mut self) {
        let _ = self
            .engine
            .handle_event(&self.buffer, self.cursor, InputEvent::TextChanged);
    }

    fn update_message(&mut self) {
        let snapshot = self.engine.snapshot();
        self.message = match snapshot.mode {
            Mode::Writing => format!(
                "-- WRITING --  Esc {}/{} to exit  ·  delete burst {}",
                snapshot.escape_count,
                snapshot.escape_count + snapshot.exit_presses_remaining,
                snapshot.delete_stage,
            ),
            Mode::Normal => "-- NORMAL --  w: write  q: quit".to_string(),
        };
    }
}

fn convert_crossterm_event(event: CKeyEvent) -> Option<InputEvent> {
    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }

    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };

    // Shifted characters arrive pre-composed; drop the modifier so plain
    // bindings still match.
    let mods = if matches!(code, KeyCode::Char(_)) {
        mods - Modifiers::SHIFT
    } else {
        mods
    };

    Some(InputEvent::Key(KeyEvent { code, mods }))
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let mut lines = vec![];
    for i in 0..app.buffer.line_count() {
        lines.push(Line::from(app.buffer.line_text(i)));
    }

    let text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("focus_mode demo"),
    );
    f.render_widget(text, chunks[0]);

    // Status line
    let status = Paragraph::new(app.message.as_str())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    // Set cursor position
    f.set_cursor(
        chunks[0].x + 1 + app.cursor.col as u16,
        chunks[0].y + 1 + app.cursor.line as u16,
    );
}

fn main() -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
