//! Benchmarks for focus_mode dispatch performance.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use focus_mode::{
    Engine, EngineBuilder, InputEvent, KeyCode, KeyEvent, Modifiers, Position, traits::TextOps,
    word,
};
use ropey::Rope;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Rope-based buffer for benchmarking
struct BenchBuffer {
    rope: Rope,
}

impl BenchBuffer {
    fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    fn line_str(&self, line: u32) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        let mut s = self.rope.line(line as usize).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }
}

impl TextOps for BenchBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_len(&self, line: u32) -> u32 {
        self.line_str(line).graphemes(true).count() as u32
    }

    fn prev_word_start(&self, pos: Position) -> Position {
        Position {
            line: pos.line,
            col: word::prev_word_start(&self.line_str(pos.line), pos.col),
        }
    }
}

fn generate_sample_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        text.push_str(&format!(
            "This is paragraph {} of an uninterrupted writing session draft.\n",
            i + 1
        ));
    }
    text
}

fn key(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent {
        code: KeyCode::Char(c),
        mods: Modifiers::empty(),
    })
}

fn esc() -> InputEvent {
    InputEvent::Key(KeyEvent {
        code: KeyCode::Esc,
        mods: Modifiers::empty(),
    })
}

fn delete_word() -> InputEvent {
    InputEvent::Key(KeyEvent {
        code: KeyCode::Backspace,
        mods: Modifiers::CTRL,
    })
}

fn benchmark_typing_burst(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();
    engine.enable().unwrap();
    let cursor = Position { line: 50, col: 10 };

    c.bench_function("typing burst (pass-through)", |b| {
        b.iter(|| {
            for ch in "uninterrupted writing".chars() {
                let (disp, cmds) = engine.handle_event(&buffer, cursor, black_box(key(ch)));
                black_box((disp, cmds));
                let (disp, cmds) =
                    engine.handle_event(&buffer, cursor, black_box(InputEvent::TextChanged));
                black_box((disp, cmds));
            }
        });
    });
}

fn benchmark_blocked_keys(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();
    engine.enable().unwrap();
    let cursor = Position { line: 50, col: 10 };

    let blocked = [
        KeyCode::Backspace,
        KeyCode::Delete,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Left,
        KeyCode::Right,
    ];

    c.bench_function("blocked keys swallowed", |b| {
        b.iter(|| {
            for code in blocked {
                let input = InputEvent::Key(KeyEvent {
                    code,
                    mods: Modifiers::empty(),
                });
                let (disp, cmds) = engine.handle_event(&buffer, cursor, black_box(input));
                black_box((disp, cmds));
            }
        });
    });
}

fn benchmark_exit_threshold(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let buffer = BenchBuffer::new(&text);
    let mut engine = EngineBuilder::default().threshold(15).build();
    let cursor = Position { line: 50, col: 10 };

    c.bench_function("exit threshold (enable + 15 Esc)", |b| {
        b.iter(|| {
            let cmds = engine.enable().unwrap();
            black_box(cmds);
            for _ in 0..15 {
                let (disp, cmds) = engine.handle_event(&buffer, cursor, black_box(esc()));
                black_box((disp, cmds));
            }
        });
    });
}

fn benchmark_delete_burst(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();
    engine.enable().unwrap();
    let cursor = Position { line: 50, col: 30 };

    c.bench_function("delete-word burst", |b| {
        b.iter(|| {
            let (disp, cmds) = engine.handle_event(&buffer, cursor, black_box(delete_word()));
            black_box((disp, cmds));
            // Drain the burst so the next iteration deletes again.
            let _ = engine.handle_event(&buffer, cursor, black_box(InputEvent::TextChanged));
            let _ = engine.handle_event(&buffer, cursor, black_box(InputEvent::TextChanged));
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = benchmark_typing_burst,
              benchmark_blocked_keys,
              benchmark_exit_threshold,
              benchmark_delete_burst
}
criterion_main!(benches);
