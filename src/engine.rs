use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace};

use crate::key::{InputEvent, KeyCode, KeyEvent, Modifiers};
use crate::traits::TextOps;
use crate::types::{Command, Disposition, Mode, Position, Range};

/// Default number of exit-key presses required to leave writing mode.
pub const DEFAULT_EXIT_THRESHOLD: u32 = 15;

/// Configuration problems rejected when a writing session is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnableError {
    #[error("exit threshold must be at least 1")]
    ZeroThreshold,
    #[error("blocked key set must not be empty")]
    EmptyBlockedKeys,
    #[error("key {0:?} is bound to more than one role")]
    DuplicateBinding(KeyEvent),
}

/// Role a key holds in the session's binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Swallowed outright.
    Blocked,
    /// Counts toward the exit threshold.
    Exit,
    /// Deletes the previous word, once per burst.
    DeleteWord,
}

/// Per-session state. Created by [`Engine::enable`], dropped as a unit by
/// [`Engine::disable`].
#[derive(Debug, Clone)]
struct Session {
    escape_count: u32,
    delete_stage: u8,
    bindings: HashMap<KeyEvent, Binding>,
}

/// The focused-writing mode controller.
///
/// While a session is active the engine intercepts the configured key set:
/// blocked keys are swallowed, the exit key is counted against the
/// threshold, and the delete-word key is allowed once per writing burst.
/// All state lives in the engine; handlers are synchronous and total.
#[derive(Debug, Clone)]
pub struct Engine {
    threshold: u32,
    exit_key: KeyEvent,
    delete_word_key: KeyEvent,
    blocked_keys: Vec<KeyEvent>,
    mode: Mode,
    session: Option<Session>,
}

/// Read-only view of the engine for host status lines.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub enabled: bool,
    pub escape_count: u32,
    /// Exit-key presses left before the session ends.
    pub exit_presses_remaining: u32,
    pub delete_stage: u8,
}

pub struct EngineBuilder {
    threshold: u32,
    exit_key: KeyEvent,
    delete_word_key: KeyEvent,
    blocked_keys: Vec<KeyEvent>,
}

/// Keys blocked by default: everything that navigates or destroys text
/// instead of inserting it.
pub fn default_blocked_keys() -> Vec<KeyEvent> {
    [
        KeyCode::Backspace,
        KeyCode::Delete,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Home,
        KeyCode::End,
        KeyCode::PageUp,
        KeyCode::PageDown,
    ]
    .into_iter()
    .map(|code| KeyEvent {
        code,
        mods: Modifiers::empty(),
    })
    .collect()
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_EXIT_THRESHOLD,
            exit_key: KeyEvent {
                code: KeyCode::Esc,
                mods: Modifiers::empty(),
            },
            delete_word_key: KeyEvent {
                code: KeyCode::Backspace,
                mods: Modifiers::CTRL,
            },
            blocked_keys: default_blocked_keys(),
        }
    }
}

impl EngineBuilder {
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn exit_key(mut self, key: KeyEvent) -> Self {
        self.exit_key = key;
        self
    }

    pub fn delete_word_key(mut self, key: KeyEvent) -> Self {
        self.delete_word_key = key;
        self
    }

    pub fn blocked_keys(mut self, keys: Vec<KeyEvent>) -> Self {
        self.blocked_keys = keys;
        self
    }

    /// Builds a disabled engine. Configuration is validated by
    /// [`Engine::enable`], not here.
    pub fn build(self) -> Engine {
        Engine {
            threshold: self.threshold,
            exit_key: self.exit_key,
            delete_word_key: self.delete_word_key,
            blocked_keys: self.blocked_keys,
            mode: Mode::Normal,
            session: None,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let (escape_count, delete_stage) = match &self.session {
            Some(s) => (s.escape_count, s.delete_stage),
            None => (0, 0),
        };
        EngineSnapshot {
            mode: self.mode,
            enabled: self.session.is_some(),
            escape_count,
            exit_presses_remaining: self.threshold.saturating_sub(escape_count),
            delete_stage,
        }
    }

    /// Starts a writing session.
    ///
    /// Validates the configuration, resets both counters, registers the
    /// binding table and switches mode to [`Mode::Writing`]. Returns the
    /// commands the host must execute. Enabling an already-enabled engine
    /// rebuilds the session from scratch.
    pub fn enable(&mut self) -> Result<Vec<Command>, EnableError> {
        if self.threshold == 0 {
            return Err(EnableError::ZeroThreshold);
        }
        if self.blocked_keys.is_empty() {
            return Err(EnableError::EmptyBlockedKeys);
        }

        let mut bindings = HashMap::with_capacity(self.blocked_keys.len() + 2);
        for &key in &self.blocked_keys {
            if bindings.insert(key, Binding::Blocked).is_some() {
                return Err(EnableError::DuplicateBinding(key));
            }
        }
        if bindings.insert(self.exit_key, Binding::Exit).is_some() {
            return Err(EnableError::DuplicateBinding(self.exit_key));
        }
        if bindings.insert(self.delete_word_key, Binding::DeleteWord).is_some() {
            return Err(EnableError::DuplicateBinding(self.delete_word_key));
        }

        debug!(
            threshold = self.threshold,
            bound = bindings.len(),
            "writing session enabled"
        );
        self.session = Some(Session {
            escape_count: 0,
            delete_stage: 0,
            bindings,
        });
        self.mode = Mode::Writing;
        Ok(vec![Command::SwitchMode(Mode::Writing)])
    }

    /// Ends the writing session: the binding table is deregistered as a unit
    /// and mode switches to [`Mode::Normal`]. Disabling a disabled engine
    /// emits nothing.
    pub fn disable(&mut self) -> Vec<Command> {
        if self.session.take().is_none() {
            return vec![];
        }
        debug!("writing session disabled");
        self.mode = Mode::Normal;
        vec![Command::SwitchMode(Mode::Normal)]
    }

    /// Dispatches one input event through the session's binding table.
    ///
    /// `cursor` is the host's current cursor position; `text` answers the
    /// queries behind the delete-word action. While no session is active
    /// every event passes through untouched.
    pub fn handle_event<T: TextOps>(
        &mut self,
        text: &T,
        cursor: Position,
        input: InputEvent,
    ) -> (Disposition, Vec<Command>) {
        let Some(session) = self.session.as_mut() else {
            return (Disposition::PassThrough, vec![]);
        };

        match input {
            InputEvent::TextChanged => {
                if session.delete_stage > 0 {
                    session.delete_stage -= 1;
                    trace!(delete_stage = session.delete_stage, "text changed");
                }
                (Disposition::PassThrough, vec![])
            }
            InputEvent::Key(key) => {
                let binding = session.bindings.get(&key).copied();
                match binding {
                    None => (Disposition::PassThrough, vec![]),
                    Some(Binding::Blocked) => {
                        trace!(?key, "blocked key swallowed");
                        (Disposition::Intercepted, vec![])
                    }
                    Some(Binding::Exit) => {
                        session.escape_count += 1;
                        trace!(
                            escape_count = session.escape_count,
                            threshold = self.threshold,
                            "exit key"
                        );
                        if session.escape_count >= self.threshold {
                            return (Disposition::Intercepted, self.disable());
                        }
                        (Disposition::Intercepted, vec![])
                    }
                    Some(Binding::DeleteWord) => {
                        if session.delete_stage > 0 {
                            trace!(
                                delete_stage = session.delete_stage,
                                "delete-word ignored mid-burst"
                            );
                            return (Disposition::Intercepted, vec![]);
                        }
                        let end = text.clamp(cursor);
                        let start = text.prev_word_start(end);
                        if start == end {
                            // Nothing before the cursor; the burst stays unspent.
                            return (Disposition::Intercepted, vec![]);
                        }
                        session.delete_stage = 2;
                        debug!(?start, ?end, "previous word deleted");
                        (
                            Disposition::Intercepted,
                            vec![Command::Delete {
                                range: Range { start, end },
                            }],
                        )
                    }
                }
            }
        }
    }
}
