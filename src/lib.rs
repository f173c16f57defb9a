pub mod engine;
pub mod key;
pub mod traits;
pub mod types;
pub mod word;

pub use crate::engine::{
    DEFAULT_EXIT_THRESHOLD, EnableError, Engine, EngineBuilder, EngineSnapshot,
    default_blocked_keys,
};
pub use crate::key::{InputEvent, KeyCode, KeyEvent, Modifiers};
pub use crate::traits::TextOps;
pub use crate::types::{Command, Disposition, Mode, Position, Range};
