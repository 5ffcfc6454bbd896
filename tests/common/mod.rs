#![allow(dead_code)]

pub mod backend;
pub mod mock_server;
pub mod tracing;

use folio::services::time_source::TestTimeSource;
use folio::{Config, Interpreter, Profile};

/// Interpreter over the built-in profile with default config and a pinned clock.
pub fn interpreter() -> Interpreter {
    interpreter_with(&Config::default())
}

pub fn interpreter_with(config: &Config) -> Interpreter {
    tracing::init_tracing_from_env();
    Interpreter::new(Profile::builtin(), config, TestTimeSource::shared())
}

/// Scrollback text, one string per entry.
pub fn texts(interp: &Interpreter) -> Vec<String> {
    interp
        .scrollback()
        .entries()
        .iter()
        .map(|entry| entry.text.clone())
        .collect()
}

/// Entries after the most recent echo.
pub fn last_block(interp: &Interpreter) -> Vec<String> {
    let entries = interp.scrollback().entries();
    let start = entries
        .iter()
        .rposition(|entry| entry.is_input())
        .map(|index| index + 1)
        .unwrap_or(0);
    entries[start..].iter().map(|entry| entry.text.clone()).collect()
}
