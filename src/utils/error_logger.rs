// src/utils/error_logger.rs
use std::collections::VecDeque;
use std::sync::{Mutex, Once};

use env_logger::Env;
use log::{Level, LevelFilter, Log, Metadata, Record};

// Maximum number of warnings and errors to keep in history
const MAX_ERROR_HISTORY: usize = 100;

static HISTORY: Mutex<History> = Mutex::new(History::new(MAX_ERROR_HISTORY));
static INIT: Once = Once::new();

struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    const fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::new(), capacity }
    }

    fn push(&mut self, entry: String) {
        self.entries.push_back(entry);
        // Remove oldest if exceeding capacity
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

/// env_logger backend that also remembers warnings and errors.
struct HistoryLogger {
    inner: env_logger::Logger,
}

impl Log for HistoryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn || self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if record.level() <= Level::Warn {
            if let Ok(mut history) = HISTORY.lock() {
                history.push(format!("[{}] {}", record.target(), record.args()));
            }
        }
        if self.inner.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the logger. `RUST_LOG` selects what is printed, `info` by default.
/// Calling this again is a no-op, as is calling it after another logger was installed.
pub fn init() {
    INIT.call_once(|| {
        let inner = env_logger::Builder::from_env(Env::default().default_filter_or("info")).build();
        let max_level = inner.filter().max(LevelFilter::Warn);
        if log::set_boxed_logger(Box::new(HistoryLogger { inner })).is_ok() {
            log::set_max_level(max_level);
        }
    });
}

/// Recent warnings and errors, oldest first, formatted as `"[target] message"`.
pub fn warning_history() -> Vec<String> {
    match HISTORY.lock() {
        Ok(history) => history.entries.iter().cloned().collect(),
        Err(_) => Vec::new(),
    }
}

pub fn clear_history() {
    if let Ok(mut history) = HISTORY.lock() {
        history.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(format!("entry {i}"));
        }
        let entries: Vec<&String> = history.entries.iter().collect();
        assert_eq!(entries, ["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn test_warnings_are_recorded_after_init() {
        init();
        init();
        log::warn!(target: "error_logger_test", "water ahead {}", 17);
        log::info!(target: "error_logger_test", "not kept");

        let history = warning_history();
        assert!(history.iter().any(|entry| entry == "[error_logger_test] water ahead 17"));
        assert!(!history.iter().any(|entry| entry.contains("not kept")));
    }
}
