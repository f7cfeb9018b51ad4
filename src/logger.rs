use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();
static LEVEL: OnceLock<Level> = OnceLock::new();

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn from_env() -> Level {
        match std::env::var("PMA_MIGRATE_LOG").unwrap_or_default().to_lowercase().as_str() {
            "error" => Level::Error,
            "warn" | "warning" => Level::Warn,
            "debug" => Level::Debug,
            _ => Level::Info,
        }
    }
}

/// Open the log file in append mode. Logging is best-effort; callers ignore
/// a failed init and the tool keeps writing progress to stdout regardless.
pub fn init(log_path: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let path = log_path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = LOG_FILE.set(Mutex::new(file));
    let _ = LEVEL.set(Level::from_env());
    info(&format!("logging initialized: {}", path.display()));
    Ok(path.to_path_buf())
}

fn enabled(level: Level) -> bool {
    level >= *LEVEL.get_or_init(Level::from_env)
}

fn now_ts() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

fn write_line(tag: &str, msg: &str) {
    if let Some(m) = LOG_FILE.get() {
        if let Ok(mut f) = m.lock() {
            let _ = writeln!(f, "{} [{}] {}", now_ts(), tag, msg);
            let _ = f.flush();
        }
    }
}

pub fn error(msg: &str) {
    if enabled(Level::Error) { write_line("ERROR", msg); }
}
pub fn warn(msg: &str) {
    if enabled(Level::Warn) { write_line("WARN", msg); }
}
pub fn info(msg: &str) {
    if enabled(Level::Info) { write_line("INFO", msg); }
}
pub fn debug(msg: &str) {
    if enabled(Level::Debug) { write_line("DEBUG", msg); }
}
