use chrono::Local;
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A log entry with timestamp and message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: &str, message: String) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S.%3f").to_string(),
            level: level.to_string().to_uppercase(),
            target: target.to_string(),
            message,
        }
    }

    pub fn format_for_display(&self) -> String {
        format!(
            "[{}] {} [{}] {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Thread-safe ring buffer for log entries
#[derive(Clone, Default)]
pub struct LogRingBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogRingBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn get_recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Split a compact-format line ("LEVEL target: message") into its parts
fn parse_compact_line(line: &str) -> (Level, &str, &str) {
    let (level, rest) = if let Some(rest) = line.strip_prefix("TRACE ") {
        (Level::TRACE, rest)
    } else if let Some(rest) = line.strip_prefix("DEBUG ") {
        (Level::DEBUG, rest)
    } else if let Some(rest) = line.strip_prefix("INFO ") {
        (Level::INFO, rest)
    } else if let Some(rest) = line.strip_prefix("WARN ") {
        (Level::WARN, rest)
    } else if let Some(rest) = line.strip_prefix("ERROR ") {
        (Level::ERROR, rest)
    } else {
        return (Level::INFO, "general", line);
    };

    let rest = rest.trim_start();
    match rest.find(':') {
        Some(colon) if !rest[..colon].contains(' ') => {
            (level, &rest[..colon], rest[colon + 1..].trim())
        }
        _ => (level, "general", rest),
    }
}

/// Writer feeding both the ring buffer and, when available, a log file
#[derive(Clone)]
pub struct DualWriter {
    buffer: LogRingBuffer,
    file: Option<Arc<Mutex<File>>>,
}

impl DualWriter {
    pub fn new(buffer: LogRingBuffer, file: Option<File>) -> Self {
        Self {
            buffer,
            file: file.map(|f| Arc::new(Mutex::new(f))),
        }
    }
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(message) = std::str::from_utf8(buf) {
            let message = message.trim();
            if !message.is_empty() {
                let (level, target, msg) = parse_compact_line(message);
                let entry = LogEntry::new(level, target, msg.to_string());

                if let Some(file) = &self.file {
                    let mut file = file.lock().unwrap_or_else(PoisonError::into_inner);
                    let _ = writeln!(file, "{}", entry.format_for_display());
                }
                self.buffer.push(entry);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Some(file) = &self.file {
            file.lock().unwrap_or_else(PoisonError::into_inner).flush()?;
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for DualWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Where logs ended up after initialization
#[derive(Clone)]
pub struct LoggingHandle {
    pub buffer: LogRingBuffer,
    pub log_path: Option<PathBuf>,
}

static LOGGING: OnceLock<LoggingHandle> = OnceLock::new();

fn open_log_file(log_dir: &Path) -> Option<(File, PathBuf)> {
    std::fs::create_dir_all(log_dir).ok()?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = log_dir.join(format!("opportunity-search_{}.log", timestamp));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    Some((file, path))
}

/// Initialize tracing into the ring buffer and a timestamped file in `log_dir`
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Calling this again
/// returns the handle from the first call.
pub fn init_tracing(log_dir: Option<&Path>) -> LoggingHandle {
    LOGGING
        .get_or_init(|| {
            use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

            let buffer = LogRingBuffer::new();
            let (file, log_path) = match log_dir.and_then(open_log_file) {
                Some((file, path)) => (Some(file), Some(path)),
                None => (None, None),
            };

            let fmt_layer = fmt::layer()
                .with_writer(DualWriter::new(buffer.clone(), file))
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .without_time()
                .compact();

            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

            // Another subscriber may already be installed (e.g. by a test harness)
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();

            tracing::info!(target: "logging", "Logging initialized");
            LoggingHandle { buffer, log_path }
        })
        .clone()
}

/// The ring buffer, if logging has been initialized
pub fn get_log_buffer() -> Option<LogRingBuffer> {
    LOGGING.get().map(|handle| handle.buffer.clone())
}
