use log::{Level, LevelFilter, Log, Metadata, Record};
use tokio::sync::mpsc;

/// Routes `log` records into a channel the UI drains each frame, so nothing
/// is printed over the alternate screen.
pub struct ChannelLogger {
    level: LevelFilter,
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelLogger {
    pub fn new(level: LevelFilter, tx: mpsc::UnboundedSender<String>) -> Self {
        Self { level, tx }
    }
}

impl Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = match record.level() {
            Level::Error | Level::Warn => format!("{}: {}", record.level(), record.args()),
            _ => record.args().to_string(),
        };
        // Receiver gone means the UI is shutting down.
        let _ = self.tx.send(line);
    }

    fn flush(&self) {}
}

/// Install the channel logger as the global logger and hand back the
/// receiving end.
pub fn init(level: LevelFilter) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    if log::set_boxed_logger(Box::new(ChannelLogger::new(level, tx))).is_ok() {
        log::set_max_level(level);
    }
    rx
}
