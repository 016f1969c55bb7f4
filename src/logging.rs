use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

// Stdout belongs to the chat UI, so log lines go to a file under the data
// directory instead.
#[derive(Debug)]
struct SimpleLogger {
    log_path: PathBuf,
}

static LOGGER: OnceCell<SimpleLogger> = OnceCell::new();

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!("{} - {}\n", record.level(), record.args());
            let log_file = self.log_path.join("log.txt");

            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_file) {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

// Debug-level lines only show up when debug_mode is on in the settings.
pub fn level_filter(debug_mode: bool) -> LevelFilter {
    if debug_mode {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn init(data_dir: &Path, debug_mode: bool) -> Result<(), SetLoggerError> {
    let log_path = data_dir.to_path_buf();

    let _ = create_dir_all(&log_path);

    if LOGGER.set(SimpleLogger { log_path }).is_err() {
        // Already initialized; keep the first logger.
        return Ok(());
    }

    log::set_logger(LOGGER.get().expect("logger was just set"))
        .map(|()| log::set_max_level(level_filter(debug_mode)))
}
