use std::io::{self, Write};
use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Stream the log lines go to. Interactive programs use stderr so the lines
/// stay out of their prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

pub struct Logger {
    prefix: Option<String>,
    target: LogTarget,
}

impl Logger {
    fn new(prefix: Option<String>, target: LogTarget) -> Self {
        Self { prefix, target }
    }

    pub fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
        } else {
            format!("[{}][{}:{}] {}", timestamp, file_name, line, message)
        }
    }

    pub fn write_line<W: Write>(&self, out: &mut W, file: &str, line: u32, message: &str) {
        // A closed stream must not take the program down with it.
        let _ = writeln!(out, "{}", self.format_line(file, line, message));
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        match self.target {
            LogTarget::Stdout => self.write_line(&mut io::stdout().lock(), file, line, message),
            LogTarget::Stderr => self.write_line(&mut io::stderr().lock(), file, line, message),
        }
    }
}

pub fn init_logger(prefix: Option<String>) {
    init_logger_with_target(prefix, LogTarget::Stdout);
}

pub fn init_logger_with_target(prefix: Option<String>, target: LogTarget) {
    LOGGER.get_or_init(|| Logger::new(prefix, target));
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}
