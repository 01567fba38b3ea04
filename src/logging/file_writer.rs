//! tracing integration
//!
//! Routes `tracing` events from a host application into the level files:
//! TRACE and DEBUG go to debug, INFO to info, WARN to warning, ERROR to error.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::level::LogLevel;

use super::Logger;

/// Writer that appends each formatted event line to one level file
pub struct LevelWriter {
    logger: Arc<Logger>,
    level: LogLevel,
}

impl Write for LevelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines() {
            let line = line.trim_end();
            if !line.trim_start().is_empty() {
                self.logger.log_level(self.level, line);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writer factory for tracing-subscriber, picking the file from the event level
#[derive(Debug, Clone)]
pub struct LevelMakeWriter {
    logger: Arc<Logger>,
}

impl LevelMakeWriter {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    fn writer(&self, level: LogLevel) -> LevelWriter {
        LevelWriter {
            logger: Arc::clone(&self.logger),
            level,
        }
    }
}

impl<'a> MakeWriter<'a> for LevelMakeWriter {
    type Writer = LevelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(LogLevel::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.writer(LogLevel::from(*meta.level()))
    }
}

/// Whether an event target belongs to this crate (`tierlog` or `tierlog::...`)
fn is_own_target(target: &str) -> bool {
    let own = env!("CARGO_CRATE_NAME");
    target
        .strip_prefix(own)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// fmt layer writing into the level files
///
/// The line timestamp and level come from the logger, so the layer prints
/// neither. Events from this crate are excluded to keep absorbed write
/// failures from feeding back into the files.
pub fn tracing_layer<S>(logger: Arc<Logger>) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(LevelMakeWriter::new(logger))
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(true)
        .with_filter(filter_fn(|meta| !is_own_target(meta.target())))
}

/// Install a global subscriber that logs through `logger`
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing(logger: Arc<Logger>) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_layer(logger))
        .try_init()
        .context("Failed to install tracing subscriber")
}
