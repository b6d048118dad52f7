use crate::models::NotificationItem;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};
use std::env;
use std::io::Write;

pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn init_logging() -> Result<(), SetLoggerError> {
    let env = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_level = parse_level(&env);

    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);

        match record.level() {
            Level::Info => {
                writeln!(buf, "{} [INFO] [{}]: {}", timestamp, target, record.args())
            }
            level => {
                writeln!(
                    buf,
                    "{} [{}] [{}:{}] {}: {}",
                    timestamp,
                    level,
                    file,
                    line,
                    target,
                    record.args()
                )
            }
        }
    });

    // GUI stack is chatty at debug
    if env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("iced", LevelFilter::Warn);
        builder.filter_module("wgpu", LevelFilter::Warn);
        builder.filter_module("naga", LevelFilter::Warn);
        builder.filter_module("cosmic_text", LevelFilter::Warn);
    }

    builder.filter_level(log_level).target(Target::Stdout).try_init()
}

pub fn log_error_with_context(error: &anyhow::Error, context: &str) {
    log::error!("[{}] {}", context, error);

    let mut source = error.source();
    while let Some(err) = source {
        log::error!("  Caused by: {}", err);
        source = err.source();
    }
}

/// One line per queue transition. Message text stays at trace level since
/// it may carry user content.
pub fn log_notification_event(event: &str, item: &NotificationItem) {
    log::debug!(
        "[Notification] {} {} {} ({})",
        item.variant_name(),
        item.id(),
        event,
        item.kind().as_str()
    );
    log::trace!("[Notification] {} text: {}", item.id(), item.message());
}
