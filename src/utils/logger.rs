use crate::utils::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Debug, Clone, Default)]
pub struct LogSettings<'a> {
    pub verbose: bool,
    pub json: bool,
    pub level: Option<&'a str>,
    pub error_log: Option<&'a Path>,
}

fn default_filter(settings: &LogSettings<'_>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if settings.verbose {
            "debug"
        } else {
            settings.level.unwrap_or("info")
        };
        EnvFilter::new(format!("scoft_eligibility={level},tower_http={level}"))
    })
}

/// Console output plus an optional ERROR-only file sink.
pub fn init_logger(settings: &LogSettings<'_>) -> Result<()> {
    let error_layer = match settings.error_log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(LevelFilter::ERROR),
            )
        }
        None => None,
    };

    let compact = (!settings.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    let json = settings.json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .json()
    });

    tracing_subscriber::registry()
        .with(default_filter(settings))
        .with(compact)
        .with(json)
        .with(error_layer)
        .init();

    Ok(())
}
