use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

use crate::config::{LogFormat, LogSettings};

lazy_static! {
    pub static ref QUIZ_QUESTIONS_CNTR: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions handed out to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTION_CHANGES_CNTR: CounterVec = register_counter_vec!(
        "question_changes_total",
        "Number of created and deleted questions",
        &["change"]
    )
    .unwrap();
}

/// `LOG_LEVEL` takes precedence over `log.level`.
pub fn init_tracing(settings: &LogSettings) {
    let span_events = if settings.span_events {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    };
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter_layer);
    match settings.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_span_events(span_events))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_span_events(span_events))
            .init(),
    }
}
