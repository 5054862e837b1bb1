use std::{any::Any, backtrace::Backtrace, panic::PanicHookInfo};

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, defaults::DEFAULT_RUST_LOG};

/// Installs the global subscriber and the panic hook. A second call is a
/// no-op, so tests and embedders that already own a subscriber keep it.
pub fn init_tracing(cfg: &LoggingConfig) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = resolve_filter(cfg, env.as_deref());

    if fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        return;
    }

    if let Some(directives) = rejected {
        tracing::warn!(
            directives = %directives,
            fallback = DEFAULT_RUST_LOG,
            "ignoring unparseable log filter"
        );
    }
    install_panic_hook();
}

/// `RUST_LOG` wins over `logging.rust_log`; directives that do not parse fall
/// back to the built-in default and are handed back for a warning.
fn resolve_filter(cfg: &LoggingConfig, env: Option<&str>) -> (EnvFilter, Option<String>) {
    let directives = env
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(cfg.rust_log.as_str());

    match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(_) => (EnvFilter::new(DEFAULT_RUST_LOG), Some(directives.to_string())),
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info: &PanicHookInfo<'_>| {
        let location = info
            .location()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string());

        tracing::error!(
            panic = %panic_message(info.payload()),
            location = %location,
            backtrace = %Backtrace::capture(),
            "panic"
        );
    }));
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
