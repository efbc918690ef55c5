// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use gatehouse_server_config::{LogFormat, LoggingConfig};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used before the configured level is known.
pub fn startup_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Runs `f` under a temporary subscriber so config loading is logged before
/// the configured subscriber can be installed.
pub fn during_startup<W, T>(filter: EnvFilter, make_writer: W, f: impl FnOnce() -> T) -> T
where
	W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
	let subscriber = tracing_subscriber::registry().with(filter).with(
		tracing_subscriber::fmt::layer()
			.with_ansi(false)
			.with_writer(make_writer),
	);
	tracing::subscriber::with_default(subscriber, f)
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so stdout carries only the decision.
pub fn init(config: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

	let (pretty, json) = match config.format {
		LogFormat::Pretty => (
			Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
			None,
		),
		LogFormat::Json => (
			None,
			Some(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			),
		),
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(pretty)
		.with(json)
		.init();
}
