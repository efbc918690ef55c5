// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Gatehouse permission check binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gatehouse_server_config::GatehouseConfig;

mod commands;
mod logging;

/// Gatehouse - annotation-based permission checks.
#[derive(Parser, Debug)]
#[command(
	name = "gatehouse",
	about = "Annotation-based permission policy for the software catalog",
	version
)]
struct Args {
	/// Config file (defaults to /etc/gatehouse/gatehouse.toml)
	#[arg(long, global = true, env = "GATEHOUSE_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Decide a permission for a principal
	Decide {
		/// Permission name, e.g. `catalog.entity.read`
		#[arg(long)]
		permission: String,

		/// Entity reference of the principal; omit for an unauthenticated request
		#[arg(long)]
		principal: Option<String>,

		/// Print the full outcome as JSON
		#[arg(long)]
		json: bool,

		/// Exit with status 1 when the decision is DENY
		#[arg(long)]
		exit_code: bool,
	},

	/// Print the privilege tier of a permission name
	Classify {
		/// Permission name
		permission: String,
	},

	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	match args.command {
		Command::Version => {
			println!("{}", commands::format_version_info());
			Ok(ExitCode::SUCCESS)
		}
		Command::Classify { permission } => {
			println!("{}", commands::classify(&permission));
			Ok(ExitCode::SUCCESS)
		}
		Command::Decide {
			permission,
			principal,
			json,
			exit_code,
		} => {
			let config = logging::during_startup(
				logging::startup_filter(),
				std::io::stderr,
				|| load_config(args.config),
			)?;
			logging::init(&config.logging);

			let engine = commands::build_engine(&config)?;
			let outcome = commands::decide(&engine, principal.as_deref(), &permission).await;
			println!("{}", commands::render_outcome(&outcome, json)?);

			if exit_code && !outcome.decision.is_allow() {
				return Ok(ExitCode::from(1));
			}
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<GatehouseConfig> {
	let config = match path {
		Some(path) => gatehouse_server_config::load_config_with_file(path)?,
		None => gatehouse_server_config::load_config()?,
	};
	Ok(config)
}
