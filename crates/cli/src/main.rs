// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand};

use muster::client::HubClient;
use muster::{agent, devices, register, send, status};

#[derive(Parser)]
#[command(name = "muster", about = "Console and agent client for the muster hub")]
struct Cli {
    /// Base URL of the hub server.
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:5000",
        env = "MUSTER_HUB_URL"
    )]
    hub: String,

    /// Bearer token for the console API.
    #[arg(long, global = true, env = "MUSTER_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered devices.
    Devices,
    /// Show one device's presence.
    Status { code: String },
    /// Queue a command payload for a device.
    Send { code: String, payload: String },
    /// Perform a single enrollment call for a device code.
    Register { code: String },
    /// Run a long-lived polling agent for a device code.
    Agent {
        code: String,
        /// Poll interval in seconds.
        #[arg(long, default_value_t = 15)]
        interval_secs: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let client = HubClient::new(cli.hub.clone(), cli.token);
    let exit_code = match cli.command {
        Command::Devices => devices::run(&client),
        Command::Status { code } => status::run(&client, &code),
        Command::Send { code, payload } => send::run(&client, &code, &payload),
        Command::Register { code } => register::run(&client, &code),
        Command::Agent { code, interval_secs } => agent::run(&cli.hub, &code, interval_secs),
    };
    std::process::exit(exit_code);
}
