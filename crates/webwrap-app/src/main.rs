// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Webwrap headless host.
//
// Entry point. Initialises logging and settings, builds a shell session over
// the stub bridge, then feeds it one event per stdin line. Whatever the shell
// does to the content view is printed on stdout; logs go to stderr.

mod command;
mod console;
mod services;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use webwrap_bridge::stub::StubBridge;
use webwrap_core::failure::LoadFailure;
use webwrap_shell::{BackAction, Shell};

use command::Command;
use console::ConsoleView;
use services::data_dir::data_dir;
use services::kv_store::FileStore;
use services::settings;

const STORE_FILE: &str = "store.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Webwrap starting");

    let dir = data_dir();
    let config = settings::load_or_default(&dir);
    let bridge = Arc::new(StubBridge::default());
    let view = Arc::new(ConsoleView::new(std::io::stdout()));
    let store = Arc::new(FileStore::open(dir.join(STORE_FILE)));
    let shell = Arc::new(Shell::new(config, bridge.clone(), view, store));

    shell.on_load_start();
    let launching = Arc::clone(&shell);
    tokio::spawn(async move {
        if launching.launch().await.is_none() {
            info!("running without push identity");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin closed");
                break;
            }
        };
        match Command::parse(&line) {
            Ok(command) => {
                if !run(&shell, &bridge, command).await {
                    break;
                }
            }
            Err(e) => warn!(%e, "ignored input line"),
        }
    }

    info!("Webwrap stopped");
}

/// Apply one command. Returns `false` when the host should stop.
async fn run(shell: &Shell, bridge: &StubBridge, command: Command) -> bool {
    match command {
        Command::Msg(raw) => {
            // Handlers run detached, as in a real host.
            let _ = shell.on_message(&raw);
        }
        Command::Online => {
            bridge.set_reachable(true);
            shell.on_reachability_changed(true);
        }
        Command::Offline => {
            bridge.set_reachable(false);
            shell.on_reachability_changed(false);
        }
        Command::Retry => {
            let outcome = shell.retry().await;
            info!(?outcome, "manual retry");
        }
        Command::Fail { code, description } => {
            let failure = LoadFailure::new(code, description, shell.config().base_url.clone());
            shell.on_load_failed(&failure);
        }
        Command::Load => shell.on_load_start(),
        Command::Loaded => shell.on_load_finished(),
        Command::Back => {
            if shell.on_back().await == BackAction::Exited {
                return false;
            }
        }
        Command::Nav(url) => {
            if shell.should_load(&url).await {
                info!(%url, "navigating in view");
                shell.on_navigation_state(true);
            }
        }
        Command::Notify(url) => shell.on_notification_opened(Some(&url)),
        Command::Quit => return false,
    }
    true
}
