//! Terminal dashboard
//!
//! Polls the profiles API and redraws the selected view whenever the snapshot
//! or the filter changes. Commands are read line by line from stdin.

use chrono::Utc;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zoraverse::{
    config::Config,
    dashboard::{
        commands::{Command, HELP},
        render::{ViewMode, render},
        state::{DashboardHandle, StateEvent},
    },
    jobs::profile_poll::start_profile_poll_job,
    services::profile_feed::HttpProfileFeed,
};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[tokio::main]
async fn main() {
    // Logs go to stderr, stdout is the screen
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,zoraverse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut mode = config.dashboard_view.parse::<ViewMode>().unwrap_or_else(|e| {
        tracing::warn!("{}, using table view", e);
        ViewMode::Table
    });

    let feed = match HttpProfileFeed::new(&config.api_base_url, config.request_timeout) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Polling {} every {} seconds",
        feed.profiles_url(),
        config.poll_interval.as_secs()
    );

    let dashboard = DashboardHandle::default();
    let mut updates = dashboard.subscribe();
    let poll = start_profile_poll_job(Arc::new(feed), dashboard.clone(), config.poll_interval);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notice: Option<String> = None;
    redraw(&dashboard, mode, notice.as_deref());

    loop {
        tokio::select! {
            event = updates.recv() => match event {
                // Command handling already redrew
                Ok(StateEvent::FilterChanged) => {}
                Ok(_) | Err(RecvError::Lagged(_)) => redraw(&dashboard, mode, notice.as_deref()),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    // stdin closed
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read command: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                notice = None;
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => notice = Some(HELP.to_string()),
                    Ok(Command::Refresh) => {
                        if !poll.refresh() {
                            notice = Some("A refresh is already queued".to_string());
                        }
                    }
                    Ok(Command::View(next)) => mode = next,
                    Ok(command) => {
                        if let Err(e) = dashboard.update_filter(|spec| {
                            command.apply_to(spec);
                        }) {
                            notice = Some(e);
                        }
                    }
                    Err(e) => notice = Some(e),
                }
                redraw(&dashboard, mode, notice.as_deref());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poll.shutdown().await;
}

fn redraw(dashboard: &DashboardHandle, mode: ViewMode, notice: Option<&str>) {
    let state = dashboard.snapshot();
    let mut screen = String::from(CLEAR_SCREEN);
    screen.push_str(&render(&state, mode, Utc::now()));
    if let Some(notice) = notice {
        screen.push('\n');
        screen.push_str(notice);
        screen.push('\n');
    }
    screen.push_str("\n> ");
    print!("{}", screen);
    let _ = std::io::stdout().flush();
}
