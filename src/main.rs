use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::clock::FixedOffsetClock;
use crate::configuration::{MemberRoster, SchedulePolicy};
use crate::file_store::FileStore;
use crate::http::start_server;
use crate::service::BookingService;

mod clock;
mod configuration;
mod eligibility;
mod file_store;
mod http;
mod schedule;
mod service;
mod store;
#[cfg(test)]
mod testutils;
mod types;

/// Sign-up service for a recurring badminton session.
#[derive(Parser, Debug)]
#[command(name = "courtbook")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the HTTP server on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Path of the bookings JSON file
    #[arg(long, env = "DATA_FILE", default_value = "bookings.json")]
    data_file: PathBuf,

    /// Path of the page served at /
    #[arg(long, env = "FRONTEND_FILE", default_value = "public/index.html")]
    frontend_file: PathBuf,

    /// Comma-separated names that may sign up outside the walk-in window
    #[arg(long, env = "MEMBERS", value_delimiter = ',')]
    members: Vec<String>,
}

pub struct AppState<S, C> {
    pub service: Arc<BookingService<S, C>>,
    pub frontend_path: PathBuf,
}

impl<S, C> Clone for AppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            frontend_path: self.frontend_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let host: IpAddr = match cli.host.parse() {
        Ok(host) => host,
        Err(err) => {
            error!(error = %err, host = %cli.host, "invalid bind host");
            exit(1);
        }
    };

    let policy = SchedulePolicy::default();
    let roster = MemberRoster::new(cli.members.iter().map(String::as_str));
    if roster.is_empty() {
        warn!("member roster is empty; every sign-up is treated as a walk-in");
    } else {
        info!(members = roster.len(), "member roster loaded");
    }

    let store = FileStore::new(&cli.data_file);
    if let Err(err) = store.ensure_file().await {
        error!(
            error = %err,
            path = %cli.data_file.display(),
            "could not prepare the bookings file"
        );
        exit(1);
    }

    let clock = FixedOffsetClock::new(policy.utc_offset);
    let service = BookingService::new(policy, roster, store, clock);
    let state = AppState {
        service: Arc::new(service),
        frontend_path: cli.frontend_file,
    };

    start_server(state, SocketAddr::new(host, cli.port)).await;
}
