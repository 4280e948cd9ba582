//! econnect-login - Session login for eConnect power distribution units
//!
//! Logs into a PDU's management API and prints the session token as JSON so
//! follow-up tooling can reuse it.

mod client;
mod config;
mod error;
mod http;
mod models;
mod parser;

use anyhow::{Context, Result};
use clap::Parser;
use client::LoginClient;
use models::{Credentials, LoginReport, LoginResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "econnect-login")]
#[command(about = "Grab a session token from an eConnect PDU", long_about = None)]
struct Args {
    /// Address of the PDU, host or host:port [env: ECONNECT_IP]
    #[arg(long)]
    ip: Option<String>,

    /// Username on the PDU [env: ECONNECT_USERNAME]
    #[arg(short, long)]
    username: Option<String>,

    /// Password on the PDU [env: ECONNECT_PASSWORD]
    #[arg(short, long)]
    password: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Verify the PDU's TLS certificate
    #[arg(long, conflicts_with = "insecure")]
    verify_tls: bool,

    /// Accept self-signed certificates even if the config file says otherwise
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut cfg = config::Config::load(args.config.as_deref())?;

    // Logs go to stderr, stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level)),
        )
        .init();

    apply_http_overrides(&args, &mut cfg.http);

    let creds = resolve_credentials(&args, &cfg, |key| std::env::var(key).ok());
    tracing::debug!("Resolved credentials: {:?}", creds);

    let outcome = run_login(&cfg.http, &creds).await;

    let report = LoginReport::from_outcome(&outcome);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );

    match outcome {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Login failed ({}): {}", e.kind(), e);
            Err(e.into())
        }
    }
}

async fn run_login(http: &config::HttpConfig, creds: &Credentials) -> error::Result<LoginResult> {
    LoginClient::new(http)?.login(creds).await
}

fn apply_http_overrides(args: &Args, http: &mut config::HttpConfig) {
    if let Some(timeout) = args.timeout {
        http.timeout = timeout;
    }
    if args.verify_tls {
        http.accept_invalid_certs = false;
    }
    if args.insecure {
        http.accept_invalid_certs = true;
    }
}

/// Flag beats environment, environment beats the `[device]` section
fn resolve_credentials<F>(args: &Args, cfg: &config::Config, env: F) -> Credentials
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |flag: &Option<String>, key: &str, fallback: &Option<String>| {
        flag.clone()
            .or_else(|| env(key))
            .or_else(|| fallback.clone())
            .unwrap_or_default()
    };

    Credentials::new(
        pick(&args.ip, "ECONNECT_IP", &cfg.device.ip),
        pick(&args.username, "ECONNECT_USERNAME", &cfg.device.username),
        pick(&args.password, "ECONNECT_PASSWORD", &cfg.device.password),
    )
}
