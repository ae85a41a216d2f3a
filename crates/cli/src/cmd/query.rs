//! The `query` subcommand: run a range query and print rows

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use lokq_client::{expected_result_kind, LokiClient, LokiConfig};
use lokq_protocol::RowCursor;
use tracing::{info, warn};

use crate::output::{Format, Formatter};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// LogQL query
    #[arg(short, long)]
    pub query: String,

    /// Loki base URL (overrides the config file)
    #[arg(long)]
    pub url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Basic-auth username
    #[arg(long)]
    pub username: Option<String>,

    /// Basic-auth password
    #[arg(long)]
    pub password: Option<String>,

    /// Window start, RFC 3339 (defaults to one hour before the end)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end, RFC 3339 (defaults to now)
    #[arg(long)]
    pub end: Option<String>,

    /// Maximum number of entries to fetch
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub output: String,
}

pub async fn run(args: QueryArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => LokiConfig::from_file(path)?,
        None => LokiConfig::default(),
    };
    if let Some(url) = args.url {
        config.url = url;
    }
    if args.username.is_some() {
        config.username = args.username;
    }
    if args.password.is_some() {
        config.password = args.password;
    }

    let end = match args.end.as_deref() {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };
    let start = match args.start.as_deref() {
        Some(raw) => parse_instant(raw)?,
        None => end - Duration::hours(1),
    };

    let predicted = expected_result_kind(&args.query);
    info!(query = %args.query, %start, %end, %predicted, "running range query");

    let client = LokiClient::new(config)?;
    let response = client
        .query_range(&args.query, start, end, args.limit)
        .await?;

    if response.result.kind() != predicted {
        warn!(
            predicted = %predicted,
            actual = %response.result.kind(),
            "query produced a different result shape than predicted"
        );
    }

    let formatter = Formatter::new(Format::from_str(&args.output));
    let mut cursor = RowCursor::new(response.result);
    let mut rows = 0usize;
    while cursor.advance()? {
        formatter.print_row(&cursor)?;
        rows += 1;
    }
    cursor.close();

    info!(rows, "query complete");
    Ok(())
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid RFC 3339 timestamp: {raw}"))
}
