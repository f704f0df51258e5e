use clap::Parser;
use miette::{IntoDiagnostic, Result};
use point_wallet::application::config::EngineConfig;
use point_wallet::application::engine::PointEngine;
use point_wallet::domain::point::{MAX_BALANCE, UserId};
use point_wallet::domain::ports::{BalanceStoreBox, HistoryLogBox};
use point_wallet::infrastructure::in_memory::{InMemoryBalanceStore, InMemoryHistoryLog};
use point_wallet::interfaces::csv::report_writer::{OutputFormat, ReportWriter};
use point_wallet::interfaces::csv::request_reader::RequestReader;
use point_wallet::interfaces::request::PointRequest;
use point_wallet::logging::{LogFormat, init_logging};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file with a `type, user, amount` header
    input: PathBuf,

    /// Highest balance a charge may produce
    #[arg(long, default_value_t = MAX_BALANCE)]
    max_balance: u64,

    /// Reject a request after waiting this many milliseconds for its user's lock
    #[arg(long)]
    lock_timeout_ms: Option<u64>,

    /// Write every committed history entry as CSV to this path
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Format of the balance report on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    output: OutputFormat,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::default().with_max_balance(self.max_balance);
        match self.lock_timeout_ms {
            Some(ms) => config.with_lock_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    let balances: BalanceStoreBox = Box::new(InMemoryBalanceStore::new());
    let history: HistoryLogBox = Box::new(InMemoryHistoryLog::new());
    let engine = Arc::new(PointEngine::with_config(
        balances,
        history,
        cli.engine_config(),
    ));

    // Group by user so each user's requests keep their file order.
    let file = File::open(&cli.input).into_diagnostic()?;
    let mut per_user: BTreeMap<UserId, Vec<(usize, PointRequest)>> = BTreeMap::new();
    for (index, request) in RequestReader::new(file).requests().enumerate() {
        let row = index + 1;
        match request {
            Ok(request) => per_user
                .entry(request.user)
                .or_default()
                .push((row, request)),
            Err(e) => warn!(row, error = %e, "Error reading request"),
        }
    }

    // Distinct users run in parallel; the engine serializes within a user.
    let mut tasks = JoinSet::new();
    for (user, requests) in per_user {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move {
            let mut rejected = 0usize;
            for (row, request) in requests {
                if let Err(e) = request.execute(&engine).await {
                    if !e.is_recoverable() {
                        return Err(e);
                    }
                    warn!(row, user, error = %e, "request rejected");
                    rejected += 1;
                }
            }
            Ok(rejected)
        });
    }

    let mut rejected = 0;
    while let Some(joined) = tasks.join_next().await {
        rejected += joined.into_diagnostic()?.into_diagnostic()?;
    }
    info!(rejected, "batch complete");

    if let Some(path) = &cli.history_out {
        let entries = engine.all_history().await.into_diagnostic()?;
        let file = File::create(path).into_diagnostic()?;
        ReportWriter::new(file)
            .write_history(&entries)
            .into_diagnostic()?;
    }

    let balances = engine.balances().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer
        .write_balances(&balances, cli.output)
        .into_diagnostic()?;

    Ok(())
}
