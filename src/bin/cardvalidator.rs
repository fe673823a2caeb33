//! Command-line card validator.
//!
//! # Usage
//!
//! ```bash
//! # Validate a comma-separated list of card numbers
//! cardvalidator -l "4012888888881881,378282246310005"
//!
//! # Interactive session
//! cardvalidator
//!
//! # Use a custom scheme table
//! cardvalidator --schemes schemes.json -l "9999888877776666"
//!
//! # Debug logging on stderr
//! RUST_LOG=card_validator=debug cardvalidator -l "5237251624778133"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use card_validator::batch::{summarize, BatchValidator};
use card_validator::scheme::{JsonSchemeLoader, SchemeTable};
use card_validator::shell::Shell;
use card_validator::CardValidator;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardvalidator")]
#[command(
    author,
    version,
    about = "Validate payment card numbers and detect their scheme"
)]
struct Cli {
    /// Card numbers to validate, comma-separated. Starts the interactive
    /// shell when absent.
    #[arg(short = 'l', long = "list", value_name = "CARDS")]
    list: Option<String>,

    /// JSON file with the scheme table to classify against
    #[arg(long, value_name = "PATH")]
    schemes: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let table = match cli.schemes {
        Some(path) => match JsonSchemeLoader::from_file(&path) {
            Ok(table) => {
                tracing::info!(path = %path.display(), schemes = table.len(), "loaded scheme table");
                Arc::new(table)
            }
            Err(e) => {
                eprintln!("Error: cannot load schemes from {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SchemeTable::shared(),
    };
    let validator = CardValidator::new(table);

    match cli.list {
        Some(list) if !list.is_empty() => {
            run_batch(&validator, &list);
            ExitCode::SUCCESS
        }
        _ => run_interactive(&validator).await,
    }
}

fn run_batch(validator: &CardValidator, list: &str) {
    let batch = BatchValidator::new(validator);

    #[cfg(feature = "parallel")]
    let reports = batch.validate_parallel(&card_validator::batch::split_card_list(list));
    #[cfg(not(feature = "parallel"))]
    let reports = batch.validate_list(list);

    for report in &reports {
        println!("{}", report);
    }

    let summary = summarize(&reports);
    tracing::info!(
        valid = summary.valid,
        invalid = summary.invalid,
        rejected = summary.rejected,
        unknown_scheme = summary.unknown_scheme,
        "batch finished"
    );
}

async fn run_interactive(validator: &CardValidator) -> ExitCode {
    let (cancel_tx, cancel_rx) = watch::channel(false);

    tokio::spawn(async move {
        shutdown_signal().await;
        println!("\nProgram interrupted. Exiting gracefully...");
        let _ = cancel_tx.send(true);
    });

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let result = Shell::new(validator)
        .run(stdin, &mut stdout, cancel_rx.clone())
        .await;

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    };

    if *cancel_rx.borrow() {
        // A pending stdin read would otherwise hold up runtime shutdown.
        std::process::exit(0);
    }
    code
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut term, mut hup) = match (signal(SignalKind::terminate()), signal(SignalKind::hangup())) {
            (Ok(term), Ok(hup)) => (term, hup),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "failed to install signal handler");
                return std::future::pending::<()>().await;
            }
        };
        tokio::select! {
            _ = term.recv() => {},
            _ = hup.recv() => {},
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("interrupt received, cancelling session");
}
