use clap::{Parser, Subcommand};
use colored::Colorize;
use iou_core::{LedgerTransaction, TransactionView, VerificationReport};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_ACCEPTED: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// IOU: bilateral obligation contract verifier
///
/// Verify, fingerprint, and inspect IOU transaction proposals.
#[derive(Parser)]
#[command(name = "iou", version, about, long_about = None)]
struct Cli {
    /// Suppress normal stdout output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, env = "IOU_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "IOU_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a transaction proposal against the IOU contract
    Verify {
        /// Path to proposal .json file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the transaction id (SHA-256) of a proposal
    Hash {
        /// Path to proposal .json file
        file: PathBuf,
    },

    /// Show what a proposal declares without judging it
    Inspect {
        /// Path to proposal .json file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let exit_code = match cli.command {
        Commands::Verify { file, json } => cmd_verify(&file, json, cli.quiet),
        Commands::Hash { file } => cmd_hash(&file),
        Commands::Inspect { file, json } => cmd_inspect(&file, json, cli.quiet),
        Commands::Version => {
            println!("iou {} (iou-core {})", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_VERSION"));
            println!("Contract: {}", iou_core::IouContract::ID);
            EXIT_ACCEPTED
        }
    };

    process::exit(exit_code);
}

fn init_tracing(level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Read and decode a proposal, reporting failures on stderr
fn load(file: &Path) -> Result<LedgerTransaction, i32> {
    debug!(file = %file.display(), "loading proposal");
    let text = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("{} cannot read {}: {}", "error:".red().bold(), file.display(), e);
        EXIT_ERROR
    })?;
    LedgerTransaction::from_json(&text).map_err(|e| {
        eprintln!("{} {}: {}", "error:".red().bold(), file.display(), e);
        EXIT_ERROR
    })
}

fn print_json(value: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            EXIT_ACCEPTED
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            EXIT_ERROR
        }
    }
}

fn cmd_verify(file: &Path, json: bool, quiet: bool) -> i32 {
    let tx = match load(file) {
        Ok(tx) => tx,
        Err(code) => return code,
    };
    let report = match VerificationReport::for_transaction(&tx) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return EXIT_ERROR;
        }
    };
    let verdict = if report.accepted {
        EXIT_ACCEPTED
    } else {
        EXIT_REJECTED
    };

    if json {
        let value = match serde_json::to_value(&report) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                return EXIT_ERROR;
            }
        };
        return match print_json(&value) {
            EXIT_ACCEPTED => verdict,
            code => code,
        };
    }

    let command = report.command.as_deref().unwrap_or("-");
    match &report.reason {
        None => {
            if !quiet {
                println!(
                    "{} {} transaction {}",
                    "accepted".green().bold(),
                    command,
                    report.transaction_id
                );
            }
        }
        Some(reason) => {
            eprintln!("{} {} transaction {}", "rejected".red().bold(), command, report.transaction_id);
            eprintln!("  {} {}", "reason:".yellow(), reason);
        }
    }
    verdict
}

fn cmd_hash(file: &Path) -> i32 {
    let tx = match load(file) {
        Ok(tx) => tx,
        Err(code) => return code,
    };
    match tx.id() {
        Ok(id) => {
            println!("{}", id);
            EXIT_ACCEPTED
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            EXIT_ERROR
        }
    }
}

fn cmd_inspect(file: &Path, json: bool, quiet: bool) -> i32 {
    let tx = match load(file) {
        Ok(tx) => tx,
        Err(code) => return code,
    };
    let id = match tx.id() {
        Ok(id) => id.to_string(),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return EXIT_ERROR;
        }
    };
    let commands: Vec<String> = tx.commands.iter().map(|c| c.command.to_string()).collect();
    let signers: Vec<String> = tx.signers().iter().map(|k| k.to_string()).collect();
    let transition = tx.transition();

    if json {
        let outputs: Vec<serde_json::Value> = tx
            .outputs
            .iter()
            .map(|state| {
                serde_json::json!({
                    "linear_id": state.linear_id.to_string(),
                    "amount": state.amount.to_string(),
                    "paid": state.paid.to_string(),
                    "lender": state.lender.name,
                    "borrower": state.borrower.name,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "transaction_id": id,
            "commands": commands,
            "transition": transition,
            "inputs": tx.inputs.len(),
            "outputs": outputs,
            "signers": signers,
        }));
    }

    if quiet {
        return EXIT_ACCEPTED;
    }

    println!("{} {}", "transaction".bold(), id);
    println!("  commands:   {}", if commands.is_empty() { "-".to_string() } else { commands.join(", ") });
    match transition {
        Some(t) => println!("  transition: {}", t),
        None => println!("  transition: {}", "ambiguous".yellow()),
    }
    println!("  inputs:     {}", tx.inputs.len());
    for input in &tx.inputs {
        println!(
            "    {} {} owed by {} to {} (paid {})",
            input.reference,
            input.state.amount,
            input.state.borrower,
            input.state.lender,
            input.state.paid
        );
    }
    println!("  outputs:    {}", tx.outputs.len());
    for state in &tx.outputs {
        println!(
            "    {} {} owed by {} to {} (paid {})",
            state.linear_id, state.amount, state.borrower, state.lender, state.paid
        );
    }
    println!("  signers:    {}", signers.len());
    for signer in &signers {
        println!("    {}", signer);
    }
    EXIT_ACCEPTED
}
