//! Trailproof — Demo CLI
//!
//! Exercises the audit trail end to end against a JSONL file: emit sample
//! events, query them, verify the chain, and demonstrate tamper detection.
//!
//! Usage:
//!   cargo run -p demo -- emit --count 5
//!   cargo run -p demo -- query --event-type payment.settled
//!   cargo run -p demo -- verify
//!   cargo run -p demo -- tamper

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trailproof::{EmitRequest, QueryFilters, TrailConfig, TrailResult, Trailproof};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Trailproof — tamper-evident audit trail demo.
///
/// Every event is linked to its predecessor by a SHA-256 digest; `verify`
/// recomputes the whole chain and reports any break. Pass `--key` to also
/// sign each event with HMAC-SHA256.
#[derive(Parser)]
#[command(name = "demo", about = "Trailproof audit trail demo")]
struct Cli {
    /// Path of the JSONL trail file.
    #[arg(long, default_value = "trail.jsonl")]
    path: PathBuf,

    /// Optional HMAC-SHA256 signing key.
    #[arg(long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append sample events to the trail.
    Emit {
        /// Number of events to append.
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
    /// Query the trail with optional filters.
    Query {
        #[arg(long)]
        event_type: Option<String>,
        #[arg(long)]
        actor_id: Option<String>,
        #[arg(long, default_value_t = 100)]
        limit: usize,
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Recompute the whole chain and report its integrity.
    Verify,
    /// Corrupt a stored record in place, then verify again.
    Tamper,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Emit { count } => run_emit(&cli.path, cli.key.as_deref(), count),
        Command::Query {
            event_type,
            actor_id,
            limit,
            cursor,
        } => run_query(&cli.path, cli.key.as_deref(), event_type, actor_id, limit, cursor),
        Command::Verify => run_verify(&cli.path, cli.key.as_deref()),
        Command::Tamper => run_tamper(&cli.path, cli.key.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {e}");
        std::process::exit(1);
    }
}

fn open_trail(path: &PathBuf, key: Option<&str>) -> TrailResult<Trailproof> {
    Trailproof::new(TrailConfig {
        store: "jsonl".to_string(),
        path: Some(path.clone()),
        signing_key: key.map(String::from),
        default_tenant_id: Some("demo-tenant".to_string()),
    })
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_emit(path: &PathBuf, key: Option<&str>, count: usize) -> TrailResult<()> {
    let trail = open_trail(path, key)?;

    let samples = [
        ("payment.settled", "svc-billing"),
        ("user.login", "alice"),
        ("document.signed", "bob"),
    ];

    for i in 0..count {
        let (event_type, actor) = samples[i % samples.len()];
        let mut payload = serde_json::Map::new();
        payload.insert("n".to_string(), serde_json::json!(i));
        let event = trail.emit(
            EmitRequest::new(event_type, actor, payload).with_trace_id(format!("trace-{}", i / 2)),
        )?;
        println!("appended {} {} hash={}", event.event_id, event.event_type, event.hash);
    }

    println!("{} events in trail", trail.count());
    Ok(())
}

fn run_query(
    path: &PathBuf,
    key: Option<&str>,
    event_type: Option<String>,
    actor_id: Option<String>,
    limit: usize,
    cursor: Option<String>,
) -> TrailResult<()> {
    let trail = open_trail(path, key)?;
    let result = trail.query(QueryFilters {
        event_type,
        actor_id,
        limit,
        cursor,
        ..QueryFilters::default()
    });

    for event in &result.events {
        println!(
            "{}  {}  {}  actor={}",
            event.timestamp, event.event_id, event.event_type, event.actor_id
        );
    }
    match result.next_cursor {
        Some(cursor) => println!("next cursor: {cursor}"),
        None => println!("no more pages"),
    }
    Ok(())
}

fn run_verify(path: &PathBuf, key: Option<&str>) -> TrailResult<()> {
    let trail = open_trail(path, key)?;
    let report = trail.verify()?;

    if report.intact {
        println!("chain intact: {} events verified", report.total);
    } else {
        println!(
            "chain BROKEN: {} of {} events failed, first break at index {}",
            report.broken.len(),
            report.total,
            report.broken[0]
        );
    }
    Ok(())
}

fn run_tamper(path: &PathBuf, key: Option<&str>) -> TrailResult<()> {
    {
        let trail = open_trail(path, key)?;
        if trail.count() < 2 {
            println!("trail too short to demonstrate tampering; run `emit` first");
            return Ok(());
        }
    }

    // Flip one payload value in the middle of the file, the way an attacker
    // with file access would.
    let contents = fs::read_to_string(path).map_err(|e| trailproof::TrailError::Store {
        reason: format!("failed to read trail file '{}': {}", path.display(), e),
    })?;
    let mut lines: Vec<String> = contents.lines().map(String::from).collect();
    let victim = lines.len() / 2;
    let mut value: serde_json::Value =
        serde_json::from_str(&lines[victim]).map_err(|e| trailproof::TrailError::Store {
            reason: format!("failed to parse line {victim}: {e}"),
        })?;
    value["payload"]["n"] = serde_json::json!(999_999);
    lines[victim] = value.to_string();
    fs::write(path, lines.join("\n") + "\n").map_err(|e| trailproof::TrailError::Store {
        reason: format!("failed to rewrite trail file '{}': {}", path.display(), e),
    })?;
    println!("tampered with record at index {victim}");

    run_verify(path, key)
}
