// Forensic CLI for registry event exports: verifies the hash chain an
// indexer writes alongside the contract, queries it, and re-derives its
// Merkle root.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod report;

use report::{ActionKind, EventReport, RecordFilter};

#[derive(Parser)]
#[command(name = "registry-audit")]
#[command(about = "Integrity checks and queries for registry event exports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify self-hashes, chain linkage, and the Merkle root
    Verify {
        #[arg(help = "Path to the exported report (JSON)")]
        file: PathBuf,
    },
    /// Print records matching the given filters
    Query {
        #[arg(help = "Path to the exported report (JSON)")]
        file: PathBuf,
        #[arg(long, help = "Filter by authorizing address")]
        actor: Option<String>,
        #[arg(long, help = "Filter by action (Mint|Renew|Transfer|SetTarget|Pause|Unpause|SetPrice|SetCollector)")]
        action: Option<String>,
        #[arg(long, help = "Filter by first name component")]
        label: Option<String>,
        #[arg(long, help = "Unix epoch seconds (from)")]
        from: Option<u64>,
        #[arg(long, help = "Unix epoch seconds (to)")]
        to: Option<u64>,
    },
    /// Summarize a report: action counts, actors, time range, bursts
    Stats {
        #[arg(help = "Path to the exported report (JSON)")]
        file: PathBuf,
        #[arg(long, default_value_t = 60, help = "Burst window in seconds")]
        window: u64,
        #[arg(long, default_value_t = 20, help = "Max actions per actor per window")]
        burst_cap: u64,
    },
    /// Write records as NDJSON for downstream ingestion
    Export {
        #[arg(help = "Path to the exported report (JSON)")]
        file: PathBuf,
        #[arg(short, long, help = "Output file (stdout if omitted)")]
        output: Option<PathBuf>,
    },
    /// Re-derive the Merkle root and compare it with the claimed one
    MerkleCheck {
        #[arg(help = "Path to the exported report (JSON)")]
        file: PathBuf,
    },
}

fn load_report(path: &PathBuf) -> Result<EventReport, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid report JSON: {}", e))
}

fn parse_action(raw: &str) -> Result<ActionKind, String> {
    let all = [
        ActionKind::Mint,
        ActionKind::Renew,
        ActionKind::Transfer,
        ActionKind::SetTarget,
        ActionKind::Pause,
        ActionKind::Unpause,
        ActionKind::SetPrice,
        ActionKind::SetCollector,
    ];
    all.into_iter()
        .find(|a| a.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| format!("unknown action '{}'", raw))
}

fn cmd_verify(report: &EventReport) -> Result<(), String> {
    println!("contract : {}", report.contract_id);
    println!("network  : {}", report.network);
    println!("records  : {}", report.records.len());

    report.verify_chain()?;

    let derived = report.derive_merkle_root();
    if derived != report.merkle_root {
        return Err(format!(
            "merkle root mismatch: claimed {}, derived {}",
            report.merkle_root.as_deref().unwrap_or("(none)"),
            derived.as_deref().unwrap_or("(none)")
        ));
    }

    println!("chain intact, merkle root confirmed");
    Ok(())
}

fn cmd_query(
    report: &EventReport,
    actor: Option<String>,
    action: Option<String>,
    label: Option<String>,
    from: Option<u64>,
    to: Option<u64>,
) -> Result<(), String> {
    let filter = RecordFilter {
        actor,
        action: action.as_deref().map(parse_action).transpose()?,
        label,
        from_ts: from,
        to_ts: to,
    };
    let matches = report.filter(&filter);

    println!("{} record(s) matched:", matches.len());
    for r in matches {
        let name = if r.label.is_empty() {
            "-".to_string()
        } else {
            format!("{}{}", r.label, r.emoji)
        };
        println!(
            "  [{:>6}] ledger={:>8} ts={:>12} {:12} {:14} {:20} {}",
            r.seq,
            r.ledger,
            r.timestamp,
            r.action.as_str(),
            r.actor,
            name,
            r.detail
        );
    }
    Ok(())
}

fn cmd_stats(report: &EventReport, window: u64, burst_cap: u64) -> Result<(), String> {
    println!("=== Report statistics ===");
    println!("contract    : {}", report.contract_id);
    println!("network     : {}", report.network);
    println!("exported at : {}", report.exported_at);
    println!("records     : {}", report.records.len());
    println!(
        "merkle root : {}",
        report.merkle_root.as_deref().unwrap_or("(none)")
    );

    if let (Some(first), Some(last)) = (report.records.first(), report.records.last()) {
        println!("time range  : {} .. {}", first.timestamp, last.timestamp);
    }

    let mut action_counts: std::collections::BTreeMap<&str, usize> =
        std::collections::BTreeMap::new();
    let mut actors: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
    for r in &report.records {
        *action_counts.entry(r.action.as_str()).or_insert(0) += 1;
        actors.insert(r.actor.as_str());
    }

    println!("\nAction breakdown:");
    for (action, count) in &action_counts {
        println!("  {:14} : {}", action, count);
    }
    println!("\nDistinct actors: {}", actors.len());

    let alerts = report.scan_bursts(window, burst_cap);
    if alerts.is_empty() {
        println!("No bursts above {} actions per {}s window.", burst_cap, window);
    } else {
        println!("\nBurst alerts:");
        for a in alerts {
            let kind = if a.administrative { "admin" } else { "mint" };
            println!(
                "  {} {} actions from {} in window starting {} (first excess seq {})",
                a.count_at_detection, kind, a.actor, a.window_start, a.first_excess_seq
            );
        }
    }
    Ok(())
}

fn cmd_export(report: &EventReport, output: Option<PathBuf>) -> Result<(), String> {
    let mut lines = Vec::with_capacity(report.records.len());
    for r in &report.records {
        lines.push(serde_json::to_string(r).map_err(|e| format!("serialize: {}", e))?);
    }
    let ndjson = lines.join("\n");

    match output {
        Some(path) => {
            fs::write(&path, &ndjson)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            println!("wrote {} record(s) to {}", report.records.len(), path.display());
        }
        None => println!("{}", ndjson),
    }
    Ok(())
}

fn cmd_merkle_check(report: &EventReport) -> Result<(), String> {
    let derived = report.derive_merkle_root();
    println!(
        "claimed  root: {}",
        report.merkle_root.as_deref().unwrap_or("(none)")
    );
    println!(
        "computed root: {}",
        derived.as_deref().unwrap_or("(none)")
    );

    if report.merkle_root == derived {
        println!("merkle root matches");
        Ok(())
    } else {
        Err("merkle root mismatch, report may have been altered".to_string())
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Verify { file } => cmd_verify(&load_report(&file)?),
        Command::Query {
            file,
            actor,
            action,
            label,
            from,
            to,
        } => cmd_query(&load_report(&file)?, actor, action, label, from, to),
        Command::Stats {
            file,
            window,
            burst_cap,
        } => cmd_stats(&load_report(&file)?, window, burst_cap),
        Command::Export { file, output } => cmd_export(&load_report(&file)?, output),
        Command::MerkleCheck { file } => cmd_merkle_check(&load_report(&file)?),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("registry-audit: {}", message);
            ExitCode::from(2)
        }
    }
}
