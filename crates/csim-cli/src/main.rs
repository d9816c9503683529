#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use csim_core::{CrashOutcome, Lcg64, RecoveryReport, SimConfig, SimError, SimSession};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct RunOptions {
    size: Option<String>,
    pct: Option<String>,
    strategy: Option<String>,
    seed: Option<u64>,
    json: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    blocks: Vec<&'static str>,
    crash: Option<CrashOutcome>,
    report: Option<&'a RecoveryReport>,
    log: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cmd = args.first().map(String::as_str);

    match cmd {
        Some("quick") => {
            let options = parse_run_options(&args[1..])?;
            let mut session = session_for(&options);
            let report = session
                .quick_simulation()
                .context("quick simulation failed")?;
            emit(&session, None, Some(&report), options.json)
        }
        Some("simulate") => {
            let options = parse_run_options(&args[1..])?;
            let mut session = session_for(&options);
            let crash = session.simulate_crash();
            let report = session.run_recovery().context("recovery failed")?;
            emit(&session, Some(crash), Some(&report), options.json)
        }
        Some("crash") => {
            let options = parse_run_options(&args[1..])?;
            let mut session = session_for(&options);
            let crash = session.simulate_crash();
            emit(&session, Some(crash), None, options.json)
        }
        Some("recover") => {
            let options = parse_run_options(&args[1..])?;
            let mut session = session_for(&options);
            // A one-shot process starts with an uninitialized disk, so this
            // surfaces the logged refusal rather than a hard failure.
            match session.run_recovery() {
                Ok(report) => emit(&session, None, Some(&report), options.json),
                Err(SimError::EmptyDisk) => {
                    for line in csim_view::render_log(session.event_log()) {
                        println!("{line}");
                    }
                    Ok(())
                }
            }
        }
        Some("report") => {
            let options = parse_run_options(&args[1..])?;
            let session = session_for(&options);
            match session.last_report() {
                Some(report) => {
                    for line in csim_view::render_report(report) {
                        println!("{line}");
                    }
                }
                None => println!("{}", csim_view::no_report_line()),
            }
            Ok(())
        }
        Some("--help" | "-h" | "help") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            print_usage();
            bail!("unknown command: {other}")
        }
    }
}

fn parse_run_options(args: &[String]) -> Result<RunOptions> {
    let mut options = RunOptions::default();
    let mut index = 0_usize;
    while index < args.len() {
        match args[index].as_str() {
            "--size" => {
                let raw = args.get(index + 1).context("--size requires a value")?;
                options.size = Some(raw.clone());
                index += 2;
            }
            "--pct" => {
                let raw = args.get(index + 1).context("--pct requires a value")?;
                options.pct = Some(raw.clone());
                index += 2;
            }
            "--strategy" => {
                let raw = args.get(index + 1).context("--strategy requires a value")?;
                options.strategy = Some(raw.clone());
                index += 2;
            }
            "--seed" => {
                let raw = args.get(index + 1).context("--seed requires a value")?;
                options.seed = Some(raw.parse().context("invalid --seed value")?);
                index += 2;
            }
            "--json" => {
                options.json = true;
                index += 1;
            }
            other => {
                bail!("unknown option: {other}");
            }
        }
    }
    Ok(options)
}

fn session_for(options: &RunOptions) -> SimSession {
    let config = SimConfig::from_inputs(
        options.size.as_deref(),
        options.pct.as_deref(),
        options.strategy.as_deref(),
    );
    match options.seed {
        Some(seed) => SimSession::with_entropy(config, Box::new(Lcg64::from_seed(seed))),
        None => SimSession::new(config),
    }
}

fn emit(
    session: &SimSession,
    crash: Option<CrashOutcome>,
    report: Option<&RecoveryReport>,
    json: bool,
) -> Result<()> {
    if json {
        let summary = RunSummary {
            blocks: session
                .disk()
                .states()
                .iter()
                .map(|state| csim_view::state_tag(*state))
                .collect(),
            crash,
            report,
            log: session
                .event_log()
                .iter()
                .map(|entry| entry.message.clone())
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serialize summary")?
        );
        return Ok(());
    }

    for line in csim_view::render_blocks(session.disk().states()) {
        println!("{line}");
    }
    if let Some(outcome) = crash {
        println!("corrupted {} blocks", outcome.corrupted_blocks);
    }
    if let Some(report) = report {
        for line in csim_view::render_report(report) {
            println!("{line}");
        }
    }
    println!();
    for line in csim_view::render_log(session.event_log()) {
        println!("{line}");
    }
    Ok(())
}

fn print_usage() {
    println!("csim-cli — crash/recovery teaching simulator");
    println!();
    println!("USAGE:");
    println!("  csim-cli quick [--seed S] [--json]");
    println!("  csim-cli simulate [--size N] [--pct P] [--strategy best|next|keep] [--seed S] [--json]");
    println!("  csim-cli crash [--size N] [--pct P] [--seed S] [--json]");
    println!("  csim-cli recover [--strategy best|next|keep]");
    println!("  csim-cli report");
    println!();
    println!("Invalid --size/--pct/--strategy values fall back to the defaults");
    println!("(64 blocks, 20 percent, keep order). Each invocation runs a fresh");
    println!("in-memory session; nothing persists between runs, so `recover` on");
    println!("its own demonstrates the empty-disk refusal and `report` the");
    println!("no-report-yet signal.");
    println!();
    println!("EXAMPLES:");
    println!("  csim-cli quick --seed 7");
    println!("  csim-cli simulate --size 128 --pct 35 --strategy best --json");
}
