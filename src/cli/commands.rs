use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;

use name_search::config::{AppConfig, SearchConfig};
use name_search::db::{InvertedIndex, RecordStore, load_records};
use name_search::export::{export_to_csv, export_to_json, to_json_line, write_csv};
use name_search::matching::{encode, weighted_distance};
use name_search::models::SearchQuery;
use name_search::orchestrator::{SearchOptions, run_search};
use name_search::util::envfile::{parse_env_file, write_env_template};

use super::clap_parser::{BatchArgs, Cli, Command, FormatOpt, SearchArgs};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Search(args) => run_search_command(&args),
        Command::Batch(args) => run_batch_command(&args),
        Command::Encode { lang, words } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for w in words {
                writeln!(out, "{}\t{}", w, encode(&w, lang))?;
            }
            Ok(())
        }
        Command::Distance { a, b } => {
            println!("{}", weighted_distance(&a, &b));
            Ok(())
        }
        Command::EnvTemplate { path } => {
            write_env_template(&path).with_context(|| format!("writing {}", path))?;
            info!("Wrote {}", path);
            Ok(())
        }
    }
}

fn base_config() -> Result<AppConfig> {
    let env_map = parse_env_file().context("reading .env")?;
    Ok(AppConfig::from_env(&env_map)?)
}

/// Records and index are built once here and only read afterwards.
fn load_snapshot(cfg: &AppConfig) -> Result<(RecordStore, InvertedIndex)> {
    let Some(dir) = cfg.data.data_dir.as_deref() else {
        bail!("no data directory: pass --data-dir or set NAME_SEARCH_DATA_DIR");
    };
    let started = Instant::now();
    let store = load_records(Path::new(dir), &cfg.data.files)
        .with_context(|| format!("loading records from {}", dir))?;
    let index = InvertedIndex::build(store.records());
    info!(
        "Loaded {} records and built index in {:.2?}",
        store.len(),
        started.elapsed()
    );
    Ok((store, index))
}

fn run_search_command(args: &SearchArgs) -> Result<()> {
    let cfg = args.to_app_config(base_config()?)?;
    let (store, index) = load_snapshot(&cfg)?;

    let query = SearchQuery::new(args.text.clone(), args.lang)
        .with_strategies(cfg.search.strategies.clone())
        .with_max_score(cfg.search.max_score);
    let opts = SearchOptions {
        parallel_fuzzy: cfg.search.parallel_fuzzy,
    };
    let outcome = run_search(&query, store.records(), &index, opts)?;

    let format = FormatOpt::from_config(cfg.export.format.as_deref());
    match (&cfg.export.out_path, format) {
        (Some(path), FormatOpt::Csv) => export_to_csv(&outcome.result, path)?,
        (Some(path), FormatOpt::Json) => export_to_json(&outcome.result, path)?,
        (None, FormatOpt::Csv) => write_csv(&outcome.result, io::stdout().lock())?,
        (None, FormatOpt::Json) => {
            println!("{}", serde_json::to_string_pretty(&outcome.result)?)
        }
    }
    if let Some(path) = &cfg.export.out_path {
        info!("Wrote {} results to {}", outcome.result.len(), path);
    }
    Ok(())
}

fn run_batch_command(args: &BatchArgs) -> Result<()> {
    let mut cfg = base_config()?;
    args.data.apply(&mut cfg);
    cfg.validate()?;
    let (store, index) = load_snapshot(&cfg)?;

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let f = File::open(&args.input).with_context(|| format!("opening {}", args.input))?;
        Box::new(BufReader::new(f))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let (mut ok, mut failed) = (0usize, 0usize);
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let response = answer_request(&line, &store, &index, &cfg.search);
        match response {
            Ok(body) => {
                ok += 1;
                writeln!(out, "{}", body)?;
            }
            Err(e) => {
                failed += 1;
                warn!("request on line {} failed: {:#}", line_no, e);
                writeln!(out, "{}", json!({"line": line_no, "error": format!("{:#}", e)}))?;
            }
        }
    }
    info!("Batch finished: {} answered, {} failed", ok, failed);
    Ok(())
}

/// A failure here is scoped to its own request line. Fields the request leaves out
/// take the configured search defaults.
fn answer_request(
    line: &str,
    store: &RecordStore,
    index: &InvertedIndex,
    search: &SearchConfig,
) -> Result<String> {
    let request: Value = serde_json::from_str(line).context("request is not valid JSON")?;
    let query = SearchQuery::from_value(&request, search)?;
    let opts = SearchOptions {
        parallel_fuzzy: search.parallel_fuzzy,
    };
    let outcome = run_search(&query, store.records(), index, opts)?;
    Ok(to_json_line(&outcome.result)?)
}
