use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use studyhall_cli::cli::{parse_ask_args, AskArgs};
use studyhall_cli::init_tracing;
use studyhall_core::config::Config;
use studyhall_core::corpus;
use studyhall_core::traits::Answerer;
use studyhall_qa::QaEngine;

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} <seed|ask|stats> [args...]", prog);
    eprintln!("  seed [path] [--force]");
    eprintln!("  ask \"<question>\" [--subject S] [--top-k N]");
    eprintln!("  stats");
    std::process::exit(1);
}

fn parse_args() -> (String, String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = if args.is_empty() { "studyhall".to_string() } else { args.remove(0) };
    if args.is_empty() { usage(&prog); }
    let cmd = args.remove(0);
    (prog, cmd, args)
}

fn main() -> anyhow::Result<()> {
    init_tracing(&["studyhall=warn"])?;
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let qa = config.qa()?;
    let dataset_path = qa.resolved_dataset_path(&env::current_dir()?);
    let (prog, cmd, args) = parse_args();
    match cmd.as_str() {
        "seed" => {
            let force = args.iter().any(|a| a == "--force" || a == "-f");
            let path = args.iter().find(|a| !a.starts_with('-')).map(PathBuf::from).unwrap_or(dataset_path);
            if corpus::seed(&path, force)? {
                println!("Seeded {} default entries into {}", corpus::default_entries().len(), path.display());
            } else {
                println!("{} already exists; use --force to overwrite", path.display());
            }
        }
        "ask" => {
            let AskArgs { question, subject, top_k } = parse_ask_args(&args, qa.default_top_k).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                usage(&prog)
            });
            let engine = QaEngine::open(&dataset_path)?;
            let result = engine.answer(&question, &subject, top_k)?;
            println!("Answer ({}, confidence {:.2}):\n  {}", result.subject, result.confidence, result.answer);
            println!("\nSources:");
            for (i, s) in result.sources.iter().enumerate() {
                println!("  {}. score={:.4}  [{}] {}", i + 1, s.score, s.subject, s.question);
            }
        }
        "stats" => {
            let corpus = corpus::load(&dataset_path)?;
            println!("Corpus: {} ({} entries)", dataset_path.display(), corpus.len());
            let mut by_subject: BTreeMap<&str, usize> = BTreeMap::new();
            for e in &corpus { *by_subject.entry(e.subject()).or_insert(0) += 1; }
            for (subject, count) in by_subject { println!("  {}: {}", subject, count); }
        }
        _ => { eprintln!("Unknown command: {}", cmd); usage(&prog); }
    }
    Ok(())
}
