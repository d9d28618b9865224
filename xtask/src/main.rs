use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(name = "xtask", about = "Taskdeck workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate a task data file against schemas/tasks.schema.json
    ValidateData { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::ValidateData { file } => validate_data(&file),
    }
}

fn validate_data(path: &PathBuf) -> Result<()> {
    let schema_text = include_str!("../../schemas/tasks.schema.json");
    let schema: serde_json::Value = serde_json::from_str(schema_text)?;
    let compiled = jsonschema::validator_for(&schema)?;
    let data_text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let data: serde_json::Value = serde_json::from_str(&data_text).with_context(|| "parse json")?;
    let mut problems: Vec<String> = compiled.iter_errors(&data).map(|e| e.to_string()).collect();
    // IDs must run 1..N in file order; a hand-edited file breaks this easily.
    if let Some(tasks) = data.as_array() {
        for (i, task) in tasks.iter().enumerate() {
            let want = i as u64 + 1;
            if task.get("id").and_then(|v| v.as_u64()) != Some(want) {
                problems.push(format!("task at index {i}: id should be {want}"));
            }
        }
    }
    if !problems.is_empty() {
        eprintln!("Invalid: {}", path.display());
        for p in problems {
            eprintln!("- {}", p);
        }
        std::process::exit(1);
    }
    println!("OK: {}", path.display());
    Ok(())
}
