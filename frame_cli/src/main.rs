//! # Frame CLI Application
//!
//! Terminal front end for the extraction engine: ingest an analysis
//! workbook, print a model summary, and optionally dispatch one tool
//! intent given as inline JSON.
//!
//! ```text
//! frame-cli model.xlsx
//! frame-cli model.xlsx '{"tool": "plot_internal_forces", "load_case": "COMB1", "force_component": "M3"}'
//! ```

use std::env;
use std::process;

use frame_core::model::Entities;
use frame_core::tools::{dispatch, ToolIntent};
use frame_core::ModelError;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let path = match args.get(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: frame-cli <model.xlsx> [tool-intent-json]");
            process::exit(2);
        }
    };

    let entities = match Entities::from_path(path) {
        Ok(entities) => entities,
        Err(e) => fail(&e),
    };

    println!("═══════════════════════════════════════");
    println!("  MODEL SNAPSHOT");
    println!("═══════════════════════════════════════");
    println!();
    println!("Snapshot:     {}", entities.snapshot_id);
    println!("Ingested:     {}", entities.ingested_at.to_rfc3339());
    println!();
    println!("Nodes:        {}", entities.nodes.len());
    println!("Members:      {}", entities.frames.len());
    println!("Sections:     {}", entities.sections.len());
    println!("Supports:     {}", entities.reactions.records.len());
    println!("Groups:       {}", entities.groups.join(", "));
    println!("Combinations: {}", entities.load_combos.join(", "));

    if !entities.diagnostics.is_empty() {
        println!();
        println!("Diagnostics ({} recovered):", entities.diagnostics.len());
        for diag in &entities.diagnostics {
            println!("  - {}", diag.message());
        }
    }

    if let Some(raw) = args.get(2) {
        let intent: ToolIntent = match serde_json::from_str(raw) {
            Ok(intent) => intent,
            Err(e) => {
                eprintln!("Error: intent is not valid JSON: {}", e);
                process::exit(2);
            }
        };

        match dispatch(&entities, &intent) {
            Ok(output) => {
                println!();
                println!("Tool Output (for LLM/API use):");
                if let Ok(json) = serde_json::to_string_pretty(&output) {
                    println!("{}", json);
                }
            }
            Err(e) => fail(&e),
        }
    }
}

fn fail(e: &ModelError) -> ! {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    process::exit(1);
}
