use std::collections::BTreeMap;
use std::fs;

use cartograph::config::Config;
use cartograph::pipeline::{self, REPORT_FILES};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load()?;
    let out_dir = config.output_dir();

    println!("\n=== Cartograph Snapshot Statistics ===\n");

    println!("Key outputs under {}:\n", out_dir.display());
    println!("{:-<50}", "");
    println!("{:<30} {:>18}", "File", "Size");
    println!("{:-<50}", "");
    for name in REPORT_FILES {
        println!(
            "{:<30} {:>18}",
            name,
            pipeline::size_of(&out_dir.join(name))
        );
    }
    println!("{:-<50}", "");

    // Node and edge counts come from the lite payload, the smallest file
    // that carries both
    let lite_path = out_dir.join(pipeline::GRAPH_DATA_LITE_FILE);
    let Ok(lite_str) = fs::read_to_string(&lite_path) else {
        println!("\nNo lite payload found at {}.", lite_path.display());
        println!("Run cartograph to build the snapshots first.");
        return Ok(());
    };
    let lite: serde_json::Value = serde_json::from_str(&lite_str)?;
    let node_count = lite["nodes"].as_array().map(|a| a.len()).unwrap_or(0);
    let edge_count = lite["edges"].as_array().map(|a| a.len()).unwrap_or(0);

    println!("\nGraph:");
    println!("  Nodes: {}", node_count);
    println!("  Edges: {}", edge_count);

    // Most connected nodes, from the degree snapshot
    let degree_path = out_dir.join(pipeline::DEGREE_FILE);
    if let Ok(degree_str) = fs::read_to_string(&degree_path) {
        let degree: BTreeMap<String, usize> = serde_json::from_str(&degree_str)?;
        let mut ranked: Vec<(&String, &usize)> = degree.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        println!("\nMost connected nodes:\n");
        println!("{:-<50}", "");
        println!("{:<38} {:>10}", "Node", "Degree");
        println!("{:-<50}", "");
        for (id, count) in ranked.iter().take(10) {
            println!("{:<38} {:>10}", id, count);
        }
        println!("{:-<50}", "");

        let isolated = degree.values().filter(|d| **d == 0).count();
        println!("\n  Isolated nodes: {}", isolated);
    }

    // Externally synced artifacts, if any run has ingested them
    let artifacts_dir = out_dir.join(&config.sync.artifacts_subdir);
    if artifacts_dir.is_dir() {
        println!("\nVector search artifacts under {}:", artifacts_dir.display());
        let mut entries: Vec<_> = fs::read_dir(&artifacts_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .collect();
        entries.sort_by_key(|e| e.file_name());
        for entry in entries {
            println!(
                "  - {:<26} {}",
                entry.file_name().to_string_lossy(),
                pipeline::size_of(&entry.path())
            );
        }
    } else {
        println!("\nNo artifact folder yet, expected if external files were never ingested.");
    }

    println!();

    Ok(())
}
