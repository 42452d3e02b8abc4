// Run with: cargo run --example debug_load -- /path/to/library

use reel_core::{IndexConfig, LoadMessage, MediaTree, format_count, format_elapsed};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("Indexing: {:?}", path);

    let (tree, task) = match MediaTree::load(path, IndexConfig::default()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let mut last_print = Instant::now();
    let mut last_files = 0u64;
    let mut stuck_count = 0;

    for msg in task.receiver().iter() {
        match msg {
            LoadMessage::Progress(stats) => {
                let now = Instant::now();

                // Same file count across several heartbeats
                if stats.files == last_files {
                    stuck_count += 1;
                } else {
                    stuck_count = 0;
                }
                last_files = stats.files;

                if now.duration_since(last_print) > Duration::from_secs(1) || stuck_count > 5 {
                    println!(
                        "[{:>8}] files={:<8} dirs={:<8} errors={:<4} stuck={} path={:?}",
                        format_elapsed(start.elapsed()),
                        stats.files,
                        stats.dirs,
                        stats.errors,
                        stuck_count,
                        stats
                            .current_path
                            .as_ref()
                            .map(|p| p.to_string_lossy().to_string())
                            .unwrap_or_default()
                    );
                    last_print = now;
                }
            }
            LoadMessage::ScanError { path, message } => {
                println!("[{:>8}] ERROR {:?}: {}", format_elapsed(start.elapsed()), path, message);
            }
            LoadMessage::Completed(stats) => {
                println!(
                    "[{:>8}] COMPLETED entries={} files={} dirs={} errors={}",
                    format_elapsed(start.elapsed()),
                    format_count(stats.total_entries()),
                    format_count(stats.files),
                    format_count(stats.dirs),
                    stats.errors
                );
            }
        }
    }

    let visible = tree.visible_nodes();
    let posters = visible.iter().filter(|n| n.poster.is_some()).count();
    println!(
        "\nRoot: {} entries, {} with posters",
        visible.len(),
        posters
    );
    tree.shutdown();
}
