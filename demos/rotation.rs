//! Size-based rotation
//!
//! Writes enough lines to a tiny size limit to rotate several times, then
//! lists the resulting files. With `max_files = 3` a category keeps the
//! active file plus `.1` and `.2`.
//!
//! Run with: cargo run --example rotation

use channel_logger::prelude::*;
use std::env;
use std::fs;

fn main() -> Result<()> {
    println!("=== Channel Logger - Rotation Example ===\n");

    let dir = env::temp_dir().join("channel_logger_rotation");
    let _ = fs::remove_dir_all(&dir);

    let config = LoggerConfig::new(100, &dir)
        .with_max_file_size(1024)
        .with_max_files(3);
    let logger = ChannelLogger::with_config(config)?;

    for i in 0..100 {
        logger.info("rotating", &format!("line {:03} {}", i, "-".repeat(40)));
    }
    logger.close();

    println!("Rotations performed: {}", logger.metrics().rotation_count());

    let mut files: Vec<_> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    files.sort();
    for path in files {
        let size = fs::metadata(&path)?.len();
        println!("  {} ({} bytes)", path.display(), size);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
