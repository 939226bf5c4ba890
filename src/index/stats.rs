use crate::index::snapshot::SnapshotStore;
use anyhow::Result;

/// Display statistics for the newest snapshot of a version
pub fn show_stats(store: &SnapshotStore, version: &str) -> Result<()> {
    let (index, timestamp) = store.load(version)?;

    println!("Snapshot Statistics");
    println!("===================");
    println!();
    println!("Storage root:     {}", store.root().display());
    println!("Version:          {}", version);
    match timestamp {
        Some(ts) => println!("Latest snapshot:  {}", ts),
        None => println!("Latest snapshot:  (none)"),
    }
    println!("Tokens:           {}", index.len());
    println!("Files:            {}", index.file_count());

    // Widest entries first: which tokens appear in the most files
    let mut widest: Vec<(&str, usize)> = index
        .keys()
        .map(|token| (token, index.lookup(token).len()))
        .collect();
    widest.sort_by(|a, b| b.1.cmp(&a.1));

    if !widest.is_empty() {
        println!();
        println!("Most common tokens:");
        for (token, count) in widest.iter().take(15) {
            println!("  {:30} {}", token, count);
        }
        if widest.len() > 15 {
            println!("  ... and {} more", widest.len() - 15);
        }
    }

    Ok(())
}

/// List all versions present under the storage root
pub fn list_versions(store: &SnapshotStore) -> Result<()> {
    let versions = store.versions()?;

    if versions.is_empty() {
        println!("No snapshots found under {}", store.root().display());
        return Ok(());
    }

    println!("Indexed Versions");
    println!("================");
    println!();

    for (version, count) in versions {
        let plural = if count == 1 { "snapshot" } else { "snapshots" };
        println!("  {:20} {} {}", version, count, plural);
    }

    Ok(())
}
