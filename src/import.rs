use std::path::Path;

use anyhow::{Context, Result};

use crate::{driver::Outcome, logger, session::Session, verify};

const TABLES: &[&str] = &["articles", "comments", "categories", "reporters"];

/// Upload a whole SQL dump through the console's import endpoint, print the
/// scraped summary or error lines, then check which of the known tables exist
/// and how many rows each holds.
pub fn run(session: &mut Session, file: &Path, db: &str) -> Result<()> {
    let dump = std::fs::read(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    logger::info(&format!("importing {} ({} bytes)", file.display(), dump.len()));

    let result = session.import(dump, db)?;
    match &result.outcome {
        Outcome::Error(_) => {
            for msg in &result.messages {
                println!("  ERROR: {msg}");
            }
            if result.messages.is_empty() {
                println!("  ERROR: {}", result.outcome.label());
            }
        }
        _ => {
            println!("Import SUCCESS!");
            for msg in &result.messages {
                println!("  {msg}");
            }
        }
    }

    println!("\n=== Verification ===");
    let found = verify::list_tables(session, db, Some(TABLES))?;
    println!("Tables found: {found:?}");

    for table in TABLES {
        match verify::table_cell_count(session, db, table)? {
            Some(n) => println!("  {table}: {n} rows"),
            None => println!("  {table}: could not read count"),
        }
    }

    println!("\nDone!");
    Ok(())
}
