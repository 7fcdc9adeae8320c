use std::path::Path;

use anyhow::{Context, Result};

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let events = roster_core::ics::parse_events(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if events.is_empty() {
        println!("No events in {}", file.display());
        return Ok(());
    }

    for event in &events {
        let end = event
            .end
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!("  {} → {}  {}", event.start, end, event.summary);
        if let Some(ref desc) = event.description {
            if !desc.is_empty() {
                println!("      {}", desc);
            }
        }
    }
    println!("\n{} events", events.len());

    Ok(())
}
