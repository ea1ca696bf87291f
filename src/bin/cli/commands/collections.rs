use anyhow::Result;

use recall_lib::slides::Collection;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Width of the name column, in characters
fn name_column_width(collections: &[Collection]) -> usize {
    collections
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 40)
}

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let collections = app.library.collections();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = collections
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id.to_string(),
                        "name": c.name,
                        "stats": c.stats(&app.clock),
                        "updatedAt": c.updated_at.to_rfc3339(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if collections.is_empty() {
                println!("No collections yet. Create one with `recall-cli collection new <name>`.");
                return Ok(());
            }

            let name_width = name_column_width(collections);

            println!("{:<width$} {:>6} {:>5}", "Name", "Slides", "Due", width = name_width);
            println!("{} {} {}", "\u{2500}".repeat(name_width), "\u{2500}".repeat(6), "\u{2500}".repeat(5));

            for c in collections {
                let stats = c.stats(&app.clock);
                let due = format!("{:>5}", stats.due_slides);
                let due = if stats.due_slides > 0 {
                    terminal::paint(&due, Color::GREEN, use_color)
                } else {
                    due
                };
                println!(
                    "{:<width$} {:>6} {}",
                    terminal::truncate(&c.name, name_width),
                    stats.total_slides,
                    due,
                    width = name_width
                );
            }
        }
    }

    Ok(())
}

pub fn run_new(app: &mut App, name: &str, format: &OutputFormat) -> Result<()> {
    let collection = app.library.add_collection(Collection::new(name));
    let (id, name) = (collection.id, collection.name.clone());
    app.save()?;
    log::info!("Created collection {} ({})", name, id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": id.to_string(), "name": name });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Created collection \"{}\"", name);
            println!("  ID: {}", id);
        }
    }

    Ok(())
}

pub fn run_rename(app: &mut App, name: &str, new_name: &str) -> Result<()> {
    let id = app.find_collection(name)?;
    let collection = app.collection_mut(id)?;
    let old_name = collection.name.clone();
    collection.rename(new_name);
    app.save()?;

    println!("Renamed \"{}\" to \"{}\"", old_name, new_name);
    Ok(())
}

pub fn run_remove(app: &mut App, name: &str) -> Result<()> {
    let id = app.find_collection(name)?;
    let removed = app.library.remove_collection(id)?;
    app.save()?;

    println!("Removed collection \"{}\" ({} slides)", removed.name, removed.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_column_width_counts_characters() {
        let collections = vec![Collection::new("Vokabeln \u{00fc}ben"), Collection::new("Jokes")];
        assert_eq!(name_column_width(&collections), 14);

        assert_eq!(name_column_width(&[Collection::new("ab")]), 4);
        assert_eq!(name_column_width(&[]), 4);
        assert_eq!(name_column_width(&[Collection::new("x".repeat(60))]), 40);
    }
}
