use anyhow::{bail, Result};

use recall_lib::slides::{format_interval, Slide};
use recall_lib::Clock;

use crate::app::{find_slide, App};
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

fn slide_json(slide: &Slide, clock: &dyn Clock) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(slide)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("due".to_string(), serde_json::Value::Bool(slide.is_due(clock)));
    }
    Ok(value)
}

pub fn run_list(app: &App, collection_name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let collection = app.collection(app.find_collection(collection_name)?)?;
    let slides = collection.slides();

    match format {
        OutputFormat::Json => {
            let output = slides
                .iter()
                .map(|s| slide_json(s, &app.clock))
                .collect::<Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::paint(&collection.name, Color::BOLD, use_color));
            if slides.is_empty() {
                println!("  (no slides)");
                return Ok(());
            }

            let prompt_width = 40;
            println!(
                "{:>3}  {:<pw$} {:>8}  {}",
                "#",
                "Prompt",
                "Interval",
                "Next",
                pw = prompt_width
            );

            for (i, slide) in slides.iter().enumerate() {
                println!(
                    "{:>3}  {:<pw$} {:>8}  {}",
                    i + 1,
                    terminal::truncate(&slide.prompt, prompt_width),
                    format_interval(slide.current_interval()),
                    terminal::due_label(slide, &app.clock, use_color),
                    pw = prompt_width
                );
            }

            let stats = collection.stats(&app.clock);
            println!("\n{} slides, {} due", stats.total_slides, stats.due_slides);
        }
    }

    Ok(())
}

pub fn run_add(
    app: &mut App,
    collection_name: &str,
    prompt: String,
    answer: String,
    format: &OutputFormat,
) -> Result<()> {
    if prompt.trim().is_empty() || answer.trim().is_empty() {
        bail!("Prompt and answer must not be empty");
    }

    let id = app.find_collection(collection_name)?;
    let slide = app.new_slide(prompt, answer);
    let output = slide_json(&slide, &app.clock)?;
    let slide_id = slide.id;

    let collection = app.collection_mut(id)?;
    collection.add_slide(slide);
    let (name, position) = (collection.name.clone(), collection.len());
    app.save()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Plain => {
            println!("Added slide #{} to \"{}\"", position, name);
            println!("  ID: {}", slide_id);
        }
    }

    Ok(())
}

pub fn run_edit(
    app: &mut App,
    collection_name: &str,
    slide_query: &str,
    prompt: Option<String>,
    answer: Option<String>,
) -> Result<()> {
    if prompt.is_none() && answer.is_none() {
        bail!("Nothing to change: pass --prompt and/or --answer");
    }
    if prompt.as_deref().is_some_and(|p| p.trim().is_empty())
        || answer.as_deref().is_some_and(|a| a.trim().is_empty())
    {
        bail!("Prompt and answer must not be empty");
    }

    let id = app.find_collection(collection_name)?;
    let collection = app.library.get_mut(id)?;
    let slide_id = find_slide(collection, slide_query)?;
    if let Some(slide) = collection.slide_mut(slide_id) {
        slide.edit(prompt, answer, &app.clock);
        println!("Updated slide \"{}\"", slide);
    }
    app.save()?;

    Ok(())
}

pub fn run_remove(app: &mut App, collection_name: &str, slide_query: &str) -> Result<()> {
    let collection = app.collection_mut(app.find_collection(collection_name)?)?;
    let slide_id = find_slide(collection, slide_query)?;
    let removed = collection.remove_slide(slide_id)?;
    let name = collection.name.clone();
    app.save()?;

    println!("Removed \"{}\" from \"{}\"", removed, name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_lib::ManualClock;

    #[test]
    fn test_slide_json_includes_due_flag() {
        let clock = ManualClock::at_epoch();
        let mut slide = Slide::new("Knock knock", "Who's there?", &clock);

        let value = slide_json(&slide, &clock).unwrap();
        assert_eq!(value["prompt"], "Knock knock");
        assert_eq!(value["due"], true);

        slide.reschedule(chrono::Duration::seconds(30), &clock);
        let value = slide_json(&slide, &clock).unwrap();
        assert_eq!(value["due"], false);
        assert_eq!(value["currentInterval"], 30.0);
    }
}
