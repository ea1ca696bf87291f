use std::io::{self, BufRead, Write};

use anyhow::Result;
use rand::Rng;

use recall_lib::slides::{
    format_interval, preview_intervals, select_for_study, Difficulty, SlideError, StudySession,
};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

/// Show which slide would come up next without starting a session
pub fn run_next(app: &App, collection_name: &str, format: &OutputFormat) -> Result<()> {
    let collection = app.collection(app.find_collection(collection_name)?)?;
    let slide = select_for_study(collection, &app.clock, &mut rand::thread_rng())?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": slide.id.to_string(),
                "prompt": slide.prompt,
                "answer": slide.answer,
                "due": slide.is_due(&app.clock),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", slide.prompt);
            if !slide.is_due(&app.clock) {
                println!("  (nothing due, picked at random)");
            }
        }
    }

    Ok(())
}

pub fn run(app: &mut App, collection_name: &str, limit: Option<usize>, use_color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let mut rng = rand::thread_rng();

    study_loop(app, collection_name, limit, &mut input, &mut output, &mut rng, use_color)?;
    Ok(())
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

/// Run an interactive review session, saving after every rating.
/// Returns the number of slides rated.
pub fn study_loop<I: BufRead, O: Write, R: Rng + ?Sized>(
    app: &mut App,
    collection_name: &str,
    limit: Option<usize>,
    input: &mut I,
    out: &mut O,
    rng: &mut R,
    use_color: bool,
) -> Result<usize> {
    let id = app.find_collection(collection_name)?;
    let mut session = StudySession::new();

    writeln!(
        out,
        "Studying {}. Press Enter to reveal, q to quit.",
        terminal::paint(&app.collection(id)?.name, Color::BOLD, use_color)
    )?;

    loop {
        if limit.is_some_and(|max| session.reviewed() >= max) {
            break;
        }

        let collection = app.library.get(id)?;
        let slide = match session.next(collection, &app.clock, &mut *rng) {
            Ok(slide) => slide,
            Err(SlideError::EmptyCollection(name)) => {
                writeln!(out, "\"{}\" has no slides yet.", name)?;
                break;
            }
            Err(e) => return Err(e.into()),
        };
        let was_due = slide.is_due(&app.clock);
        let answer = slide.answer.clone();
        let [easy, medium, hard] = preview_intervals(slide);

        writeln!(out)?;
        for line in terminal::wrap_lines(&slide.prompt, "  ", 80) {
            writeln!(out, "{}", terminal::paint(&line, Color::BOLD, use_color))?;
        }
        if !was_due {
            writeln!(out, "{}", terminal::paint("  (nothing due, random pick)", Color::DIM, use_color))?;
        }
        write!(out, "> ")?;
        out.flush()?;

        match read_answer(input)?.as_deref() {
            None | Some("q") => {
                session.skip()?;
                break;
            }
            Some(_) => {}
        }

        session.reveal()?;
        for line in terminal::wrap_lines(&answer, "  ", 80) {
            writeln!(out, "{}", terminal::paint(&line, Color::CYAN, use_color))?;
        }
        write!(
            out,
            "[e]asy {} / [m]edium {} / [h]ard {} / [s]kip / [q]uit: ",
            format_interval(easy),
            format_interval(medium),
            format_interval(hard)
        )?;
        out.flush()?;

        let difficulty = match read_answer(input)?.as_deref() {
            None | Some("q") => {
                session.skip()?;
                break;
            }
            Some("s") => {
                session.skip()?;
                continue;
            }
            Some(other) => Difficulty::from_input(other),
        };

        let collection = app.library.get_mut(id)?;
        let rated = session.rate(collection, difficulty, &app.clock)?;
        writeln!(
            out,
            "{}",
            terminal::paint(
                &format!("Rated {}, next review in {}", difficulty, format_interval(rated.current_interval())),
                Color::GRAY,
                use_color
            )
        )?;
        app.save()?;
    }

    writeln!(
        out,
        "\nReviewed {} slide{}.",
        session.reviewed(),
        if session.reviewed() == 1 { "" } else { "s" }
    )?;
    Ok(session.reviewed())
}
