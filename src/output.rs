//! Output formatting for lookup and fuzzy-match results

use std::io::{self, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print the files associated with a token, one per line
pub fn print_lookup(token: &str, files: &[PathBuf]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    if files.is_empty() {
        writeln!(stdout, "No files indexed for '{}'", token)?;
        return Ok(());
    }

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(stdout, "{}", token)?;
    stdout.reset()?;
    write!(stdout, " (")?;
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stdout, "{}", files.len())?;
    stdout.reset()?;
    writeln!(stdout, " files)")?;

    for file in files {
        writeln!(stdout, "  {}", file.display())?;
    }

    Ok(())
}

/// Suggest the closest indexed token for a query that missed
pub fn print_suggestion(query: &str, suggestion: Option<&str>) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    match suggestion {
        Some(key) => {
            write!(stdout, "Did you mean ")?;
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
            write!(stdout, "{}", key)?;
            stdout.reset()?;
            writeln!(stdout, "?")?;
        }
        None => {
            writeln!(stdout, "No similar token found for '{}'", query)?;
        }
    }

    Ok(())
}

/// Print fuzzy matches, best first
pub fn print_fuzzy_matches(query: &str, matches: &[String]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    if matches.is_empty() {
        writeln!(stdout, "No tokens similar to '{}'", query)?;
        return Ok(());
    }

    for key in matches {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(stdout, "{}", key)?;
        stdout.reset()?;
    }

    Ok(())
}
