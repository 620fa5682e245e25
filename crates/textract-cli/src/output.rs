use std::io::Write;

use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the page count and the character count of every page.
pub fn print_page_summary(
    w: &mut dyn Write,
    file_name: &str,
    pages: &[String],
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} ({} pages)", file_name.bold(), pages.len())?;
    } else {
        writeln!(w, "{} ({} pages)", file_name, pages.len())?;
    }

    for (index, page) in pages.iter().enumerate() {
        let chars = page.trim().chars().count();
        let line = format!("  page {:>4}: {} chars", index + 1, chars);
        if chars == 0 && color.enabled() {
            writeln!(w, "{}  {}", line.dimmed(), "(no text layer)".yellow())?;
        } else if chars == 0 {
            writeln!(w, "{}  (no text layer)", line)?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}
