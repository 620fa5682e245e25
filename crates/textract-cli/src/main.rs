use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use textract_core::PdfBackend;
use textract_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// Extract plain text from PDF files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the text of every page, in page order
    Extract {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Write the text to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the page count and how much text each page holds
    Pages {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let backend = MupdfBackend::new();

    match cli.command {
        Command::Extract { file_path, output } => extract(&backend, &file_path, output),
        Command::Pages {
            file_path,
            no_color,
        } => pages(&backend, &file_path, no_color),
    }
}

fn extract(
    backend: &dyn PdfBackend,
    file_path: &Path,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    ensure_exists(file_path)?;

    let text = backend
        .extract_text(file_path)
        .map_err(|e| anyhow::anyhow!("{}: {}", file_path.display(), e))?;
    tracing::info!(path = %file_path.display(), chars = text.chars().count(), "extracted text");

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };
    writeln!(writer, "{}", text)?;
    writer.flush()?;
    Ok(())
}

fn pages(backend: &dyn PdfBackend, file_path: &Path, no_color: bool) -> anyhow::Result<()> {
    ensure_exists(file_path)?;

    let pages = backend
        .extract_pages(file_path)
        .map_err(|e| anyhow::anyhow!("{}: {}", file_path.display(), e))?;

    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string());

    let mut stdout = std::io::stdout();
    output::print_page_summary(&mut stdout, &file_name, &pages, ColorMode(!no_color))?;
    Ok(())
}

fn ensure_exists(file_path: &Path) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }
    Ok(())
}
