//! autochangelog - CLI entry point.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use autochangelog::changelog::writer::generate_summary;
use autochangelog::changelog::{write_changelog, AssembleOptions, ChangelogDocument, Renderer};
use autochangelog::git::load_history;
use autochangelog::release::group;

/// Output format of the generated changelog.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Render through the changelog template
    #[default]
    Markdown,
    /// Dump the document model as JSON
    Json,
}

/// Generate a changelog straight from your git commits.
#[derive(Parser, Debug)]
#[command(name = "autochangelog")]
#[command(about = "Generate a changelog straight from your git commits")]
#[command(version)]
struct Cli {
    /// Path to the repository's root directory
    #[arg(short = 'r', long, default_value = ".")]
    repo: PathBuf,

    /// Revision whose history is walked
    #[arg(long, default_value = "HEAD")]
    rev: String,

    /// The changelog's title
    #[arg(short = 't', long, default_value = "Changelog")]
    title: String,

    /// Your project's description
    #[arg(short = 'd', long)]
    description: Option<String>,

    /// Where to save the generated changelog ("-" for stdout)
    #[arg(short = 'o', long, default_value = "CHANGELOG.md")]
    output: PathBuf,

    /// Directory containing a changelog.md.j2 template to render with
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Include the message body in the output
    #[arg(short = 'b', long)]
    body: bool,

    /// Include the message footer in the output
    #[arg(short = 'f', long)]
    footer: bool,

    /// Assume unreleased commits will be in this version
    #[arg(short = 'a', long, value_name = "VERSION")]
    assume: Option<String>,

    /// Only emit the unreleased section
    #[arg(short = 'n', long = "new")]
    only_new: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            title: self.title.clone(),
            description: self.description.clone(),
            include_body: self.body,
            include_footer: self.footer,
            assume_version: self.assume.clone(),
            only_unreleased: self.only_new,
        }
    }

    fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Step 1: Read the repository once
    let history = load_history(&cli.repo, &cli.rev)
        .with_context(|| format!("Could not read git history from {}", cli.repo.display()))?;

    // Step 2: Classify and group commits by release
    let grouping = group(&history.commits, &history.tags);

    // Step 3: Assemble and render
    let document = ChangelogDocument::assemble(&grouping, &cli.assemble_options());
    let rendered = match cli.format {
        OutputFormat::Markdown => {
            let renderer = match &cli.template_dir {
                Some(dir) => Renderer::from_dir(dir),
                None => Renderer::builtin(),
            }
            .context("Failed to load changelog template")?;
            renderer
                .render(&document)
                .context("Failed to render changelog")?
        }
        OutputFormat::Json => document.to_json().context("Failed to serialize changelog")?,
    };

    // Step 4: Write or print
    if cli.writes_to_stdout() {
        std::io::stdout()
            .write_all(rendered.as_bytes())
            .context("Failed to write changelog to stdout")?;
    } else {
        write_changelog(&cli.output, &rendered).context("Failed to write changelog")?;
        println!(
            "✓ {}",
            generate_summary(&grouping, &cli.output.display().to_string())
        );
    }

    Ok(())
}
