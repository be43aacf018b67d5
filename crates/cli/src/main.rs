use anyhow::{Context, Result};
use class_chunker::{ChunkSink, Chunker, JsonLinesSink, MarkedTextSink};
use clap::{CommandFactory, Parser};
use config::{OutputFormat, Settings};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

mod config;

#[derive(Parser)]
#[command(name = "class-chunker")]
#[command(about = "Split a class-based source file into retrieval chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to chunk
    file: Option<PathBuf>,

    /// TOML config with [chunker] and [output] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Repeat the package and import lines in method/constructor chunks
    #[arg(long)]
    member_imports: bool,

    /// Do not attach doc comments to type header chunks
    #[arg(long)]
    no_doc_comments: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let Some(file) = cli.file.as_deref() else {
        println!("{}", Cli::command().render_usage());
        return Ok(());
    };

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        settings.output.format = format;
    }
    if cli.member_imports {
        settings.chunker.member_imports = true;
    }
    if cli.no_doc_comments {
        settings.chunker.include_doc_comments = false;
    }

    let chunker = Chunker::new(settings.chunker).context("Invalid chunker configuration")?;
    let writer = BufWriter::new(io::stdout().lock());

    let emitted = match settings.output.format {
        OutputFormat::Text => {
            let mut sink = MarkedTextSink::with_markers(writer, settings.output.markers);
            let emitted = chunk_into(&chunker, file, &mut sink)?;
            sink.into_inner()?;
            emitted
        }
        OutputFormat::Jsonl => {
            let mut sink = JsonLinesSink::new(writer);
            let emitted = chunk_into(&chunker, file, &mut sink)?;
            sink.into_inner()?;
            emitted
        }
    };

    log::info!("{}: {emitted} chunks", file.display());
    Ok(())
}

fn chunk_into<S: ChunkSink>(chunker: &Chunker, file: &Path, sink: &mut S) -> Result<usize> {
    chunker
        .chunk_file_into(file, sink)
        .with_context(|| format!("Failed to chunk {}", file.display()))
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
