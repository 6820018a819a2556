use crate::config::{Config, load_config};
use crate::figures::catalog;
use crate::layout_dump::write_layout_dump;
use crate::parser::{parse_lesson, parse_overlay};
use crate::render::{render_document, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gor", version, about = "Geometry overlay renderer for curriculum artifacts")]
pub struct Args {
    /// Design-system JSON with the overlay style table
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a single overlay JSON document
    Render {
        /// Overlay file (.json) or '-' for stdin
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// Output file (svg/png). Defaults to stdout for SVG if omitted.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
        output_format: OutputFormat,

        /// Canvas width when the overlay does not set one
        #[arg(short = 'w', long = "width")]
        width: Option<u32>,

        /// Canvas height when the overlay does not set one
        #[arg(short = 'H', long = "height")]
        height: Option<u32>,
    },
    /// Render every overlay of a lesson record into a directory
    Lesson {
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        #[arg(short = 'o', long = "output")]
        output: PathBuf,

        /// Keep going after an overlay fails to render
        #[arg(long = "keepGoing")]
        keep_going: bool,
    },
    /// Write the curriculum figure catalog
    Figures {
        #[arg(short = 'o', long = "output", default_value = "svg_outputs")]
        output: PathBuf,
    },
    /// Dump resolved pixel geometry of an overlay as JSON
    Dump {
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Render {
            input,
            output,
            output_format,
            width,
            height,
        } => {
            let mut config = config;
            if let Some(width) = width {
                config.canvas.width = width;
            }
            if let Some(height) = height {
                config.canvas.height = height;
            }
            run_render(&config, input.as_deref(), output.as_deref(), output_format)
        }
        Command::Lesson {
            input,
            output,
            keep_going,
        } => run_lesson(&config, &input, &output, keep_going),
        Command::Figures { output } => run_figures(&config, &output),
        Command::Dump { input, output } => {
            let overlay = parse_overlay(&read_input(input.as_deref())?)?;
            let document = overlay.document(&config.canvas)?;
            write_layout_dump(&output, &document, &config.theme)?;
            log::info!("Wrote layout dump: {}", output.display());
            Ok(())
        }
    }
}

fn run_render(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let overlay = parse_overlay(&read_input(input)?)?;
    let document = overlay.document(&config.canvas)?;
    let svg = render_document(&document, &config.theme)?;
    match format {
        OutputFormat::Svg => write_output_svg(&svg, output),
        OutputFormat::Png => {
            let output = output
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&svg, output, &config.render)
        }
    }
}

fn run_lesson(config: &Config, input: &Path, output: &Path, keep_going: bool) -> Result<()> {
    let lesson = parse_lesson(&std::fs::read_to_string(input)?)?;
    std::fs::create_dir_all(output)?;
    let mut failures = 0usize;
    let mut written = 0usize;
    for overlay in lesson.documents(&config.canvas)? {
        match render_document(&overlay.document, &config.theme) {
            Ok(svg) => {
                write_output_svg(&svg, Some(&output.join(&overlay.file_name)))?;
                written += 1;
                log::info!("Generated overlay: {}", overlay.file_name);
            }
            Err(err) if keep_going => {
                failures += 1;
                log::warn!("Skipped overlay {}: {err}", overlay.file_name);
            }
            Err(err) => {
                return Err(anyhow::anyhow!("{}: {err}", overlay.file_name));
            }
        }
    }
    log::info!(
        "Lesson {}: {written} overlays written, {failures} skipped",
        lesson.lesson_id
    );
    if failures > 0 {
        return Err(anyhow::anyhow!("{failures} overlays failed to render"));
    }
    Ok(())
}

fn run_figures(config: &Config, output: &Path) -> Result<()> {
    let figures = catalog()?;
    log::info!("Generating {} SVG files...", figures.len());
    for figure in &figures {
        let svg = render_document(&figure.document, &config.theme)?;
        write_output_svg(&svg, Some(&output.join(figure.path)))?;
        log::info!("Created: {} (grade {})", figure.path, figure.grade);
    }
    log::info!("All {} figures written to {}", figures.len(), output.display());
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
