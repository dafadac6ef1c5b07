use crate::config::{Config, load_config};
use crate::dump::write_report;
use crate::ir::Document;
use crate::pipeline::process_document;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "dimb",
    version,
    about = "Extract dimensions from OCR output and place inspection balloons"
)]
pub struct Args {
    /// Input document (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for JSON and single-page SVG.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Drawing standard (ASME_Y14.5, ISO_1101, DIN_406, JIS_B_0021)
    #[arg(short = 's', long = "standard")]
    pub standard: Option<String>,

    /// Fail on unknown drawing standards instead of using ASME_Y14.5
    #[arg(long = "strict-standard")]
    pub strict_standard: bool,

    /// Minimum OCR confidence for a token to be considered
    #[arg(long = "min-confidence")]
    pub min_confidence: Option<i32>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let input = read_input(args.input.as_deref())?;
    let mut doc = Document::from_json(&input)?;
    if args.standard.is_some() {
        doc.standard = args.standard.clone();
    }
    if doc.pages.is_empty() {
        return Err(anyhow::anyhow!("No pages found in input"));
    }

    let result = process_document(&doc, &config)?;

    match args.output_format {
        OutputFormat::Json => write_report(&result, args.output.as_deref())?,
        OutputFormat::Svg | OutputFormat::Png => {
            let outputs = resolve_page_outputs(
                args.output.as_deref(),
                args.output_format,
                result.pages.len(),
            )?;
            for (page, output) in result.pages.iter().zip(outputs) {
                let svg = render_svg(page, &config.theme);
                match args.output_format {
                    OutputFormat::Png => {
                        let output = output.ok_or_else(|| {
                            anyhow::anyhow!("Output path required for png output")
                        })?;
                        let mut render = config.render.clone();
                        render.width = page.width as f32;
                        render.height = page.height as f32;
                        write_output_png(&svg, &output, &render)?;
                    }
                    _ => write_output_svg(&svg, output.as_deref())?,
                }
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", env!("CARGO_CRATE_NAME")))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if args.strict_standard {
        config.extraction.strict_standard = true;
    }
    if let Some(min) = args.min_confidence {
        config.extraction.min_confidence = min;
    }
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

/// One output per page. A single page may go to stdout (SVG only); several
/// pages are numbered after the given stem, or written into a directory.
fn resolve_page_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<Option<PathBuf>>> {
    let ext = match format {
        OutputFormat::Json => "json",
        OutputFormat::Svg => "svg",
        OutputFormat::Png => "png",
    };
    if count == 1 {
        return Ok(vec![output.map(Path::to_path_buf)]);
    }
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for multi-page input"))?;
    if base.is_dir() {
        return Ok((0..count)
            .map(|idx| Some(base.join(format!("page-{}.{}", idx + 1, ext))))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("page");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((0..count)
        .map(|idx| Some(parent.join(format!("{}-{}.{}", stem, idx + 1, ext))))
        .collect())
}
