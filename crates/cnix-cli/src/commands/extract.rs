//! Extract command - pull card fields out of a single OCR output file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use cnix_core::{CniParser, ExtractionResult, FieldKind, IdentityExtractor, InputFormat, OcrOutput};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR output file (JSON array or one fragment per line), or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// How the input is encoded (default: from config, else auto)
    #[arg(long, value_enum)]
    input_format: Option<InputFormatArg>,

    /// Drop fragments below this OCR confidence, between 0 and 1 (default: from config)
    #[arg(long, value_parser = parse_min_confidence)]
    min_confidence: Option<f32>,

    /// List fields that could not be found on stderr
    #[arg(long)]
    show_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormatArg {
    /// JSON when the input starts with '[', plain text otherwise
    Auto,
    /// JSON array of fragments (EasyOCR, PaddleOCR, strings or objects)
    Json,
    /// One fragment per line
    Text,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Auto => InputFormat::Auto,
            InputFormatArg::Json => InputFormat::Json,
            InputFormatArg::Text => InputFormat::Text,
        }
    }
}

fn parse_min_confidence(value: &str) -> Result<f32, String> {
    let parsed: f32 = value.parse().map_err(|e| format!("{}", e))?;
    cnix_core::check_min_confidence(parsed).map_err(|e| e.to_string())?;
    Ok(parsed)
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let input_format = args
        .input_format
        .map(InputFormat::from)
        .unwrap_or(config.input.format);
    let min_confidence = args.min_confidence.unwrap_or(config.input.min_confidence);

    let content = read_input(&args.input).await?;
    info!("Processing OCR output: {}", args.input.display());

    let parser = config.build_parser();
    let result = extract_from_str(&content, input_format, min_confidence, &parser)?;

    if args.show_missing {
        let missing = result.missing_fields();
        if !missing.is_empty() {
            eprintln!("{}", style("Missing fields:").yellow());
            for kind in &missing {
                eprintln!("  - {}", kind);
            }
        }
    }

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        return Ok(content);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}

/// Decode OCR output and run the parser over it.
pub fn extract_from_str(
    content: &str,
    input_format: InputFormat,
    min_confidence: f32,
    parser: &CniParser,
) -> anyhow::Result<ExtractionResult> {
    let mut ocr_output = OcrOutput::parse(content, input_format)?;
    debug!("Decoded {} OCR fragments", ocr_output.len());

    ocr_output.retain_confident(min_confidence);
    Ok(parser.extract(&ocr_output))
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(FieldKind::ALL.iter().map(|kind| kind.key()))?;
    wtr.write_record(result.iter().map(|(_, value)| value))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    for (kind, value) in result.iter() {
        let value = if value.is_empty() { "-" } else { value };
        output.push_str(&format!("{:<16}{}\n", format!("{}:", label_for(kind)), value));
    }

    output
}

fn label_for(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Surname => "Surname",
        FieldKind::GivenNames => "Given names",
        FieldKind::DateOfBirth => "Date of birth",
        FieldKind::PlaceOfBirth => "Place of birth",
        FieldKind::Sex => "Sex",
        FieldKind::Height => "Height",
        FieldKind::Profession => "Profession",
    }
}
