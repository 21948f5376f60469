use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use varcodec::config::{CodecConfig, DEFAULT_CONFIG_FILE};
use varcodec::inspect::Inspection;
use varcodec::stats::{BatchStats, StatsCollector};
use varcodec::utils::io::{read_input, write_all};
use varcodec::utils::text::{format_hex, parse_hex, split_values};
use varcodec::IntWidth;

#[derive(Parser)]
#[command(name = "varcodec")]
#[command(about = "Encode, decode and inspect variable-length integers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    pub config: Option<String>,

    #[arg(long, global = true, value_enum, help = "Integer type (overrides config)")]
    pub width: Option<IntWidth>,

    #[arg(long, global = true, help = "Separator between hex bytes (overrides config)")]
    pub separator: Option<String>,

    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode decimal integers
    Encode {
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
        #[arg(long, help = "Read values from a file, or - for stdin")]
        input: Option<String>,
        #[arg(long, help = "Report encoded size statistics")]
        stats: bool,
    },
    /// Decode a hex string of back-to-back varints
    Decode {
        hex: Vec<String>,
        #[arg(long, help = "Read hex from a file, or - for stdin")]
        input: Option<String>,
        #[arg(long, help = "Report encoded size statistics")]
        stats: bool,
    },
    /// Show the group layout of one encoded value
    Inspect {
        hex: Vec<String>,
        #[arg(long, default_value_t = 0, help = "Byte offset of the value")]
        offset: usize,
    },
    /// Write a config file with default settings
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct EncodedValue {
    pub value: String,
    pub hex: String,
    pub len: usize,
}

#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub width: IntWidth,
    pub values: Vec<EncodedValue>,
    pub encoded: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BatchStats>,
}

#[derive(Debug, Serialize)]
pub struct DecodedValue {
    pub value: String,
    pub offset: usize,
    pub hex: String,
    pub len: usize,
}

#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub width: IntWidth,
    pub values: Vec<DecodedValue>,
    pub consumed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BatchStats>,
}

pub async fn run(cli: Cli, config: CodecConfig) -> Result<()> {
    let width = cli.width.unwrap_or(config.default_width);
    let separator = cli.separator.unwrap_or_else(|| config.hex_separator.clone());
    let limit = config.max_input_bytes;
    debug!(width = %width, json = cli.json, "running command");

    match cli.command {
        Commands::Encode { values, input, stats } => {
            let text = gather(values, input.as_deref(), limit).await?;
            let report = encode_report(width, &text, &separator, stats)?;
            info!(width = %width, values = report.values.len(), "encoded batch");
            if cli.json {
                print_json(&report).await
            } else {
                print(&render_encode(&report)).await
            }
        }
        Commands::Decode { hex, input, stats } => {
            let text = gather(hex, input.as_deref(), limit).await?;
            let bytes = parse_hex(&text)?;
            let report = decode_report(width, &bytes, &separator, stats)?;
            info!(width = %width, values = report.values.len(), bytes = report.consumed, "decoded batch");
            if cli.json {
                print_json(&report).await
            } else {
                print(&render_decode(&report)).await
            }
        }
        Commands::Inspect { hex, offset } => {
            let bytes = parse_hex(&hex.join(" "))?;
            let mut cursor = offset;
            let inspection = width
                .inspect(&bytes, &mut cursor)
                .with_context(|| format!("inspecting {} at offset {}", width, offset))?;
            if cli.json {
                print_json(&inspection).await
            } else {
                print(&render_inspection(&inspection)).await
            }
        }
        Commands::GenerateConfig { output, force } => {
            if Path::new(&output).exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", output);
            }
            CodecConfig::default().save(&output)?;
            info!("Wrote default config to {}", output);
            if cli.json {
                print_json(&serde_json::json!({ "config": output })).await
            } else {
                print(&format!("✅ Wrote default config to {}\n", output)).await
            }
        }
    }
}

async fn gather(args: Vec<String>, input: Option<&str>, limit: usize) -> Result<String> {
    let mut text = args.join(" ");
    if let Some(path) = input {
        text.push('\n');
        text.push_str(&read_input(path, limit).await?);
    }
    Ok(text)
}

pub fn encode_report(width: IntWidth, text: &str, separator: &str, with_stats: bool) -> Result<EncodeReport> {
    let tokens = split_values(text);
    if tokens.is_empty() {
        anyhow::bail!("no values to encode");
    }

    let mut encoded = Vec::new();
    let mut values = Vec::with_capacity(tokens.len());
    let mut stats = StatsCollector::new();

    for token in tokens {
        let start = encoded.len();
        let len = width.encode_decimal(token, &mut encoded)?;
        stats.record(len);
        values.push(EncodedValue {
            value: token.to_string(),
            hex: format_hex(&encoded[start..], separator),
            len,
        });
    }

    Ok(EncodeReport {
        width,
        values,
        encoded: format_hex(&encoded, ""),
        stats: with_stats.then(|| stats.get_stats()),
    })
}

pub fn decode_report(width: IntWidth, bytes: &[u8], separator: &str, with_stats: bool) -> Result<DecodeReport> {
    if bytes.is_empty() {
        anyhow::bail!("no bytes to decode");
    }

    let mut cursor = 0;
    let mut values = Vec::new();
    let mut stats = StatsCollector::new();

    while cursor < bytes.len() {
        let start = cursor;
        let value = width
            .decode_decimal(bytes, &mut cursor)
            .with_context(|| format!("decoding {} value #{} at offset {}", width, values.len() + 1, start))?;
        stats.record(cursor - start);
        values.push(DecodedValue {
            value,
            offset: start,
            hex: format_hex(&bytes[start..cursor], separator),
            len: cursor - start,
        });
    }

    Ok(DecodeReport {
        width,
        values,
        consumed: cursor,
        stats: with_stats.then(|| stats.get_stats()),
    })
}

pub fn render_encode(report: &EncodeReport) -> String {
    let mut out = String::new();
    for value in &report.values {
        out.push_str(&format!("{}\t{}\n", value.value, value.hex));
    }
    if report.values.len() > 1 {
        out.push_str(&format!("all\t{}\n", report.encoded));
    }
    if let Some(stats) = &report.stats {
        out.push_str(&render_stats(stats));
    }
    out
}

pub fn render_decode(report: &DecodeReport) -> String {
    let mut out = String::new();
    for value in &report.values {
        out.push_str(&format!("{}\n", value.value));
    }
    if let Some(stats) = &report.stats {
        out.push_str(&render_stats(stats));
    }
    out
}

pub fn render_inspection(inspection: &Inspection) -> String {
    let mut out = String::from("offset  byte  payload  bits  more  sign\n");
    for group in &inspection.groups {
        let sign = match group.negative {
            Some(true) => "-",
            Some(false) => "+",
            None => "",
        };
        out.push_str(&format!(
            "{:>6}  {:02x}    {:02x}       {}     {:<4}  {}\n",
            group.offset,
            group.byte,
            group.payload,
            group.payload_bits,
            if group.continuation { "yes" } else { "no" },
            sign,
        ));
    }
    out.push_str(&format!("value: {} ({} bytes)\n", inspection.value, inspection.len));
    out
}

fn render_stats(stats: &BatchStats) -> String {
    let mut out = format!(
        "📈 {} values, {} bytes, {:.2} bytes/value\n",
        stats.values, stats.bytes, stats.avg_bytes_per_value
    );
    for (len, count) in &stats.length_histogram {
        out.push_str(&format!("   {} byte(s): {}\n", len, count));
    }
    out
}

async fn print(text: &str) -> Result<()> {
    write_all(&mut tokio::io::stdout(), text.as_bytes()).await?;
    Ok(())
}

async fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    print(&text).await
}
