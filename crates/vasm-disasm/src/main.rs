use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use vasm_disasm::{listing, load_raw_bin, render_text};

#[derive(Parser, Debug)]
#[command(author, version, about = "VASM image disassembler", long_about = None)]
struct Cli {
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Skip N bytes at start of file before decoding
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Show instruction bytes
    #[arg(long)]
    show_bytes: bool,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let img = load_raw_bin(&cli.input, cli.skip, cli.len)?;
    let lines = listing(&img);
    let buf = match cli.format {
        OutputFormat::Text => render_text(&lines, cli.show_bytes),
        OutputFormat::Json => serde_json::to_string_pretty(&lines)? + "\n",
    };
    if let Some(path) = cli.out {
        std::fs::write(path, buf)?;
    } else {
        print!("{buf}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from(["vasm-disasm", "a.out", "--skip", "4", "--show-bytes", "--format", "json"]).unwrap();
        assert_eq!(cli.skip, 4);
        assert!(cli.show_bytes);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(cli.len.is_none());
    }
}
