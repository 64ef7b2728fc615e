use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use vasm::introspect::mnemonics;
use vasm::{compile, emit, label_comments, resolve_labels, resolve_registers, AsmConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assembler for the VASM fantasy console")]
struct Opts {
    /// Assembly source (one instruction per line)
    #[arg(value_name = "SOURCE", required_unless_present = "mnemonics")]
    input: Option<PathBuf>,
    /// Output binary image
    #[arg(short, long, default_value = "a.out")]
    output: PathBuf,
    /// Assemble the lines that parsed even if others did not
    #[arg(long)]
    keep_going: bool,
    /// Print label offsets and doc comments
    #[arg(long)]
    labels: bool,
    /// Print the register allocation
    #[arg(long)]
    registers: bool,
    /// Print the instruction reference and exit
    #[arg(long)]
    mnemonics: bool,
    /// Report format for --labels, --registers and --mnemonics
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct LabelOut {
    name: String,
    offset: u16,
    doc: String,
}

#[derive(Debug, Serialize)]
struct RegisterOut {
    name: String,
    number: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();

    if opts.mnemonics {
        match opts.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(mnemonics())?),
            OutputFormat::Text => {
                for d in mnemonics() {
                    println!("{:#04x}  {:<40} {}", d.op.byte(), d.syntax, d.summary);
                }
            }
        }
        return Ok(());
    }

    let Some(input) = opts.input.as_ref() else {
        bail!("no source file given");
    };
    let cfg = AsmConfig {
        keep_going: opts.keep_going,
    };
    let text = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;

    let mut compiled = compile(&text);
    if compiled.has_errors() {
        let path = fs::canonicalize(input).unwrap_or_else(|_| input.clone());
        for e in &compiled.errors {
            eprintln!("{e}");
            eprintln!("  at (file://{}:{}:0)", path.display(), e.reported_line());
        }
        if !cfg.keep_going {
            bail!("{} line(s) failed to assemble", compiled.errors.len());
        }
    }

    let program = &mut compiled.program;
    let regs = resolve_registers(program)?;
    let labels = resolve_labels(program)?;
    let bin = emit(program)?;
    fs::write(&opts.output, &bin).with_context(|| format!("writing {}", opts.output.display()))?;
    tracing::info!(bytes = bin.len(), output = %opts.output.display(), "assembled");

    if opts.labels {
        let docs = label_comments(program);
        let mut out: Vec<LabelOut> = labels
            .iter()
            .map(|(name, offset)| LabelOut {
                name: name.to_string(),
                offset,
                doc: docs.get(name).cloned().unwrap_or_default(),
            })
            .collect();
        out.sort_by_key(|l| l.offset);
        match opts.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&out)?),
            OutputFormat::Text => {
                for l in &out {
                    println!("{:#06x} {}", l.offset, l.name);
                    for line in l.doc.lines() {
                        println!("         ; {line}");
                    }
                }
            }
        }
    }

    if opts.registers {
        let out: Vec<RegisterOut> = regs
            .iter()
            .map(|(name, number)| RegisterOut {
                name: name.to_string(),
                number,
            })
            .collect();
        match opts.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&out)?),
            OutputFormat::Text => {
                for r in &out {
                    println!("{:>3} {}", r.number, r.name);
                }
            }
        }
    }

    Ok(())
}
