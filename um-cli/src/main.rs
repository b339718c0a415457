//! `um` - command-line host for the Universal Machine
//!
//! Program output goes to stdout and diagnostics to stderr. Exit status is 0
//! on a clean halt, 1 on any failure, and 2 when `--max-cycles` stops the run.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use um_runtime::{HaltReason, IOHandler, VMConfig, VM};
use um_spec::{Program, TraceRow};

#[derive(Debug, Parser)]
#[command(name = "um", version, about = "Universal Machine toolchain")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a program image, wiring stdin and stdout to the machine
    Run {
        #[arg(default_value = "codex.umz")]
        image: PathBuf,

        /// Stop after this many instructions
        #[arg(long, value_name = "N")]
        max_cycles: Option<u64>,

        /// Largest block a program may allocate, in words
        #[arg(long, value_name = "WORDS")]
        max_block_words: Option<u32>,

        /// Log every instruction at trace level
        #[arg(long)]
        trace: bool,

        /// Write the execution trace to FILE (rows stay in memory until the
        /// run ends; bound long runs with --max-cycles)
        #[arg(long, value_name = "FILE")]
        trace_out: Option<PathBuf>,

        /// Print execution statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Assemble source text into a program image
    Asm {
        source: PathBuf,

        /// Output image (default: SOURCE with a .um extension)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Print a listing of a program image
    Disasm { image: PathBuf },
}

fn init_logging(verbose: u8, trace: bool) {
    let default = match (verbose, trace) {
        (0, false) => "warn",
        (0, true) => "warn,um_runtime=trace",
        (1, _) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let trace = matches!(cli.command, Command::Run { trace: true, .. });
    init_logging(cli.verbose, trace);

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("um: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Command) -> Result<ExitCode> {
    match command {
        Command::Run {
            image,
            max_cycles,
            max_block_words,
            trace,
            trace_out,
            stats,
        } => {
            let config = VMConfig {
                max_cycles,
                trace,
                enable_execution_trace: trace_out.is_some(),
                max_block_words: max_block_words.unwrap_or(u32::MAX),
                ..VMConfig::default()
            };
            run(&image, config, trace_out.as_deref(), stats)
        }
        Command::Asm { source, output } => {
            let output = output.unwrap_or_else(|| default_image_path(&source));
            assemble(&source, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Disasm { image } => {
            disassemble(&image)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_image(path: &Path) -> Result<Program> {
    Program::load(path).with_context(|| format!("failed to load image {}", path.display()))
}

fn run(image: &Path, config: VMConfig, trace_out: Option<&Path>, stats: bool) -> Result<ExitCode> {
    let program = load_image(image)?;
    debug!(image = %image.display(), checksum = %program.checksum_hex(), "loaded image");
    if trace_out.is_some() && config.max_cycles.is_none() {
        warn!("--trace-out without --max-cycles keeps one row per instruction in memory");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let io = IOHandler::with_streams(stdin.lock(), stdout.lock());
    let max_cycles = config.max_cycles;
    let mut vm = VM::new(program, io, config);

    let outcome = vm.run();
    let flushed = vm.io_mut().flush();

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            if let Err(flush_err) = flushed {
                warn!(error = %flush_err, "failed to flush output");
            }
            if let Some(path) = trace_out {
                if let Err(trace_err) = write_trace(path, &vm.take_execution_trace()) {
                    warn!("trace not written: {:#}", trace_err);
                }
            }
            let kind = err.kind();
            let cycles = vm.state().cycles;
            return Err(anyhow::Error::new(err)
                .context(format!("machine failed after {} cycles ({})", cycles, kind)));
        }
    };
    flushed.context("failed to flush output")?;

    if stats {
        let heap = &result.heap_stats;
        eprintln!("cycles:            {}", result.cycles);
        eprintln!("bytes in/out:      {}/{}", vm.io().bytes_read(), vm.io().bytes_written());
        eprintln!("allocations:       {}", heap.allocations);
        eprintln!("reclamations:      {}", heap.reclamations);
        eprintln!("peak live blocks:  {}", heap.peak_live_blocks);
        eprintln!("program loads:     {}", heap.program_loads);
    }

    if let Some(path) = trace_out {
        write_trace(path, &result.execution_trace)?;
    }

    match result.halt_reason {
        HaltReason::Halt => Ok(ExitCode::SUCCESS),
        HaltReason::CycleLimit => {
            warn!(cycles = result.cycles, "cycle limit reached");
            eprintln!(
                "um: stopped after reaching the cycle limit of {}",
                max_cycles.unwrap_or(result.cycles)
            );
            Ok(ExitCode::from(2))
        }
    }
}

fn write_trace(path: &Path, rows: &[TraceRow]) -> Result<()> {
    let bytes = um_spec::trace::encode_trace(rows).context("failed to encode execution trace")?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write trace to {}", path.display()))?;
    debug!(rows = rows.len(), path = %path.display(), "wrote trace");
    Ok(())
}

fn assemble(source: &Path, output: &Path) -> Result<()> {
    let text = std::fs::read_to_string(source)
        .with_context(|| format!("failed to read {}", source.display()))?;
    let program = um_assembler::assemble(&text)
        .with_context(|| format!("failed to assemble {}", source.display()))?;
    program
        .save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    debug!(words = program.len(), output = %output.display(), "assembled");
    Ok(())
}

fn disassemble(image: &Path) -> Result<()> {
    let program = load_image(image)?;
    let listing = um_disassembler::disassemble(&program)?;
    io::stdout()
        .lock()
        .write_all(listing.as_bytes())
        .context("failed to write listing")?;
    Ok(())
}

fn default_image_path(source: &Path) -> PathBuf {
    source.with_extension("um")
}
