//! Elf-assembly interpreter CLI.
//!
//! This binary is the front end for the interpreter and the opcode solver. It provides:
//! 1. **Run:** Execute a program to completion or for a bounded number of steps.
//! 2. **Cycle:** Execute until the registers seen at a watched address repeat.
//! 3. **Identify:** Solve the opcode encoding from a sample file and run its program.
//! 4. **Ambiguous:** Count samples consistent with many operations.
//! 5. **Disasm:** Re-print a parsed program.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use elfvm_core::common::SAMPLE_REGISTER_COUNT;
use elfvm_core::config::{Config, WatchConfig};
use elfvm_core::sim::{CycleOutcome, Machine, Watch, loader};
use elfvm_core::solver::{self, identify_opcodes};
use elfvm_core::{Program, Word};

#[derive(Parser, Debug)]
#[command(
    name = "elfvm",
    version,
    about = "Elf-assembly register machine",
    long_about = "Run elf-assembly programs and recover opcode encodings from samples.\n\nExamples:\n  elfvm run program.txt --registers 1,0,0,0,0,0\n  elfvm run program.txt --max-steps 1000 --stats\n  elfvm cycle program.txt --watch 28 --signature 3\n  elfvm identify samples.txt --json"
)]
struct Cli {
    /// JSON configuration file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every executed instruction to stderr.
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it halts, or for at most `--max-steps` instructions.
    Run {
        /// Program listing (`#ip N` plus `<name> a b c` lines).
        program: PathBuf,

        /// Initial register values; defaults to zeros.
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        registers: Option<Vec<Word>>,

        /// Stop after this many instructions.
        #[arg(long)]
        max_steps: Option<u64>,

        /// Print execution statistics.
        #[arg(long)]
        stats: bool,
    },

    /// Run until the signature captured at an address repeats.
    Cycle {
        /// Program listing.
        program: PathBuf,

        /// Instruction address to watch.
        #[arg(short, long)]
        watch: Option<Word>,

        /// Registers forming the signature; defaults to all.
        #[arg(short, long, value_delimiter = ',')]
        signature: Option<Vec<usize>>,

        /// Initial register values; defaults to zeros.
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        registers: Option<Vec<Word>>,

        /// Give up after this many instructions.
        #[arg(long)]
        max_steps: Option<u64>,
    },

    /// Identify opcodes from a sample file and run the program that follows the samples.
    Identify {
        /// Sample file.
        samples: PathBuf,

        /// Print the mapping as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Count samples consistent with at least `--threshold` operations.
    Ambiguous {
        /// Sample file.
        samples: PathBuf,

        /// Candidate count that makes a sample ambiguous.
        #[arg(short, long)]
        threshold: Option<usize>,
    },

    /// Parse a program and print it back.
    Disasm {
        /// Program listing.
        program: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| {
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };
    init_tracing(cli.trace || config.general.trace);
    tracing::debug!(?config, "configuration loaded");

    if let Err(e) = dispatch(cli.command, &config) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` wins over the defaults.
fn init_tracing(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(command: Commands, config: &Config) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Run {
            program,
            registers,
            max_steps,
            stats,
        } => cmd_run(&program, registers, max_steps.or(config.execution.max_steps), stats, config),
        Commands::Cycle {
            program,
            watch,
            signature,
            registers,
            max_steps,
        } => {
            let watch = resolve_watch(watch, signature, max_steps, config)?;
            cmd_cycle(&program, registers, &watch, config)
        }
        Commands::Identify { samples, json } => cmd_identify(&samples, json),
        Commands::Ambiguous { samples, threshold } => {
            let file = loader::parse_samples(&loader::load_file(&samples)?)?;
            let threshold = threshold.unwrap_or(config.solver.ambiguity_threshold);
            let count = solver::count_ambiguous(&file.samples, threshold);
            println!(
                "{count} of {} samples behave like {threshold} or more operations",
                file.samples.len()
            );
            Ok(())
        }
        Commands::Disasm { program } => {
            print!("{}", load_program(&program)?);
            Ok(())
        }
    }
}

fn load_program(path: &Path) -> Result<Program, Box<dyn Error>> {
    Ok(loader::parse_program(&loader::load_file(path)?)?)
}

fn cmd_run(
    path: &Path,
    registers: Option<Vec<Word>>,
    max_steps: Option<u64>,
    stats: bool,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let program = load_program(path)?;
    let initial = registers.unwrap_or_else(|| config.initial_registers());
    let mut machine = Machine::new(&program, &initial)?;

    let outcome = match max_steps {
        Some(limit) => machine.run_for(limit)?,
        None => machine.run()?,
    };
    if outcome.halted {
        println!("[*] Halted after {} steps", outcome.steps);
    } else {
        println!("[*] Stopped at step limit ({} steps, pc={})", outcome.steps, machine.pc());
    }
    println!("{}", machine.registers());
    if stats {
        machine.stats().print();
    }
    Ok(())
}

fn resolve_watch(
    address: Option<Word>,
    signature: Option<Vec<usize>>,
    max_steps: Option<u64>,
    config: &Config,
) -> Result<Watch, Box<dyn Error>> {
    let max_steps = max_steps.or(config.execution.max_steps);
    let base = match (address, &config.execution.watch) {
        (Some(address), _) => WatchConfig {
            address,
            registers: Vec::new(),
        },
        (None, Some(watch)) => watch.clone(),
        (None, None) => return Err("no watch address: pass --watch or set execution.watch".into()),
    };
    let mut watch = base.to_watch(max_steps);
    if let Some(registers) = signature {
        watch = watch.on_registers(&registers);
    }
    Ok(watch)
}

fn cmd_cycle(
    path: &Path,
    registers: Option<Vec<Word>>,
    watch: &Watch,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let program = load_program(path)?;
    let initial = registers.unwrap_or_else(|| config.initial_registers());
    let mut machine = Machine::new(&program, &initial)?;

    match machine.run_until_cycle(watch)? {
        CycleOutcome::Repeated(report) => {
            println!(
                "[*] Signature repeated after {} steps ({} distinct, warm-up {}, period {})",
                report.steps, report.distinct_signatures, report.warm_up, report.period
            );
            println!("first repeated:          {:?}", report.first_repeated);
            println!("last distinct:           {:?}", report.last_distinct);
        }
        CycleOutcome::Halted(outcome) => {
            println!("[*] Halted after {} steps without a repeat", outcome.steps);
            println!("{:?}", outcome.registers);
        }
        CycleOutcome::StepLimit(outcome) => {
            println!("[*] Gave up after {} steps without a repeat", outcome.steps);
            println!("{:?}", outcome.registers);
        }
    }
    Ok(())
}

fn cmd_identify(path: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let file = loader::parse_samples(&loader::load_file(path)?)?;
    let mapping = identify_opcodes(&file.samples)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
    } else {
        println!("Opcode map:");
        for (id, op) in mapping.iter() {
            println!("  {id:>2}: {op}");
        }
    }

    if let Some(raw) = file.program {
        let program = mapping.translate(&raw);
        let registers = elfvm_core::execute(&program, &[0; SAMPLE_REGISTER_COUNT])?;
        println!("Final registers: {registers:?}");
    }
    Ok(())
}
