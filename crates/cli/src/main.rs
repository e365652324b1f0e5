//! Golden-vector generator CLI.
//!
//! This binary wraps the reference simulator for hardware verification flows. It performs:
//! 1. **Generate:** Assemble a program, simulate it and write the instruction/expected pair.
//! 2. **Assemble / Disasm:** Convert between assembly and the instruction-file format.
//! 3. **Run / Check:** Simulate an instruction file, optionally comparing against an
//!    expected file.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rvgold_core::config::Config;
use rvgold_core::isa::asm::assemble_words;
use rvgold_core::isa::disasm::disassemble_listing;
use rvgold_core::sim::loader;
use rvgold_core::sim::vector::{Builtin, GoldenVector};
use rvgold_core::Simulator;

type CliResult<T> = Result<T, Box<dyn StdError>>;

#[derive(Parser, Debug)]
#[command(
    name = "rvgold",
    author,
    version,
    about = "RV64I subset encoder and golden-vector generator",
    long_about = "Assemble add/sub/and/or/addi/ld/sd/beq programs, run them on the reference \
                  simulator and emit the files a hardware test bench compares against.\n\n\
                  Examples:\n  rvgold generate --builtin edge --out-dir tests\n  \
                  rvgold generate --source prog.s --name prog\n  \
                  rvgold check tests/instructions_edge.txt tests/expected_edge.txt"
)]
struct Cli {
    /// JSON configuration file (memory size, cycle limit, tracing).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log every retired instruction to stderr.
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble and simulate a program, writing instructions_<name>.txt and expected_<name>.txt.
    Generate {
        /// Assembly source file; overrides --builtin.
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Built-in program to use when no source is given.
        #[arg(short, long, value_enum, default_value_t = BuiltinArg::Edge)]
        builtin: BuiltinArg,

        /// Directory the two files are written into.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// File name suffix (defaults to the builtin name or the source file stem).
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Assemble a source file into the instruction-file format.
    Assemble {
        /// Assembly source file.
        file: PathBuf,

        /// Output file (stdout if omitted).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Simulate an instruction file and print the expected-state text.
    Run {
        /// Instruction file (one hex byte per line).
        file: PathBuf,

        /// Print the snapshot (and statistics) as JSON.
        #[arg(long)]
        json: bool,

        /// Print the instruction mix after the snapshot.
        #[arg(long)]
        stats: bool,
    },

    /// Simulate an instruction file and compare against an expected file.
    Check {
        /// Instruction file.
        instructions: PathBuf,
        /// Expected-state file.
        expected: PathBuf,
    },

    /// Disassemble an instruction file.
    Disasm {
        /// Instruction file.
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BuiltinArg {
    Basic,
    StoreLoad,
    Edge,
}

impl From<BuiltinArg> for Builtin {
    fn from(arg: BuiltinArg) -> Self {
        match arg {
            BuiltinArg::Basic => Self::Basic,
            BuiltinArg::StoreLoad => Self::StoreLoad,
            BuiltinArg::Edge => Self::Edge,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.trace);

    let result = load_config(cli.config.as_deref(), cli.trace).and_then(|config| {
        match cli.command {
            Commands::Generate {
                source,
                builtin,
                out_dir,
                name,
            } => cmd_generate(&config, source.as_deref(), builtin.into(), &out_dir, name),
            Commands::Assemble { file, out } => cmd_assemble(&file, out.as_deref()),
            Commands::Run { file, json, stats } => cmd_run(&config, &file, json, stats),
            Commands::Check {
                instructions,
                expected,
            } => cmd_check(&config, &instructions, &expected),
            Commands::Disasm { file } => cmd_disasm(&file),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr subscriber: `RUST_LOG` if set, otherwise `warn` (`debug` with `--trace`).
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, trace: bool) -> CliResult<Config> {
    let mut config = match path {
        Some(p) => Config::from_file(p)?,
        None => Config::default(),
    };
    config.general.trace_instructions |= trace;
    debug!(?path, ?config, "configuration loaded");
    Ok(config)
}

fn cmd_generate(
    config: &Config,
    source: Option<&Path>,
    builtin: Builtin,
    out_dir: &Path,
    name: Option<String>,
) -> CliResult<()> {
    let (text, default_name) = match source {
        Some(path) => {
            let stem = path
                .file_stem()
                .map_or_else(|| "program".to_string(), |s| s.to_string_lossy().into_owned());
            (loader::read_text(path)?, stem)
        }
        None => (builtin.source().to_string(), builtin.name().to_string()),
    };
    let name = name.unwrap_or(default_name);

    let vector = GoldenVector::from_source(&text, config)?;
    let paths = vector.write_to(out_dir, &name)?;
    info!(
        name = %name,
        instructions = %paths.instructions.display(),
        expected = %paths.expected.display(),
        "golden vector written"
    );

    println!(
        "{} instructions, {} cycles",
        vector.words.len(),
        vector.expected.cycles
    );
    println!("  {}", paths.instructions.display());
    println!("  {}", paths.expected.display());
    Ok(())
}

fn cmd_assemble(file: &Path, out: Option<&Path>) -> CliResult<()> {
    let words = assemble_words(&loader::read_text(file)?)?;
    let text = loader::render_hex_bytes(&words);
    match out {
        Some(path) => loader::write_text(path, &text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_run(config: &Config, file: &Path, json: bool, stats: bool) -> CliResult<()> {
    let bytes = loader::with_sentinel(loader::read_hex_file(file)?);
    let mut sim = Simulator::new(bytes, config)?;
    let snapshot = match sim.run() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprint!("{}", sim.cpu.dump_state());
            return Err(e.into());
        }
    };

    if json {
        let value = if stats {
            serde_json::json!({ "snapshot": snapshot, "stats": sim.cpu.stats })
        } else {
            serde_json::to_value(&snapshot)?
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{snapshot}");
        if stats {
            sim.cpu.stats.print();
        }
    }
    Ok(())
}

fn cmd_check(config: &Config, instructions: &Path, expected: &Path) -> CliResult<()> {
    let want = loader::read_expected_file(expected)?;
    let bytes = loader::with_sentinel(loader::read_hex_file(instructions)?);
    let got = Simulator::new(bytes, config)?.run()?;

    let mismatches = want.diff(&got);
    if mismatches.is_empty() {
        println!("PASS ({} cycles)", got.cycles);
        return Ok(());
    }
    println!("FAIL: {} mismatches", mismatches.len());
    for m in &mismatches {
        println!("  {m}");
    }
    process::exit(1);
}

fn cmd_disasm(file: &Path) -> CliResult<()> {
    let words = loader::bytes_to_words(&loader::read_hex_file(file)?)?;
    print!("{}", disassemble_listing(&words));
    Ok(())
}
