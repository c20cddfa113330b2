use anyhow::{Context as _, Result, bail};
use clap::{ArgAction, Parser};
use patharg::{InputArg, OutputArg};
use std::io::BufWriter;
use std::process;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use wabin::lookup::FunctionIndex;
use wabin::{Context, Feature, Features, TracingDiagnostics, build_cfg, write_dot};

/// Writes the control-flow graph of one function of a WebAssembly module as
/// a Graphviz digraph.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The module to read. If not provided or is '-', read from standard
    /// input.
    #[arg(default_value_t)]
    input: InputArg,

    /// The function, by name (import, export or name section) or by index.
    #[arg(short, long)]
    function: String,

    /// Where to write the graph. Defaults to standard output.
    #[arg(short, long, default_value_t)]
    output: OutputArg,

    /// Turn off a proposal that is otherwise enabled, e.g. `simd`.
    #[arg(long = "disable", value_name = "FEATURE")]
    disabled: Vec<Feature>,

    /// More logging; repeat for more still. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(&cli) {
        eprintln!("ERROR: {err:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut features = Features::all();
    for &feature in &cli.disabled {
        features.disable(feature);
    }
    let sink = TracingDiagnostics;
    let cx = Context::new(features, &sink);

    let bytes = cli
        .input
        .read()
        .with_context(|| format!("failed to read `{}`", cli.input))?;

    let functions = FunctionIndex::build(&bytes, &cx);
    let Some(index) = functions.lookup(&cli.function) else {
        bail!("unknown function `{}`", cli.function);
    };
    let Some(code) = functions.code_for_function(index, &cx) else {
        bail!("no code for function {index}");
    };

    let mut cfg = build_cfg(code.body, &cx);
    cfg.elide_empty_blocks();

    let out = cli
        .output
        .create()
        .with_context(|| format!("failed to open `{}`", cli.output))?;
    write_dot(&cfg, &cx, &mut BufWriter::new(out))
        .with_context(|| format!("failed to write `{}`", cli.output))?;
    Ok(())
}
