use std::path::PathBuf;

use anyhow::Context as _;
use chorus::{
    CompileOptions, Compilation, DEFAULT_SPACE_TOLERANCE, DEFAULT_TIME_TOLERANCE, Routine,
    Severity, VehicleId,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chorus", version)]
struct Cli {
    /// Log pipeline stages (debug level) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a choreography and report diagnostics.
    Compile(CompileArgs),
    /// List the breakpoints of a choreography.
    Breakpoints(InputArgs),
    /// Print one vehicle's state and light intensity at a given time.
    Sample(SampleArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input choreography (`.jocs` JSON).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Uniform scale applied to every length.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Args, Debug)]
struct CompileArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Write the compiled routine as JSON.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Exit non-zero when the report contains errors.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Run per-vehicle stages in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Continuity time tolerance, seconds.
    #[arg(long, default_value_t = DEFAULT_TIME_TOLERANCE)]
    time_tol: f64,

    /// Continuity distance tolerance, meters.
    #[arg(long, default_value_t = DEFAULT_SPACE_TOLERANCE)]
    space_tol: f64,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Vehicle index.
    #[arg(long)]
    vehicle: usize,

    /// Time in seconds.
    #[arg(long)]
    time: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Breakpoints(args) => cmd_breakpoints(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &InputArgs, opts: CompileOptions) -> anyhow::Result<Compilation> {
    if !Routine::is_file(&input.in_path) {
        eprintln!(
            "note: '{}' does not have the .{} extension",
            input.in_path.display(),
            chorus::CHOREOGRAPHY_EXTENSION
        );
    }
    let opts = CompileOptions {
        scale: input.scale,
        ..opts
    };
    Routine::load(&input.in_path, &opts)
        .with_context(|| format!("compile '{}'", input.in_path.display()))
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let opts = CompileOptions {
        parallel: args.parallel,
        threads: args.threads,
        time_tolerance: args.time_tol,
        space_tolerance: args.space_tol,
        ..CompileOptions::default()
    };
    let compiled = load(&args.input, opts)?;

    for d in compiled.report.diagnostics() {
        let level = match d.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("{level}: {d}");
    }

    let routine = &compiled.routine;
    let units = routine.units();
    eprintln!(
        "compiled {} vehicle(s), duration {:.3}s, {} breakpoint(s); {}",
        routine.vehicle_count(),
        routine.duration(),
        routine.breakpoints().len(),
        compiled.report.summary()
    );
    eprintln!(
        "source units: {}, {}, scale {}",
        if units.length_in_feet { "feet" } else { "meters" },
        if units.angle_in_degrees { "degrees" } else { "radians" },
        units.scale
    );

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(routine).context("serialize routine")?;
        std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    if args.strict && compiled.report.has_errors() {
        anyhow::bail!("compilation has errors ({})", compiled.report.summary());
    }
    Ok(())
}

fn cmd_breakpoints(args: InputArgs) -> anyhow::Result<()> {
    let compiled = load(&args, CompileOptions::default())?;
    for b in compiled.routine.breakpoints() {
        println!("{:>4}  {:>10.3}s  {}", b.number, b.time_offset, b.name);
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let compiled = load(&args.input, CompileOptions::default())?;
    let routine = compiled.routine;
    let vehicle = VehicleId(args.vehicle);
    if routine.home(vehicle).is_none() {
        anyhow::bail!(
            "vehicle {} out of range ({} vehicle(s))",
            args.vehicle,
            routine.vehicle_count()
        );
    }

    let report = serde_json::json!({
        "vehicle": args.vehicle,
        "time": args.time,
        "state": routine.state_at(vehicle, args.time),
        "intensity": routine.intensity_at(vehicle, args.time),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
