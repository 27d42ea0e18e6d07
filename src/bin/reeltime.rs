use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "reeltime", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the draw model of one frame as JSON.
    Frame(FrameArgs),
    /// Print the scene schedule as JSON.
    Timeline(TimelineArgs),
    /// Write a generated tone as a WAV file.
    Audio(AudioArgs),
    /// Mix the composition soundtrack into a WAV file.
    Soundtrack(SoundtrackArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Pretty-print the JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ToneKind {
    Pop,
    Whoosh,
    Ambient,
}

#[derive(Parser, Debug)]
struct AudioArgs {
    /// Which generator to run.
    #[arg(long, value_enum)]
    kind: ToneKind,

    /// Output WAV path.
    #[arg(long)]
    out: PathBuf,

    /// Length of the ambient tone in seconds.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,
}

#[derive(Parser, Debug)]
struct SoundtrackArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output WAV path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Audio(args) => cmd_audio(args),
        Command::Soundtrack(args) => cmd_soundtrack(args),
    }
}

fn load(path: &std::path::Path) -> anyhow::Result<reeltime::Composition> {
    let def = reeltime::CompositionDef::from_path(path)
        .with_context(|| format!("load composition '{}'", path.display()))?;
    Ok(reeltime::Composition::build(&def)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    let model = comp.render(reeltime::FrameIndex(args.frame))?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&model)
    } else {
        serde_json::to_string(&model)
    }
    .context("serialize draw model")?;
    println!("{json}");
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    let json = serde_json::to_string_pretty(comp.schedule()).context("serialize schedule")?;
    println!("{json}");
    Ok(())
}

fn cmd_audio(args: AudioArgs) -> anyhow::Result<()> {
    let buffer = match args.kind {
        ToneKind::Pop => reeltime::generate_pop_tone(),
        ToneKind::Whoosh => reeltime::generate_whoosh_tone(),
        ToneKind::Ambient => reeltime::generate_ambient_tone(args.seconds),
    }?;
    buffer.write_wav(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_soundtrack(args: SoundtrackArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    let Some(buffer) = comp.render_soundtrack()? else {
        anyhow::bail!("composition '{}' has no audio cues", args.in_path.display());
    };
    buffer.write_wav(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
