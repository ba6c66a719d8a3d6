use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use emoji_maker::{
    export, filters, CropSize, Error, IntakeOutcome, RenderOptions, Session, Upload,
    VariantOutput, FILTERS,
};

const MAX_STAGGER_MS: u64 = 60_000;

#[derive(Parser)]
#[command(
    name = "emoji-maker",
    about = "Turn a photo into twelve circular, filter-styled emoji PNGs",
    version,
    after_help = "Simple usage: emoji-maker <image>  (writes <name>_emojis/emoji-<filter>.png)"
)]
struct Cli {
    /// Input image file
    #[arg(required_unless_present = "list_filters")]
    input: Option<PathBuf>,

    /// Output directory (default: {name}_emojis next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Edge length of each emoji in pixels (128-1024, usually a multiple of 64)
    #[arg(
        short,
        long,
        default_value_t = emoji_maker::DEFAULT_CROP_SIZE,
        value_parser = clap::value_parser!(u32).range(
            i64::from(emoji_maker::MIN_CROP_SIZE)..=i64::from(emoji_maker::MAX_CROP_SIZE)
        )
    )]
    size: u32,

    /// Only export these filters (repeatable, e.g. --only pop --only cool)
    #[arg(long, value_name = "ID")]
    only: Vec<String>,

    /// Delay between consecutive files in milliseconds (0-60000)
    #[arg(
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u64).range(0..=MAX_STAGGER_MS)
    )]
    stagger_ms: u64,

    /// Print the available filters and exit
    #[arg(long)]
    list_filters: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.list_filters {
        for f in &FILTERS {
            println!("{:<10} {:<10} {}", f.id, f.name, f.css());
        }
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let Some(input) = cli.input.as_deref() else {
        return Ok(());
    };

    // Validate the selection before doing any work.
    for id in &cli.only {
        if filters::find(id).is_err() {
            let valid: Vec<_> = FILTERS.iter().map(|f| f.id).collect();
            eprintln!("Valid filters: {}", valid.join(", "));
            return Err(Error::UnknownFilter(id.clone()));
        }
    }

    let mut session = Session::new(RenderOptions {
        crop_size: CropSize::new(cli.size)?,
    });

    let upload = Upload::from_path(input)?;
    match session.submit(&upload)? {
        IntakeOutcome::Ignored => return Err(Error::UnsupportedMediaType(upload.mime)),
        IntakeOutcome::Rendered(n) => log::debug!("{n} variants ready"),
    }

    let all = session.variants();
    let selected: Vec<VariantOutput> = all
        .iter()
        .filter(|v| cli.only.is_empty() || cli.only.iter().any(|id| id == v.id))
        .cloned()
        .collect();

    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(input));
    let written = export::download_all(
        &selected,
        &output_dir,
        Duration::from_millis(cli.stagger_ms),
    )?;

    if !cli.quiet {
        for path in &written {
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |f| f.to_string_lossy().to_string());
            eprintln!("[OK] {name}");
        }
        eprintln!(
            "\n[Summary] {} emoji at {s}x{s} in {}",
            written.len(),
            output_dir.display(),
            s = cli.size
        );
    }

    Ok(())
}

/// `photo.jpg` becomes `photo_emojis/` in the same directory.
fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_emojis"))
}
