use clap::Parser;
use rangediff::{LineComparator, RangeDifference, RangeDifferencer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Print the line ranges in which two or three files differ")]
struct Args {
    /// Path to LEFT
    left_path: std::path::PathBuf,

    /// Path to RIGHT
    right_path: std::path::PathBuf,

    /// Path to the common ANCESTOR of LEFT and RIGHT, for a three-way comparison
    #[clap(long, short)]
    ancestor: Option<std::path::PathBuf>,

    /// Also print the unchanged ranges
    #[clap(long, short)]
    ranges: bool,

    /// Ignore spaces, tabs and line terminators when comparing lines
    #[clap(long, short = 'w')]
    ignore_whitespace: bool,
}

fn lines(text: &str, ignore_whitespace: bool) -> LineComparator<'_> {
    LineComparator::new(text).ignore_whitespace(ignore_whitespace)
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rangediff=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let left = std::fs::read_to_string(&args.left_path)?;
    let right = std::fs::read_to_string(&args.right_path)?;
    let ancestor = args
        .ancestor
        .as_ref()
        .map(std::fs::read_to_string)
        .transpose()?;

    let left = lines(&left, args.ignore_whitespace);
    let right = lines(&right, args.ignore_whitespace);

    let differencer = RangeDifferencer::new();
    let differences: Vec<RangeDifference> = match ancestor
        .as_deref()
        .map(|text| lines(text, args.ignore_whitespace))
    {
        Some(ancestor) if args.ranges => differencer.find_ranges3(&ancestor, &left, &right),
        Some(ancestor) => differencer.find_differences3(&ancestor, &left, &right),
        None if args.ranges => differencer.find_ranges(&left, &right),
        None => differencer.find_differences(&left, &right),
    };
    tracing::debug!(count = differences.len(), "differences found");

    for difference in differences {
        println!("{}", difference);
    }
    Ok(())
}
