pub mod app;
pub mod render;

use app::{App, Settings};
use clap::Parser;
use color_eyre::Result;
use crossterm::tty::IsTty;
use sweeper::{Difficulty, GameConfig};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The board to play: easy (e), medium (m) or hard (h). Asked for before every game when omitted.
    #[arg(short, long)]
    difficulty: Option<Difficulty>,
    #[arg(short = 'H', long, requires_all = ["width", "mines"])]
    height: Option<u8>,
    /// At most 99 columns, so that the column numbers fit two label lines.
    #[arg(short, long, requires_all = ["height", "mines"], value_parser = clap::value_parser!(u8).range(1..100))]
    width: Option<u8>,
    #[arg(short, long, requires_all = ["height", "width"])]
    mines: Option<u16>,
    /// Seed the mine placement to replay the same boards.
    #[arg(long)]
    seed: Option<u64>,
    /// Show where the mines are.
    #[arg(long)]
    debug: bool,
    /// Log more (-v, -vv, -vvv). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let custom = match (args.height, args.width, args.mines) {
        (Some(height), Some(width), Some(mines)) => Some(GameConfig::new(height, width, mines)),
        _ => None,
    };

    let settings = Settings {
        difficulty: args.difficulty,
        custom,
        seed: args.seed,
        debug: args.debug,
        colored: std::io::stdout().is_tty(),
    };

    // Start the main loop.
    let stdin = std::io::stdin();
    App::new(stdin.lock(), std::io::stdout(), settings).run()
}

#[cfg(test)]
mod test {
    use super::Args;
    use clap::Parser;

    #[test]
    fn custom_dimensions_come_together() {
        let args = Args::try_parse_from(["sweeper", "-H", "5", "-w", "99", "-m", "3"]).unwrap();
        assert_eq!((args.height, args.width, args.mines), (Some(5), Some(99), Some(3)));

        assert!(Args::try_parse_from(["sweeper", "-H", "5"]).is_err());
    }

    #[test]
    fn widths_beyond_two_digits_are_rejected() {
        assert!(Args::try_parse_from(["sweeper", "-H", "5", "-w", "100", "-m", "3"]).is_err());
        assert!(Args::try_parse_from(["sweeper", "-H", "5", "-w", "0", "-m", "3"]).is_err());
    }
}
