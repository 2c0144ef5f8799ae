use anyhow::{Context, bail};
use clap::Parser;
use tinymines_core::{
    Action, ActionOutcome, Board, Cell, CellCount, Coord, Coord2, Direction, MAX_COLS, MAX_ROWS,
    RevealOutcome,
};
use tracing_subscriber::filter::LevelFilter;

/// Builds a board, replays a list of steps against it and dumps the raw cells.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = MAX_COLS)]
    width: Coord,

    /// Board height in cells
    #[arg(long, default_value_t = MAX_ROWS)]
    height: Coord,

    /// Mines to place
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Layout seed, the same seed always gives the same board
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Reveal the whole board before dumping it
    #[arg(long)]
    reveal_all: bool,

    /// Steps to replay: `X,Y` jumps the cursor, or one of `left`, `right`, `up`, `down`, `reveal`,
    /// `flag`, `new=MINES`
    #[arg(value_parser = parse_step)]
    steps: Vec<Step>,
}

#[derive(Copy, Clone, Debug)]
enum Step {
    Jump(Coord2),
    Act(Action),
}

fn parse_step(s: &str) -> Result<Step, String> {
    let action = match s {
        "left" => Action::Move(Direction::Left),
        "right" => Action::Move(Direction::Right),
        "up" => Action::Move(Direction::Up),
        "down" => Action::Move(Direction::Down),
        "reveal" => Action::Reveal,
        "flag" => Action::ToggleFlag,
        _ => {
            if let Some(mines) = s.strip_prefix("new=") {
                let mines = mines.parse().map_err(|e| format!("bad mine count {mines:?}: {e}"))?;
                Action::NewGame { mines }
            } else if let Some((x, y)) = s.split_once(',') {
                let x = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
                let y = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
                return Ok(Step::Jump((x, y)));
            } else {
                return Err(format!("unknown step {s:?}"));
            }
        }
    };
    Ok(Step::Act(action))
}

fn level_filter(filter: log::LevelFilter) -> LevelFilter {
    match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_filter(args.verbose.log_level_filter()))
        .with_writer(std::io::stderr)
        .init();

    let mut board = Board::new(args.width, args.height)
        .with_context(|| format!("cannot build a {}x{} board", args.width, args.height))?;
    if args.mines >= board.total_cells() {
        bail!(
            "{} mines do not fit on a {}x{} board",
            args.mines,
            args.width,
            args.height
        );
    }

    board.set_seed(args.seed);
    board.create_level(args.mines);
    board.log_state();

    for step in args.steps {
        match step {
            Step::Jump((x, y)) => {
                if !board.is_position_valid(x, y) {
                    bail!("cursor target ({x}, {y}) is off the board");
                }
                board.set_cursor_position(x, y);
            }
            Step::Act(action) => {
                let outcome = board.apply(action);
                log::info!("{:?} -> {:?}", action, outcome);

                match outcome {
                    ActionOutcome::Reveal(RevealOutcome::HitMine) => {
                        log::info!("Lost after {} clicks", board.clicks_count());
                        board.uncover_all(Cell::MINE);
                        break;
                    }
                    ActionOutcome::Reveal(RevealOutcome::Won) => {
                        log::info!("Won after {} clicks", board.clicks_count());
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    if args.reveal_all {
        board.uncover_all(Cell::all());
    }

    board.log_state();
    print!("{board}");
    Ok(())
}
