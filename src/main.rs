mod game;
mod term;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use gridsnake::{GameOptions, InputProfile};

use game::{Flow, SnakeGame};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Controls {
    ArrowKeys,
    AsdfKeys,
    JoystickLeft,
    JoystickRight,
}

impl Controls {
    fn profile_id(self) -> &'static str {
        match self {
            Controls::ArrowKeys => "arrowKeys",
            Controls::AsdfKeys => "asdfKeys",
            Controls::JoystickLeft => "joystickLeft",
            Controls::JoystickRight => "joystickRight",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gridsnake", about = "Grid snake in the terminal")]
struct Args {
    /// Cells per side of the square board
    #[arg(long, default_value_t = GameOptions::default().board_size)]
    board_size: i32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = GameOptions::default().speed_ms)]
    speed: u64,

    /// Food on the board at any time
    #[arg(long, default_value_t = GameOptions::default().food_amount)]
    food: usize,

    /// Leave one edge to come back on the opposite one
    #[arg(long)]
    wrap: bool,

    #[arg(long, value_enum, default_value_t = Controls::ArrowKeys)]
    controls: Controls,

    /// Seed for food placement; the same seed and inputs replay the same game
    #[arg(long)]
    seed: Option<u64>,

    /// Write a debug log here
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_options(&self) -> Result<GameOptions> {
        let profile = match InputProfile::by_id(self.controls.profile_id()) {
            Some(profile) => profile,
            None => bail!("unknown controls {:?}", self.controls),
        };
        if !profile.is_keyboard() {
            bail!("{} needs a touch screen, pick arrow-keys or asdf-keys in a terminal", profile.id);
        }

        let options = GameOptions {
            board_size: self.board_size,
            speed_ms: self.speed,
            food_amount: self.food,
            input_controls: profile,
            wrap_around: self.wrap,
        };
        options.validate()?;
        Ok(options)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        WriteLogger::init(LevelFilter::Debug, Config::default(), file).context("installing logger")?;
    }

    let options = args.game_options()?;
    info!("starting gridsnake with {:?}", args);

    let mut game = SnakeGame::new(options, args.seed)?;
    game.initialize()?;
    let res = run(&mut game);
    game.restore()?;
    res
}

fn run(game: &mut SnakeGame) -> Result<()> {
    if let Flow::Quit = game.show_intro()? {
        return Ok(());
    }

    // Each round ends at game over; the round decides whether to go again
    while let Flow::PlayAgain = game.play()? {}
    Ok(())
}
