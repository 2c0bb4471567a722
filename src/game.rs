use std::time::Instant;

use anyhow::{bail, Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;

use gridsnake::board::{self, Cell};
use gridsnake::{Direction, Event, GameOptions, GameState, Position, Session};

use crate::term::{Coords, TermInt, TermManager};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// Whether the player wants another round.
pub enum Flow {
    PlayAgain,
    Quit,
}

pub struct SnakeGame {
    term: TermManager,
    session: Session,
    /// Board side plus the two border columns.
    screen_size: TermInt,
    paused_shown: bool,
}

impl SnakeGame {
    pub fn new(options: GameOptions, seed: Option<u64>) -> Result<Self> {
        let term = TermManager::new().context("reading terminal size")?;

        let needed = match screen_size(options.board_size) {
            Some(needed) => needed,
            None => bail!("a {0}x{0} board cannot be drawn in a terminal", options.board_size),
        };
        let (w, h) = term.get_terminal_size();
        if w < needed || h < needed {
            bail!("a {0}x{0} board needs a {1}x{1} terminal, this one is {2}x{3}", options.board_size, needed, w, h);
        }

        let session = Session::new(options, seed)?;
        Ok(SnakeGame { term, session, screen_size: needed, paused_shown: false })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup().context("entering the alternate screen")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore().context("restoring the terminal")?;
        Ok(())
    }

    pub fn show_intro(&mut self) -> Result<Flow> {
        let controls = self.session.state().options.input_controls;
        let keys: Vec<&str> = Direction::ALL.iter().filter_map(|d| controls.key_for(*d)).collect();
        let move_line = format!("{} to move", keys.join(" "));

        self.term.show_message(&[
            move_line.as_str(),
            "p to pause",
            "CTRL+C to quit",
            "",
            "Press any key, then steer to begin",
        ])?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::PlayAgain)
    }

    pub fn play(&mut self) -> Result<Flow> {
        self.term.clear()?;
        self.term.draw_borders((self.screen_size, self.screen_size))?;
        self.paused_shown = false;
        self.draw_board()?;

        loop {
            let timeout = self.session.ticker().remaining(Instant::now());
            let profile = self.session.state().options.input_controls;

            for key_ev in self.term.read_key_events(timeout)? {
                if is_ctrl_c(&key_ev) {
                    return Ok(Flow::Quit);
                }
                if let Some(command) = key_name(&key_ev).and_then(|k| profile.resolve_key(&k)) {
                    self.session.push(Event::Command(command));
                }
            }

            self.session.poll_tick(Instant::now());

            let before = self.session.state().clone();
            let after = self.session.process().clone();
            self.draw_update(&before, &after)?;
            self.sync_pause_message(&after)?;

            if after.over {
                break;
            }
        }

        self.game_over()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self) -> Result<Flow> {
        let state = self.session.state().clone();
        let won = state.is_won();
        info!("game over, score {}, won {}", state.score(), won);

        let title = if won { "You won!" } else { "Game over!" };
        let score = format!("Score: {}", state.score());
        self.term.show_message(&[title, score.as_str(), "", "Press any key to play again,", "or CTRL+C to quit."])?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        self.session.handle(Event::Restart);
        Ok(Flow::PlayAgain)
    }

    fn draw_board(&mut self) -> Result<()> {
        let state = self.session.state().clone();
        let grid = board::grid(&state);
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let ch = cell_char(&state, *cell);
                self.term.print_at(to_screen(Position::new(x as i32, y as i32)), ch)?;
            }
        }
        self.term.flush()?;
        Ok(())
    }

    fn draw_update(&mut self, before: &GameState, after: &GameState) -> Result<()> {
        let mut changed = board::changed_cells(before, after);

        // The head glyph follows the heading even when the head cell is unchanged
        if before.snake.velocity != after.snake.velocity && after.snake.alive {
            changed.push((after.snake.head, board::cell_at(after, after.snake.head)));
        }
        if changed.is_empty() {
            return Ok(());
        }

        for (pos, cell) in changed {
            self.term.print_at(to_screen(pos), cell_char(after, cell))?;
        }
        self.term.flush()?;
        Ok(())
    }

    fn sync_pause_message(&mut self, state: &GameState) -> Result<()> {
        let show = state.paused && state.started && !state.over;
        if show && !self.paused_shown {
            self.term.show_message(&["Paused", "Press p to resume", "or CTRL+C to quit"])?;
        } else if !show && self.paused_shown {
            self.term.hide_message()?;
        }
        self.paused_shown = show;
        Ok(())
    }
}

/// Terminal cells needed per side for a board, borders included.
fn screen_size(board_size: i32) -> Option<TermInt> {
    TermInt::try_from(board_size).ok().and_then(|n| n.checked_add(2))
}

fn to_screen(pos: Position) -> Coords {
    (pos.x as TermInt + 1, pos.y as TermInt + 1)
}

fn cell_char(state: &GameState, cell: Cell) -> char {
    match cell {
        Cell::Empty => ' ',
        Cell::Food => FOOD_CHAR,
        Cell::Body { alive: true } => SNAKE_BODY_CHAR,
        Cell::Head { alive: true } => state.snake.head_char(),
        Cell::Body { alive: false } | Cell::Head { alive: false } => DEAD_SNAKE_CHAR,
    }
}

/// Profile-style key name, e.g. `left`, `w` or `ctrl+w`.
fn key_name(ev: &KeyEvent) -> Option<String> {
    let plain = match ev.code {
        KeyCode::Left => Direction::Left.name().to_string(),
        KeyCode::Up => Direction::Up.name().to_string(),
        KeyCode::Right => Direction::Right.name().to_string(),
        KeyCode::Down => Direction::Down.name().to_string(),
        KeyCode::Char(c) => c.to_lowercase().to_string(),
        _ => return None,
    };

    let mut name = String::new();
    for (flag, prefix) in [(KeyModifiers::CONTROL, "ctrl+"), (KeyModifiers::ALT, "alt+"), (KeyModifiers::SHIFT, "shift+")].iter() {
        if ev.modifiers.contains(*flag) {
            name.push_str(prefix);
        }
    }
    name.push_str(&plain);
    Some(name)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
