//! Single-writer driver around the simulation.
//!
//! A [`Session`] owns the live snapshot and the random source. Ticks and
//! player commands are queued as [`Event`]s and applied strictly in order, so
//! every transition starts from the snapshot the previous one produced.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::ConfigError;
use crate::input::{self, Command};
use crate::state::{GameOptions, GameState};
use crate::step::step;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Tick,
    Command(Command),
    /// New game with the same options.
    Restart,
}

/// Fixed-period tick deadline. The period only changes through [`Ticker::reset`].
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(period: Duration, now: Instant) -> Self {
        Ticker { period, next: now + period }
    }

    pub fn reset(&mut self, period: Duration, now: Instant) {
        *self = Ticker::new(period, now);
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left before the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Consumes the deadline if it has passed. Missed ticks are not replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.period;
        true
    }
}

pub struct Session {
    state: GameState,
    rng: StdRng,
    queue: VecDeque<Event>,
    ticker: Ticker,
}

impl Session {
    /// Starts a session. With a seed the whole run, food placement included,
    /// is reproducible from the event sequence alone.
    pub fn new(options: GameOptions, seed: Option<u64>) -> Result<Session, ConfigError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::new(options, &mut rng)?;
        let ticker = Ticker::new(Duration::from_millis(state.speed_ms), Instant::now());

        Ok(Session { state, rng, queue: VecDeque::new(), ticker })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Queues a tick if the tick deadline has passed.
    pub fn poll_tick(&mut self, now: Instant) {
        if self.ticker.fire(now) {
            self.push(Event::Tick);
        }
    }

    /// Applies every queued event in arrival order and returns the latest
    /// snapshot.
    pub fn process(&mut self) -> &GameState {
        while let Some(event) = self.queue.pop_front() {
            self.state = self.transition(event);
        }
        &self.state
    }

    /// Queues `event` behind anything pending and processes the queue.
    pub fn handle(&mut self, event: Event) -> &GameState {
        self.push(event);
        self.process()
    }

    fn transition(&mut self, event: Event) -> GameState {
        match event {
            Event::Tick => step(&self.state, &mut self.rng),
            Event::Command(command) => input::apply(&self.state, command),
            Event::Restart => {
                let options = self.state.options.clone();
                info!("restarting with score {}", self.state.score());
                self.ticker.reset(Duration::from_millis(options.speed_ms), Instant::now());
                match GameState::new(options, &mut self.rng) {
                    Ok(state) => state,
                    Err(e) => {
                        error!("cannot restart, keeping the current game: {}", e);
                        self.state.clone()
                    }
                }
            }
        }
    }
}
