//! Fixed-step frame scheduler
//!
//! Decouples simulation rate from display refresh: each frame runs however
//! many whole ticks fit since the last simulated tick, then renders once.

use crate::consts::TICK_LENGTH_MS;
use crate::sim::{GameState, InputState, tick};

/// Consumes the state once per frame
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

impl<F: FnMut(&GameState)> Renderer for F {
    fn render(&mut self, state: &GameState) {
        self(state)
    }
}

#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    /// Timestamp (ms) of the last simulated tick
    last_tick: f64,
    /// Tick length in ms
    tick_length: f64,
    /// Optional bound on ticks per frame; the excess backlog is dropped
    max_catch_up: Option<u32>,
}

impl FixedStepScheduler {
    /// Scheduler whose clock starts at `now` (ms)
    pub fn new(now: f64) -> Self {
        Self::with_tick_length(now, TICK_LENGTH_MS)
    }

    pub fn with_tick_length(now: f64, tick_length: f64) -> Self {
        Self {
            last_tick: now,
            tick_length,
            max_catch_up: None,
        }
    }

    /// Bound the ticks simulated per frame
    pub fn with_catch_up_cap(mut self, cap: Option<u32>) -> Self {
        self.max_catch_up = cap;
        self
    }

    pub fn last_tick(&self) -> f64 {
        self.last_tick
    }

    pub fn tick_length(&self) -> f64 {
        self.tick_length
    }

    /// Whole ticks owed at `now`. Zero until `now` is strictly past the next tick.
    pub fn due_ticks(&self, now: f64) -> u32 {
        let next_tick = self.last_tick + self.tick_length;
        if now > next_tick {
            ((now - self.last_tick) / self.tick_length).floor() as u32
        } else {
            0
        }
    }

    /// Run the ticks owed at `now`, then render exactly once.
    /// Returns the number of ticks simulated.
    pub fn frame<R: Renderer + ?Sized>(
        &mut self,
        now: f64,
        state: &mut GameState,
        input: &mut InputState,
        renderer: &mut R,
    ) -> u32 {
        let due = self.due_ticks(now);
        let run = match self.max_catch_up {
            Some(cap) if due > cap => {
                log::warn!(
                    "Frame owes {} ticks, running {} and dropping the rest",
                    due,
                    cap
                );
                self.last_tick += (due - cap) as f64 * self.tick_length;
                cap
            }
            _ => due,
        };
        if run > 1 {
            log::debug!("Catching up {} ticks", run);
        }

        for _ in 0..run {
            self.last_tick += self.tick_length;
            tick(state, input);
        }

        renderer.render(state);
        run
    }
}
