//! Session module - ties grid, gravity, piece and spawner together
//!
//! One tick runs, in order: gravity timer → automatic fall → (on landing)
//! row clear and scoring → spawn of the next piece. Player requests go
//! through the same landing path. A spawn that finds its cells occupied ends
//! the session: gravity stops changing, nothing falls or spawns any more,
//! and [`SessionEvent::GameOver`] is reported exactly once.

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::gravity::GravityController;
use crate::piece::{MoveOutcome, PieceController, SpawnError};
use crate::playfield::Playfield;
use crate::row_clear::clear_full_rows;
use crate::scoring::landing_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, GravitySnapshot};
use crate::spawner::{RandomSpawner, Spawner};
use crate::types::{GameAction, GravityDirection, MoveDirection, ShapeKind, Turn};

/// Events queued between two calls to [`GameSession::take_events`].
pub const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    GravityChanged(GravityDirection),
    Landed { rows_cleared: usize, points: u32 },
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameSession<S: Spawner = RandomSpawner> {
    config: GameConfig,
    field: Playfield,
    gravity: GravityController,
    pieces: PieceController,
    spawner: S,
    score: u32,
    lines: u32,
    started: bool,
    game_over: bool,
    events: ArrayVec<SessionEvent, EVENT_CAPACITY>,
}

impl GameSession<RandomSpawner> {
    /// Session with a random spawner seeded from the config.
    pub fn with_config(config: GameConfig) -> Self {
        let spawner = RandomSpawner::new(config.seed);
        Self::new(config, spawner)
    }
}

impl<S: Spawner> GameSession<S> {
    pub fn new(config: GameConfig, spawner: S) -> Self {
        Self {
            field: Playfield::new(config.width, config.height),
            gravity: GravityController::new(config.gravity_period_ms, config.rotation_duration_ms),
            pieces: PieceController::new(config.fall_interval_ms),
            spawner,
            score: 0,
            lines: 0,
            started: false,
            game_over: false,
            events: ArrayVec::new(),
            config,
        }
    }

    /// Spawn the first piece.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            width = self.config.width,
            height = self.config.height,
            "session started"
        );
        self.spawn_next();
    }

    /// Throw everything away and start over with the same config.
    pub fn restart(&mut self) {
        self.field.clear();
        self.gravity =
            GravityController::new(self.config.gravity_period_ms, self.config.rotation_duration_ms);
        self.pieces = PieceController::new(self.config.fall_interval_ms);
        self.score = 0;
        self.lines = 0;
        self.started = false;
        self.game_over = false;
        self.events.clear();
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn playfield(&self) -> &Playfield {
        &self.field
    }

    /// Mutable access to the grid, for setting up positions.
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    pub fn gravity(&self) -> &GravityController {
        &self.gravity
    }

    pub fn pieces(&self) -> &PieceController {
        &self.pieces
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Shape that will spawn after the current piece lands.
    pub fn next_preview(&self) -> ShapeKind {
        self.spawner.preview()
    }

    /// Switch gravity immediately, starting a rotation transition.
    pub fn set_gravity(&mut self, direction: GravityDirection) {
        let before = self.gravity.direction();
        self.gravity.set_direction(direction);
        if before != direction {
            self.push_event(SessionEvent::GravityChanged(direction));
        }
    }

    /// Advance the session by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.started {
            return;
        }

        if let Some(direction) = self.gravity.tick(elapsed_ms) {
            self.push_event(SessionEvent::GravityChanged(direction));
        }

        if self.game_over {
            return;
        }

        let outcome = self.pieces.tick(&mut self.field, &self.gravity, elapsed_ms);
        self.handle_outcome(outcome);
    }

    /// Move the live piece in screen terms; a blocked down move lands it.
    pub fn request_move(&mut self, direction: MoveDirection) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Idle;
        }
        let outcome = self
            .pieces
            .request_move(&mut self.field, &self.gravity, direction);
        self.handle_outcome(outcome);
        outcome
    }

    /// Rotate the live piece by a quarter turn.
    pub fn request_rotate(&mut self, turn: Turn) -> bool {
        if self.game_over {
            return false;
        }
        self.pieces.try_rotate(&mut self.field, &self.gravity, turn)
    }

    /// Apply an input action. Returns true if it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.request_move(MoveDirection::Left) == MoveOutcome::Moved,
            GameAction::MoveRight => self.request_move(MoveDirection::Right) == MoveOutcome::Moved,
            GameAction::MoveDown => matches!(
                self.request_move(MoveDirection::Down),
                MoveOutcome::Moved | MoveOutcome::Landed(_)
            ),
            GameAction::RotateLeft => self.request_rotate(Turn::Left),
            GameAction::RotateRight => self.request_rotate(Turn::Right),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Drain events queued since the last call.
    pub fn take_events(&mut self) -> ArrayVec<SessionEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn handle_outcome(&mut self, outcome: MoveOutcome) {
        if let MoveOutcome::Landed(_) = outcome {
            self.on_landed();
        }
    }

    fn on_landed(&mut self) {
        let rows = clear_full_rows(
            &mut self.field.grid,
            &mut self.field.blocks,
            self.gravity.direction(),
        );
        let points = landing_score(rows, &self.config.scoring);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);
        debug!(rows, points, score = self.score, "landing scored");
        self.push_event(SessionEvent::Landed {
            rows_cleared: rows,
            points,
        });

        if !self.game_over {
            self.spawn_next();
        }
    }

    fn spawn_next(&mut self) {
        let kind = self.spawner.next_piece_shape();
        match self
            .pieces
            .spawn(&mut self.field, kind, self.config.spawn_anchor())
        {
            Ok(_) => {}
            Err(err @ SpawnError::Blocked { .. }) => {
                info!(%err, score = self.score, lines = self.lines, "game over");
                self.end_session();
            }
            Err(err @ SpawnError::PieceLive(_)) => {
                warn!(%err, "spawn requested while a piece is live");
            }
        }
    }

    fn end_session(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.gravity.halt();
        self.pieces.reset();
        self.push_event(SessionEvent::GameOver);
    }

    fn push_event(&mut self, event: SessionEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let (w, h) = (self.config.width, self.config.height);
        if out.width != w || out.height != h {
            *out = GameSnapshot::new(w, h);
        }

        for x in 0..w as i32 {
            for y in 0..h as i32 {
                out.set_kind(x, y, self.field.kind_at(x, y));
            }
        }

        out.active = self.pieces.active().map(|piece| ActiveSnapshot {
            id: piece.id,
            kind: piece.kind,
            rotation: piece.rotation,
            anchor: piece.anchor,
            cells: piece.cells(),
        });
        out.next = self.spawner.preview();
        out.gravity = GravitySnapshot {
            direction: self.gravity.direction(),
            rotating: self.gravity.is_rotating(),
            display_angle: self.gravity.display_angle(),
            quarter_turns: self.gravity.quarter_turns(),
            seconds_until_change: self.gravity.seconds_until_change(),
        };
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::new(self.config.width, self.config.height);
        self.snapshot_into(&mut s);
        s
    }
}
