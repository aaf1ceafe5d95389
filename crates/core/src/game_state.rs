//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, kick tables, bag and scoring.
//! It owns gravity, horizontal auto-repeat, the lock-delay timer, hold, line
//! clears and the game lifecycle.
//!
//! Within one [`GameState::update`] call gravity runs first, then horizontal
//! auto-repeat, then the lock-delay check. A piece grounded by gravity can
//! still be nudged off a ledge in the same frame before it locks.

use crate::board::Board;
use crate::kicks;
use crate::pieces::Piece;
use crate::rng::RandomQueue;
use crate::scoring::{drop_interval_ms, drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Number of upcoming kinds visible in the lookahead queue
pub const PREVIEW_LEN: usize = 2;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Piece,
    held: Option<PieceKind>,
    preview: [PieceKind; PREVIEW_LEN],
    bag: RandomQueue,
    /// Seed this session was created with.
    seed: u32,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    lock_timer_ms: u32,
    grounded: bool,
    can_hold: bool,
    paused: bool,
    game_over: bool,
    flash_ms: u32,
    shake: u32,
    /// Horizontal direction held during the previous update.
    shift_dir: Option<i8>,
    das_timer_ms: u32,
    arr_timer_ms: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed; the first piece is already in play
    pub fn new(seed: u32) -> Self {
        let mut bag = RandomQueue::new(seed);
        let first = bag.draw();
        let preview = [bag.draw(), bag.draw()];

        Self {
            board: Board::new(),
            current: Piece::spawn(first),
            held: None,
            preview,
            bag,
            seed,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            grounded: false,
            can_hold: true,
            paused: false,
            game_over: false,
            flash_ms: 0,
            shake: 0,
            shift_dir: None,
            das_timer_ms: 0,
            arr_timer_ms: 0,
            last_event: None,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the current piece with a fresh spawn of `kind`.
    #[cfg(test)]
    pub(crate) fn force_current(&mut self, kind: PieceKind) -> &mut Piece {
        self.current = Piece::spawn(kind);
        self.unground();
        &mut self.current
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn preview(&self) -> &[PieceKind; PREVIEW_LEN] {
        &self.preview
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Remaining line-clear flash time (advisory)
    pub fn flash_ms(&self) -> u32 {
        self.flash_ms
    }

    /// Remaining shake intensity (advisory)
    pub fn shake(&self) -> u32 {
        self.shake
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Active
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.current = Some(PieceSnapshot::from(self.current));
        out.ghost_y = Some(self.ghost_y());
        out.hold = self.held;
        out.preview = self.preview;
        out.can_hold = self.can_hold;
        out.status = self.status();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.flash_ms = self.flash_ms;
        out.shake = self.shake;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    fn can_fall(&self) -> bool {
        !self.board.collision(&self.current, 0, 1)
    }

    fn unground(&mut self) {
        self.grounded = false;
        self.lock_timer_ms = 0;
    }

    fn top_out(&mut self) {
        self.game_over = true;
        self.paused = true;
    }

    /// Pop the head of the lookahead queue and refill its tail from the bag
    fn dequeue(&mut self) -> PieceKind {
        let next = self.preview[0];
        self.preview.rotate_left(1);
        self.preview[PREVIEW_LEN - 1] = self.bag.draw();
        next
    }

    /// Put a fresh `kind` at its spawn position. Tops out on collision.
    fn spawn(&mut self, kind: PieceKind) -> bool {
        self.current = Piece::spawn(kind);
        self.unground();
        if self.board.collision(&self.current, 0, 0) {
            self.top_out();
            return false;
        }
        true
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.dequeue();
        self.can_hold = true;
        self.spawn(kind)
    }

    /// Shift the current piece by `dx` columns
    pub fn move_piece(&mut self, dx: i8) -> bool {
        if !self.playable() || self.board.collision(&self.current, dx, 0) {
            return false;
        }

        self.current.x += dx;
        // Sliding along a floor keeps the lock timer running.
        if self.can_fall() {
            self.unground();
        }
        true
    }

    /// Rotate the current piece with wall kicks. The O piece never rotates.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        if !self.playable() {
            return false;
        }

        let board = &self.board;
        let Some((rotated, _kick)) =
            kicks::try_rotate(&self.current, direction, |p| board.collision(p, 0, 0))
        else {
            return false;
        };

        self.current = rotated;
        if self.can_fall() {
            self.unground();
        }
        true
    }

    /// Move down one row for 1 point. When blocked the piece is marked
    /// grounded; it never locks here.
    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }

        if self.can_fall() {
            self.current.y += 1;
            self.score += drop_score(1, false);
            self.unground();
            true
        } else {
            self.grounded = true;
            false
        }
    }

    /// Drop straight down and lock immediately. Returns the rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.playable() {
            return 0;
        }

        let mut fallen = 0;
        while self.can_fall() {
            self.current.y += 1;
            fallen += 1;
        }
        self.score += drop_score(fallen, true);
        self.lock_down();
        fallen
    }

    /// Swap the current piece with the hold slot, once per lock
    pub fn hold(&mut self) -> bool {
        if !self.playable() || !self.can_hold {
            return false;
        }

        let kind = match self.held.replace(self.current.kind) {
            Some(kind) => kind,
            None => self.dequeue(),
        };
        self.spawn(kind);
        self.can_hold = false;
        true
    }

    /// Merge the current piece, clear rows, score and spawn the next piece
    pub fn lock_down(&mut self) {
        if !self.playable() {
            return;
        }

        let kind = self.current.kind;
        self.board.merge(&mut self.current);
        let cleared = self.board.clear_lines();

        let mut awarded = 0;
        if cleared > 0 {
            // Points use the level the clear happened on.
            awarded = line_clear_score(cleared, self.level);
            self.score += awarded;
            self.lines += cleared;
            self.level = level_for_lines(self.lines);
            self.drop_interval_ms = drop_interval_ms(self.level);
            self.flash_ms = FLASH_MS_PER_LINE * cleared;
            self.shake = SHAKE_PER_LINE * cleared;
        } else {
            self.shake = LANDING_SHAKE;
        }

        let spawned = self.spawn_next();

        self.last_event = Some(LockEvent {
            kind,
            lines_cleared: cleared,
            line_clear_score: awarded,
            score: self.score,
            lines: self.lines,
            level: self.level,
            topped_out: !spawned,
        });
    }

    /// Flip pause. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Lowest y the current piece reaches by dropping straight down
    pub fn ghost_y(&self) -> i8 {
        let mut dy = 0;
        while !self.board.collision(&self.current, 0, dy + 1) {
            dy += 1;
        }
        self.current.y + dy
    }

    /// Advance the simulation by `delta_ms`
    pub fn update(&mut self, delta_ms: u32, input: InputState) {
        if !self.playable() {
            return;
        }

        self.flash_ms = self.flash_ms.saturating_sub(delta_ms);
        self.shake = self.shake.saturating_sub(delta_ms);

        self.apply_gravity(delta_ms);
        self.auto_shift(delta_ms, input);
        self.advance_lock_delay(delta_ms);
    }

    fn apply_gravity(&mut self, delta_ms: u32) {
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(delta_ms);
        if self.drop_timer_ms < self.drop_interval_ms {
            return;
        }

        self.drop_timer_ms = 0;
        if self.can_fall() {
            self.current.y += 1;
        } else {
            self.grounded = true;
        }
    }

    /// DAS/ARR: first press moves at once, repeat starts after `DAS_MS`
    /// and then fires every `ARR_MS`.
    fn auto_shift(&mut self, delta_ms: u32, input: InputState) {
        let Some(dir) = input.horizontal() else {
            self.shift_dir = None;
            self.das_timer_ms = 0;
            self.arr_timer_ms = 0;
            return;
        };

        if self.shift_dir != Some(dir) {
            self.shift_dir = Some(dir);
            self.das_timer_ms = 0;
            self.arr_timer_ms = 0;
            self.move_piece(dir);
            return;
        }

        let was_charged = self.das_timer_ms > DAS_MS;
        self.das_timer_ms = self.das_timer_ms.saturating_add(delta_ms);
        if self.das_timer_ms <= DAS_MS {
            return;
        }

        // Only the time past DAS counts on the frame that crosses it.
        self.arr_timer_ms += if was_charged {
            delta_ms
        } else {
            self.das_timer_ms - DAS_MS
        };
        while self.arr_timer_ms >= ARR_MS {
            self.arr_timer_ms -= ARR_MS;
            self.move_piece(dir);
        }
    }

    fn advance_lock_delay(&mut self, delta_ms: u32) {
        if !self.grounded {
            return;
        }

        self.lock_timer_ms = self.lock_timer_ms.saturating_add(delta_ms);
        if self.can_fall() {
            self.unground();
        } else if self.lock_timer_ms >= LOCK_DELAY_MS {
            self.lock_down();
        }
    }

    /// Apply a one-shot game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if !self.playable() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                *self = Self::new(self.bag.rng_state());
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
