//! Game state and core simulation types
//!
//! Everything one round needs lives in [`GameSession`]; components receive it
//! (or the part they touch) by reference each tick.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::{Medal, ScoreTracker};
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for the first flap
    Splash,
    /// Active simulation
    Playing,
    /// Round over, scoreboard shown
    ScoreDisplay,
}

/// Phase plus the data only that phase carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Splash,
    Playing,
    /// `replay_armed` is consumed by the first replay signal
    ScoreDisplay { replay_armed: bool },
}

impl Stage {
    pub(crate) fn phase(&self) -> GamePhase {
        match self {
            Stage::Splash => GamePhase::Splash,
            Stage::Playing => GamePhase::Playing,
            Stage::ScoreDisplay { .. } => GamePhase::ScoreDisplay,
        }
    }
}

/// The player's body. Rotation is derived from velocity, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Top edge of the sprite inside the fly area (y grows downward)
    pub position: f32,
    /// Vertical velocity in units per tick (negative is up)
    pub velocity: f32,
}

impl PlayerBody {
    pub fn new(position: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// Body at its resting splash-screen pose
    pub fn at_rest(tuning: &Tuning) -> Self {
        Self::new(tuning.player_start_y)
    }

    /// Sprite rotation in degrees (positive is nose-down)
    pub fn rotation(&self, tuning: &Tuning) -> f32 {
        (self.velocity * tuning.rotation_per_velocity)
            .clamp(-tuning.max_rotation_deg, tuning.max_rotation_deg)
    }

    /// Centre of the sprite
    pub fn center(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            tuning.player_x + tuning.player_width / 2.0,
            self.position + tuning.player_height / 2.0,
        )
    }

    /// Size of the axis-aligned bounds of the rotated sprite
    pub fn rotated_extent(&self, tuning: &Tuning) -> Vec2 {
        let theta = self.rotation(tuning).to_radians();
        let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
        let (w, h) = (tuning.player_width, tuning.player_height);
        Vec2::new(w * cos + h * sin, w * sin + h * cos)
    }

    /// Bounds of the rotated sprite
    pub fn sprite_box(&self, tuning: &Tuning) -> Aabb {
        Aabb::from_center(self.center(tuning), self.rotated_extent(tuning))
    }

    /// Collision box: narrower than the sprite, tighter the more it is rotated
    pub fn hitbox(&self, tuning: &Tuning) -> Aabb {
        let extent = self.rotated_extent(tuning);
        let width = tuning.player_width
            - (self.rotation(tuning).abs() / tuning.max_rotation_deg).sin() * tuning.hitbox_shrink;
        let height = (tuning.player_height + extent.y) / 2.0;
        Aabb::from_center(self.center(tuning), Vec2::new(width, height))
    }

    /// How far a dead body drops to lie on the floor
    ///
    /// It comes to rest rotated 90°, so its height is the sprite width.
    pub fn settle_distance(&self, tuning: &Tuning) -> f32 {
        let bottom = self.sprite_box(tuning).top() + tuning.player_width;
        (tuning.fly_area_height - bottom).max(0.0)
    }
}

/// Axis-aligned box in fly-area coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }
}

/// A pipe pair with a vertical gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the upper segment
    pub gap_top: f32,
    /// Top of the lower segment
    pub gap_bottom: f32,
    /// Set once the player has passed it
    pub scored: bool,
}

impl Pipe {
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Height of the upper segment
    pub fn top_height(&self) -> f32 {
        self.gap_top
    }

    /// Height of the lower segment inside a channel of the given height
    pub fn bottom_height(&self, channel_height: f32) -> f32 {
        channel_height - self.gap_bottom
    }

    /// The open channel between the two segments
    pub fn gap_box(&self) -> Aabb {
        Aabb {
            min: Vec2::new(self.left(), self.gap_top),
            max: Vec2::new(self.right(), self.gap_bottom),
        }
    }
}

/// Pipes in creation order
///
/// `ahead` holds pipes the player has not passed yet, nearest first.
/// `behind` holds passed pipes still on screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipeField {
    pub ahead: VecDeque<Pipe>,
    pub behind: VecDeque<Pipe>,
}

impl PipeField {
    /// Nearest pipe the player still has to clear
    pub fn next(&self) -> Option<&Pipe> {
        self.ahead.front()
    }

    pub fn len(&self) -> usize {
        self.ahead.len() + self.behind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ahead.is_empty() && self.behind.is_empty()
    }

    /// All pipes, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.behind.iter().chain(self.ahead.iter())
    }

    /// Move every pipe left
    pub fn scroll(&mut self, dx: f32) {
        for pipe in self.ahead.iter_mut().chain(self.behind.iter_mut()) {
            pipe.x -= dx;
        }
    }

    /// Mark the front pipe scored and move it behind the player
    pub fn pass_front(&mut self) -> Option<Pipe> {
        let mut pipe = self.ahead.pop_front()?;
        pipe.scored = true;
        self.behind.push_back(pipe);
        Some(pipe)
    }

    /// Remove every pipe whose left edge is at or past `threshold`
    pub fn retire_left_of(&mut self, threshold: f32) -> Vec<Pipe> {
        let mut retired = Vec::new();
        for queue in [&mut self.behind, &mut self.ahead] {
            while queue.front().is_some_and(|p| p.x <= threshold) {
                retired.extend(queue.pop_front());
            }
        }
        retired
    }

    /// Remove everything, oldest first
    pub fn drain(&mut self) -> Vec<Pipe> {
        let mut all: Vec<Pipe> = self.behind.drain(..).collect();
        all.extend(self.ahead.drain(..));
        all
    }
}

/// Things the presentation layer reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    PlayerJumped,
    PipeSpawned(Pipe),
    PipeRemoved(Pipe),
    PlayerScored(u32),
    /// `settle_offset` is how far the body drops to rest on the floor
    PlayerDied { settle_offset: f32 },
    HighScoreUpdated(u32),
    MedalAwarded(Medal),
}

/// One player's game: body, pipes, score and phase
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) stage: Stage,
    pub player: PlayerBody,
    pub pipes: PipeField,
    pub scores: ScoreTracker,
    /// Medal of the last finished round
    pub medal: Medal,
    /// Distance the body fell to the floor after the last death
    pub settle_offset: Option<f32>,
    /// Simulation ticks run this round
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    pub fn new(seed: u64, high_score: u32, tuning: &Tuning) -> Self {
        Self {
            stage: Stage::Splash,
            player: PlayerBody::at_rest(tuning),
            pipes: PipeField::default(),
            scores: ScoreTracker::new(high_score),
            medal: Medal::None,
            settle_offset: None,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.stage.phase()
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    /// Whether a replay signal would be honoured right now
    pub fn replay_armed(&self) -> bool {
        matches!(self.stage, Stage::ScoreDisplay { replay_armed: true })
    }

    /// Events emitted since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Allocate a new pipe ID
    pub(crate) fn next_pipe_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(id: u32, x: f32) -> Pipe {
        Pipe {
            id,
            x,
            width: 52.0,
            gap_top: 150.0,
            gap_bottom: 250.0,
            scored: false,
        }
    }

    #[test]
    fn test_rotation_follows_velocity() {
        let tuning = Tuning::default();
        let mut body = PlayerBody::new(180.0);
        assert_eq!(body.rotation(&tuning), 0.0);

        body.velocity = -4.6;
        assert!((body.rotation(&tuning) - -41.4).abs() < 1e-4);

        body.velocity = 5.0;
        assert_eq!(body.rotation(&tuning), 45.0);

        body.velocity = 25.0;
        assert_eq!(body.rotation(&tuning), 90.0);

        body.velocity = -25.0;
        assert_eq!(body.rotation(&tuning), -90.0);
    }

    #[test]
    fn test_hitbox_is_tighter_than_sprite() {
        let tuning = Tuning::default();
        let level = PlayerBody::new(180.0);
        let hitbox = level.hitbox(&tuning);
        assert_eq!((hitbox.max - hitbox.min), Vec2::new(34.0, 24.0));
        assert_eq!(hitbox.top(), 180.0);
        assert_eq!(hitbox.left(), 60.0);

        let diving = PlayerBody {
            position: 180.0,
            velocity: 10.0,
        };
        let sprite = diving.sprite_box(&tuning);
        let hitbox = diving.hitbox(&tuning);
        // Rotated 90°: the sprite stands on end
        assert!(((sprite.max - sprite.min).x - 24.0).abs() < 1e-3);
        assert!(((sprite.max - sprite.min).y - 34.0).abs() < 1e-3);
        assert!((hitbox.max - hitbox.min).x < 34.0);
        assert!((hitbox.max - hitbox.min).y < (sprite.max - sprite.min).y);
        let hitbox_mid = (hitbox.min.x + hitbox.max.x) / 2.0;
        let sprite_mid = (sprite.min.x + sprite.max.x) / 2.0;
        assert!((hitbox_mid - sprite_mid).abs() < 1e-4);
    }

    #[test]
    fn test_pass_front_marks_scored() {
        let mut field = PipeField::default();
        field.ahead.push_back(pipe(1, 10.0));
        field.ahead.push_back(pipe(2, 200.0));

        let passed = field.pass_front().unwrap();
        assert_eq!(passed.id, 1);
        assert!(passed.scored);
        assert_eq!(field.next().map(|p| p.id), Some(2));
        assert_eq!(field.behind.len(), 1);
        assert_eq!(field.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_retire_left_of_keeps_order() {
        let mut field = PipeField::default();
        field.behind.push_back(pipe(1, -120.0));
        field.behind.push_back(pipe(2, -100.0));
        field.ahead.push_back(pipe(3, 60.0));

        let retired = field.retire_left_of(-100.0);
        assert_eq!(retired.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(field.len(), 1);
        assert_eq!(field.next().map(|p| p.id), Some(3));
    }

    #[test]
    fn test_scroll_moves_both_queues() {
        let mut field = PipeField::default();
        field.behind.push_back(pipe(1, 0.0));
        field.ahead.push_back(pipe(2, 100.0));
        field.scroll(2.5);
        assert_eq!(field.behind[0].x, -2.5);
        assert_eq!(field.ahead[0].x, 97.5);

        let gap = field.ahead[0].gap_box();
        assert_eq!(gap.min, Vec2::new(97.5, 150.0));
        assert_eq!(gap.max, Vec2::new(149.5, 250.0));
    }

    #[test]
    fn test_new_session_is_at_splash() {
        let tuning = Tuning::default();
        let session = GameSession::new(7, 12, &tuning);
        assert_eq!(session.phase(), GamePhase::Splash);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 12);
        assert_eq!(session.player, PlayerBody::new(180.0));
        assert!(session.pipes.is_empty());
        assert!(!session.replay_armed());
    }
}
