//! The match loop: input, physics, collision routing, relaunch protocol.
//!
//! Frame order is load-bearing. Paddle motors and spawns are written
//! before the step; the step collects sensor contacts; contacts are
//! routed into the pending slot; the pending slot is consumed and the
//! ball relaunched only after the step has returned; the keeper is
//! repositioned last so its next kinematic target is fresh.

use glam::Vec2;
use tilt_core::core::physics::RayHit;
use tilt_core::{EngineContext, Game, GameConfig, GameEvent, InputState};

use crate::difficulty::capped_multiplier;
use crate::level::{Level, WORLD_HEIGHT, WORLD_WIDTH};
use crate::props::{PropKind, Props};
use crate::state::{Phase, Session, TableEvent};
use crate::tuning::Tuning;

// DOM key codes, matching what the shell feeds the input queue.
mod keys {
    pub const ENTER: u32 = 13;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const RIGHT: u32 = 39;
    pub const ONE: u32 = 49;
    pub const TWO: u32 = 50;
    pub const THREE: u32 = 51;
}

/// Event kinds pushed to the shell HUD.
mod game_events {
    /// a = score, b = lives, c = phase (0 menu, 1 playing, 2 game over).
    pub const HUD: f32 = 1.0;
}

const MANIFEST: &str = include_str!("../assets/manifest.json");
const MUSIC_PATH: &str = "assets/table_theme.ogg";

pub struct Futbolin {
    tuning: Tuning,
    session: Session,
    level: Option<Level>,
    props: Props,
    /// Ray probe anchor; `Some` while the probe is active.
    ray_anchor: Option<Vec2>,
    pub last_ray: Option<RayHit>,
}

impl Futbolin {
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        let session = Session::new(tuning.starting_lives);
        let props = Props::new(tuning.prop_cap);
        Self {
            tuning,
            session,
            level: None,
            props,
            ray_anchor: None,
            last_ray: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn score(&self) -> i32 {
        self.session.score
    }

    pub fn lives(&self) -> i32 {
        self.session.lives
    }

    fn emit_hud(&self, ctx: &mut EngineContext) {
        let phase = match self.session.phase {
            Phase::Menu => 0.0,
            Phase::Playing => 1.0,
            Phase::GameOver => 2.0,
        };
        ctx.emit_event(GameEvent {
            kind: game_events::HUD,
            a: self.session.score as f32,
            b: self.session.lives as f32,
            c: phase,
        });
    }

    fn tick_playing(&mut self, ctx: &mut EngineContext, input: &InputState) {
        let Some(level) = &mut self.level else {
            return;
        };

        // Checked first so a life lost last frame lands before anything else.
        if self.session.check_game_over() {
            self.emit_hud(ctx);
            return;
        }
        self.session.tick_grace();

        level.paddles.apply_input(
            &mut ctx.physics,
            input.is_down(keys::LEFT),
            input.is_down(keys::RIGHT),
        );

        if input.just_pressed(keys::ONE) {
            self.props.spawn(ctx, PropKind::LooseBall, input.pointer());
        }
        if input.just_pressed(keys::TWO) {
            self.props.spawn(ctx, PropKind::Crate, input.pointer());
        }
        if input.just_pressed(keys::THREE) {
            self.props.spawn(ctx, PropKind::Blob, input.pointer());
        }
        if input.just_pressed(keys::SPACE) {
            self.ray_anchor = match self.ray_anchor {
                Some(_) => None,
                None => Some(input.pointer()),
            };
            self.last_ray = None;
        }

        ctx.step_physics();

        for contact in ctx.contacts() {
            if let Some(event) = level.sensors.classify(contact) {
                self.session.request(event);
            }
        }

        // Relaunch speed scales with the score at trigger time, before the
        // goal itself is counted.
        let relaunch_score = self.session.score;
        if let Some(event) = self.session.take_pending() {
            let name = match event {
                TableEvent::Goal => "goal",
                TableEvent::OwnGoal => "own_goal",
                TableEvent::Drop => "drop",
            };
            play_table_sound(ctx, name);
            relaunch(ctx, level, &mut self.session, &self.tuning, relaunch_score);
        }

        level.keeper.advance(
            self.session.score,
            self.tuning.max_speed_multiplier,
        );
        if let Some(body) = ctx.scene.get(level.keeper_id).and_then(|e| e.body) {
            level.keeper.mirror(&mut ctx.physics, &body);
        }
        if let Some(entity) = ctx.scene.get_mut(level.keeper_id) {
            entity.pos = Vec2::new(level.keeper.x, level.keeper.y);
        }

        if let Some(anchor) = self.ray_anchor {
            self.last_ray = self.props.ray_hit(ctx, anchor, input.pointer());
        }

        self.emit_hud(ctx);
    }
}

impl Default for Futbolin {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Futbolin {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            gravity: Vec2::new(0.0, 500.0),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(err) = ctx.load_assets(MANIFEST) {
            // Missing assets degrade to silent, spriteless play.
            log::warn!("asset manifest failed to parse: {err}");
        }
        let level = Level::build(ctx, &self.tuning);

        for (tag, sprite) in [
            ("ball", "ball"),
            ("paddle-left", "paddle_left"),
            ("paddle-right", "paddle_right"),
            ("keeper", "keeper"),
        ] {
            if let Some(sprite) = ctx.sprites.get_or_warn(sprite) {
                if let Some(entity) = ctx.scene.find_by_tag_mut(tag) {
                    entity.sprite = Some(sprite);
                }
            }
        }

        self.level = Some(level);
        ctx.audio.play_music(MUSIC_PATH);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> bool {
        ctx.clear_frame_data();

        match self.session.phase {
            Phase::Menu | Phase::GameOver => {
                if input.just_pressed(keys::ENTER) {
                    self.session.start();
                    if let Some(level) = &self.level {
                        let score = self.session.score;
                        relaunch(ctx, level, &mut self.session, &self.tuning, score);
                    }
                }
                self.emit_hud(ctx);
            }
            Phase::Playing => self.tick_playing(ctx, input),
        }
        true
    }
}

fn play_table_sound(ctx: &mut EngineContext, name: &str) {
    if let Some(id) = ctx.sfx(name) {
        // Small pitch wobble so repeated triggers don't sound stamped.
        let pitch = 0.95 + ctx.rng.next_int(11) as f32 / 100.0;
        ctx.audio.play_fx_with_pitch(id, pitch);
    }
}

/// Reposition the ball at a random side's fixed spawn point, zero its
/// spin, relaunch it toward the table at a score-scaled speed with a
/// small push toward center, and re-arm the grace window. Only ever
/// called outside the physics step.
fn relaunch(
    ctx: &mut EngineContext,
    level: &Level,
    session: &mut Session,
    tuning: &Tuning,
    score: i32,
) {
    let Some(body) = ctx.scene.get(level.ball).and_then(|e| e.body) else {
        log::warn!("ball body missing, relaunch skipped");
        return;
    };

    let left_side = ctx.rng.next_bool();
    let spawn = Level::spawn_point(left_side);
    let lateral = if left_side {
        tuning.lateral_push
    } else {
        -tuning.lateral_push
    };
    let speed = tuning.base_ball_speed * capped_multiplier(score, tuning.max_speed_multiplier);

    ctx.physics.set_transform(&body, spawn, 0.0);
    ctx.physics.set_velocity(&body, Vec2::new(lateral, speed));
    session.arm_grace(tuning.grace_frames);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{SPAWN_LEFT, SPAWN_RIGHT};
    use tilt_core::{InputEvent, InputQueue};

    fn setup() -> (Futbolin, EngineContext) {
        let mut game = Futbolin::new();
        let mut ctx = EngineContext::new(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn pressed(key: u32) -> InputState {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyDown { key_code: key });
        let mut state = InputState::new();
        state.begin_frame(&mut queue);
        state
    }

    fn idle() -> InputState {
        InputState::new()
    }

    fn start_playing(game: &mut Futbolin, ctx: &mut EngineContext) {
        game.update(ctx, &pressed(keys::ENTER));
        assert_eq!(game.phase(), Phase::Playing);
        // Run out the relaunch grace window.
        for _ in 0..game.tuning.grace_frames {
            game.update(ctx, &idle());
        }
        assert_eq!(game.session.grace_frames, 0);
    }

    // Pixel positions round-trip through simulation units, so compare
    // with a small tolerance.
    fn at_spawn(pos: Vec2) -> bool {
        pos.distance(SPAWN_LEFT) < 0.01 || pos.distance(SPAWN_RIGHT) < 0.01
    }

    fn ball_position(game: &Futbolin, ctx: &EngineContext) -> Vec2 {
        let level = game.level.as_ref().unwrap();
        let body = ctx.scene.get(level.ball).and_then(|e| e.body).unwrap();
        ctx.physics.body_position(&body).0
    }

    fn ball_velocity(game: &Futbolin, ctx: &EngineContext) -> Vec2 {
        let level = game.level.as_ref().unwrap();
        let body = ctx.scene.get(level.ball).and_then(|e| e.body).unwrap();
        ctx.physics.velocity(&body)
    }

    #[test]
    fn starts_in_menu_and_ignores_play_input() {
        let (mut game, mut ctx) = setup();
        assert_eq!(game.phase(), Phase::Menu);
        game.update(&mut ctx, &pressed(keys::LEFT));
        assert_eq!(game.phase(), Phase::Menu);
    }

    #[test]
    fn confirm_starts_a_fresh_session_with_a_launched_ball() {
        let (mut game, mut ctx) = setup();
        game.update(&mut ctx, &pressed(keys::ENTER));

        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.score(), 0);
        assert_eq!(game.session.grace_frames, game.tuning.grace_frames);

        let pos = ball_position(&game, &ctx);
        assert!(at_spawn(pos), "ball at a fixed spawn point, got {pos}");
        let vel = ball_velocity(&game, &ctx);
        assert_eq!(vel.y, game.tuning.base_ball_speed);
        assert_eq!(vel.x.abs(), game.tuning.lateral_push);
    }

    #[test]
    fn grace_counts_down_one_per_frame() {
        let (mut game, mut ctx) = setup();
        game.update(&mut ctx, &pressed(keys::ENTER));
        assert_eq!(game.session.grace_frames, 30);
        game.update(&mut ctx, &idle());
        assert_eq!(game.session.grace_frames, 29);
    }

    #[test]
    fn own_goal_costs_a_life_and_relaunches_at_base_speed() {
        let (mut game, mut ctx) = setup();
        start_playing(&mut game, &mut ctx);

        game.session.request(TableEvent::OwnGoal);
        game.update(&mut ctx, &idle());

        assert_eq!(game.lives(), 2);
        assert_eq!(game.score(), 0);
        assert!(at_spawn(ball_position(&game, &ctx)));
        assert_eq!(ball_velocity(&game, &ctx).y, game.tuning.base_ball_speed);
        assert_eq!(game.session.grace_frames, game.tuning.grace_frames);
    }

    #[test]
    fn goal_at_score_two_relaunches_at_double_speed() {
        let (mut game, mut ctx) = setup();
        start_playing(&mut game, &mut ctx);
        game.session.score = 2;

        game.session.request(TableEvent::Goal);
        game.update(&mut ctx, &idle());

        assert_eq!(game.score(), 3);
        assert_eq!(
            ball_velocity(&game, &ctx).y,
            game.tuning.base_ball_speed * 2.0,
            "speed scales with the score at trigger time"
        );
    }

    #[test]
    fn drop_costs_a_point() {
        let (mut game, mut ctx) = setup();
        start_playing(&mut game, &mut ctx);

        game.session.request(TableEvent::Drop);
        game.update(&mut ctx, &idle());
        assert_eq!(game.score(), -1);
        assert_eq!(game.lives(), 3);
    }

    #[test]
    fn losing_the_last_life_ends_the_game_next_frame() {
        let (mut game, mut ctx) = setup();
        start_playing(&mut game, &mut ctx);
        game.session.lives = 1;

        game.session.request(TableEvent::OwnGoal);
        game.update(&mut ctx, &idle());
        assert_eq!(game.lives(), 0);
        assert_eq!(game.phase(), Phase::Playing, "transition lands next frame");

        game.update(&mut ctx, &idle());
        assert_eq!(game.phase(), Phase::GameOver);

        // Sensor effects are suppressed in GameOver.
        assert!(!game.session.request(TableEvent::Goal));

        game.update(&mut ctx, &pressed(keys::ENTER));
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn spawn_keys_drop_props_at_the_pointer() {
        let (mut game, mut ctx) = setup();
        start_playing(&mut game, &mut ctx);

        let mut queue = InputQueue::new();
        queue.push(InputEvent::PointerMove { x: 400.0, y: 200.0 });
        queue.push(InputEvent::KeyDown {
            key_code: keys::ONE,
        });
        let mut input = InputState::new();
        input.begin_frame(&mut queue);
        game.update(&mut ctx, &input);
        assert_eq!(game.props.len(), 1);

        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyDown {
            key_code: keys::TWO,
        });
        input.begin_frame(&mut queue);
        game.update(&mut ctx, &input);
        assert_eq!(game.props.len(), 2);

        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyDown {
            key_code: keys::THREE,
        });
        input.begin_frame(&mut queue);
        game.update(&mut ctx, &input);
        assert_eq!(game.props.len(), 3);
    }

    #[test]
    fn hud_event_is_emitted_every_frame() {
        let (mut game, mut ctx) = setup();
        game.update(&mut ctx, &idle());
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, game_events::HUD);
        assert_eq!(ctx.events[0].c, 0.0, "still in menu");
    }

    #[test]
    fn keeper_follows_its_oscillator() {
        let (mut game, mut ctx) = setup();
        start_playing(&mut game, &mut ctx);

        let keeper_id = game.level.as_ref().unwrap().keeper_id;
        let x0 = ctx.scene.get(keeper_id).unwrap().pos.x;
        for _ in 0..20 {
            game.update(&mut ctx, &idle());
        }
        let x1 = ctx.scene.get(keeper_id).unwrap().pos.x;
        assert_ne!(x0, x1, "keeper sweeps while playing");
    }
}
