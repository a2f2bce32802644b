//! Session driver and host boundary
//!
//! Owns the run lifecycle: buffers input between frames, steps the
//! simulation once per scheduled callback, paints, and requests the next
//! frame while the run is alive. Frame scheduling is injected through
//! `TickScheduler`, so tests drive ticks by hand without display timing.

use crate::render::{DrawSurface, Palette, paint};
use crate::sim::{GamePhase, GameState, TickInput, Viewport, tick};

/// Identifies one scheduled frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(pub u64);

/// Opaque handle to a host-registered player image. The engine never
/// decodes it; the surface resolves the id to whatever the host uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarImage(pub u32);

/// Next-frame scheduling capability supplied by the host
///
/// A display-driven host arms its refresh callback here; a test harness
/// hands out tokens and calls [`Engine::on_frame`] itself.
pub trait TickScheduler {
    /// Request one `Engine::on_frame` call at the next display refresh.
    fn request_frame(&mut self) -> FrameToken;
    /// Cancel a pending request. Must be a no-op for a token that already
    /// fired.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Host-supplied session trimmings. Both are cosmetic: the avatar replaces
/// the fallback player glyph, the currency label prefixes the score readout.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    pub avatar: Option<AvatarImage>,
    pub currency_symbol: String,
}

type ExitFn = Box<dyn FnMut()>;
type GameOverFn = Box<dyn FnMut(u64)>;

/// The embedded mini-game: session state machine plus frame driver
pub struct Engine<S: TickScheduler> {
    scheduler: S,
    config: HostConfig,
    palette: Palette,
    state: GameState,
    input: TickInput,
    /// Last surface size seen; reused for ticks on frames the surface is away
    view: Viewport,
    /// Outstanding frame request, if any
    pending: Option<FrameToken>,
    exited: bool,
    on_exit: Option<ExitFn>,
    on_game_over: Option<GameOverFn>,
}

impl<S: TickScheduler> Engine<S> {
    pub fn new(scheduler: S, config: HostConfig) -> Self {
        let view = Viewport::default();
        Self {
            scheduler,
            config,
            palette: Palette::default(),
            state: GameState::new(0, view),
            input: TickInput::default(),
            view,
            pending: None,
            exited: false,
            on_exit: None,
            on_game_over: None,
        }
    }

    /// Register the dismissal callback.
    pub fn set_on_exit(&mut self, f: impl FnMut() + 'static) {
        self.on_exit = Some(Box::new(f));
    }

    /// Register the end-of-run score callback.
    pub fn set_on_game_over(&mut self, f: impl FnMut(u64) + 'static) {
        self.on_game_over = Some(Box::new(f));
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Read-only view of the session, for host-owned overlays.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// True while a frame callback is outstanding.
    pub fn wants_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a fresh run. Also the restart after game over: a full reset of
    /// player, entities, counters and speed; nothing carries over.
    pub fn start(&mut self, seed: u64) {
        if self.exited {
            return;
        }
        self.cancel_pending();
        self.state = GameState::new(seed, self.view);
        self.state.phase = GamePhase::Playing;
        self.input = TickInput::default();
        log::info!("session started, seed {seed}");
        self.request_frame();
    }

    /// Buffer a jump request for the next tick, where it is accepted or
    /// rejected; requests never queue.
    pub fn jump(&mut self) {
        if !self.exited && self.state.phase == GamePhase::Playing {
            self.input.jump = true;
        }
    }

    /// Dismiss the takeover. Idempotent: the first call cancels any pending
    /// frame and notifies the host, later calls do nothing.
    pub fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;
        self.cancel_pending();
        log::info!("session dismissed, score {}", self.state.score);
        if let Some(on_exit) = self.on_exit.as_mut() {
            on_exit();
        }
    }

    /// Drive one scheduled frame.
    ///
    /// The host calls this when its scheduler fires. `surface` is absent
    /// when the drawing target is unavailable this frame; the simulation
    /// still advances and only the paint is skipped, retried next frame.
    pub fn on_frame(&mut self, mut surface: Option<&mut dyn DrawSurface>) {
        self.pending = None;
        if self.exited || self.state.phase != GamePhase::Playing {
            // Stray callback after cancellation or game over
            return;
        }

        if let Some(surface) = surface.as_deref() {
            self.view = surface.size();
        }

        let input = self.input;
        self.input = TickInput::default();
        tick(&mut self.state, &input, self.view);

        if self.state.phase == GamePhase::GameOver {
            let score = self.state.score;
            log::info!("run over after {} ticks, score {score}", self.state.frame);
            if let Some(on_game_over) = self.on_game_over.as_mut() {
                on_game_over(score);
            }
            return;
        }

        match surface.as_deref_mut() {
            Some(surface) => paint(
                &self.state,
                self.config.avatar,
                &self.config.currency_symbol,
                &self.palette,
                surface,
            ),
            None => log::debug!("no draw surface, skipping frame paint"),
        }

        self.request_frame();
    }

    fn request_frame(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{OBSTACLE_SIZE, PLAYER_X};
    use crate::render::Color;
    use crate::sim::state::{Lane, Obstacle, Rect};
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Hands out tokens and records outstanding/cancelled requests
    #[derive(Default)]
    struct ManualScheduler {
        next: u64,
        outstanding: Vec<u64>,
        cancelled: Vec<u64>,
    }

    impl TickScheduler for ManualScheduler {
        fn request_frame(&mut self) -> FrameToken {
            self.next += 1;
            self.outstanding.push(self.next);
            FrameToken(self.next)
        }
        fn cancel_frame(&mut self, token: FrameToken) {
            self.outstanding.retain(|&t| t != token.0);
            self.cancelled.push(token.0);
        }
    }

    /// Surface that only counts paints
    struct CountingSurface {
        view: Viewport,
        clears: usize,
    }

    impl CountingSurface {
        fn new(width: f32, height: f32) -> Self {
            Self {
                view: Viewport::new(width, height),
                clears: 0,
            }
        }
    }

    impl DrawSurface for CountingSurface {
        fn size(&self) -> Viewport {
            self.view
        }
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
        }
        fn fill_rect(&mut self, _rect: &Rect, _color: Color) {}
        fn draw_avatar(&mut self, _image: AvatarImage, _rect: &Rect) -> bool {
            false
        }
        fn draw_glyph(&mut self, _glyph: char, _rect: &Rect) {}
        fn draw_text(&mut self, _text: &str, _pos: Vec2, _color: Color) {}
    }

    fn engine() -> Engine<ManualScheduler> {
        Engine::new(ManualScheduler::default(), HostConfig::default())
    }

    fn obstacle_on_player(view: Viewport) -> Obstacle {
        Obstacle {
            rect: Rect::new(
                PLAYER_X,
                view.ground_y(OBSTACLE_SIZE),
                OBSTACLE_SIZE,
                OBSTACLE_SIZE,
            ),
            lane: Lane::Ground,
            glyph: '🧱',
        }
    }

    #[test]
    fn constructed_engine_is_idle_and_quiet() {
        let engine = engine();
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert!(!engine.wants_frame());
    }

    #[test]
    fn start_enters_playing_and_requests_a_frame() {
        let mut engine = engine();
        engine.start(42);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.wants_frame());
        assert_eq!(engine.scheduler.outstanding.len(), 1);
    }

    #[test]
    fn frames_advance_and_reschedule() {
        let mut engine = engine();
        engine.start(42);
        let mut surface = CountingSurface::new(800.0, 600.0);
        engine.on_frame(Some(&mut surface));
        assert_eq!(engine.state().frame, 1);
        assert_eq!(surface.clears, 1);
        assert!(engine.wants_frame());
    }

    #[test]
    fn missing_surface_skips_paint_but_still_ticks() {
        let mut engine = engine();
        engine.start(42);
        engine.on_frame(None);
        assert_eq!(engine.state().frame, 1);
        assert!(engine.wants_frame());

        // Surface comes back: painting resumes
        let mut surface = CountingSurface::new(800.0, 600.0);
        engine.on_frame(Some(&mut surface));
        assert_eq!(engine.state().frame, 2);
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn buffered_jump_is_consumed_by_the_next_tick() {
        let mut engine = engine();
        engine.start(42);
        engine.jump();
        engine.on_frame(None);
        assert!(!engine.state().player.grounded);
        // The buffer cleared; the player does not re-jump on landing
        assert!(!engine.input.jump);
    }

    #[test]
    fn jump_outside_playing_is_rejected() {
        let mut engine = engine();
        engine.jump();
        assert!(!engine.input.jump);
    }

    #[test]
    fn game_over_stops_scheduling_and_reports_score() {
        let reported = Rc::new(Cell::new(None));
        let mut engine = engine();
        let sink = reported.clone();
        engine.set_on_game_over(move |score| sink.set(Some(score)));

        engine.start(42);
        let view = engine.view;
        engine.state.obstacles.push(obstacle_on_player(view));
        engine.on_frame(None);

        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert!(!engine.wants_frame());
        assert_eq!(reported.get(), Some(0));
    }

    #[test]
    fn restart_after_game_over_fully_resets() {
        let mut engine = engine();
        engine.start(42);
        let view = engine.view;
        engine.state.score = 120;
        engine.state.scroll_speed = 9.0;
        engine.state.obstacles.push(obstacle_on_player(view));
        engine.on_frame(None);
        assert_eq!(engine.phase(), GamePhase::GameOver);

        engine.start(43);
        let state = engine.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.scroll_speed, crate::consts::BASE_SCROLL_SPEED);
        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
        assert!(state.player.grounded);
        assert_eq!(state.player.rect.y, view.ground_y(state.player.rect.height));
        assert!(engine.wants_frame());
    }

    #[test]
    fn exit_cancels_the_pending_frame() {
        let mut engine = engine();
        engine.start(42);
        let token = engine.pending.unwrap();
        engine.exit();
        assert!(!engine.wants_frame());
        assert!(engine.scheduler.cancelled.contains(&token.0));
        assert!(engine.scheduler.outstanding.is_empty());
    }

    #[test]
    fn stray_frame_after_exit_is_inert() {
        let mut engine = engine();
        engine.start(42);
        engine.exit();
        let frame = engine.state().frame;
        engine.on_frame(None);
        assert_eq!(engine.state().frame, frame);
        assert!(!engine.wants_frame());
    }

    #[test]
    fn exit_is_idempotent() {
        let exits = Rc::new(Cell::new(0u32));
        let mut engine = engine();
        let sink = exits.clone();
        engine.set_on_exit(move || sink.set(sink.get() + 1));

        engine.start(42);
        engine.exit();
        engine.exit();
        assert_eq!(exits.get(), 1);
    }

    #[test]
    fn surface_size_is_reread_every_frame() {
        let mut engine = engine();
        engine.start(42);
        let mut small = CountingSurface::new(400.0, 300.0);
        engine.on_frame(Some(&mut small));
        assert_eq!(engine.view, Viewport::new(400.0, 300.0));

        let mut large = CountingSurface::new(1600.0, 900.0);
        engine.on_frame(Some(&mut large));
        assert_eq!(engine.view, Viewport::new(1600.0, 900.0));
    }
}
