//! Display-paced driver
//!
//! One tick per display refresh: read the pointer, advance the match by
//! one frame, draw it, and ask for the next refresh.

use crate::controller::{FrameReport, MatchController, RequestTicket};
use crate::input::PointerInput;
use crate::renderer::{build_frame, Surface, Theme};
use proto::ModifyError;
use std::time::Duration;
use tokio::sync::mpsc;

/// Handle for one requested display refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub u64);

/// Source of display refreshes
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for a timer-driven loop: a refresh is due whenever one is
/// pending and nobody cancelled it
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    next: u64,
    pending: Option<FrameHandle>,
}

impl IntervalScheduler {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Generator answer, tagged with the request it belongs to
pub type GeneratorReply = (RequestTicket, Result<String, ModifyError>);

pub struct RenderLoop<S, R> {
    controller: MatchController,
    scheduler: S,
    surface: R,
    pointer: PointerInput,
    theme: Theme,
    pending_frame: Option<FrameHandle>,
    replies_tx: mpsc::UnboundedSender<GeneratorReply>,
    replies_rx: mpsc::UnboundedReceiver<GeneratorReply>,
}

impl<S: FrameScheduler, R: Surface> RenderLoop<S, R> {
    pub fn new(controller: MatchController, scheduler: S, surface: R) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        let pointer = PointerInput::new(controller.sim().config.center().y);
        Self {
            controller,
            scheduler,
            surface,
            pointer,
            theme: Theme::default(),
            pending_frame: None,
            replies_tx,
            replies_rx,
        }
    }

    /// Start a match and schedule the first refresh
    pub fn start(&mut self) {
        self.controller.start();
        self.pointer.reset(self.controller.sim().config.center().y);
        self.pointer.attach();
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.pending_frame = Some(self.scheduler.request_frame());
    }

    /// Run one refresh, `dt` after the previous one. Returns `None` when no
    /// refresh was scheduled.
    pub fn tick(&mut self, dt: Duration) -> Option<FrameReport> {
        self.pending_frame.take()?;

        while let Ok((ticket, result)) = self.replies_rx.try_recv() {
            self.controller.apply_response(ticket, result);
        }

        let sim_config = &self.controller.sim().config;
        let player_y = sim_config.clamp_pointer_y(self.pointer.get());
        let report = self.controller.frame(player_y, dt);

        let rules = self.controller.rules();
        let frame = build_frame(self.controller.sim(), &rules, &self.theme);
        self.surface.present(&frame);

        self.pending_frame = Some(self.scheduler.request_frame());
        Some(report)
    }

    /// Stop the loop; nothing scheduled, no input, in-flight replies stale
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.pointer.detach();
        self.controller.teardown();
    }

    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Sender for generator replies; they are applied at the next tick
    pub fn replies(&self) -> mpsc::UnboundedSender<GeneratorReply> {
        self.replies_tx.clone()
    }

    /// Handle for the pointer event source
    pub fn pointer(&self) -> PointerInput {
        self.pointer.clone()
    }

    pub fn controller(&self) -> &MatchController {
        &self.controller
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::fsm::FsmState;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use game_core::{Config, RuleSet, Side};
    use glam::Vec2;
    use proto::ModifyResponse;

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Default)]
    struct MockScheduler {
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for MockScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            let handle = FrameHandle(self.requested.len() as u64 + 1);
            self.requested.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    fn render_loop() -> RenderLoop<MockScheduler, RecordingSurface> {
        let controller = MatchController::new(ClientConfig::default(), Config::new());
        RenderLoop::new(controller, MockScheduler::default(), RecordingSurface::default())
    }

    #[test]
    fn test_tick_requires_scheduled_frame() {
        let mut render_loop = render_loop();
        assert!(render_loop.tick(FRAME).is_none());
        assert_eq!(render_loop.surface().frames_presented, 0);
    }

    #[test]
    fn test_each_tick_presents_and_reschedules() {
        let mut render_loop = render_loop();
        render_loop.start();
        for _ in 0..5 {
            assert!(render_loop.tick(FRAME).is_some());
        }
        assert_eq!(render_loop.surface().frames_presented, 5);
        assert_eq!(render_loop.scheduler().requested.len(), 6);
        assert!(render_loop.is_running());
    }

    #[test]
    fn test_pointer_drives_player_paddle_clamped() {
        let mut render_loop = render_loop();
        render_loop.start();
        let pointer = render_loop.pointer();

        pointer.set(100.0);
        render_loop.tick(FRAME);
        assert_eq!(render_loop.controller().sim().paddle(Side::Player).y, 100.0);

        pointer.set(10_000.0);
        render_loop.tick(FRAME);
        assert_eq!(render_loop.controller().sim().paddle(Side::Player).y, 480.0);
    }

    #[test]
    fn test_shutdown_cancels_and_detaches() {
        let mut render_loop = render_loop();
        render_loop.start();
        render_loop.tick(FRAME);
        render_loop.shutdown();

        assert!(!render_loop.is_running());
        assert_eq!(render_loop.scheduler().cancelled, vec![FrameHandle(2)]);
        assert!(!render_loop.pointer().is_attached());
        assert_eq!(render_loop.controller().state(), FsmState::Idle);
        assert!(render_loop.tick(FRAME).is_none());
    }

    #[test]
    fn test_replies_applied_on_next_tick() {
        let mut render_loop = render_loop();
        render_loop.start();
        // Ball already past the opponent's goal line
        render_loop
            .controller
            .sim_mut()
            .place_ball(Vec2::new(900.0, 100.0), Vec2::new(5.0, 0.0), 0.0);
        let pending = render_loop.tick(FRAME).and_then(|r| r.request).unwrap();

        let mut rules = RuleSet::default();
        rules.ball.visuals.fill_color = "#FF0000".to_string();
        let raw = ModifyResponse {
            description: "Red alert!".to_string(),
            game_state: rules,
        }
        .to_json()
        .unwrap();
        render_loop.replies().send((pending.ticket, Ok(raw))).unwrap();

        render_loop.tick(FRAME);
        assert_eq!(render_loop.controller().state(), FsmState::Announcing);
        assert_eq!(render_loop.controller().message(), Some("Red alert!"));

        // The frozen frame is already drawn with the new rules
        let ball_color = render_loop
            .surface()
            .last_frame
            .iter()
            .find_map(|c| match c {
                DrawCommand::Polygon { color, .. } => Some(*color),
                _ => None,
            })
            .unwrap();
        assert_eq!((ball_color.r, ball_color.g, ball_color.b), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_interval_scheduler() {
        let mut scheduler = IntervalScheduler::default();
        assert!(!scheduler.is_pending());
        let first = scheduler.request_frame();
        let second = scheduler.request_frame();
        scheduler.cancel_frame(first);
        assert!(scheduler.is_pending());
        scheduler.cancel_frame(second);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_fast_ticks_do_not_exhaust_fallback_timeout() {
        let mut render_loop = render_loop();
        render_loop.start();
        render_loop
            .controller
            .sim_mut()
            .place_ball(Vec2::new(900.0, 100.0), Vec2::new(5.0, 0.0), 0.0);
        render_loop.tick(FRAME);
        assert_eq!(render_loop.controller().state(), FsmState::AwaitingRules);

        // Far more ticks than 10 s worth of refreshes, each 1 ms apart
        for _ in 0..2000 {
            render_loop.tick(Duration::from_millis(1));
        }
        assert_eq!(render_loop.controller().state(), FsmState::AwaitingRules);
    }
}
