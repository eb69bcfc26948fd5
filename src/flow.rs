//! Screen/flow state machine
//!
//! Owns the session, profile, config and host channel. Every user action
//! and every animation frame goes through here. Simulation transitions are
//! pure (`sim`); persistence and host emission happen only in this module.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde_json::Value;

use crate::config::Config;
use crate::host::{GameEvent, HostChannel, HostMessage};
use crate::persistence::{KeyValueStore, Profile, UserDetails};
use crate::sim::{FrameClock, Reward, Session, TickEvent, jump, redemption_code, reward_for, tick};
use crate::ui::{Action, GameOverView, PendingAction, ScoreRow, Screen};

/// Outcome of the most recent finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub score: u32,
    pub reward: Reward,
    pub code: String,
    pub rank: Option<usize>,
}

pub struct FlowController<S: KeyValueStore, H: HostChannel> {
    config: Config,
    profile: Profile<S>,
    host: H,
    session: Session,
    clock: FrameClock,
    rng: Pcg32,
    /// `None` while a session is being played
    screen: Option<Screen>,
    /// Bumped on every screen change so adapters can re-render lazily
    screen_version: u64,
    last_result: Option<GameResult>,
    /// Frame loop handle: frames are only wanted while this is set
    loop_running: bool,
    last_height: Option<(u32, bool)>,
}

impl<S: KeyValueStore, H: HostChannel> FlowController<S, H> {
    pub fn new(config: Config, store: S, host: H, canvas: Vec2, seed: u64) -> Self {
        let mut flow = Self {
            config,
            profile: Profile::open(store),
            host,
            session: Session::new(canvas),
            clock: FrameClock::new(),
            rng: Pcg32::seed_from_u64(seed),
            screen: None,
            screen_version: 0,
            last_result: None,
            loop_running: false,
            last_height: None,
        };
        let initial = flow.idle_screen();
        flow.set_screen(Some(initial));
        log::info!(
            "Flow ready: {}/{} plays used",
            flow.profile.play_count(),
            flow.config.max_plays
        );
        flow
    }

    // === Queries ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> &Profile<S> {
        &self.profile
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn screen_version(&self) -> u64 {
        self.screen_version
    }

    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    /// Whether the adapter should keep requesting animation frames
    pub fn is_running(&self) -> bool {
        self.loop_running
    }

    pub fn plays_left(&self) -> u32 {
        self.config.max_plays.saturating_sub(self.profile.play_count())
    }

    // === Configuration ===

    /// Merge a config patch. Safe to call any number of times.
    pub fn apply_config(&mut self, patch: &Value) {
        let before = self.config.clone();
        self.config.merge(patch);
        if self.config == before {
            return;
        }
        log::info!("Config applied: {:?}", self.config);

        // Gating may have changed; playing sessions are left alone
        match self.screen {
            Some(Screen::Start { .. }) | Some(Screen::NoPlaysLeft) => {
                let screen = self.idle_screen();
                self.set_screen(Some(screen));
            }
            Some(Screen::GameOver(_)) => {
                let view = self.game_over_view();
                self.set_screen(view.map(Screen::GameOver));
            }
            _ => {
                // Theme changes still need a re-render
                self.screen_version += 1;
            }
        }
    }

    // === Session lifecycle ===

    /// Begin a session. Returns false when refused (already running or
    /// no plays left); refusal for lack of plays shows `NoPlaysLeft`.
    pub fn start(&mut self) -> bool {
        if self.loop_running {
            log::warn!("Start ignored: a session is already running");
            return false;
        }
        if self.plays_left() == 0 {
            log::info!("Start refused: no plays left");
            self.set_screen(Some(Screen::NoPlaysLeft));
            return false;
        }

        let play = self.profile.increment_play_count();
        self.session.begin(self.session.canvas);
        self.clock.reset();
        self.loop_running = true;
        self.last_result = None;
        self.set_screen(None);

        log::info!("Session {} started", play);
        self.emit(GameEvent::Started { play });
        true
    }

    /// Apply the jump impulse; ignored unless playing
    pub fn jump(&mut self) {
        if self.session.is_playing() {
            jump(&mut self.session.player, self.session.canvas.y);
        }
    }

    /// Run one animation frame stamped `now_ms`. Returns whether another
    /// frame is wanted.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.loop_running {
            return false;
        }

        let dt = self.clock.step(now_ms);
        let events = tick(&mut self.session, dt, &mut self.rng);
        for event in events {
            match event {
                TickEvent::Scored(score) => self.emit(GameEvent::Score { score }),
                TickEvent::Collision { lives } => self.emit(GameEvent::Collision { lives }),
                TickEvent::OutOfLives => self.end(),
                TickEvent::Spawned => {}
            }
        }

        self.loop_running
    }

    /// Finalize the session: stop the loop, persist, reward, show results
    fn end(&mut self) {
        self.loop_running = false;
        let summary = self.session.finish();

        let rank = self.profile.record_score(summary.score);
        let reward = reward_for(summary.score);
        let code = redemption_code(&mut self.rng);
        log::info!(
            "Session over: score {} ({}% off, rank {:?})",
            summary.score,
            reward.discount,
            rank
        );

        self.last_result = Some(GameResult {
            score: summary.score,
            reward,
            code: code.clone(),
            rank,
        });
        let view = self.game_over_view();
        self.set_screen(view.map(Screen::GameOver));

        self.emit(GameEvent::GameOver {
            score: summary.score,
            discount: reward.discount,
            code,
        });
    }

    // === Overlay actions ===

    /// Route an overlay action. `SubmitDetails` needs the form values.
    pub fn dispatch(&mut self, action: Action, details: Option<UserDetails>) {
        match action {
            Action::Start => {
                if matches!(self.screen, Some(Screen::Start { .. })) {
                    self.start();
                }
            }
            Action::Redeem => self.redeem(),
            Action::PlayAgain => self.play_again(),
            Action::SubmitDetails => self.submit_details(details.unwrap_or_default()),
        }
    }

    pub fn redeem(&mut self) {
        let Some(result) = self.last_result.clone() else {
            log::debug!("Redeem ignored: no finished session");
            return;
        };
        if !self.profile.has_details() {
            self.ask_for_details(PendingAction::Redeem);
            return;
        }

        self.set_screen(Some(Screen::RedeemConfirmation {
            code: result.code.clone(),
            discount: result.reward.discount,
        }));
        self.emit(GameEvent::Redeem {
            code: result.code,
            discount: result.reward.discount,
        });
    }

    pub fn play_again(&mut self) {
        if self.loop_running || self.last_result.is_none() {
            log::debug!("Play again ignored: no finished session");
            return;
        }
        if !self.profile.has_details() {
            self.ask_for_details(PendingAction::PlayAgain);
            return;
        }
        if self.plays_left() == 0 {
            self.set_screen(Some(Screen::NoPlaysLeft));
            return;
        }

        self.emit(GameEvent::PlayAgain {
            plays_left: self.plays_left(),
        });
        self.start();
    }

    /// Validate and store details, then resume the parked action.
    /// Invalid input only updates the inline prompt.
    pub fn submit_details(&mut self, details: UserDetails) {
        let Some(Screen::DetailsForm { pending, .. }) = self.screen else {
            log::debug!("Details submission ignored: form not shown");
            return;
        };

        let details = match details.validate() {
            Ok(details) => details,
            Err(e) => {
                self.set_screen(Some(Screen::DetailsForm {
                    pending,
                    error: Some(e.to_string()),
                }));
                return;
            }
        };

        self.profile.save_details(&details);
        log::info!("Details captured");
        self.emit(GameEvent::DetailsSubmitted);

        match pending {
            PendingAction::Redeem => self.redeem(),
            PendingAction::PlayAgain => self.play_again(),
        }
    }

    fn ask_for_details(&mut self, pending: PendingAction) {
        self.set_screen(Some(Screen::DetailsForm {
            pending,
            error: None,
        }));
    }

    // === Viewport and host ===

    pub fn resize(&mut self, canvas: Vec2) {
        self.session.resize(canvas);
    }

    /// Report the desired iframe height; posts when the height or the
    /// overlay visibility changed since the last report
    pub fn report_height(&mut self, px: u32, overlay_visible: bool) {
        if self.last_height == Some((px, overlay_visible)) {
            return;
        }
        self.last_height = Some((px, overlay_visible));
        self.post(HostMessage::Height { px });
    }

    fn emit(&mut self, event: GameEvent) {
        let message = HostMessage::event(event, self.config.user_id.clone());
        self.post(message);
    }

    fn post(&mut self, message: HostMessage) {
        if let Err(e) = self.host.post(&message, &self.config.parent_origin) {
            log::warn!("Dropped host message: {e}");
        }
    }

    // === Screens ===

    fn set_screen(&mut self, screen: Option<Screen>) {
        self.screen = screen;
        self.screen_version += 1;
    }

    /// Screen for a profile with no session in progress
    fn idle_screen(&self) -> Screen {
        match self.plays_left() {
            0 => Screen::NoPlaysLeft,
            plays_left => Screen::Start { plays_left },
        }
    }

    fn game_over_view(&self) -> Option<GameOverView> {
        let result = self.last_result.as_ref()?;
        Some(GameOverView {
            score: result.score,
            discount: result.reward.discount,
            code: result.code.clone(),
            rows: ScoreRow::rows(self.profile.scoreboard()),
            plays_left: self.plays_left(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GameError, Result};
    use crate::host::RecordingChannel;
    use crate::persistence::MemoryStore;
    use crate::persistence::profile::{DETAILS_FLAG_KEY, PLAY_COUNT_KEY};
    use crate::sim::{Obstacle, Phase};
    use serde_json::json;

    const CANVAS: Vec2 = Vec2::new(400.0, 300.0);

    type Flow = FlowController<MemoryStore, RecordingChannel>;

    fn flow_with(store: MemoryStore, max_plays: u32) -> Flow {
        let config = Config::from_patch(&json!({ "maxSpins": max_plays, "userId": "u-1" }));
        FlowController::new(config, store, RecordingChannel::new(), CANVAS, 7)
    }

    fn fresh(max_plays: u32) -> Flow {
        flow_with(MemoryStore::new(), max_plays)
    }

    fn details() -> UserDetails {
        UserDetails::new("Ada", "ada@example.com", "555-0100")
    }

    /// Drive the running session to game over with `score` points
    fn finish_with_score(flow: &mut Flow, score: u32) {
        assert!(flow.is_running());
        flow.session.score = score;
        flow.session.lives = 1;
        let player = flow.session.player;
        flow.session
            .obstacles
            .push(Obstacle::new(player.pos, Vec2::new(48.0, 72.0)));
        flow.frame(0.0);
        assert!(!flow.is_running());
        assert_eq!(flow.session.phase, Phase::Ended);
    }

    #[test]
    fn test_fresh_profile_shows_start() {
        let flow = fresh(3);
        assert_eq!(flow.screen(), Some(&Screen::Start { plays_left: 3 }));
        assert!(!flow.is_running());
    }

    #[test]
    fn test_exhausted_profile_shows_no_plays_left() {
        let flow = flow_with(MemoryStore::new().with(PLAY_COUNT_KEY, "3"), 3);
        assert_eq!(flow.screen(), Some(&Screen::NoPlaysLeft));
    }

    #[test]
    fn test_start_resets_and_emits() {
        let mut flow = fresh(3);
        assert!(flow.start());
        assert!(flow.is_running());
        assert!(flow.screen().is_none());
        assert_eq!(flow.profile().play_count(), 1);
        assert_eq!(flow.profile().store().get(PLAY_COUNT_KEY), Some("1"));
        assert_eq!(flow.session().lives, 3);
        assert_eq!(flow.host().event_names(), vec!["started"]);

        let (msg, origin) = &flow.host().sent[0];
        assert_eq!(origin, "*");
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["payload"]["userId"], json!("u-1"));
        assert_eq!(value["payload"]["play"], json!(1));
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut flow = fresh(3);
        assert!(flow.start());
        flow.session.score = 4;
        assert!(!flow.start());
        assert_eq!(flow.session().score, 4);
        assert_eq!(flow.profile().play_count(), 1);
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut flow = fresh(3);
        flow.jump();
        assert_eq!(flow.session().player.vel_y, 0.0);
        flow.start();
        flow.jump();
        assert!(flow.session().player.vel_y < 0.0);
    }

    #[test]
    fn test_game_over_persists_and_rewards() {
        let mut flow = fresh(3);
        flow.start();
        finish_with_score(&mut flow, 15);

        let result = flow.last_result().unwrap().clone();
        assert_eq!(result.score, 15);
        assert_eq!(result.reward, Reward { discount: 10 });
        assert_eq!(result.code.len(), 6);
        assert_eq!(result.rank, Some(1));
        assert_eq!(flow.profile().scoreboard().scores(), &[15]);

        match flow.screen() {
            Some(Screen::GameOver(view)) => {
                assert_eq!(view.score, 15);
                assert_eq!(view.discount, 10);
                assert_eq!(view.code, result.code);
                assert_eq!(view.plays_left, 2);
                assert_eq!(view.rows.len(), 3);
            }
            other => panic!("expected game over, got {other:?}"),
        }

        assert_eq!(
            flow.host().event_names(),
            vec!["started", "collision", "game_over"]
        );
        assert_eq!(
            flow.host().events().last(),
            Some(&GameEvent::GameOver {
                score: 15,
                discount: 10,
                code: result.code.clone()
            })
        );

        // Loop is torn down; further frames do nothing
        assert!(!flow.frame(100.0));
    }

    #[test]
    fn test_score_events_come_from_ticks() {
        let mut flow = fresh(3);
        flow.start();
        let x = flow.session.player.pos.x;
        flow.session
            .obstacles
            .push(Obstacle::new(Vec2::new(x - 49.0, 0.0), Vec2::new(48.0, 20.0)));
        assert!(flow.frame(0.0));
        assert_eq!(
            flow.host().events().last(),
            Some(&GameEvent::Score { score: 1 })
        );
    }

    #[test]
    fn test_details_required_once_then_redeem() {
        let mut flow = fresh(3);
        flow.start();
        finish_with_score(&mut flow, 29);

        flow.dispatch(Action::Redeem, None);
        assert_eq!(
            flow.screen(),
            Some(&Screen::DetailsForm {
                pending: PendingAction::Redeem,
                error: None
            })
        );

        flow.dispatch(Action::SubmitDetails, Some(details()));
        assert!(flow.profile().has_details());
        assert_eq!(flow.profile().store().get(DETAILS_FLAG_KEY), Some("1"));

        let code = flow.last_result().unwrap().code.clone();
        assert_eq!(
            flow.screen(),
            Some(&Screen::RedeemConfirmation {
                code: code.clone(),
                discount: 15
            })
        );
        let names = flow.host().event_names();
        assert_eq!(&names[names.len() - 2..], &["details_submitted", "redeem"]);
    }

    #[test]
    fn test_empty_details_rejected_without_state_change() {
        let mut flow = fresh(3);
        flow.start();
        finish_with_score(&mut flow, 3);
        flow.play_again();
        let sent_before = flow.host().sent.len();

        flow.submit_details(UserDetails::new("Ada", " ", "555"));
        assert_eq!(
            flow.screen(),
            Some(&Screen::DetailsForm {
                pending: PendingAction::PlayAgain,
                error: Some(GameError::InvalidDetails(crate::persistence::DetailsField::Email).to_string()),
            })
        );
        assert!(!flow.profile().has_details());
        assert_eq!(flow.profile().play_count(), 1);
        assert_eq!(flow.host().sent.len(), sent_before);

        // Resubmission resumes the parked play-again
        flow.submit_details(details());
        assert!(flow.is_running());
        assert_eq!(flow.profile().play_count(), 2);
        let names = flow.host().event_names();
        assert_eq!(
            &names[names.len() - 3..],
            &["details_submitted", "play_again", "started"]
        );
    }

    #[test]
    fn test_details_form_skipped_once_captured() {
        let store = MemoryStore::new().with(DETAILS_FLAG_KEY, "1");
        let mut flow = flow_with(store, 3);
        flow.start();
        finish_with_score(&mut flow, 0);

        flow.play_again();
        assert!(flow.is_running());
        finish_with_score(&mut flow, 31);
        flow.redeem();
        assert!(matches!(
            flow.screen(),
            Some(Screen::RedeemConfirmation { discount: 20, .. })
        ));
    }

    #[test]
    fn test_play_count_gates_fourth_session() {
        let mut flow = flow_with(MemoryStore::new().with(DETAILS_FLAG_KEY, "1"), 3);
        assert!(flow.start());
        finish_with_score(&mut flow, 1);
        for expected_count in 2..=3 {
            flow.play_again();
            assert_eq!(flow.profile().play_count(), expected_count);
            finish_with_score(&mut flow, expected_count);
        }

        match flow.screen() {
            Some(Screen::GameOver(view)) => assert!(!view.can_play_again()),
            other => panic!("expected game over, got {other:?}"),
        }

        flow.play_again();
        assert_eq!(flow.screen(), Some(&Screen::NoPlaysLeft));
        assert!(!flow.start());
        assert_eq!(flow.profile().play_count(), 3);
        assert!(!flow.is_running());
        assert_eq!(flow.profile().scoreboard().scores(), &[3, 2, 1]);
    }

    #[test]
    fn test_config_patch_regates_start_screen() {
        let mut flow = flow_with(MemoryStore::new().with(PLAY_COUNT_KEY, "3"), 3);
        assert_eq!(flow.screen(), Some(&Screen::NoPlaysLeft));

        flow.apply_config(&json!({ "type": "ignored", "maxSpins": 5 }));
        assert_eq!(flow.screen(), Some(&Screen::Start { plays_left: 2 }));

        let version = flow.screen_version();
        flow.apply_config(&json!({ "maxSpins": 5 }));
        assert_eq!(flow.screen_version(), version);
    }

    #[test]
    fn test_config_patch_regates_game_over() {
        let mut flow = flow_with(MemoryStore::new().with(DETAILS_FLAG_KEY, "1"), 1);
        flow.start();
        finish_with_score(&mut flow, 3);
        let Some(Screen::GameOver(view)) = flow.screen() else {
            panic!("expected game over, got {:?}", flow.screen());
        };
        assert!(!view.can_play_again());

        flow.apply_config(&json!({ "maxSpins": 2 }));
        let Some(Screen::GameOver(view)) = flow.screen() else {
            panic!("expected game over, got {:?}", flow.screen());
        };
        assert!(view.can_play_again());
        assert_eq!(view.plays_left, 1);

        flow.play_again();
        assert!(flow.is_running());
        assert_eq!(flow.profile().play_count(), 2);
    }

    #[test]
    fn test_resize_mid_session_keeps_player_in_bounds() {
        let mut flow = fresh(3);
        flow.start();
        flow.session.player.pos.y = 280.0;
        let size = flow.session().player.size;

        flow.resize(Vec2::new(200.0, 100.0));
        let player = flow.session().player;
        assert!(flow.is_running());
        assert_eq!(player.size, size);
        assert!(player.pos.y + player.size.y <= 100.0);
    }

    #[test]
    fn test_height_reported_on_change_only() {
        let mut flow = fresh(3);
        flow.report_height(480, true);
        flow.report_height(480, true);
        flow.report_height(620, true);
        flow.report_height(620, false);
        assert_eq!(flow.host().heights(), vec![480, 620, 620]);
    }

    struct DownChannel;

    impl HostChannel for DownChannel {
        fn post(&mut self, _message: &HostMessage, _target_origin: &str) -> Result<()> {
            Err(GameError::Host("no parent".into()))
        }
    }

    #[test]
    fn test_host_failures_never_block_play() {
        let mut flow =
            FlowController::new(Config::default(), MemoryStore::new(), DownChannel, CANVAS, 1);
        assert!(flow.start());
        flow.report_height(300, false);
        assert!(flow.frame(0.0));
        assert!(flow.frame(16.0));
    }
}
