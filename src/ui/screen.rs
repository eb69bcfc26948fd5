//! Overlay view-model

use crate::consts::SCOREBOARD_SIZE;
use crate::scoreboard::Scoreboard;
use crate::sim::reward_for;

/// User-triggered overlay actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Redeem,
    PlayAgain,
    SubmitDetails,
}

impl Action {
    pub fn element_id(&self) -> &'static str {
        match self {
            Action::Start => "we-start",
            Action::Redeem => "we-redeem",
            Action::PlayAgain => "we-play-again",
            Action::SubmitDetails => "we-submit-details",
        }
    }
}

/// Action parked behind the details form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Redeem,
    PlayAgain,
}

/// One scoreboard line; blank ranks have no score or prize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRow {
    pub rank: usize,
    pub score: Option<u32>,
    pub discount: Option<u8>,
}

impl ScoreRow {
    /// Always exactly `SCOREBOARD_SIZE` rows
    pub fn rows(board: &Scoreboard) -> Vec<ScoreRow> {
        (1..=SCOREBOARD_SIZE)
            .map(|rank| {
                let score = board.at_rank(rank);
                ScoreRow {
                    rank,
                    score,
                    discount: score.map(|s| reward_for(s).discount),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverView {
    pub score: u32,
    pub discount: u8,
    pub code: String,
    pub rows: Vec<ScoreRow>,
    pub plays_left: u32,
}

impl GameOverView {
    pub fn can_play_again(&self) -> bool {
        self.plays_left > 0
    }
}

/// What the overlay shows; `None` at the controller level means gameplay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Start {
        plays_left: u32,
    },
    NoPlaysLeft,
    GameOver(GameOverView),
    DetailsForm {
        pending: PendingAction,
        /// Inline prompt after a rejected submission
        error: Option<String>,
    },
    RedeemConfirmation {
        code: String,
        discount: u8,
    },
}

impl Screen {
    /// Actions with a live handler on this screen
    pub fn actions(&self) -> Vec<Action> {
        match self {
            Screen::Start { .. } => vec![Action::Start],
            Screen::NoPlaysLeft | Screen::RedeemConfirmation { .. } => Vec::new(),
            Screen::GameOver(view) => {
                if view.can_play_again() {
                    vec![Action::Redeem, Action::PlayAgain]
                } else {
                    vec![Action::Redeem]
                }
            }
            Screen::DetailsForm { .. } => vec![Action::SubmitDetails],
        }
    }
}
