//! HTML markup for overlay screens

use std::fmt::Write;

use super::screen::{Action, GameOverView, PendingAction, Screen};
use crate::config::Theme;
use crate::persistence::DetailsField;

/// Shown in scoreboard cells for unfilled ranks
pub const BLANK_CELL: &str = "—";

pub fn render_markup(screen: &Screen, theme: Theme) -> String {
    let body = match screen {
        Screen::Start { plays_left } => format!(
            "<h2>Dodge &amp; Win</h2>\
             <p>Tap, click or press space to fly. Dodge the blocks to earn a bigger discount.</p>\
             <p class=\"we-plays\">Plays left: {plays_left}</p>\
             {}",
            button(Action::Start, "Start", false)
        ),
        Screen::NoPlaysLeft => "<h2>No plays left</h2>\
             <p>You've used all your plays. Thanks for playing!</p>"
            .to_string(),
        Screen::GameOver(view) => game_over(view),
        Screen::DetailsForm { pending, error } => details_form(*pending, error.as_deref()),
        Screen::RedeemConfirmation { code, discount } => format!(
            "<h2>Enjoy {discount}% off</h2>\
             <p>Your code</p><p class=\"we-code\">{}</p>\
             <p>Use it at checkout.</p>",
            escape(code)
        ),
    };

    format!(
        "<div class=\"we-overlay {}\">{body}</div>",
        theme.css_class()
    )
}

fn game_over(view: &GameOverView) -> String {
    let mut rows = String::new();
    for row in &view.rows {
        let score = row
            .score
            .map_or_else(|| BLANK_CELL.to_string(), |s| s.to_string());
        let prize = row
            .discount
            .map_or_else(|| BLANK_CELL.to_string(), |d| format!("{d}%"));
        let _ = write!(
            rows,
            "<tr><td>#{}</td><td>{score}</td><td>{prize}</td></tr>",
            row.rank
        );
    }

    format!(
        "<h2>Game over</h2>\
         <p class=\"we-score\">Score: {}</p>\
         <p class=\"we-reward\">You won {}% off</p>\
         <p class=\"we-code\">{}</p>\
         <table class=\"we-scoreboard\">\
         <thead><tr><th>Rank</th><th>Score</th><th>Prize</th></tr></thead>\
         <tbody>{rows}</tbody></table>\
         <p class=\"we-plays\">Plays left: {}</p>\
         {}{}",
        view.score,
        view.discount,
        escape(&view.code),
        view.plays_left,
        button(Action::Redeem, "Redeem", false),
        button(Action::PlayAgain, "Play again", !view.can_play_again()),
    )
}

fn details_form(pending: PendingAction, error: Option<&str>) -> String {
    let intro = match pending {
        PendingAction::Redeem => "Tell us where to send your discount.",
        PendingAction::PlayAgain => "Enter your details to keep playing.",
    };

    let mut fields = String::new();
    for field in DetailsField::ALL {
        let kind = match field {
            DetailsField::Name => "text",
            DetailsField::Email => "email",
            DetailsField::Phone => "tel",
        };
        let _ = write!(
            fields,
            "<label for=\"{id}\">{label}</label><input id=\"{id}\" type=\"{kind}\" required>",
            id = field.input_id(),
            label = field.label(),
        );
    }

    let prompt = error
        .map(|e| format!("<p class=\"we-error\" role=\"alert\">{}</p>", escape(e)))
        .unwrap_or_default();

    format!(
        "<h2>Your details</h2><p>{intro}</p>{fields}{prompt}{}",
        button(Action::SubmitDetails, "Continue", false)
    )
}

fn button(action: Action, label: &str, disabled: bool) -> String {
    format!(
        "<button id=\"{}\" type=\"button\"{}>{label}</button>",
        action.element_id(),
        if disabled { " disabled" } else { "" }
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoreboard::Scoreboard;
    use crate::ui::ScoreRow;

    fn view(plays_left: u32) -> GameOverView {
        GameOverView {
            score: 12,
            discount: 10,
            code: "Q7X2LM".into(),
            rows: ScoreRow::rows(&Scoreboard::from_scores(vec![12, 4])),
            plays_left,
        }
    }

    #[test]
    fn test_game_over_lists_board_with_placeholder() {
        let html = render_markup(&Screen::GameOver(view(1)), Theme::Classic);
        assert!(html.contains("Q7X2LM"));
        assert!(html.contains("<td>#1</td><td>12</td><td>10%</td>"));
        assert!(html.contains("<td>#2</td><td>4</td><td>5%</td>"));
        assert!(html.contains(&format!("<td>#3</td><td>{BLANK_CELL}</td><td>{BLANK_CELL}</td>")));
        assert!(html.contains("id=\"we-play-again\" type=\"button\">"));
    }

    #[test]
    fn test_play_again_disabled_without_plays() {
        let html = render_markup(&Screen::GameOver(view(0)), Theme::Classic);
        assert!(html.contains("id=\"we-play-again\" type=\"button\" disabled>"));
    }

    #[test]
    fn test_details_form_has_inputs_and_escaped_prompt() {
        let screen = Screen::DetailsForm {
            pending: PendingAction::Redeem,
            error: Some("<Name> is required".into()),
        };
        let html = render_markup(&screen, Theme::Neon);
        for field in DetailsField::ALL {
            assert!(html.contains(&format!("id=\"{}\"", field.input_id())));
        }
        assert!(html.contains("&lt;Name&gt; is required"));
        assert!(html.contains("we-submit-details"));
        assert!(html.contains("theme-neon"));
    }
}
