//! HUD strings for the graphical variant.
//!
//! Everything here must stay within the bitmap font's glyph set
//! (digits, A–Z, space, colon, plus, minus, slash).

use crate::session::GameState;

pub fn score_line(score: u32, high_score: u32) -> String {
    format!("SCORE:{score}  HIGH:{high_score}")
}

/// One-line key hint shown under the playfield, depending on state.
pub fn footer(state: GameState) -> &'static str {
    match state {
        GameState::WaitStart => "MOVE: ARROWS/WASD OR D-PAD TO START",
        GameState::WaitResume => "MOVE: ARROWS/WASD OR D-PAD TO RESUME",
        GameState::Running => "MOVE: ARROWS/WASD - PAUSE: SPACE - QUIT: ESC",
        GameState::Paused => "CONTINUE: SPACE - QUIT: ESC",
        GameState::GameOver => "RESTART: ENTER - QUIT: ESC",
    }
}

/// Large centered overlay caption, when the state warrants one.
pub fn caption(state: GameState) -> Option<&'static str> {
    match state {
        GameState::WaitStart => Some("PRESS A DIRECTION TO START"),
        GameState::WaitResume => Some("PRESS A DIRECTION TO RESUME"),
        GameState::Paused => Some("PAUSED"),
        GameState::GameOver => Some("GAME OVER"),
        GameState::Running => None,
    }
}

/// Smaller line under the caption.
pub fn sub_caption(state: GameState) -> Option<&'static str> {
    match state {
        GameState::Paused => Some("PRESS SPACE TO CONTINUE"),
        GameState::GameOver => Some("PRESS ENTER TO RESTART"),
        _ => None,
    }
}

// ---------- tests ----------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::font;

    #[test]
    fn score_line_formats_both_counters() {
        assert_eq!(score_line(4, 12), "SCORE:4  HIGH:12");
    }

    #[test]
    fn running_has_no_overlay() {
        assert_eq!(caption(GameState::Running), None);
        assert_eq!(sub_caption(GameState::Running), None);
    }

    #[test]
    fn all_hud_text_is_renderable_by_the_bitmap_font() {
        let states = [
            GameState::WaitStart,
            GameState::Running,
            GameState::Paused,
            GameState::GameOver,
            GameState::WaitResume,
        ];
        let mut lines = vec![score_line(1234567890, 42)];
        for state in states {
            lines.push(footer(state).to_string());
            lines.extend(caption(state).map(str::to_string));
            lines.extend(sub_caption(state).map(str::to_string));
        }
        for line in lines {
            for ch in line.chars() {
                assert!(font::has_glyph(ch), "no glyph for {ch:?}");
            }
        }
    }
}
