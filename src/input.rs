//! Input mapping: raw controller/keyboard state to a single cardinal intent.
//!
//! Frontends fill a [`Controls`] snapshot once per frame; the mapper only
//! reports intent — the session's state machine decides whether and when a
//! direction actually applies.

use crate::session::Session;
use crate::Direction;

/// Analog deflection below this is ignored.
pub const STICK_DEADZONE: f32 = 0.55;

/// Per-frame input snapshot. Directional booleans cover d-pad or keys;
/// stick axes are in [-1, 1] with +y pointing up. `pause` and `confirm`
/// are edge-triggered (true only on the frame the button went down).
#[derive(Copy, Clone, Debug, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub stick_x: f32,
    pub stick_y: f32,
    pub pause: bool,
    pub confirm: bool,
}

/// Combine d-pad and stick into cardinal votes; a direction is reported
/// only when exactly one vote is active. Diagonals, conflicting input and
/// silence all yield `None`.
pub fn read_intent(controls: &Controls) -> Option<Direction> {
    let l = controls.left || controls.stick_x <= -STICK_DEADZONE;
    let r = controls.right || controls.stick_x >= STICK_DEADZONE;
    let u = controls.up || controls.stick_y >= STICK_DEADZONE;
    let d = controls.down || controls.stick_y <= -STICK_DEADZONE;

    match (l, r, u, d) {
        (true, false, false, false) => Some(Direction::Left),
        (false, true, false, false) => Some(Direction::Right),
        (false, false, true, false) => Some(Direction::Up),
        (false, false, false, true) => Some(Direction::Down),
        _ => None,
    }
}

/// Feed one frame of input into the session: pause and confirm edges
/// first, then the direction intent (if any).
pub fn apply(controls: &Controls, session: &mut Session) {
    if controls.pause {
        session.toggle_pause();
    }
    if controls.confirm {
        session.confirm();
    }
    if let Some(dir) = read_intent(controls) {
        session.propose_direction(dir);
    }
}

// ---------- tests ----------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameState;
    use crate::Playfield;

    #[test]
    fn single_dpad_vote_wins() {
        let controls = Controls { left: true, ..Default::default() };
        assert_eq!(read_intent(&controls), Some(Direction::Left));
    }

    #[test]
    fn silence_and_diagonals_yield_nothing() {
        assert_eq!(read_intent(&Controls::default()), None);

        let diagonal = Controls { up: true, right: true, ..Default::default() };
        assert_eq!(read_intent(&diagonal), None);

        let conflict = Controls { left: true, right: true, ..Default::default() };
        assert_eq!(read_intent(&conflict), None);
    }

    #[test]
    fn stick_votes_respect_the_deadzone() {
        let weak = Controls { stick_x: 0.4, ..Default::default() };
        assert_eq!(read_intent(&weak), None);

        let firm = Controls { stick_x: 0.8, ..Default::default() };
        assert_eq!(read_intent(&firm), Some(Direction::Right));

        let up = Controls { stick_y: 0.9, ..Default::default() };
        assert_eq!(read_intent(&up), Some(Direction::Up));

        let down = Controls { stick_y: -0.9, ..Default::default() };
        assert_eq!(read_intent(&down), Some(Direction::Down));
    }

    #[test]
    fn stick_and_dpad_votes_merge() {
        // Stick right plus d-pad up is ambiguous, not a turn.
        let mixed = Controls { up: true, stick_x: 0.9, ..Default::default() };
        assert_eq!(read_intent(&mixed), None);
    }

    #[test]
    fn apply_drives_the_state_machine() {
        let mut session = Session::new(Playfield::open(40, 26), 1, Some(3));

        apply(&Controls { up: true, ..Default::default() }, &mut session);
        assert_eq!(session.state(), GameState::Running);
        assert_eq!(session.direction(), Direction::Up);

        apply(&Controls { pause: true, ..Default::default() }, &mut session);
        assert_eq!(session.state(), GameState::Paused);
    }
}
