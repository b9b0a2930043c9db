//! The session reducer: the only writer of [`Session`].
//!
//! `reduce` is pure and total. It never logs, never panics and never reads
//! anything but its arguments, so replaying an ordered action log from
//! [`Session::new`] always lands on the same session.

use super::action::{Action, GameSnapshot, MoveUpdate};
use super::state::{Session, SessionError, SessionStatus};

/// Computes the session that follows `session` after `action`.
pub fn reduce(session: &Session, action: &Action) -> Session {
    let mut next = session.clone();

    match action {
        Action::SetStatus(status) => {
            next.set_status(advance(*session.status(), *status));
        }
        Action::SetPlayerId(player_id) => {
            next.set_player_id(player_id.clone());
        }
        Action::UpdateGameState(snapshot) => apply_snapshot(&mut next, session, snapshot),
        Action::GameMove(update) => apply_move(&mut next, session, update),
        Action::SignalError(error) => {
            next.set_error(merge_error(session.error(), Some(error.clone())));
        }
        Action::Reset => return Session::new(),
    }

    next
}

/// Folds an ordered action log over the initial session.
pub fn replay<'a>(actions: impl IntoIterator<Item = &'a Action>) -> Session {
    actions
        .into_iter()
        .fold(Session::new(), |session, action| reduce(&session, action))
}

fn apply_snapshot(next: &mut Session, prior: &Session, snapshot: &GameSnapshot) {
    let status = advance(*prior.status(), snapshot.status);
    next.set_status(status);
    next.set_game_id(snapshot.game_id.clone());
    // Assigned once per session.
    next.set_player_symbol(prior.player_symbol().or(snapshot.player_symbol));
    next.set_board(snapshot.board);
    next.set_current_turn(snapshot.current_turn);
    next.set_winner(if status == SessionStatus::Completed {
        snapshot.winner.or(*prior.winner())
    } else {
        None
    });
    next.set_error(merge_error(prior.error(), snapshot.error.clone()));
}

fn apply_move(next: &mut Session, prior: &Session, update: &MoveUpdate) {
    next.set_board(update.board);
    next.set_current_turn(Some(update.current_turn));
    next.set_error(merge_error(prior.error(), update.error.clone()));
}

/// Status only moves forward; regressions keep the current status.
fn advance(current: SessionStatus, proposed: SessionStatus) -> SessionStatus {
    current.max(proposed)
}

/// A lost connection stays flagged until reset.
fn merge_error(
    current: &Option<SessionError>,
    incoming: Option<SessionError>,
) -> Option<SessionError> {
    match current {
        Some(SessionError::ConnectionLost) => Some(SessionError::ConnectionLost),
        _ => incoming,
    }
}
