//! Tests for decoding relay frames and mapping them to actions.

use strictly_relay::{
    Action, Cell, ConnectionEvent, GAME_MOVE, GAME_STATE, Inbound, Mark, Session, SessionError,
    SessionStatus, Winner, action_for, decode, reduce,
};

fn in_progress() -> Session {
    let frame = r#"{
        "type": "GAME_STATE",
        "status": "IN_PROGRESS",
        "gameId": "g1",
        "playerSymbol": "X",
        "board": ["X", null, null, null, null, null, null, null, null],
        "currentTurn": "O"
    }"#;
    let action = action_for(ConnectionEvent::Message(frame.to_string())).unwrap();
    reduce(&Session::new(), &action)
}

#[test]
fn test_decode_game_state() {
    let frame = r#"{
        "type": "GAME_STATE",
        "status": "COMPLETED",
        "gameId": "g9",
        "playerSymbol": "O",
        "board": ["X", "X", "X", "O", "O", null, null, null, null],
        "currentTurn": "O",
        "winner": "X"
    }"#;

    let Some(Inbound::GameState(state)) = decode(frame).unwrap() else {
        panic!("expected {}", GAME_STATE);
    };
    assert_eq!(state.status, SessionStatus::Completed);
    assert_eq!(state.game_id.as_deref(), Some("g9"));
    assert_eq!(state.player_symbol, Some(Mark::O));
    assert_eq!(state.winner, Some(Winner::X));
    assert_eq!(state.board.get(3), Some(Cell::Marked(Mark::O)));
    assert_eq!(state.board.get(8), Some(Cell::Empty));
}

#[test]
fn test_decode_draw_and_nested_board() {
    let frame = r#"{
        "type": "GAME_STATE",
        "status": "COMPLETED",
        "board": [["X", "O", "X"], ["X", "O", "O"], ["O", "X", "X"]],
        "winner": "DRAW"
    }"#;

    let Some(Inbound::GameState(state)) = decode(frame).unwrap() else {
        panic!("expected {}", GAME_STATE);
    };
    assert_eq!(state.winner, Some(Winner::Draw));
    assert_eq!(state.game_id, None);
    assert_eq!(state.board.get(5), Some(Cell::Marked(Mark::O)));
}

#[test]
fn test_decode_game_move() {
    let frame = r#"{
        "type": "GAME_MOVE",
        "board": ["X", null, null, null, "O", null, null, null, null],
        "currentTurn": "X"
    }"#;

    let Some(Inbound::GameMove(update)) = decode(frame).unwrap() else {
        panic!("expected {}", GAME_MOVE);
    };
    assert_eq!(update.current_turn, Mark::X);
    assert_eq!(update.error, None);
}

#[test]
fn test_unknown_type_changes_nothing() {
    assert!(decode(r#"{"type": "CHAT", "text": "hi"}"#).unwrap().is_none());

    let before = in_progress();
    let action = action_for(ConnectionEvent::Message(
        r#"{"type": "PLAYER_JOINED", "name": "bob"}"#.to_string(),
    ));
    assert_eq!(action, None);
    assert_eq!(
        action_for(ConnectionEvent::Message(r#"{"type": 7}"#.to_string())),
        None
    );
    let after = action.map_or(before.clone(), |action| reduce(&before, &action));
    assert_eq!(after, before);
}

#[test]
fn test_unparsable_frame_only_sets_error() {
    let before = in_progress();

    for frame in ["{not json", r#"{"type": "GAME_MOVE", "board": 7}"#, r#"{"status": 1}"#] {
        let action = action_for(ConnectionEvent::Message(frame.to_string())).unwrap();
        assert!(matches!(
            action,
            Action::SignalError(SessionError::DecodeFailed(_))
        ));

        let after = reduce(&before, &action);
        assert!(matches!(after.error(), Some(SessionError::DecodeFailed(_))));
        assert_eq!(after.board(), before.board());
        assert_eq!(after.status(), before.status());
        assert_eq!(after.game_id(), before.game_id());
        assert_eq!(after.player_symbol(), before.player_symbol());
        assert_eq!(after.current_turn(), before.current_turn());
        assert_eq!(after.winner(), before.winner());
    }
}

#[test]
fn test_relay_connection_lost_maps_to_error() {
    let before = in_progress();
    let frame = r#"{
        "type": "GAME_MOVE",
        "board": ["X", null, null, null, null, null, null, null, null],
        "currentTurn": "O",
        "error": "CONNECTION_LOST"
    }"#;

    let action = action_for(ConnectionEvent::Message(frame.to_string())).unwrap();
    let after = reduce(&before, &action);
    assert_eq!(*after.error(), Some(SessionError::ConnectionLost));
}

#[test]
fn test_relay_error_text_is_kept() {
    let frame = r#"{
        "type": "GAME_MOVE",
        "board": [null, null, null, null, null, null, null, null, null],
        "currentTurn": "X",
        "error": "Cell already taken"
    }"#;

    let Some(Inbound::GameMove(update)) = decode(frame).unwrap() else {
        panic!("expected {}", GAME_MOVE);
    };
    let action = Inbound::GameMove(update).into_action();
    let session = reduce(&Session::new(), &action);
    assert_eq!(
        *session.error(),
        Some(SessionError::Peer("Cell already taken".to_string()))
    );
}

#[test]
fn test_transport_events_map_to_actions() {
    assert_eq!(
        action_for(ConnectionEvent::Open),
        Some(Action::SetStatus(SessionStatus::Connected))
    );
    assert_eq!(
        action_for(ConnectionEvent::Closed { reason: None }),
        Some(Action::SignalError(SessionError::ConnectionLost))
    );
}
