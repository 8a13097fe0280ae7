//! The GameStore contract.
//!
//! Each check takes a fresh, empty store and panics with a descriptive
//! message when the backend misbehaves. [`run_all`] runs every check, each
//! against its own new store.

use chessdb_core::{BoardSnapshot, Color, GameId, Piece, PieceKind, Position};
use chessdb_store::{GameStore, GameStoreExt, StoreError};

use crate::fixtures::{kings_only, standard_board};

fn square(s: &str) -> Position {
    s.parse().expect("contract squares are valid")
}

fn assert_no_saved_game<T: std::fmt::Debug>(result: Result<T, StoreError>, id: GameId) {
    match result {
        Err(StoreError::NoSavedGame(missing)) => assert_eq!(missing, id),
        other => panic!("expected NoSavedGame({id}), got {other:?}"),
    }
}

/// Run every check, each against a store built by `make`.
pub async fn run_all<S, F>(make: F)
where
    S: GameStore,
    F: Fn() -> S,
{
    round_trip(&make()).await;
    empty_board_is_not_missing(&make()).await;
    unknown_id_fails(&make()).await;
    update_board_keeps_turn(&make()).await;
    update_turn_keeps_board(&make()).await;
    update_game_replaces_both(&make()).await;
    updates_require_a_game(&make()).await;
    delete_is_idempotent(&make()).await;
    list_after_delete(&make()).await;
    ids_are_not_reused(&make()).await;
    games_are_independent(&make()).await;
    example_scenario(&make()).await;
}

/// What goes in comes back out.
pub async fn round_trip<S: GameStore>(store: &S) {
    let board = standard_board();
    let id = store.create(Color::Black, &board).await.unwrap();

    let session = store.load(id).await.unwrap();
    assert_eq!(session.id, id);
    assert_eq!(session.turn, Color::Black);
    assert_eq!(session.board, board);
}

/// A game saved with no pieces is still a saved game.
pub async fn empty_board_is_not_missing<S: GameStore>(store: &S) {
    let id = store.create(Color::White, &BoardSnapshot::new()).await.unwrap();

    let session = store.load(id).await.unwrap();
    assert!(session.board.is_empty());
    assert!(store.exists(id).await.unwrap());

    store.update_board(id, &BoardSnapshot::new()).await.unwrap();
    assert!(store.load(id).await.unwrap().board.is_empty());
}

pub async fn unknown_id_fails<S: GameStore>(store: &S) {
    let id = GameId(999);

    assert_no_saved_game(store.load(id).await, id);
    assert!(!store.exists(id).await.unwrap());
    assert_eq!(store.try_load(id).await.unwrap(), None);
}

pub async fn update_board_keeps_turn<S: GameStore>(store: &S) {
    let id = store.create(Color::Black, &standard_board()).await.unwrap();

    store.update_board(id, &kings_only()).await.unwrap();

    let session = store.load(id).await.unwrap();
    assert_eq!(session.board, kings_only());
    assert_eq!(session.turn, Color::Black);
}

pub async fn update_turn_keeps_board<S: GameStore>(store: &S) {
    let id = store.create(Color::White, &kings_only()).await.unwrap();

    store.update_turn(id, Color::Black).await.unwrap();
    // Writing the same value again is still a success.
    store.update_turn(id, Color::Black).await.unwrap();

    let session = store.load(id).await.unwrap();
    assert_eq!(session.turn, Color::Black);
    assert_eq!(session.board, kings_only());
}

pub async fn update_game_replaces_both<S: GameStore>(store: &S) {
    let id = store.create(Color::White, &standard_board()).await.unwrap();

    let mut board = standard_board();
    board.remove(&square("e2"));
    board.place(square("e4"), Piece::white(PieceKind::Pawn));
    store.update_game(id, &board, Color::Black).await.unwrap();

    let session = store.load(id).await.unwrap();
    assert_eq!(session.board, board);
    assert_eq!(session.turn, Color::Black);
}

/// Updates never create games or leave pieces behind for unknown ids.
pub async fn updates_require_a_game<S: GameStore>(store: &S) {
    let id = GameId(41);

    assert_no_saved_game(store.update_board(id, &kings_only()).await, id);
    assert_no_saved_game(store.update_turn(id, Color::Black).await, id);
    assert_no_saved_game(store.update_game(id, &kings_only(), Color::White).await, id);

    assert!(!store.exists(id).await.unwrap());
    assert!(store.list_game_ids().await.unwrap().is_empty());
}

/// Deleting twice, or deleting what never existed, succeeds.
pub async fn delete_is_idempotent<S: GameStore>(store: &S) {
    let id = store.create(Color::White, &kings_only()).await.unwrap();

    assert!(store.delete_game(id).await.unwrap());
    assert!(!store.delete_game(id).await.unwrap());
    assert!(!store.delete_game(GameId(12345)).await.unwrap());

    assert_no_saved_game(store.load(id).await, id);
}

pub async fn list_after_delete<S: GameStore>(store: &S) {
    let first = store.create(Color::White, &kings_only()).await.unwrap();
    let second = store.create(Color::White, &kings_only()).await.unwrap();
    let third = store.create(Color::White, &kings_only()).await.unwrap();

    store.delete_game(second).await.unwrap();

    let mut ids = store.list_game_ids().await.unwrap();
    ids.sort();
    assert_eq!(ids, vec![first, third]);
}

pub async fn ids_are_not_reused<S: GameStore>(store: &S) {
    let first = store.create(Color::White, &kings_only()).await.unwrap();
    let second = store.create(Color::White, &kings_only()).await.unwrap();
    store.delete_game(second).await.unwrap();

    let third = store.create(Color::White, &kings_only()).await.unwrap();
    assert_ne!(third, first);
    assert_ne!(third, second);
}

/// Writes to one game never show up in another.
pub async fn games_are_independent<S: GameStore>(store: &S) {
    let a = store.create(Color::White, &standard_board()).await.unwrap();
    let b = store.create(Color::Black, &kings_only()).await.unwrap();

    store
        .update_game(a, &BoardSnapshot::new(), Color::Black)
        .await
        .unwrap();
    store.delete_game(a).await.unwrap();

    let session = store.load(b).await.unwrap();
    assert_eq!(session.turn, Color::Black);
    assert_eq!(session.board, kings_only());
}

/// The create / update / delete walk-through on a fresh store.
pub async fn example_scenario<S: GameStore>(store: &S) {
    let board = kings_only();
    let id = store.create(Color::White, &board).await.unwrap();
    assert_eq!(id, GameId(1), "a fresh store starts numbering at 1");

    let session = store.load(id).await.unwrap();
    assert_eq!(session.board.len(), 2);
    assert_eq!(session.turn, Color::White);

    let with_queen = board.with(square("d1"), Piece::white(PieceKind::Queen));
    store.update_board(id, &with_queen).await.unwrap();

    let session = store.load(id).await.unwrap();
    assert_eq!(session.board.len(), 3);
    assert_eq!(
        session.board.get(&square("d1")),
        Some(&Piece::white(PieceKind::Queen))
    );
    assert_eq!(session.turn, Color::White);

    store.delete_game(id).await.unwrap();
    assert_no_saved_game(store.load(id).await, id);
}

