//! The GameService: unified API for chessdb.
//!
//! The service turns what the rules engine knows about a game into stored
//! rows, and stored rows back into response DTOs.

use std::collections::BTreeMap;

use chessdb_core::{
    BoardDto, BoardSnapshot, Color, GameId, GameListResponse, GameSession, NewGameResponse,
    RunningGameResponse,
};
use chessdb_store::{GameStore, StoreError};
use tracing::{debug, info};

use crate::error::Result;

/// What the rules engine exposes about a game in progress.
pub trait GameState {
    /// Every occupied square.
    fn board(&self) -> BoardSnapshot;

    /// Whose move is next.
    fn current_turn(&self) -> Color;

    /// Material score per side.
    fn colors_score(&self) -> BTreeMap<Color, f64>;

    /// Whether the game has ended (e.g. a king was captured).
    fn is_game_over(&self) -> bool;
}

/// Configuration for the GameService.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Remove a saved game once a recorded move finishes it, instead of
    /// storing a position nobody can resume.
    pub delete_finished_games: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            delete_finished_games: true,
        }
    }
}

/// The main service struct.
///
/// Provides a unified API for:
/// - Starting and resuming games
/// - Recording moves
/// - Listing and ending saved games
pub struct GameService<S: GameStore> {
    /// The storage backend.
    store: S,
    /// Configuration.
    config: ServiceConfig,
}

impl<S: GameStore> GameService<S> {
    /// Create a new service over a store.
    pub fn new(store: S, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Game Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Save a freshly set up game.
    pub async fn start_game(&self, state: &impl GameState) -> Result<NewGameResponse> {
        let board = state.board();
        let turn = state.current_turn();

        let game_id = self.store.create(turn, &board).await?;
        info!(%game_id, %turn, "started game");

        Ok(NewGameResponse::new(
            game_id,
            &board,
            turn,
            state.colors_score(),
        ))
    }

    /// Load a saved game for the rules engine to rebuild itself from.
    pub async fn load_session(&self, game_id: GameId) -> Result<GameSession> {
        Ok(self.store.load(game_id).await?)
    }

    /// Load a saved game as a response.
    pub async fn resume_game(&self, game_id: GameId) -> Result<RunningGameResponse> {
        let session = self.load_session(game_id).await?;
        info!(%game_id, turn = %session.turn, "resumed game");
        Ok(RunningGameResponse::from(&session))
    }

    /// Persist the state after a move.
    ///
    /// Board and turn are written together. When the move ended the game
    /// and `delete_finished_games` is set, the saved game is removed instead.
    pub async fn record_move(
        &self,
        game_id: GameId,
        state: &impl GameState,
    ) -> Result<RunningGameResponse> {
        let board = state.board();
        let turn = state.current_turn();
        let is_game_over = state.is_game_over();

        if is_game_over && self.config.delete_finished_games {
            // Still fail for unknown ids, like the update path does.
            if !self.store.delete_game(game_id).await? {
                return Err(StoreError::NoSavedGame(game_id).into());
            }
            info!(%game_id, "game finished, saved game removed");
        } else {
            self.store.update_game(game_id, &board, turn).await?;
            debug!(%game_id, %turn, pieces = board.len(), "recorded move");
        }

        Ok(RunningGameResponse::new(&board, turn, is_game_over))
    }

    /// Store a board received from a client.
    ///
    /// The board is decoded before anything is written, so an invalid square
    /// or piece leaves the saved game untouched.
    pub async fn save_board(&self, game_id: GameId, board: &BoardDto, turn: Color) -> Result<()> {
        let board = BoardSnapshot::try_from(board)?;
        self.store.update_game(game_id, &board, turn).await?;
        debug!(%game_id, %turn, pieces = board.len(), "saved client board");
        Ok(())
    }

    /// Remove a saved game. Unknown ids are ignored.
    pub async fn end_game(&self, game_id: GameId) -> Result<()> {
        self.store.delete_game(game_id).await?;
        info!(%game_id, "ended game");
        Ok(())
    }

    /// Every saved game's identifier.
    pub async fn list_games(&self) -> Result<GameListResponse> {
        let game_ids = self.store.list_game_ids().await?;
        Ok(GameListResponse { game_ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChessDbError;
    use chessdb_core::{CoreError, Piece, PieceDto, PieceKind, Position};
    use chessdb_store::MemoryStore;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    struct StubEngine {
        board: BoardSnapshot,
        turn: Color,
        over: bool,
    }

    impl StubEngine {
        fn kings(turn: Color) -> Self {
            Self {
                board: BoardSnapshot::new()
                    .with(pos("e1"), Piece::white(PieceKind::King))
                    .with(pos("e8"), Piece::black(PieceKind::King)),
                turn,
                over: false,
            }
        }
    }

    impl GameState for StubEngine {
        fn board(&self) -> BoardSnapshot {
            self.board.clone()
        }

        fn current_turn(&self) -> Color {
            self.turn
        }

        fn colors_score(&self) -> BTreeMap<Color, f64> {
            BTreeMap::from([(Color::White, 0.0), (Color::Black, 0.0)])
        }

        fn is_game_over(&self) -> bool {
            self.over
        }
    }

    fn service() -> GameService<MemoryStore> {
        init_tracing();
        GameService::new(MemoryStore::new(), ServiceConfig::default())
    }

    #[tokio::test]
    async fn test_start_and_resume() {
        let service = service();
        let engine = StubEngine::kings(Color::White);

        let started = service.start_game(&engine).await.unwrap();
        assert_eq!(started.game_id, GameId(1));
        assert_eq!(started.chess_board.0.len(), 2);
        assert_eq!(started.colors_score.len(), 2);

        let resumed = service.resume_game(started.game_id).await.unwrap();
        assert_eq!(resumed.chess_board, started.chess_board);
        assert_eq!(resumed.current_turn_color, Color::White);
        assert!(!resumed.is_game_over);
    }

    #[tokio::test]
    async fn test_record_move_updates_board_and_turn() {
        let service = service();
        let mut engine = StubEngine::kings(Color::White);
        let id = service.start_game(&engine).await.unwrap().game_id;

        engine.board.remove(&pos("e1"));
        engine.board.place(pos("e2"), Piece::white(PieceKind::King));
        engine.turn = Color::Black;
        let response = service.record_move(id, &engine).await.unwrap();
        assert_eq!(response.current_turn_color, Color::Black);

        let session = service.load_session(id).await.unwrap();
        assert_eq!(session.turn, Color::Black);
        assert_eq!(session.board, engine.board);
    }

    #[tokio::test]
    async fn test_finished_game_is_removed() {
        let service = service();
        let mut engine = StubEngine::kings(Color::White);
        let id = service.start_game(&engine).await.unwrap().game_id;

        engine.board.remove(&pos("e8"));
        engine.over = true;
        let response = service.record_move(id, &engine).await.unwrap();
        assert!(response.is_game_over);

        let err = service.resume_game(id).await.unwrap_err();
        assert_eq!(err.no_saved_game(), Some(id));
        assert!(service.list_games().await.unwrap().game_ids.is_empty());
    }

    #[tokio::test]
    async fn test_finished_game_kept_when_configured() {
        init_tracing();
        let service = GameService::new(
            MemoryStore::new(),
            ServiceConfig {
                delete_finished_games: false,
            },
        );
        let mut engine = StubEngine::kings(Color::White);
        let id = service.start_game(&engine).await.unwrap().game_id;

        engine.over = true;
        service.record_move(id, &engine).await.unwrap();

        assert!(service.store().exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_record_move_on_unknown_game() {
        let service = service();
        let mut engine = StubEngine::kings(Color::Black);

        let err = service.record_move(GameId(5), &engine).await.unwrap_err();
        assert_eq!(err.no_saved_game(), Some(GameId(5)));

        engine.over = true;
        let err = service.record_move(GameId(5), &engine).await.unwrap_err();
        assert_eq!(err.no_saved_game(), Some(GameId(5)));
    }

    #[tokio::test]
    async fn test_save_board_rejects_bad_dto() {
        let service = service();
        let engine = StubEngine::kings(Color::White);
        let id = service.start_game(&engine).await.unwrap().game_id;

        let mut dto = BoardDto::from(&engine.board);
        dto.0.insert(
            "k9".to_string(),
            PieceDto {
                name: "QUEEN".to_string(),
                color: "WHITE".to_string(),
            },
        );

        let err = service.save_board(id, &dto, Color::Black).await.unwrap_err();
        assert!(matches!(
            err,
            ChessDbError::InvalidBoard(CoreError::InvalidPosition(_))
        ));

        // Untouched.
        let session = service.load_session(id).await.unwrap();
        assert_eq!(session.turn, Color::White);
        assert_eq!(session.board, engine.board);
    }

    #[tokio::test]
    async fn test_list_and_end_games() {
        let service = service();
        let engine = StubEngine::kings(Color::White);

        let a = service.start_game(&engine).await.unwrap().game_id;
        let b = service.start_game(&engine).await.unwrap().game_id;
        service.end_game(a).await.unwrap();
        service.end_game(a).await.unwrap();

        let listed = service.list_games().await.unwrap();
        assert_eq!(listed.game_ids, vec![b]);
    }
}
