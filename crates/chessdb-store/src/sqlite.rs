//! SQLite implementation of the GameStore trait.
//!
//! This is the primary storage backend. It uses rusqlite with bundled
//! SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use chessdb_core::{BoardSnapshot, Color, GameId, GameSession, Piece, Position};

use crate::config::SqliteConfig;
use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::GameStore;

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path with default settings.
    ///
    /// Creates the file (and missing parent directories) and runs
    /// migrations if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, &SqliteConfig::default())
    }

    /// Open a SQLite database at the given path.
    pub fn open_with_config(path: impl AsRef<Path>, config: &SqliteConfig) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open(path)?;
        conn.busy_timeout(config.busy_timeout)?;
        let mode: String = conn.pragma_update_and_check(
            None,
            "journal_mode",
            config.journal_mode.pragma_value(),
            |row| row.get(0),
        )?;
        migration::migrate(&mut conn)?;

        debug!(path = %path.display(), journal_mode = %mode, "opened SQLite game store");
        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        conn.busy_timeout(SqliteConfig::default().busy_timeout)?;
        migration::migrate(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run a closure against the connection on the blocking pool.
    async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| StoreError::Poisoned("SQLite connection"))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Blocking(format!("spawn_blocking failed: {}", e)))?
    }
}

fn game_exists(conn: &Connection, id: GameId) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM game WHERE game_id = ?1)",
        params![id.get()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn read_turn(conn: &Connection, id: GameId) -> Result<Option<Color>> {
    let turn: Option<String> = conn
        .query_row(
            "SELECT turn FROM game WHERE game_id = ?1",
            params![id.get()],
            |row| row.get(0),
        )
        .optional()?;

    turn.map(|turn| {
        turn.parse::<Color>().map_err(|e| {
            warn!(game_id = %id, turn = %turn, "stored turn does not decode");
            StoreError::malformed(id, e)
        })
    })
    .transpose()
}

fn read_board(conn: &Connection, id: GameId) -> Result<BoardSnapshot> {
    let mut stmt =
        conn.prepare_cached("SELECT name, color, position FROM piece WHERE game_id = ?1")?;

    let rows = stmt
        .query_map(params![id.get()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    // A bad row fails the whole load: dropping a square would hand the
    // caller a different game than the one that was saved.
    let mut board = BoardSnapshot::new();
    for (name, color, position) in rows {
        let piece = Piece::parse(&name, &color).map_err(|e| {
            warn!(game_id = %id, %name, %color, %position, "stored piece does not decode");
            StoreError::malformed(id, e)
        })?;
        let square: Position = position.parse().map_err(|e| {
            warn!(game_id = %id, %position, "stored position does not decode");
            StoreError::malformed(id, e)
        })?;
        if board.place(square, piece).is_some() {
            return Err(StoreError::malformed(
                id,
                format!("square {} is occupied twice", square),
            ));
        }
    }

    Ok(board)
}

fn insert_pieces(conn: &Connection, id: GameId, board: &BoardSnapshot) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO piece (game_id, name, color, position) VALUES (?1, ?2, ?3, ?4)",
    )?;

    for (position, piece) in board {
        stmt.execute(params![
            id.get(),
            piece.kind.as_str(),
            piece.color.as_str(),
            position.to_string(),
        ])?;
    }

    Ok(())
}

fn replace_pieces(conn: &Connection, id: GameId, board: &BoardSnapshot) -> Result<()> {
    conn.execute("DELETE FROM piece WHERE game_id = ?1", params![id.get()])?;
    insert_pieces(conn, id, board)
}

fn write_turn(conn: &Connection, id: GameId, turn: Color) -> Result<()> {
    let updated = conn.execute(
        "UPDATE game SET turn = ?1 WHERE game_id = ?2",
        params![turn.as_str(), id.get()],
    )?;
    if updated == 0 {
        return Err(StoreError::NoSavedGame(id));
    }
    Ok(())
}

#[async_trait]
impl GameStore for SqliteStore {
    async fn create(&self, turn: Color, board: &BoardSnapshot) -> Result<GameId> {
        let board = board.clone();

        self.run(move |conn| {
            let tx = conn.transaction()?;

            tx.execute("INSERT INTO game (turn) VALUES (?1)", params![turn.as_str()])?;
            let id = GameId(tx.last_insert_rowid());
            insert_pieces(&tx, id, &board)?;

            tx.commit()?;

            debug!(game_id = %id, %turn, pieces = board.len(), "created game");
            Ok(id)
        })
        .await
    }

    async fn load(&self, id: GameId) -> Result<GameSession> {
        self.run(move |conn| {
            // One read transaction so turn and pieces come from the same commit.
            let tx = conn.transaction()?;

            let turn = read_turn(&tx, id)?.ok_or(StoreError::NoSavedGame(id))?;
            let board = read_board(&tx, id)?;

            tx.commit()?;

            debug!(game_id = %id, %turn, pieces = board.len(), "loaded game");
            Ok(GameSession { id, turn, board })
        })
        .await
    }

    async fn delete_game(&self, id: GameId) -> Result<bool> {
        self.run(move |conn| {
            let tx = conn.transaction()?;

            let pieces = tx.execute("DELETE FROM piece WHERE game_id = ?1", params![id.get()])?;
            let games = tx.execute("DELETE FROM game WHERE game_id = ?1", params![id.get()])?;

            tx.commit()?;

            if games == 0 {
                debug!(game_id = %id, "delete of unknown game ignored");
            } else {
                debug!(game_id = %id, pieces, "deleted game");
            }
            Ok(games > 0)
        })
        .await
    }

    async fn update_board(&self, id: GameId, board: &BoardSnapshot) -> Result<()> {
        let board = board.clone();

        self.run(move |conn| {
            let tx = conn.transaction()?;

            if !game_exists(&tx, id)? {
                return Err(StoreError::NoSavedGame(id));
            }
            replace_pieces(&tx, id, &board)?;

            tx.commit()?;

            debug!(game_id = %id, pieces = board.len(), "replaced board");
            Ok(())
        })
        .await
    }

    async fn update_turn(&self, id: GameId, turn: Color) -> Result<()> {
        self.run(move |conn| {
            write_turn(conn, id, turn)?;
            debug!(game_id = %id, %turn, "updated turn");
            Ok(())
        })
        .await
    }

    async fn update_game(&self, id: GameId, board: &BoardSnapshot, turn: Color) -> Result<()> {
        let board = board.clone();

        self.run(move |conn| {
            let tx = conn.transaction()?;

            write_turn(&tx, id, turn)?;
            replace_pieces(&tx, id, &board)?;

            tx.commit()?;

            debug!(game_id = %id, %turn, pieces = board.len(), "updated game");
            Ok(())
        })
        .await
    }

    async fn exists(&self, id: GameId) -> Result<bool> {
        self.run(move |conn| game_exists(conn, id)).await
    }

    async fn list_game_ids(&self) -> Result<Vec<GameId>> {
        self.run(|conn| {
            let mut stmt = conn.prepare("SELECT game_id FROM game ORDER BY game_id")?;

            let ids = stmt
                .query_map([], |row| row.get(0).map(GameId))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(ids)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessdb_core::PieceKind;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn kings() -> BoardSnapshot {
        BoardSnapshot::new()
            .with(pos("e1"), Piece::white(PieceKind::King))
            .with(pos("e8"), Piece::black(PieceKind::King))
    }

    /// Write raw SQL behind the store's back.
    fn raw_execute(store: &SqliteStore, sql: &str, id: GameId) {
        let conn = store.conn.lock().unwrap();
        conn.execute(sql, params![id.get()]).unwrap();
    }

    #[tokio::test]
    async fn test_create_and_load() {
        let store = SqliteStore::open_memory().unwrap();

        let id = store.create(Color::White, &kings()).await.unwrap();
        assert_eq!(id, GameId(1));

        let session = store.load(id).await.unwrap();
        assert_eq!(session.id, id);
        assert_eq!(session.turn, Color::White);
        assert_eq!(session.board, kings());
    }

    #[tokio::test]
    async fn test_rows_per_square() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::Black, &kings()).await.unwrap();

        let conn = store.conn.lock().unwrap();
        let (count, turn): (i64, String) = conn
            .query_row(
                "SELECT (SELECT COUNT(*) FROM piece WHERE game_id = ?1),
                        (SELECT turn FROM game WHERE game_id = ?1)",
                params![id.get()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(turn, "BLACK");
    }

    #[tokio::test]
    async fn test_unknown_piece_name_is_malformed() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::White, &kings()).await.unwrap();

        raw_execute(
            &store,
            "INSERT INTO piece (game_id, name, color, position) VALUES (?1, 'DRAGON', 'WHITE', 'a1')",
            id,
        );

        let err = store.load(id).await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { game_id, .. } if game_id == id));
    }

    #[tokio::test]
    async fn test_unknown_turn_is_malformed() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::White, &kings()).await.unwrap();

        raw_execute(&store, "UPDATE game SET turn = 'RED' WHERE game_id = ?1", id);

        let err = store.load(id).await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { .. }));
        assert!(!err.is_storage_failure());
    }

    #[tokio::test]
    async fn test_unknown_piece_color_is_malformed() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::White, &kings()).await.unwrap();

        raw_execute(
            &store,
            "INSERT INTO piece (game_id, name, color, position) VALUES (?1, 'ROOK', 'PURPLE', 'a1')",
            id,
        );

        let err = store.load(id).await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { game_id, .. } if game_id == id));
    }

    #[tokio::test]
    async fn test_unknown_position_is_malformed() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::White, &kings()).await.unwrap();

        raw_execute(
            &store,
            "INSERT INTO piece (game_id, name, color, position) VALUES (?1, 'ROOK', 'WHITE', 'z9')",
            id,
        );

        let err = store.load(id).await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { game_id, .. } if game_id == id));
    }

    #[tokio::test]
    async fn test_square_stored_twice_is_malformed() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::White, &kings()).await.unwrap();

        // The unique index is case sensitive, so "E1" gets past it.
        raw_execute(
            &store,
            "INSERT INTO piece (game_id, name, color, position) VALUES (?1, 'QUEEN', 'WHITE', 'E1')",
            id,
        );

        let err = store.load(id).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::MalformedRecord { game_id, ref reason } if game_id == id && reason.contains("e1")
        ));
    }

    /// Make every insert of a piece on h8 fail.
    fn reject_h8(store: &SqliteStore) {
        let conn = store.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_h8 BEFORE INSERT ON piece
             WHEN NEW.position = 'h8'
             BEGIN SELECT RAISE(ABORT, 'h8 rejected'); END;",
        )
        .unwrap();
    }

    fn board_with_h8() -> BoardSnapshot {
        BoardSnapshot::new()
            .with(pos("a1"), Piece::white(PieceKind::Rook))
            .with(pos("h8"), Piece::black(PieceKind::King))
    }

    #[tokio::test]
    async fn test_failed_update_board_keeps_previous_board() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::Black, &kings()).await.unwrap();
        reject_h8(&store);

        let err = store.update_board(id, &board_with_h8()).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));

        let err = store
            .update_game(id, &board_with_h8(), Color::White)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));

        let session = store.load(id).await.unwrap();
        assert_eq!(session.board, kings());
        assert_eq!(session.turn, Color::Black);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_no_game() {
        let store = SqliteStore::open_memory().unwrap();
        reject_h8(&store);

        let err = store.create(Color::White, &board_with_h8()).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(store.list_game_ids().await.unwrap().is_empty());

        let conn = store.conn.lock().unwrap();
        let pieces: i64 = conn
            .query_row("SELECT COUNT(*) FROM piece", [], |row| row.get(0))
            .unwrap();
        assert_eq!(pieces, 0);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_pieces() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.create(Color::White, &kings()).await.unwrap();
        {
            let conn = store.conn.lock().unwrap();
            conn.execute_batch(
                "CREATE TRIGGER keep_games BEFORE DELETE ON game
                 BEGIN SELECT RAISE(ABORT, 'delete rejected'); END;",
            )
            .unwrap();
        }

        let err = store.delete_game(id).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));

        let session = store.load(id).await.unwrap();
        assert_eq!(session.board, kings());
    }

    #[tokio::test]
    async fn test_update_unknown_game_writes_nothing() {
        let store = SqliteStore::open_memory().unwrap();

        let err = store.update_board(GameId(9), &kings()).await.unwrap_err();
        assert!(err.is_no_saved_game());

        let err = store
            .update_game(GameId(9), &kings(), Color::Black)
            .await
            .unwrap_err();
        assert!(err.is_no_saved_game());

        let conn = store.conn.lock().unwrap();
        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM piece", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("games.db");

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            let id = store.create(Color::Black, &kings()).await.unwrap();
            store.update_turn(id, Color::White).await.unwrap();
            id
        };

        let store = SqliteStore::open(&path).unwrap();
        let session = store.load(id).await.unwrap();
        assert_eq!(session.turn, Color::White);
        assert_eq!(session.board, kings());
        assert_eq!(store.list_game_ids().await.unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn test_rollback_journal_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SqliteConfig {
            journal_mode: crate::config::JournalMode::Delete,
            ..SqliteConfig::default()
        };

        let store = SqliteStore::open_with_config(dir.path().join("games.db"), &config).unwrap();
        let conn = store.conn.lock().unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_uppercase(), "DELETE");
    }
}
