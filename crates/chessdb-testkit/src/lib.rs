//! # chessdb Testkit
//!
//! Testing utilities for chessdb.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Ready-made boards and a memory-backed test fixture
//! - **Generators**: Proptest strategies for boards, pieces and colors
//! - **Contract**: The behavior every [`GameStore`](chessdb_store::GameStore)
//!   must show, as async checks runnable against any backend
//!
//! ## Store Contract
//!
//! Run the whole suite against a backend by handing it a constructor for
//! fresh, empty stores:
//!
//! ```rust,ignore
//! use chessdb_store::MemoryStore;
//! use chessdb_testkit::contract;
//!
//! #[tokio::test]
//! async fn memory_store_contract() {
//!     contract::run_all(MemoryStore::new).await;
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use chessdb_testkit::generators::{board, color};
//!
//! proptest! {
//!     #[test]
//!     fn board_sizes(board in board(32), turn in color()) {
//!         prop_assert!(board.len() <= 32);
//!     }
//! }
//! ```

pub mod contract;
pub mod fixtures;
pub mod generators;

pub use fixtures::{kings_only, standard_board, TestFixture};
pub use generators::{board, color, piece, piece_kind, position};
