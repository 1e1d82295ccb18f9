//! 国际象棋规则引擎
//!
//! 提供完整的双人对局规则：棋盘模型、走法验证与生成、
//! 将军/将死/逼和判定、事件驱动的回合状态机和代数记谱的对局历史。
//!
//! 入口是 [`ChessMachine`]（或直接使用纯值的 [`GameContext`]）：
//! 调用方只发送 [`GameEvent`]，所有规则校验都在引擎内部完成。

pub mod board;
pub mod constants;
pub mod error;
pub mod machine;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod record;

pub use board::{Board, CastlingRights, Wing, WingRights};
pub use error::ChessError;
pub use machine::{ChessMachine, GameContext, GameEvent, GamePhase};
pub use moves::{AppliedMove, GameStatus, MoveGenerator};
pub use notation::Notation;
pub use piece::{Piece, PieceType, Position, Side};
pub use record::{GameHistory, MoveRecord};
