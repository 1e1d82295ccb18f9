//! 对局记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{Board, CastlingRights};
use crate::moves::GameStatus;
use crate::piece::{Piece, Position};

/// 单步走法记录
///
/// 落子时创建。升变走法在棋子确定前先以暂定记谱入史，
/// 升变确定后由 [`resolve_promotion`](MoveRecord::resolve_promotion) 补记一次。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    /// 代数记谱
    pub notation: String,
    /// 走法执行前的棋盘
    pub board_before: Board,
    /// 走法执行后的棋盘
    pub board_after: Board,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    /// 走法执行前的易位权利（复盘用）
    pub castling_rights_before: CastlingRights,
    /// 走法执行前的过路兵标记（复盘用）
    pub en_passant_before: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MoveRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        from: Position,
        to: Position,
        piece: Piece,
        notation: String,
        board_before: Board,
        board_after: Board,
        status: GameStatus,
        castling_rights_before: CastlingRights,
        en_passant_before: Option<Position>,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            notation,
            board_before,
            board_after,
            is_check: status.is_check,
            is_checkmate: status.is_checkmate,
            is_stalemate: status.is_stalemate,
            castling_rights_before,
            en_passant_before,
            timestamp: Some(Utc::now()),
        }
    }

    /// 升变确定后的唯一一次补记：换上升变后的棋盘、记谱和状态标志
    pub fn resolve_promotion(&mut self, board_after: Board, notation: String, status: GameStatus) {
        self.board_after = board_after;
        self.notation = notation;
        self.is_check = status.is_check;
        self.is_checkmate = status.is_checkmate;
        self.is_stalemate = status.is_stalemate;
    }
}

/// 对局历史（只追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameHistory {
    /// 对局开始时间
    pub started_at: DateTime<Utc>,
    moves: Vec<MoveRecord>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            moves: Vec::new(),
        }
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// 仅供升变补记使用
    pub(crate) fn last_mut(&mut self) -> Option<&mut MoveRecord> {
        self.moves.last_mut()
    }

    /// 按回合编号输出棋谱文本，如 "1. e4 e5\n2. Nf3 Nc6"
    pub fn movetext(&self) -> String {
        let mut lines = Vec::new();
        for (i, pair) in self.moves.chunks(2).enumerate() {
            let mut line = format!("{}. {}", i + 1, pair[0].notation);
            if let Some(reply) = pair.get(1) {
                line.push(' ');
                line.push_str(&reply.notation);
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    /// 序列化为 JSON（存档用）
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 从 JSON 反序列化（读档用）
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}
