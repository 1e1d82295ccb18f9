//! 回合状态机
//!
//! 上下文是纯值：[`GameContext::handle`] 不修改自身，
//! 对每个事件返回新的上下文，便于快照、回放和测试。

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, CastlingRights};
use crate::error::ChessError;
use crate::moves::MoveGenerator;
use crate::notation::Notation;
use crate::piece::{Piece, PieceType, Position, Side};
use crate::record::{GameHistory, MoveRecord};

/// 状态机所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// 等待当前玩家选择棋子
    AwaitingSelection,
    /// 已选中棋子，等待落点
    PieceSelected,
    /// 兵已到达底线，等待升变选择
    AwaitingPromotion,
    /// 终局：将死
    Checkmate,
    /// 终局：逼和
    Stalemate,
}

/// 外部事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// 选择（或取消选择）一个格子上的棋子
    SelectPiece { position: Position },
    /// 把已选中的棋子移到目标格
    MovePiece { position: Position },
    /// 为到达底线的兵选择升变棋子
    ChoosePromotionPiece { piece: PieceType },
    /// 重置为初始对局
    ResetGame,
}

/// 对局上下文
///
/// 包含重建局面所需的全部状态。字段公开只读即可，
/// 变更只能通过 [`handle`](GameContext::handle) 发生。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    pub board: Board,
    pub current_player: Side,
    pub selected_piece: Option<Position>,
    /// 选中棋子的合法落点，选择时计算一次
    pub possible_moves: Vec<Position>,
    /// 最近一个被拒绝事件的原因，任何被接受的事件都会清除它
    pub error: Option<ChessError>,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub game_over: bool,
    pub winner: Option<Side>,
    pub castling_rights: CastlingRights,
    /// 过路兵标记格，只在对方双步推进后的一个回合内有效
    pub en_passant_target: Option<Position>,
    /// 等待升变的兵所在格
    pub awaiting_promotion: Option<Position>,
    pub move_history: GameHistory,
    pub phase: GamePhase,
}

impl GameContext {
    /// 标准初始局面，白方先行
    pub fn new() -> Self {
        Self::with_setup(Board::initial(), Side::White, CastlingRights::initial(), None)
    }

    /// 从自定义局面创建，排局与复盘用
    pub fn with_setup(
        board: Board,
        current_player: Side,
        castling_rights: CastlingRights,
        en_passant_target: Option<Position>,
    ) -> Self {
        let status =
            MoveGenerator::game_status(&board, current_player, &castling_rights, en_passant_target);
        let phase = if status.is_checkmate {
            GamePhase::Checkmate
        } else if status.is_stalemate {
            GamePhase::Stalemate
        } else {
            GamePhase::AwaitingSelection
        };
        Self {
            board,
            current_player,
            selected_piece: None,
            possible_moves: Vec::new(),
            error: None,
            is_check: status.is_check,
            is_checkmate: status.is_checkmate,
            is_stalemate: status.is_stalemate,
            game_over: status.is_checkmate || status.is_stalemate,
            winner: if status.is_checkmate {
                Some(current_player.opponent())
            } else {
                None
            },
            castling_rights,
            en_passant_target,
            awaiting_promotion: None,
            move_history: GameHistory::new(),
            phase,
        }
    }

    /// 处理一个事件，返回新的上下文
    ///
    /// 被拒绝的事件只在返回的上下文中记录错误原因，其余状态保持不变。
    /// 重置在任何阶段都被接受；终局状态下其他事件一律拒绝。
    pub fn handle(&self, event: GameEvent) -> GameContext {
        match event {
            GameEvent::ResetGame => {
                debug!("game reset");
                GameContext::new()
            }
            _ if self.game_over => self.rejected(ChessError::GameOver),
            GameEvent::SelectPiece { position } => self.select_piece(position),
            GameEvent::MovePiece { position } => self.move_piece(position),
            GameEvent::ChoosePromotionPiece { piece } => self.choose_promotion(piece),
        }
    }

    fn rejected(&self, error: ChessError) -> GameContext {
        warn!(%error, "event rejected");
        let mut next = self.clone();
        next.error = Some(error);
        next
    }

    fn select_piece(&self, position: Position) -> GameContext {
        if self.awaiting_promotion.is_some() {
            return self.rejected(ChessError::PromotionPending);
        }
        // 再次点击已选中的格子表示取消选择
        if self.selected_piece == Some(position) {
            let mut next = self.clone();
            next.selected_piece = None;
            next.possible_moves = Vec::new();
            next.error = None;
            next.phase = GamePhase::AwaitingSelection;
            return next;
        }
        match self.board.get(position) {
            Some(piece) if piece.side == self.current_player => {
                let moves = MoveGenerator::possible_moves(
                    &self.board,
                    position,
                    self.current_player,
                    &self.castling_rights,
                    self.en_passant_target,
                );
                debug!(piece = ?piece.piece_type, %position, moves = moves.len(), "piece selected");
                let mut next = self.clone();
                next.selected_piece = Some(position);
                next.possible_moves = moves;
                next.error = None;
                next.phase = GamePhase::PieceSelected;
                next
            }
            _ => self.rejected(ChessError::SelectionInvalid),
        }
    }

    fn move_piece(&self, position: Position) -> GameContext {
        if self.awaiting_promotion.is_some() {
            return self.rejected(ChessError::PromotionPending);
        }
        let from = match self.selected_piece {
            Some(from) => from,
            None => return self.rejected(ChessError::NoSelection),
        };
        // 合法性即选择时算出的落点列表成员资格
        if !self.possible_moves.contains(&position) {
            return self.rejected(ChessError::IllegalMove);
        }
        let piece = match self.board.get(from) {
            Some(piece) => piece,
            None => return self.rejected(ChessError::IllegalMove),
        };

        let applied = match MoveGenerator::apply_move(
            &self.board,
            from,
            position,
            &self.castling_rights,
            self.en_passant_target,
        ) {
            Some(applied) => applied,
            None => return self.rejected(ChessError::IllegalMove),
        };
        let mover = self.current_player;
        let pending_promotion = applied.reached_promotion_rank;

        // 升变挂起时本方暂不换边，状态对走子方自身判定；
        // 正常走法对换边后的对方判定
        let status_player = if pending_promotion {
            mover
        } else {
            mover.opponent()
        };
        let status = MoveGenerator::game_status(
            &applied.board,
            status_player,
            &applied.rights,
            applied.en_passant,
        );
        // 记谱里的将军标记始终以对方视角为准
        let opponent_status = if pending_promotion {
            MoveGenerator::game_status(
                &applied.board,
                mover.opponent(),
                &applied.rights,
                applied.en_passant,
            )
        } else {
            status
        };

        let notation = Notation::algebraic(
            piece,
            from,
            position,
            applied.was_capture,
            applied.castled,
            None,
            opponent_status.is_check,
            opponent_status.is_checkmate,
        );
        debug!(%mover, %from, to = %position, %notation, "move applied");

        let record = MoveRecord::new(
            from,
            position,
            piece,
            notation,
            self.board.clone(),
            applied.board.clone(),
            status,
            self.castling_rights,
            self.en_passant_target,
        );

        let mut next = self.clone();
        next.selected_piece = None;
        next.possible_moves = Vec::new();
        next.error = None;
        next.board = applied.board;
        next.castling_rights = applied.rights;
        next.en_passant_target = applied.en_passant;
        next.move_history.push(record);
        next.is_check = status.is_check;
        next.is_checkmate = status.is_checkmate;
        next.is_stalemate = status.is_stalemate;

        if pending_promotion {
            next.awaiting_promotion = Some(position);
            next.phase = GamePhase::AwaitingPromotion;
        } else {
            next.current_player = mover.opponent();
            next.game_over = status.is_checkmate || status.is_stalemate;
            next.winner = if status.is_checkmate { Some(mover) } else { None };
            next.phase = if status.is_checkmate {
                GamePhase::Checkmate
            } else if status.is_stalemate {
                GamePhase::Stalemate
            } else {
                GamePhase::AwaitingSelection
            };
        }
        next
    }

    fn choose_promotion(&self, piece_type: PieceType) -> GameContext {
        let pending = match self.awaiting_promotion {
            Some(pos) => pos,
            None => return self.rejected(ChessError::NoPromotionPending),
        };
        if !piece_type.is_promotion_choice() {
            return self.rejected(ChessError::InvalidPromotionPiece);
        }

        let mover = self.current_player;
        let mut next = self.clone();
        next.board
            .set(pending, Some(Piece::new(piece_type, mover)));

        let opponent = mover.opponent();
        let status =
            MoveGenerator::game_status(&next.board, opponent, &next.castling_rights, None);
        debug!(%mover, piece = ?piece_type, at = %pending, "pawn promoted");

        // 补记挂起的走法：换上最终记谱和状态标志
        if let Some(record) = next.move_history.last_mut() {
            let base: String = record
                .notation
                .trim_end_matches(['+', '#'])
                .to_string();
            let mut notation = base;
            if let Some(letter) = piece_type.letter() {
                notation.push('=');
                notation.push(letter);
            }
            notation.push_str(Notation::status_suffix(status.is_check, status.is_checkmate));
            record.resolve_promotion(next.board.clone(), notation, status);
        }

        next.awaiting_promotion = None;
        next.current_player = opponent;
        next.en_passant_target = None;
        next.selected_piece = None;
        next.possible_moves = Vec::new();
        next.error = None;
        next.is_check = status.is_check;
        next.is_checkmate = status.is_checkmate;
        next.is_stalemate = status.is_stalemate;
        next.game_over = status.is_checkmate || status.is_stalemate;
        next.winner = if status.is_checkmate { Some(mover) } else { None };
        next.phase = if status.is_checkmate {
            GamePhase::Checkmate
        } else if status.is_stalemate {
            GamePhase::Stalemate
        } else {
            GamePhase::AwaitingSelection
        };
        next
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 状态机持有者
///
/// 包装一个上下文并通过事件驱动它前进，上下文本身保持纯值语义。
#[derive(Debug, Clone)]
pub struct ChessMachine {
    context: GameContext,
}

impl ChessMachine {
    pub fn new() -> Self {
        Self {
            context: GameContext::new(),
        }
    }

    /// 从已有上下文恢复（读档用）
    pub fn from_context(context: GameContext) -> Self {
        Self { context }
    }

    /// 发送一个事件
    pub fn send(&mut self, event: GameEvent) {
        self.context = self.context.handle(event);
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }
}

impl Default for ChessMachine {
    fn default() -> Self {
        Self::new()
    }
}
