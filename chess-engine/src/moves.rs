//! 走法验证和生成

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastlingRights, Wing};
use crate::constants::{
    BOARD_SIZE, KING_HOME_COL, KING_SIDE_CASTLE_COL, KING_SIDE_ROOK_DEST_COL,
    QUEEN_SIDE_CASTLE_COL, QUEEN_SIDE_ROOK_DEST_COL,
};
use crate::piece::{PieceType, Position, Side};

/// 对局状态判定结果
///
/// 不变量：将死和逼和互斥，二者都要求无合法走法，区别仅在是否被将军。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// 一步走法执行后的完整结果
///
/// 包含易位时车的同步移动、吃过路兵的移除和易位权利收缩，
/// 供实际落子和自将过滤的假设模拟共用。
#[derive(Debug, Clone)]
pub struct AppliedMove {
    /// 执行后的棋盘
    pub board: Board,
    /// 执行后的易位权利
    pub rights: CastlingRights,
    /// 执行后的过路兵标记（仅兵两步推进时设置）
    pub en_passant: Option<Position>,
    /// 本步是否为易位（及哪一翼）
    pub castled: Option<Wing>,
    /// 本步是否吃子（含吃过路兵）
    pub was_capture: bool,
    /// 兵是否到达升变行
    pub reached_promotion_rank: bool,
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 检查目标格是否被指定阵营攻击
    ///
    /// 王的威胁使用直接相邻判断而非完整验证器，
    /// 避免两王的易位安全检查相互递归。
    pub fn is_attacked(
        board: &Board,
        target: Position,
        by_side: Side,
        en_passant: Option<Position>,
        rights: &CastlingRights,
    ) -> bool {
        for (pos, piece) in board.pieces(by_side) {
            if piece.piece_type == PieceType::King {
                let d_row = (target.row as i8 - pos.row as i8).abs();
                let d_col = (target.col as i8 - pos.col as i8).abs();
                if d_row <= 1 && d_col <= 1 && d_row + d_col > 0 {
                    return true;
                }
            } else if Self::is_pseudo_legal(board, pos, target, by_side, rights, true, en_passant) {
                return true;
            }
        }
        false
    }

    /// 检查走法是否符合棋子的几何规则（不考虑自将）
    ///
    /// `attack_only` 为攻击判定模式：兵的斜进即构成威胁（无论目标格是否有子），
    /// 直进不构成威胁；易位不构成攻击；己方棋子占据目标格不影响威胁覆盖。
    pub fn is_pseudo_legal(
        board: &Board,
        from: Position,
        to: Position,
        mover: Side,
        rights: &CastlingRights,
        attack_only: bool,
        en_passant: Option<Position>,
    ) -> bool {
        if !from.is_valid() || !to.is_valid() || from == to {
            return false;
        }
        let piece = match board.get(from) {
            Some(piece) => piece,
            None => return false,
        };
        if piece.side != mover {
            return false;
        }
        // 不能落在己方棋子上（攻击判定模式下保护己方棋子的格子也算被威胁）
        if !attack_only {
            if let Some(target) = board.get(to) {
                if target.side == mover {
                    return false;
                }
            }
        }

        match piece.piece_type {
            PieceType::Pawn => Self::pawn_pseudo_legal(board, from, to, mover, attack_only, en_passant),
            PieceType::Rook => Self::rook_pseudo_legal(board, from, to),
            PieceType::Knight => Self::knight_pseudo_legal(from, to),
            PieceType::Bishop => Self::bishop_pseudo_legal(board, from, to),
            PieceType::Queen => {
                Self::rook_pseudo_legal(board, from, to) || Self::bishop_pseudo_legal(board, from, to)
            }
            PieceType::King => {
                Self::king_pseudo_legal(board, from, to, mover, rights, attack_only, en_passant)
            }
        }
    }

    /// 兵的走法规则
    fn pawn_pseudo_legal(
        board: &Board,
        from: Position,
        to: Position,
        side: Side,
        attack_only: bool,
        en_passant: Option<Position>,
    ) -> bool {
        let dir = side.pawn_direction();
        let d_row = to.row as i8 - from.row as i8;
        let d_col = to.col as i8 - from.col as i8;

        // 斜进一格：吃子或吃过路兵
        if d_col.abs() == 1 && d_row == dir {
            if attack_only {
                return true;
            }
            if board.get(to).is_some() {
                // 己方棋子已在上层排除，此处必为对方棋子
                return true;
            }
            // 吃过路兵：目标为过路兵标记格，且兵位于己方第五横排
            return en_passant == Some(to) && from.row == side.en_passant_rank();
        }

        if attack_only {
            return false;
        }

        // 直进一格或从初始行直进两格，途经格与目标格必须为空
        if d_col == 0 && board.get(to).is_none() {
            if d_row == dir {
                return true;
            }
            if d_row == 2 * dir && from.row == side.pawn_rank() {
                return from
                    .offset(dir, 0)
                    .map_or(false, |mid| board.get(mid).is_none());
            }
        }
        false
    }

    /// 车的走法规则（直线，路径无阻挡）
    fn rook_pseudo_legal(board: &Board, from: Position, to: Position) -> bool {
        if from.row != to.row && from.col != to.col {
            return false;
        }
        let step_row = (to.row as i8 - from.row as i8).signum();
        let step_col = (to.col as i8 - from.col as i8).signum();
        Self::path_clear(board, from, to, step_row, step_col)
    }

    /// 象的走法规则（斜线，路径无阻挡）
    fn bishop_pseudo_legal(board: &Board, from: Position, to: Position) -> bool {
        let d_row = to.row as i8 - from.row as i8;
        let d_col = to.col as i8 - from.col as i8;
        if d_row.abs() != d_col.abs() {
            return false;
        }
        Self::path_clear(board, from, to, d_row.signum(), d_col.signum())
    }

    /// 马的走法规则（日字跳，无阻挡检查）
    fn knight_pseudo_legal(from: Position, to: Position) -> bool {
        let d_row = (to.row as i8 - from.row as i8).abs();
        let d_col = (to.col as i8 - from.col as i8).abs();
        (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
    }

    /// 王的走法规则（一格任意方向，或易位）
    fn king_pseudo_legal(
        board: &Board,
        from: Position,
        to: Position,
        side: Side,
        rights: &CastlingRights,
        attack_only: bool,
        en_passant: Option<Position>,
    ) -> bool {
        let d_row = (to.row as i8 - from.row as i8).abs();
        let d_col = (to.col as i8 - from.col as i8).abs();
        if d_row <= 1 && d_col <= 1 {
            return true;
        }
        // 易位不构成攻击
        if attack_only {
            return false;
        }
        // 易位：王必须在底线初始格
        let back = side.back_rank();
        if from.row != back || from.col != KING_HOME_COL || to.row != back {
            return false;
        }
        let wing = if to.col == KING_SIDE_CASTLE_COL {
            Wing::KingSide
        } else if to.col == QUEEN_SIDE_CASTLE_COL {
            Wing::QueenSide
        } else {
            return false;
        };
        Self::castling_legal(board, side, wing, rights, en_passant)
    }

    /// 易位条件：保有权利、车在初始角格、王车之间为空、
    /// 王的起点/经过格/终点均不被对方攻击
    fn castling_legal(
        board: &Board,
        side: Side,
        wing: Wing,
        rights: &CastlingRights,
        en_passant: Option<Position>,
    ) -> bool {
        if !rights.side(side).wing(wing) {
            return false;
        }
        let back = side.back_rank();

        let rook_pos = Position::new_unchecked(back, wing.rook_home_col());
        match board.get(rook_pos) {
            Some(piece) if piece.piece_type == PieceType::Rook && piece.side == side => {}
            _ => return false,
        }

        let between: &[u8] = match wing {
            Wing::KingSide => &[5, 6],
            Wing::QueenSide => &[1, 2, 3],
        };
        for &col in between {
            if board.get(Position::new_unchecked(back, col)).is_some() {
                return false;
            }
        }

        let king_path: [u8; 3] = match wing {
            Wing::KingSide => [4, 5, 6],
            Wing::QueenSide => [4, 3, 2],
        };
        let opponent = side.opponent();
        for &col in &king_path {
            if Self::is_attacked(
                board,
                Position::new_unchecked(back, col),
                opponent,
                en_passant,
                rights,
            ) {
                return false;
            }
        }
        true
    }

    /// 检查滑行路径是否无阻挡（不含起点和终点）
    fn path_clear(board: &Board, from: Position, to: Position, step_row: i8, step_col: i8) -> bool {
        let mut current = from;
        loop {
            current = match current.offset(step_row, step_col) {
                Some(pos) => pos,
                None => return false,
            };
            if current == to {
                return true;
            }
            if board.get(current).is_some() {
                return false;
            }
        }
    }

    /// 执行一步走法，返回执行后的完整状态
    ///
    /// 实际落子与自将过滤的假设模拟共用此函数，
    /// 保证两条路径的易位、吃过路兵和权利收缩语义一致。
    pub fn apply_move(
        board: &Board,
        from: Position,
        to: Position,
        rights: &CastlingRights,
        en_passant: Option<Position>,
    ) -> Option<AppliedMove> {
        let piece = board.get(from)?;
        let side = piece.side;

        let mut new_board = board.with_move(from, to, piece);
        let mut new_rights = *rights;
        let mut castled = None;
        let mut was_capture = board.get(to).is_some_and(|target| target.side != side);

        // 吃过路兵：被吃的兵在目标格的后一行
        if piece.piece_type == PieceType::Pawn
            && en_passant == Some(to)
            && from.col != to.col
            && board.get(to).is_none()
        {
            let captured_row = (to.row as i8 - side.pawn_direction()) as u8;
            new_board.set(Position::new_unchecked(captured_row, to.col), None);
            was_capture = true;
        }

        // 易位：同步移动车
        if piece.piece_type == PieceType::King && (to.col as i8 - from.col as i8).abs() == 2 {
            let wing = if to.col > from.col {
                Wing::KingSide
            } else {
                Wing::QueenSide
            };
            let rook_from = Position::new_unchecked(from.row, wing.rook_home_col());
            let rook_dest_col = match wing {
                Wing::KingSide => KING_SIDE_ROOK_DEST_COL,
                Wing::QueenSide => QUEEN_SIDE_ROOK_DEST_COL,
            };
            if let Some(rook) = board.get(rook_from) {
                new_board.set(rook_from, None);
                new_board.set(Position::new_unchecked(from.row, rook_dest_col), Some(rook));
            }
            castled = Some(wing);
        }

        // 易位权利收缩：王移动失去双翼，车离开初始角格失去该翼
        if piece.piece_type == PieceType::King {
            new_rights.revoke_all(side);
        }
        if piece.piece_type == PieceType::Rook && from.row == side.back_rank() {
            if from.col == Wing::KingSide.rook_home_col() {
                new_rights.revoke(side, Wing::KingSide);
            } else if from.col == Wing::QueenSide.rook_home_col() {
                new_rights.revoke(side, Wing::QueenSide);
            }
        }
        // 对方的车在初始角格被吃同样使对方失去该翼权利
        if let Some(captured) = board.get(to) {
            if captured.piece_type == PieceType::Rook && to.row == captured.side.back_rank() {
                if to.col == Wing::KingSide.rook_home_col() {
                    new_rights.revoke(captured.side, Wing::KingSide);
                } else if to.col == Wing::QueenSide.rook_home_col() {
                    new_rights.revoke(captured.side, Wing::QueenSide);
                }
            }
        }

        // 过路兵标记仅在兵两步推进后有效一个半回合
        let new_en_passant =
            if piece.piece_type == PieceType::Pawn && (to.row as i8 - from.row as i8).abs() == 2 {
                Some(Position::new_unchecked(
                    ((from.row as i8 + to.row as i8) / 2) as u8,
                    from.col,
                ))
            } else {
                None
            };

        let reached_promotion_rank =
            piece.piece_type == PieceType::Pawn && to.row == side.promotion_rank();

        Some(AppliedMove {
            board: new_board,
            rights: new_rights,
            en_passant: new_en_passant,
            castled,
            was_capture,
            reached_promotion_rank,
        })
    }

    /// 生成指定棋子的所有合法走法（过滤掉会导致己方被将军的走法）
    pub fn possible_moves(
        board: &Board,
        pos: Position,
        mover: Side,
        rights: &CastlingRights,
        en_passant: Option<Position>,
    ) -> Vec<Position> {
        match board.get(pos) {
            Some(piece) if piece.side == mover => {}
            _ => return Vec::new(),
        }

        let mut moves = Vec::new();
        for index in 0..BOARD_SIZE * BOARD_SIZE {
            let to = match Position::from_index(index) {
                Some(to) => to,
                None => continue,
            };
            if !Self::is_pseudo_legal(board, pos, to, mover, rights, false, en_passant) {
                continue;
            }
            // 模拟走法，走完后己方王不得被攻击
            if let Some(applied) = Self::apply_move(board, pos, to, rights, en_passant) {
                if !Self::is_in_check(&applied.board, mover, applied.en_passant, &applied.rights) {
                    moves.push(to);
                }
            }
        }
        moves
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(
        board: &Board,
        side: Side,
        en_passant: Option<Position>,
        rights: &CastlingRights,
    ) -> bool {
        let king_pos = match board.find_king(side) {
            Some(pos) => pos,
            None => return false, // 没有王，视为不被将军
        };
        Self::is_attacked(board, king_pos, side.opponent(), en_passant, rights)
    }

    /// 判定指定阵营当前的对局状态（将军/将死/逼和）
    pub fn game_status(
        board: &Board,
        side: Side,
        rights: &CastlingRights,
        en_passant: Option<Position>,
    ) -> GameStatus {
        let is_check = Self::is_in_check(board, side, en_passant, rights);

        let mut has_legal_moves = false;
        for (pos, _) in board.pieces(side) {
            if !Self::possible_moves(board, pos, side, rights, en_passant).is_empty() {
                has_legal_moves = true;
                break;
            }
        }

        GameStatus {
            is_check,
            is_checkmate: is_check && !has_legal_moves,
            is_stalemate: !is_check && !has_legal_moves,
        }
    }
}
