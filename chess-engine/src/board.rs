//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOARD_SIZE, KING_SIDE_ROOK_COL, QUEEN_SIDE_ROOK_COL,
};
use crate::piece::{Piece, PieceType, Position, Side};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        // 黑方（上方，行 0 为底线，行 1 为兵线）
        for (col, &piece_type) in back_rank.iter().enumerate() {
            board.set(
                Position::new_unchecked(0, col as u8),
                Some(Piece::new(piece_type, Side::Black)),
            );
            board.set(
                Position::new_unchecked(1, col as u8),
                Some(Piece::new(PieceType::Pawn, Side::Black)),
            );
        }

        // 白方（下方，行 7 为底线，行 6 为兵线）
        for (col, &piece_type) in back_rank.iter().enumerate() {
            board.set(
                Position::new_unchecked(7, col as u8),
                Some(Piece::new(piece_type, Side::White)),
            );
            board.set(
                Position::new_unchecked(6, col as u8),
                Some(Piece::new(PieceType::Pawn, Side::White)),
            );
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回被吃的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 复制棋盘并执行一步移动（用于实际落子和假设模拟）
    pub fn with_move(&self, from: Position, to: Position, piece: Piece) -> Board {
        let mut board = self.clone();
        board.set(from, None);
        board.set(to, Some(piece));
        board
    }

    /// 查找指定阵营的王的位置
    pub fn find_king(&self, side: Side) -> Option<Position> {
        for index in 0..BOARD_SIZE * BOARD_SIZE {
            if let Some(piece) = self.squares[index] {
                if piece.piece_type == PieceType::King && piece.side == side {
                    return Position::from_index(index);
                }
            }
        }
        None
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, side: Side) -> Vec<(Position, Piece)> {
        let mut result = Vec::new();
        for index in 0..BOARD_SIZE * BOARD_SIZE {
            if let Some(piece) = self.squares[index] {
                if piece.side == side {
                    if let Some(pos) = Position::from_index(index) {
                        result.push((pos, piece));
                    }
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 易位的翼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wing {
    /// 王翼（短易位）
    KingSide,
    /// 后翼（长易位）
    QueenSide,
}

impl Wing {
    /// 该翼车的初始列
    pub fn rook_home_col(&self) -> u8 {
        match self {
            Wing::KingSide => KING_SIDE_ROOK_COL,
            Wing::QueenSide => QUEEN_SIDE_ROOK_COL,
        }
    }
}

/// 单方的易位权利
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WingRights {
    pub king_side: bool,
    pub queen_side: bool,
}

impl WingRights {
    /// 双翼均可易位
    pub fn all() -> Self {
        Self {
            king_side: true,
            queen_side: true,
        }
    }

    /// 双翼均不可易位
    pub fn none() -> Self {
        Self {
            king_side: false,
            queen_side: false,
        }
    }

    /// 查询指定翼的权利
    pub fn wing(&self, wing: Wing) -> bool {
        match wing {
            Wing::KingSide => self.king_side,
            Wing::QueenSide => self.queen_side,
        }
    }
}

/// 双方的易位权利（单调递减：一旦失去不再恢复）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: WingRights,
    pub black: WingRights,
}

impl CastlingRights {
    /// 初始权利（双方双翼均可易位）
    pub fn initial() -> Self {
        Self {
            white: WingRights::all(),
            black: WingRights::all(),
        }
    }

    /// 查询指定阵营的权利
    pub fn side(&self, side: Side) -> WingRights {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// 撤销指定阵营单翼的权利
    pub fn revoke(&mut self, side: Side, wing: Wing) {
        let rights = match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        };
        match wing {
            Wing::KingSide => rights.king_side = false,
            Wing::QueenSide => rights.queen_side = false,
        }
    }

    /// 撤销指定阵营双翼的权利（王移动后）
    pub fn revoke_all(&mut self, side: Side) {
        match side {
            Side::White => self.white = WingRights::none(),
            Side::Black => self.black = WingRights::none(),
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        // 检查白方王在 e1
        let king = board.get(Position::new_unchecked(7, 4));
        assert_eq!(king, Some(Piece::new(PieceType::King, Side::White)));

        // 检查黑方王在 e8
        let king = board.get(Position::new_unchecked(0, 4));
        assert_eq!(king, Some(Piece::new(PieceType::King, Side::Black)));

        // 检查白方后在 d1
        let queen = board.get(Position::new_unchecked(7, 3));
        assert_eq!(queen, Some(Piece::new(PieceType::Queen, Side::White)));

        // 检查兵线
        for col in 0..8 {
            assert_eq!(
                board.get(Position::new_unchecked(6, col)),
                Some(Piece::new(PieceType::Pawn, Side::White))
            );
            assert_eq!(
                board.get(Position::new_unchecked(1, col)),
                Some(Piece::new(PieceType::Pawn, Side::Black))
            );
        }

        // 中间四行为空
        for row in 2..6 {
            for col in 0..8 {
                assert!(board.get(Position::new_unchecked(row, col)).is_none());
            }
        }
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::initial();

        // 移动白方 e2 兵到 e4
        let from = Position::new_unchecked(6, 4);
        let to = Position::new_unchecked(4, 4);

        let captured = board.move_piece(from, to);
        assert!(captured.is_none());

        assert!(board.get(from).is_none());
        assert_eq!(board.get(to), Some(Piece::new(PieceType::Pawn, Side::White)));
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let board = Board::initial();
        let from = Position::new_unchecked(7, 1);
        let to = Position::new_unchecked(5, 2);
        let knight = board.get(from).unwrap();

        let next = board.with_move(from, to, knight);

        assert_eq!(next.get(to), Some(knight));
        assert!(next.get(from).is_none());
        // 原棋盘不变
        assert_eq!(board.get(from), Some(knight));
        assert!(board.get(to).is_none());
    }

    #[test]
    fn test_find_king() {
        let board = Board::initial();

        assert_eq!(board.find_king(Side::White), Some(Position::new_unchecked(7, 4)));
        assert_eq!(board.find_king(Side::Black), Some(Position::new_unchecked(0, 4)));
    }

    #[test]
    fn test_pieces_by_side() {
        let board = Board::initial();
        assert_eq!(board.pieces(Side::White).len(), 16);
        assert_eq!(board.pieces(Side::Black).len(), 16);
    }

    #[test]
    fn test_castling_rights_revoke() {
        let mut rights = CastlingRights::initial();
        assert!(rights.side(Side::White).king_side);

        rights.revoke(Side::White, Wing::KingSide);
        assert!(!rights.side(Side::White).king_side);
        assert!(rights.side(Side::White).queen_side);
        assert!(rights.side(Side::Black).king_side);

        rights.revoke_all(Side::Black);
        assert_eq!(rights.side(Side::Black), WingRights::none());
    }
}
