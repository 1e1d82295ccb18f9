//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BLACK_PAWN_RANK, BOARD_SIZE, WHITE_PAWN_RANK};

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 兵
    Pawn,
    /// 车
    Rook,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceType {
    /// 获取代数记谱法字母（兵无字母）
    pub fn letter(&self) -> Option<char> {
        match self {
            PieceType::Pawn => None,
            PieceType::Rook => Some('R'),
            PieceType::Knight => Some('N'),
            PieceType::Bishop => Some('B'),
            PieceType::Queen => Some('Q'),
            PieceType::King => Some('K'),
        }
    }

    /// 检查是否为合法的升变目标（王和兵不可选）
    pub fn is_promotion_choice(&self) -> bool {
        !matches!(self, PieceType::Pawn | PieceType::King)
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，在下方）
    White,
    /// 黑方（后手，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 兵的前进方向（白方行号减小，黑方行号增大）
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// 兵的初始行
    pub fn pawn_rank(&self) -> u8 {
        match self {
            Side::White => WHITE_PAWN_RANK,
            Side::Black => BLACK_PAWN_RANK,
        }
    }

    /// 升变行（到达后必须升变）
    pub fn promotion_rank(&self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// 底线行（王和车的初始行）
    pub fn back_rank(&self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    /// 可以吃过路兵的行（白兵在第3行，黑兵在第4行）
    pub fn en_passant_rank(&self) -> u8 {
        match self {
            Side::White => 3,
            Side::Black => 4,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub fn new(piece_type: PieceType, side: Side) -> Self {
        Self { piece_type, side }
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-7)，0 为黑方底线
    pub row: u8,
    /// 列 (0-7)，0 为 a 列
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 获取偏移后的位置
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let new_row = self.row as i8 + d_row;
        let new_col = self.col as i8 + d_col;
        if new_row >= 0
            && (new_row as usize) < BOARD_SIZE
            && new_col >= 0
            && (new_col as usize) < BOARD_SIZE
        {
            Some(Position {
                row: new_row as u8,
                col: new_col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SIZE * BOARD_SIZE {
            Some(Position {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 列的代数记谱字符（a-h）
    pub fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// 行的代数记谱字符（1-8，行 0 对应 8）
    pub fn rank_char(&self) -> char {
        char::from_digit(8 - self.row as u32, 10).unwrap_or('?')
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_letter() {
        assert_eq!(PieceType::Knight.letter(), Some('N'));
        assert_eq!(PieceType::King.letter(), Some('K'));
        assert_eq!(PieceType::Pawn.letter(), None);
    }

    #[test]
    fn test_promotion_choice() {
        assert!(PieceType::Queen.is_promotion_choice());
        assert!(PieceType::Knight.is_promotion_choice());
        assert!(!PieceType::King.is_promotion_choice());
        assert!(!PieceType::Pawn.is_promotion_choice());
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
    }

    #[test]
    fn test_pawn_geometry() {
        // 白方向上（行号减小），黑方向下
        assert_eq!(Side::White.pawn_direction(), -1);
        assert_eq!(Side::Black.pawn_direction(), 1);
        assert_eq!(Side::White.pawn_rank(), 6);
        assert_eq!(Side::Black.pawn_rank(), 1);
        assert_eq!(Side::White.promotion_rank(), 0);
        assert_eq!(Side::Black.promotion_rank(), 7);
    }

    #[test]
    fn test_position_valid() {
        assert!(Position::new(0, 0).is_some());
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new_unchecked(0, 0);
        assert_eq!(pos.offset(1, 1), Some(Position::new_unchecked(1, 1)));
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(0, -1), None);
    }

    #[test]
    fn test_position_display() {
        // 行 7 列 4 是 e1，行 0 列 0 是 a8
        assert_eq!(Position::new_unchecked(7, 4).to_string(), "e1");
        assert_eq!(Position::new_unchecked(0, 0).to_string(), "a8");
        assert_eq!(Position::new_unchecked(4, 3).to_string(), "d4");
    }

    #[test]
    fn test_position_index_roundtrip() {
        let pos = Position::new_unchecked(3, 5);
        assert_eq!(Position::from_index(pos.to_index()), Some(pos));
        assert!(Position::from_index(64).is_none());
    }
}
