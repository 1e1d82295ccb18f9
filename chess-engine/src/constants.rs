//! 引擎常量定义

/// 棋盘边长（8x8）
pub const BOARD_SIZE: usize = 8;

/// 白方底线行（白方在下方）
pub const WHITE_BACK_RANK: u8 = 7;

/// 黑方底线行（黑方在上方）
pub const BLACK_BACK_RANK: u8 = 0;

/// 白方兵的初始行
pub const WHITE_PAWN_RANK: u8 = 6;

/// 黑方兵的初始行
pub const BLACK_PAWN_RANK: u8 = 1;

/// 王的初始列（e 列）
pub const KING_HOME_COL: u8 = 4;

/// 王翼车的初始列（h 列）
pub const KING_SIDE_ROOK_COL: u8 = 7;

/// 后翼车的初始列（a 列）
pub const QUEEN_SIDE_ROOK_COL: u8 = 0;

/// 王翼易位后王所在列（g 列）
pub const KING_SIDE_CASTLE_COL: u8 = 6;

/// 后翼易位后王所在列（c 列）
pub const QUEEN_SIDE_CASTLE_COL: u8 = 2;

/// 王翼易位后车所在列（f 列）
pub const KING_SIDE_ROOK_DEST_COL: u8 = 5;

/// 后翼易位后车所在列（d 列）
pub const QUEEN_SIDE_ROOK_DEST_COL: u8 = 3;
