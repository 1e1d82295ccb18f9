//! 错误类型定义

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 事件被拒绝的原因
///
/// 所有错误都是非致命的：被拒绝的事件除了在上下文中记录错误外不改变任何状态，
/// 调用方重新发送修正后的事件即可。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChessError {
    /// 选择了空格或对方棋子
    #[error("cannot select opponent's piece or empty square")]
    SelectionInvalid,

    /// 升变未完成时收到其他事件
    #[error("choose a promotion piece first")]
    PromotionPending,

    /// 目标格不在合法走法列表中
    #[error("that move is not allowed")]
    IllegalMove,

    /// 尚未选中棋子
    #[error("no piece selected")]
    NoSelection,

    /// 升变目标不合法（不能选王或兵）
    #[error("cannot promote to that piece")]
    InvalidPromotionPiece,

    /// 没有等待升变的兵时收到升变事件
    #[error("no promotion is pending")]
    NoPromotionPending,

    /// 对局已结束
    #[error("game is already over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ChessError::SelectionInvalid.to_string(),
            "cannot select opponent's piece or empty square"
        );
        assert_eq!(ChessError::IllegalMove.to_string(), "that move is not allowed");
        assert_eq!(
            ChessError::PromotionPending.to_string(),
            "choose a promotion piece first"
        );
    }
}
