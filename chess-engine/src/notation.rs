//! 代数记谱生成

use crate::board::Wing;
use crate::piece::{Piece, PieceType, Position};

/// 记谱生成器
///
/// 生成标准代数记谱的基本形式。同类棋子到达同一格的起点消歧义
/// （如 Nbd2）暂未实现。
pub struct Notation;

impl Notation {
    /// 生成一步已完成走法的代数记谱
    ///
    /// 易位记为 O-O / O-O-O；兵的吃子以起点列字母开头；
    /// 升变以 =Q 等后缀表示；将军追加 +，将死追加 #。
    pub fn algebraic(
        piece: Piece,
        from: Position,
        to: Position,
        was_capture: bool,
        castled: Option<Wing>,
        promoted: Option<PieceType>,
        is_check: bool,
        is_checkmate: bool,
    ) -> String {
        if let Some(wing) = castled {
            let base = match wing {
                Wing::KingSide => "O-O",
                Wing::QueenSide => "O-O-O",
            };
            return format!("{}{}", base, Self::status_suffix(is_check, is_checkmate));
        }

        let mut notation = String::new();
        match piece.piece_type.letter() {
            Some(letter) => {
                notation.push(letter);
                if was_capture {
                    notation.push('x');
                }
            }
            None => {
                // 兵不写字母，吃子时以起点列开头
                if was_capture {
                    notation.push(from.file_char());
                    notation.push('x');
                }
            }
        }
        notation.push(to.file_char());
        notation.push(to.rank_char());
        if let Some(promoted) = promoted {
            if let Some(letter) = promoted.letter() {
                notation.push('=');
                notation.push(letter);
            }
        }
        notation.push_str(Self::status_suffix(is_check, is_checkmate));
        notation
    }

    /// 将军/将死后缀（将死优先）
    pub fn status_suffix(is_check: bool, is_checkmate: bool) -> &'static str {
        if is_checkmate {
            "#"
        } else if is_check {
            "+"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Side;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    #[test]
    fn test_pawn_push() {
        let notation = Notation::algebraic(
            Piece::new(PieceType::Pawn, Side::White),
            pos(6, 4),
            pos(4, 4),
            false,
            None,
            None,
            false,
            false,
        );
        assert_eq!(notation, "e4");
    }

    #[test]
    fn test_pawn_capture_has_file_prefix() {
        let notation = Notation::algebraic(
            Piece::new(PieceType::Pawn, Side::White),
            pos(3, 4),
            pos(2, 3),
            true,
            None,
            None,
            false,
            false,
        );
        assert_eq!(notation, "exd6");
    }

    #[test]
    fn test_piece_move_and_capture() {
        let notation = Notation::algebraic(
            Piece::new(PieceType::Knight, Side::White),
            pos(7, 6),
            pos(5, 5),
            false,
            None,
            None,
            false,
            false,
        );
        assert_eq!(notation, "Nf3");

        let notation = Notation::algebraic(
            Piece::new(PieceType::Queen, Side::Black),
            pos(4, 7),
            pos(6, 5),
            true,
            None,
            None,
            false,
            false,
        );
        assert_eq!(notation, "Qxf2");
    }

    #[test]
    fn test_castling_notation() {
        let king = Piece::new(PieceType::King, Side::White);
        assert_eq!(
            Notation::algebraic(king, pos(7, 4), pos(7, 6), false, Some(Wing::KingSide), None, false, false),
            "O-O"
        );
        assert_eq!(
            Notation::algebraic(king, pos(7, 4), pos(7, 2), false, Some(Wing::QueenSide), None, true, false),
            "O-O-O+"
        );
    }

    #[test]
    fn test_promotion_suffix() {
        let notation = Notation::algebraic(
            Piece::new(PieceType::Pawn, Side::White),
            pos(1, 4),
            pos(0, 4),
            false,
            None,
            Some(PieceType::Queen),
            false,
            false,
        );
        assert_eq!(notation, "e8=Q");
    }

    #[test]
    fn test_checkmate_beats_check() {
        let notation = Notation::algebraic(
            Piece::new(PieceType::Queen, Side::Black),
            pos(0, 3),
            pos(4, 7),
            false,
            None,
            None,
            true,
            true,
        );
        assert_eq!(notation, "Qh4#");
    }
}
