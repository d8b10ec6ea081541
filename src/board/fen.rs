//! FEN parsing and emission.

use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, Piece};
use crate::square::Square;

impl Board {
    /// Resets `self` to the position described by `fen`, a full
    /// 6-field Forsyth-Edwards string. Returns an error describing the
    /// first malformed field; `self` may be left partially mutated on
    /// failure, matching the teacher's existing "reset then repopulate"
    /// convention (callers should treat a `BadFen` error as fatal to the
    /// board they passed in).
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or("FEN missing piece placement field")?;
        let side = fields.next().unwrap_or("w");
        let castling = fields.next().unwrap_or("-");
        let ep = fields.next().unwrap_or("-");
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");

        *self = Board::new_empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(format!(
                "FEN piece placement must have 8 ranks, got {}",
                ranks.len()
            ));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                if file >= 8 {
                    return Err(format!("FEN rank {} overflows the board", rank + 1));
                }
                let (piece, color) = CHAR_TO_PC[ch as usize]
                    .ok_or_else(|| format!("FEN contains unknown piece glyph '{ch}'"))?;
                let sq = Square::from_file_rank(file as u8, rank as u8);
                self.set_bb(color, piece, self.bb(color, piece) | (1u64 << sq.index()));
                file += 1;
            }
            if file != 8 {
                return Err(format!(
                    "FEN rank {} has {} files, expected 8",
                    rank + 1,
                    file
                ));
            }
        }

        self.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("FEN side-to-move must be 'w' or 'b', got '{other}'")),
        };

        self.castling_rights = 0;
        if castling != "-" {
            for ch in castling.chars() {
                self.castling_rights |= match ch {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => return Err(format!("FEN castling field has unknown char '{other}'")),
                };
            }
        }

        self.en_passant = if ep == "-" {
            None
        } else {
            Some(
                ep.parse::<Square>()
                    .map_err(|_| format!("FEN en-passant square '{ep}' is invalid"))?,
            )
        };

        self.halfmove_clock = halfmove
            .parse()
            .map_err(|_| format!("FEN halfmove clock '{halfmove}' is not a number"))?;
        self.fullmove_number = fullmove
            .parse()
            .map_err(|_| format!("FEN fullmove number '{fullmove}' is not a number"))?;

        self.refresh_zobrist();
        self.history.clear();
        self.irrev_stack.clear();
        Ok(())
    }

    /// Emits the current position as a full 6-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank_from_top in 0..8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0u32;
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let idx = (color as usize) * 6 + (piece as usize);
                        placement.push(PC_TO_CHAR[idx]);
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                placement.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        if self.castling_rights & CASTLE_WK != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WQ != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BK != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BQ != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{placement} {side} {castling} {ep} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }
}
