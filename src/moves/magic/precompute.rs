//! Builds the rook/bishop magic bitboard tables at process startup.
//!
//! Magic numbers are found by trial (per spec: "may be searched each run or
//! committed as constants — either is conformant"). This crate searches each
//! run, seeded deterministically when the `deterministic_magic` feature is
//! enabled so tests and perft runs are reproducible across machines.

use super::attacks::{bishop_attacks_per_square, rook_attacks_per_square};
use super::search::find_magic_number_for_square;
use super::structs::{BishopMagicTables, MagicEntry, MagicTables, RookMagicTables};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy)]
pub enum MagicTableSeed {
    Fixed(u64),
    Random,
}

fn relevant_rook_mask(square: usize) -> u64 {
    let rank = square / 8;
    let file = square % 8;
    let mut mask = 0u64;
    for r in (rank + 1)..7 {
        mask |= 1 << (r * 8 + file);
    }
    for r in 1..rank {
        mask |= 1 << (r * 8 + file);
    }
    for f in (file + 1)..7 {
        mask |= 1 << (rank * 8 + f);
    }
    for f in 1..file {
        mask |= 1 << (rank * 8 + f);
    }
    mask
}

fn relevant_bishop_mask(square: usize) -> u64 {
    let rank = square as isize / 8;
    let file = square as isize % 8;
    let mut mask = 0u64;
    for (dr, df) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
        let mut r = rank + dr;
        let mut f = file + df;
        while (1..7).contains(&r) && (1..7).contains(&f) {
            mask |= 1 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Enumerates every occupancy subset of `mask` via the standard
/// carry-rippler trick.
fn subsets_of(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset: u64 = 0;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

fn build_entry<R: rand::RngCore>(
    square: usize,
    mask: u64,
    attacks_fn: impl Fn(usize, u64) -> u64,
    rng: &mut R,
) -> MagicEntry {
    let shift = 64 - mask.count_ones();
    let blockers = subsets_of(mask);
    let attacks: Vec<u64> = blockers.iter().map(|&b| attacks_fn(square, b)).collect();

    let magic = find_magic_number_for_square(&blockers, &attacks, shift, rng)
        .unwrap_or_else(|e| panic!("magic search failed for square {square}: {e}"));

    let table_size = 1usize << mask.count_ones();
    let mut table = vec![0u64; table_size];
    for (&b, &a) in blockers.iter().zip(attacks.iter()) {
        let index = ((b.wrapping_mul(magic)) >> shift) as usize;
        table[index] = a;
    }

    MagicEntry {
        magic,
        shift,
        mask,
        table: table.into_boxed_slice(),
    }
}

pub fn generate_magic_tables(seed: MagicTableSeed) -> Result<MagicTables, String> {
    let mut rng = match seed {
        MagicTableSeed::Fixed(s) => StdRng::seed_from_u64(s),
        MagicTableSeed::Random => StdRng::from_rng(&mut rand::rng()),
    };

    let mut rook_entries = Vec::with_capacity(64);
    let mut bishop_entries = Vec::with_capacity(64);

    for square in 0..64 {
        let rmask = relevant_rook_mask(square);
        rook_entries.push(build_entry(
            square,
            rmask,
            rook_attacks_per_square,
            &mut rng,
        ));

        let bmask = relevant_bishop_mask(square);
        bishop_entries.push(build_entry(
            square,
            bmask,
            bishop_attacks_per_square,
            &mut rng,
        ));
    }

    Ok(MagicTables {
        rook: RookMagicTables {
            entries: rook_entries,
        },
        bishop: BishopMagicTables {
            entries: bishop_entries,
        },
    })
}
