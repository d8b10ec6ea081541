//! Builds (or loads) the process-wide magic bitboard tables once at startup.

use super::precompute::{MagicTableSeed, generate_magic_tables};
use super::structs::MagicTables;
use once_cell::sync::OnceCell;

static MAGIC_TABLES: OnceCell<MagicTables> = OnceCell::new();

fn build() -> MagicTables {
    let seed = if cfg!(feature = "deterministic_magic") {
        MagicTableSeed::Fixed(0x4D41_4749_4321)
    } else {
        MagicTableSeed::Random
    };
    generate_magic_tables(seed).expect("magic table generation must succeed at startup")
}

/// Returns the lazily-initialized, process-wide magic tables. Safe to call
/// from any number of readers; construction happens once.
pub fn load_magic_tables() -> MagicTables {
    MAGIC_TABLES.get_or_init(build).clone()
}
