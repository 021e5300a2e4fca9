//! Route improvement applied right after a car advances.
//!
//! - [`splice_detours`]: inserts nearby unvisited points into the car's last
//!   leg while the time budget allows

mod detour;

pub use detour::{splice_detours, Splice};
