//! Music-theory value types: spelled pitches and directed intervals.
//!
//! Two coordinates describe a pitch. The staff position counts diatonic steps
//! from middle C and decides where a note head sits; the chromatic number
//! counts semitones and decides how it sounds. Transposition moves along both
//! and picks the accidental that reconciles them.

pub mod consts;
mod interval;
mod pitch;

pub use interval::{Direction, Interval, Quality};
pub use pitch::{Accidental, Letter, Pitch, Transposed};
