//! Reading and writing particle data.
//!
//! Positions are exchanged as CSV with an `x,y,z` header; evaluated forces are written
//! with one row per atom.

pub mod positions;
