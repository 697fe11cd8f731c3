pub mod evaluate;
pub mod lattice;
