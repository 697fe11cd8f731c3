pub mod ensemble;
pub mod lattice;
