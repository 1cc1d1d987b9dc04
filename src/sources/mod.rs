pub mod bra;
pub mod massifs;
