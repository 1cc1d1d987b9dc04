//! BRA (Bulletin de Risque d'Avalanche) XML source.

pub mod parser;
