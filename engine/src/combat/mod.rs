pub mod duel;
pub mod resolve;
