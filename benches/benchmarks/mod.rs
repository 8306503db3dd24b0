pub mod alias;
pub mod pchb;
pub mod phase;
