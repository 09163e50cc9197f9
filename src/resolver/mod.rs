pub mod error;
pub mod identifier;
pub mod layers;
pub mod resolve;
