pub mod brief;
pub mod export;
pub mod variant;
