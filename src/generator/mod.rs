pub mod agents;
pub mod chat;
pub mod context;
pub mod fallback;
pub mod outlet;
pub mod parse;
pub mod stages;
pub mod workflow;
