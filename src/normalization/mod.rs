pub mod label;
pub mod similar;

pub use label::{normalize, normalize_opt};
pub use similar::{find_similar, MatchOptions};
