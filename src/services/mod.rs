pub mod board;

pub use board::{Board, BoardService};
