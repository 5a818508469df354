pub mod common;
pub mod graph;
pub mod matching;
pub mod trace;
pub mod tree;
