//! Domain model of a fetched Notion page.

mod block;
pub mod blocks;
pub mod common;

pub use block::Block;
pub use blocks::*;
pub use common::*;
