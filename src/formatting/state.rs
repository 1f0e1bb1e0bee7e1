// src/formatting/state.rs
//! Immutable formatting state threaded through block rendering.

use crate::constants::BLOCK_MAX_RENDER_DEPTH;

/// Where in the block tree the renderer currently is.
///
/// Transitions return new values; a context is never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatContext {
    depth: usize,
    list_number: usize,
}

impl FormatContext {
    /// Creates a context for top-level blocks.
    pub fn new() -> Self {
        Self {
            depth: 0,
            list_number: 1,
        }
    }

    /// Context for the children of the current block.
    pub fn enter_children(self) -> Self {
        Self {
            depth: self.depth + 1,
            list_number: 1,
        }
    }

    /// Checks if the nesting limit has been reached.
    pub fn depth_limit_reached(&self) -> bool {
        self.depth >= BLOCK_MAX_RENDER_DEPTH
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number for the next item of the current numbered run.
    pub fn current_list_number(&self) -> usize {
        self.list_number
    }

    /// Advances to the next item of a numbered run.
    pub fn next_list_number(self) -> Self {
        Self {
            list_number: self.list_number + 1,
            ..self
        }
    }

    /// Restarts numbering, used when a numbered run is interrupted.
    pub fn restart_list(self) -> Self {
        Self {
            list_number: 1,
            ..self
        }
    }
}

impl Default for FormatContext {
    fn default() -> Self {
        Self::new()
    }
}
