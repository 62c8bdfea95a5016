use std::alloc::Layout;

use thiserror::Error;

/// The global allocator could not provide memory for a new node.
///
/// Every operation that returns this error leaves the list exactly as it was
/// before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("failed to allocate a list node of {} bytes (align {})", .layout.size(), .layout.align())]
pub struct AllocError {
    layout: Layout,
}

impl AllocError {
    pub(crate) fn new(layout: Layout) -> Self {
        AllocError { layout }
    }

    /// Layout of the node allocation that failed.
    pub fn layout(&self) -> Layout {
        self.layout
    }
}
