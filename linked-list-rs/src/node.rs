use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::AllocError;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Link<T>,
}

impl<T> Node<T> {
    /// Allocates an unlinked node, reporting failure instead of aborting.
    pub(crate) fn try_boxed(value: T) -> Result<Box<Self>, AllocError> {
        let layout = Layout::new::<Self>();
        // SAFETY: a node always carries its link, so the layout is never zero-sized.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Self>();
        let Some(raw) = NonNull::new(raw) else {
            log::warn!("node allocation of {} bytes failed", layout.size());
            return Err(AllocError::new(layout));
        };
        // SAFETY: `raw` is a fresh, uninitialized block of `layout`, which is
        // exactly what `Box::from_raw` expects from the global allocator.
        unsafe {
            raw.as_ptr().write(Node { value, next: None });
            Ok(Box::from_raw(raw.as_ptr()))
        }
    }
}
