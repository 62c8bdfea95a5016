//! A singly linked list with O(1) insertion and removal after any position.
//!
//! Positional edits go through cursors. [`SingleLinkedList::before_begin_mut`]
//! stands before the first element, so inserting or erasing at the front is
//! just another "after this position" edit:
//!
//! ```
//! use single_linked_list::{slist, SingleLinkedList};
//!
//! let mut l = slist![2, 4];
//! l.before_begin_mut().insert_after(1)?;
//! let mut at = l.begin_mut();
//! at.advance();
//! at.insert_after(3)?;
//! assert_eq!(l, slist![1, 2, 3, 4]);
//! # Ok::<(), single_linked_list::AllocError>(())
//! ```

mod cmp;
mod error;
mod iter;
mod list;
mod node;
#[cfg(feature = "serde")]
mod serde_impl;

pub use error::AllocError;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::SingleLinkedList;

/// Exchanges the contents of two lists in O(1).
pub fn swap<T>(a: &mut SingleLinkedList<T>, b: &mut SingleLinkedList<T>) {
    a.swap(b);
}

/// Builds a [`SingleLinkedList`] from its elements, front first.
///
/// ```
/// let l = single_linked_list::slist![1, 2, 3];
/// assert_eq!(l.front(), Some(&1));
/// ```
#[macro_export]
macro_rules! slist {
    () => {
        $crate::SingleLinkedList::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::SingleLinkedList::from([$($value),+])
    };
}
