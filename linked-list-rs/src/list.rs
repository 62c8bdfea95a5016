use std::alloc::handle_alloc_error;
use std::fmt;
use std::iter;
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::AllocError;
use crate::iter::{IntoIter, Iter, IterMut, Place};
use crate::node::{Link, Node};

/// A singly linked list with a before-begin position.
///
/// Every node is owned through the link of its predecessor, the first one
/// through `head`. `head` itself is the before-begin position: it has no
/// value, only the link to the first element.
pub struct SingleLinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> SingleLinkedList<T> {
    pub fn new() -> Self {
        SingleLinkedList { head: None, len: 0 }
    }

    /// Builds a list holding the items of `iter` in the same order.
    ///
    /// If a node cannot be allocated, the nodes built so far are destroyed
    /// before the error is returned.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, AllocError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::new();
        let mut tail = &mut list.head;
        for value in iter {
            tail = &mut tail.insert(Node::try_boxed(value)?).next;
            list.len += 1;
        }
        log::trace!("built a list of {} nodes", list.len);
        Ok(list)
    }

    /// Builds a list from the elements in `[first, last)` of another list.
    pub fn try_from_range(mut first: Iter<'_, T>, last: Iter<'_, T>) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_iter(iter::from_fn(|| {
            if first == last {
                return None;
            }
            first.next().cloned()
        }))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.as_mut().map(|node| &mut node.value)
    }

    /// Adds `value` as the new first element.
    pub fn push_front(&mut self, value: T) -> Result<(), AllocError> {
        self.before_begin_mut().insert_after(value).map(drop)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.before_begin_mut().remove_after()
    }

    pub fn clear(&mut self) {
        let mut head = self.head.take();
        while let Some(mut node) = head {
            head = node.next.take();
        }
        if self.len > 0 {
            log::trace!("cleared {} nodes", self.len);
        }
        self.len = 0;
    }

    /// Exchanges the contents of two lists without touching any node.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.head, &mut other.head);
        mem::swap(&mut self.len, &mut other.len);
    }

    pub fn before_begin(&self) -> Iter<'_, T> {
        Iter::new(Place::BeforeBegin(NonNull::from(&self.head)))
    }

    pub fn begin(&self) -> Iter<'_, T> {
        Iter::new(Place::first(&self.head))
    }

    pub fn end(&self) -> Iter<'_, T> {
        Iter::default()
    }

    pub fn before_begin_mut(&mut self) -> IterMut<'_, T> {
        let SingleLinkedList { head, len } = self;
        IterMut::new(Place::BeforeBegin(NonNull::from(head)), len)
    }

    pub fn begin_mut(&mut self) -> IterMut<'_, T> {
        let SingleLinkedList { head, len } = self;
        IterMut::new(Place::first_mut(head), len)
    }

    pub fn end_mut(&mut self) -> IterMut<'_, T> {
        IterMut::default()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.begin()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.begin_mut()
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_iter(self.iter().cloned())
    }

    /// Replaces the contents with a deep copy of `source`.
    ///
    /// Lists sharing the same first node are left alone. On failure `self`
    /// keeps its previous contents.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), AllocError>
    where
        T: Clone,
    {
        if ptr::eq(self.head_ptr(), source.head_ptr()) {
            return Ok(());
        }
        let mut copy = source.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }

    fn head_ptr(&self) -> *const Node<T> {
        self.head.as_deref().map_or(ptr::null(), |node| node as *const _)
    }
}

impl<T> Drop for SingleLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for SingleLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SingleLinkedList<T> {
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| handle_alloc_error(err.layout()))
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            handle_alloc_error(err.layout());
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SingleLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T> FromIterator<T> for SingleLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::try_from_iter(iter).unwrap_or_else(|err| handle_alloc_error(err.layout()))
    }
}

impl<T, const N: usize> From<[T; N]> for SingleLinkedList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for SingleLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a SingleLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SingleLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
