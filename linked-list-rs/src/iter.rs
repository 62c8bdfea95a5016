use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::error::AllocError;
use crate::list::SingleLinkedList;
use crate::node::{Link, Node};

/// Where a cursor stands inside a chain.
pub(crate) enum Place<T> {
    /// The list's own head link. It precedes the first element and holds no value.
    BeforeBegin(NonNull<Link<T>>),
    At(NonNull<Node<T>>),
    End,
}

impl<T> Clone for Place<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Place<T> {}

impl<T> PartialEq for Place<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Place::BeforeBegin(a), Place::BeforeBegin(b)) => a == b,
            (Place::At(a), Place::At(b)) => a == b,
            (Place::End, Place::End) => true,
            _ => false,
        }
    }
}
impl<T> Eq for Place<T> {}

impl<T> fmt::Debug for Place<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::BeforeBegin(link) => f.debug_tuple("BeforeBegin").field(link).finish(),
            Place::At(node) => f.debug_tuple("At").field(node).finish(),
            Place::End => f.write_str("End"),
        }
    }
}

// The unsafe accessors below all require that the chain behind the place is
// alive for `'a`, which the cursors guarantee through their list borrow.
impl<T> Place<T> {
    pub(crate) fn first(link: &Link<T>) -> Self {
        link.as_deref()
            .map_or(Place::End, |node| Place::At(NonNull::from(node)))
    }

    pub(crate) fn first_mut(link: &mut Link<T>) -> Self {
        link.as_deref_mut()
            .map_or(Place::End, |node| Place::At(NonNull::from(node)))
    }

    unsafe fn next_link<'a>(self) -> Option<&'a Link<T>> {
        match self {
            // SAFETY: both pointers come from live references into the chain.
            Place::BeforeBegin(link) => Some(link.as_ref()),
            Place::At(node) => Some(&*ptr::addr_of!((*node.as_ptr()).next)),
            Place::End => None,
        }
    }

    unsafe fn next_link_mut<'a>(self) -> Option<&'a mut Link<T>> {
        match self {
            // SAFETY: derived from the exclusive list borrow; only the link
            // field is borrowed, so a value handed out earlier stays valid.
            Place::BeforeBegin(mut link) => Some(link.as_mut()),
            Place::At(node) => Some(&mut *ptr::addr_of_mut!((*node.as_ptr()).next)),
            Place::End => None,
        }
    }

    unsafe fn value<'a>(self) -> &'a T {
        match self {
            // SAFETY: `At` only ever holds a node that is still linked.
            Place::At(node) => &*ptr::addr_of!((*node.as_ptr()).value),
            Place::BeforeBegin(_) => panic!("dereferenced the before-begin position"),
            Place::End => panic!("dereferenced a cursor past the end of the list"),
        }
    }

    unsafe fn value_mut<'a>(self) -> &'a mut T {
        match self {
            // SAFETY: borrows the value field alone, disjoint from `next`.
            Place::At(node) => &mut *ptr::addr_of_mut!((*node.as_ptr()).value),
            Place::BeforeBegin(_) => panic!("dereferenced the before-begin position"),
            Place::End => panic!("dereferenced a cursor past the end of the list"),
        }
    }

    unsafe fn successor(self) -> Self {
        match self.next_link() {
            Some(link) => Place::first(link),
            None => panic!("advanced a cursor past the end of the list"),
        }
    }

    unsafe fn successor_mut(self) -> Self {
        match self.next_link_mut() {
            Some(link) => Place::first_mut(link),
            None => panic!("advanced a cursor past the end of the list"),
        }
    }
}

/// Read-only cursor into a [`SingleLinkedList`].
///
/// A cursor stands on an element, on the before-begin position, or past the
/// end. It is `Copy`, compares by the node it refers to, and is also a plain
/// [`Iterator`] over the remaining elements.
pub struct Iter<'a, T> {
    place: Place<T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(place: Place<T>) -> Self {
        Iter {
            place,
            _marker: PhantomData,
        }
    }

    pub fn is_end(&self) -> bool {
        self.place == Place::End
    }

    pub fn is_before_begin(&self) -> bool {
        matches!(self.place, Place::BeforeBegin(_))
    }

    /// The element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics at the end position and at the before-begin position.
    pub fn get(&self) -> &'a T {
        // SAFETY: the list is borrowed for 'a, so no node can be freed meanwhile.
        unsafe { self.place.value() }
    }

    /// Moves to the next position and returns the cursor for chaining.
    ///
    /// # Panics
    ///
    /// Panics when the cursor is already past the end.
    pub fn advance(&mut self) -> &mut Self {
        // SAFETY: as in `get`.
        self.place = unsafe { self.place.successor() };
        self
    }

    /// Moves to the next position and returns where the cursor stood before.
    pub fn post_advance(&mut self) -> Self {
        let prev = *self;
        self.advance();
        prev
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Iter<'_, T> {}

impl<T> Default for Iter<'_, T> {
    fn default() -> Self {
        Iter::new(Place::End)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_before_begin() {
            self.advance();
        }
        match self.place {
            Place::At(_) => Some(self.post_advance().get()),
            _ => None,
        }
    }
}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.place).finish()
    }
}

// SAFETY: an `Iter` only ever hands out `&T`, like `&SingleLinkedList<T>`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

/// Mutable cursor into a [`SingleLinkedList`].
///
/// Besides read/write access to the element under it, this cursor splices
/// nodes in and out right after its position. It holds the list's exclusive
/// borrow, so no other cursor can observe a node it destroys.
pub struct IterMut<'a, T> {
    place: Place<T>,
    len: Option<&'a mut usize>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(place: Place<T>, len: &'a mut usize) -> Self {
        IterMut {
            place,
            len: Some(len),
            _marker: PhantomData,
        }
    }

    fn reborrow(&mut self, place: Place<T>) -> IterMut<'_, T> {
        IterMut {
            place,
            len: self.len.as_deref_mut(),
            _marker: PhantomData,
        }
    }

    pub fn is_end(&self) -> bool {
        self.place == Place::End
    }

    pub fn is_before_begin(&self) -> bool {
        matches!(self.place, Place::BeforeBegin(_))
    }

    /// # Panics
    ///
    /// Panics at the end position and at the before-begin position.
    pub fn get(&self) -> &T {
        // SAFETY: the list is exclusively borrowed by this cursor.
        unsafe { self.place.value() }
    }

    /// # Panics
    ///
    /// Panics at the end position and at the before-begin position.
    pub fn get_mut(&mut self) -> &mut T {
        // SAFETY: `&mut self` keeps every other access through this cursor out.
        unsafe { self.place.value_mut() }
    }

    /// Consumes the cursor, keeping the element borrowed for the whole list borrow.
    pub fn into_mut(self) -> &'a mut T {
        // SAFETY: the cursor is consumed, so the reference is the only access left.
        unsafe { self.place.value_mut() }
    }

    /// A read-only view of the current position.
    pub fn as_iter(&self) -> Iter<'_, T> {
        Iter::new(self.place)
    }

    /// # Panics
    ///
    /// Panics when the cursor is already past the end.
    pub fn advance(&mut self) -> &mut Self {
        // SAFETY: the list is exclusively borrowed by this cursor.
        self.place = unsafe { self.place.successor_mut() };
        self
    }

    /// Moves to the next position and returns a read-only cursor to where
    /// this one stood before.
    pub fn post_advance(&mut self) -> Iter<'_, T> {
        let prev = self.place;
        self.advance();
        Iter::new(prev)
    }

    /// Splices `value` in right after the cursor and returns a cursor to it.
    ///
    /// Past the end this does nothing and returns an end cursor. When the
    /// node cannot be allocated the list is left untouched.
    pub fn insert_after(&mut self, value: T) -> Result<IterMut<'_, T>, AllocError> {
        // SAFETY: the slot is used before the cursor moves or is dropped.
        let Some(slot) = (unsafe { self.place.next_link_mut() }) else {
            return Ok(IterMut::default());
        };
        let mut node = Node::try_boxed(value)?;
        node.next = slot.take();
        *slot = Some(node);
        let inserted = Place::first_mut(slot);
        self.resize(|len| len + 1);
        Ok(self.reborrow(inserted))
    }

    /// Unlinks the node right after the cursor and returns its value.
    ///
    /// Returns `None` past the end or when the cursor is on the last element.
    pub fn remove_after(&mut self) -> Option<T> {
        // SAFETY: as in `insert_after`.
        let slot = unsafe { self.place.next_link_mut() }?;
        let mut removed = slot.take()?;
        *slot = removed.next.take();
        self.resize(|len| len - 1);
        Some(removed.value)
    }

    /// Destroys the node right after the cursor and returns a cursor to the
    /// node that follows the cursor now.
    ///
    /// Past the end, or on the last element, this does nothing and returns an
    /// end cursor.
    pub fn erase_after(&mut self) -> IterMut<'_, T> {
        drop(self.remove_after());
        // SAFETY: as in `insert_after`.
        let after = match unsafe { self.place.next_link_mut() } {
            Some(slot) => Place::first_mut(slot),
            None => Place::End,
        };
        self.reborrow(after)
    }

    fn resize(&mut self, f: impl FnOnce(usize) -> usize) {
        if let Some(len) = self.len.as_deref_mut() {
            *len = f(*len);
        }
    }
}

impl<T> Default for IterMut<'_, T> {
    fn default() -> Self {
        IterMut {
            place: Place::End,
            len: None,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_before_begin() {
            self.advance();
        }
        match self.place {
            Place::At(_) => {
                let current = self.place;
                self.advance();
                // SAFETY: the cursor has moved past `current` and never comes back,
                // so this is the only reference to its value.
                Some(unsafe { current.value_mut() })
            }
            _ => None,
        }
    }
}
impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.place).finish()
    }
}

// SAFETY: an `IterMut` acts as `&mut SingleLinkedList<T>`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    fn from(cursor: IterMut<'a, T>) -> Self {
        Iter::new(cursor.place)
    }
}

impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.place == other.place
    }
}
impl<T> Eq for Iter<'_, T> {}

impl<T> PartialEq<IterMut<'_, T>> for Iter<'_, T> {
    fn eq(&self, other: &IterMut<'_, T>) -> bool {
        self.place == other.place
    }
}

impl<T> PartialEq for IterMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.place == other.place
    }
}
impl<T> Eq for IterMut<'_, T> {}

impl<T> PartialEq<Iter<'_, T>> for IterMut<'_, T> {
    fn eq(&self, other: &Iter<'_, T>) -> bool {
        self.place == other.place
    }
}

/// Owning iterator, draining the list from the front.
#[derive(Debug)]
pub struct IntoIter<T>(pub(crate) SingleLinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}
impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod test {
    use crate::{slist, SingleLinkedList};

    use super::*;

    #[test]
    fn default_is_end() {
        let l = slist![1, 2];
        assert_eq!(Iter::<i32>::default(), l.end());
        assert!(l.end().is_end());
        assert_ne!(l.begin(), l.end());
        assert_ne!(l.before_begin(), l.begin());
        assert_eq!(IterMut::<i32>::default(), Iter::<i32>::default());
    }

    #[test]
    fn advance() {
        let l = slist![1, 2, 3];
        let mut i = l.before_begin();
        assert!(i.is_before_begin());
        assert_eq!(*i.advance().get(), 1);
        assert_eq!(i, l.begin());
        assert_eq!(*i.post_advance().get(), 1);
        assert_eq!(*i.get(), 2);
        i.advance().advance();
        assert!(i.is_end());
    }

    #[test]
    fn iterate() {
        let l = slist![1, 2, 3];
        assert_eq!(l.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(l.before_begin().count(), 3);
        let mut i = l.begin();
        i.advance();
        assert_eq!(i.collect::<Vec<_>>(), vec![&2, &3]);
    }

    #[test]
    #[should_panic(expected = "past the end")]
    fn deref_end() {
        let l: SingleLinkedList<i32> = SingleLinkedList::new();
        l.end().get();
    }

    #[test]
    #[should_panic(expected = "before-begin")]
    fn deref_before_begin() {
        let l = slist![1];
        l.before_begin().get();
    }

    #[test]
    #[should_panic(expected = "past the end")]
    fn advance_end() {
        let l = slist![1];
        let mut i = l.begin();
        i.advance();
        i.advance();
    }

    #[test]
    fn iter_mut() {
        let mut l = slist![1, 2, 3];
        for x in l.iter_mut() {
            *x *= 10;
        }
        assert_eq!(l, slist![10, 20, 30]);

        let mut i = l.begin_mut();
        *i.get_mut() = 0;
        assert_eq!(*i.post_advance().get(), 0);
        assert_eq!(*i.get(), 20);
        *i.into_mut() += 1;
        assert_eq!(l, slist![0, 21, 30]);
    }

    #[test]
    fn mut_to_shared() {
        let mut l = slist![1, 2];
        let mut i = l.begin_mut();
        i.advance();
        assert_eq!(*i.as_iter().get(), 2);
        let i: Iter<'_, i32> = i.into();
        assert_eq!(*i.get(), 2);
    }

    #[test]
    fn insert_after() {
        let mut l = slist![1, 3];
        {
            let mut i = l.begin_mut();
            let inserted = i.insert_after(2).unwrap();
            assert_eq!(*inserted.get(), 2);
        }
        assert_eq!(l, slist![1, 2, 3]);
        assert_eq!(l.len(), 3);

        l.before_begin_mut().insert_after(0).unwrap();
        assert_eq!(l, slist![0, 1, 2, 3]);
        assert_eq!(l.len(), 4);
    }

    #[test]
    fn chained_edits_track_len() {
        let mut l = slist![10];
        {
            let mut i = l.before_begin_mut();
            let mut first = i.insert_after(1).unwrap();
            let mut second = first.insert_after(2).unwrap();
            second.insert_after(3).unwrap();
            let mut after = first.erase_after();
            assert_eq!(*after.get(), 3);
            after.erase_after();
        }
        assert_eq!(l, slist![1, 3]);
        assert_eq!(l.len(), 2);
        assert_eq!(l.iter().count(), l.len());
    }

    #[test]
    fn insert_after_end() {
        let mut l = slist![1];
        {
            let mut i = l.begin_mut();
            i.advance();
            assert!(i.insert_after(2).unwrap().is_end());
        }
        assert!(l.end_mut().insert_after(3).unwrap().is_end());
        assert!(IterMut::default().insert_after(4).unwrap().is_end());
        assert_eq!(l, slist![1]);
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn erase_after() {
        let mut l = slist![1, 2, 3, 4];
        {
            let mut i = l.begin_mut();
            let after = i.erase_after();
            assert_eq!(*after.get(), 3);
        }
        assert_eq!(l, slist![1, 3, 4]);
        {
            let mut i = l.begin_mut();
            i.advance();
            assert!(i.erase_after().is_end());
        }
        assert_eq!(l, slist![1, 3]);
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn erase_after_last() {
        let mut l = slist![1, 2];
        {
            let mut i = l.begin_mut();
            i.advance();
            assert!(i.erase_after().is_end());
            i.advance();
            assert!(i.erase_after().is_end());
        }
        assert_eq!(l, slist![1, 2]);
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn remove_after() {
        let mut l = slist!["a".to_string(), "b".to_string()];
        let mut i = l.before_begin_mut();
        assert_eq!(i.remove_after().as_deref(), Some("a"));
        assert_eq!(i.remove_after().as_deref(), Some("b"));
        assert_eq!(i.remove_after(), None);
        assert!(l.is_empty());
    }

    #[test]
    fn into_iter() {
        let l = slist![1, 2, 3];
        let mut i = l.into_iter();
        assert_eq!(i.len(), 3);
        assert_eq!(i.next(), Some(1));
        assert_eq!(i.next(), Some(2));
        assert_eq!(i.next(), Some(3));
        assert_eq!(i.next(), None);
    }
}
