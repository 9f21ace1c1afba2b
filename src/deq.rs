//! A double-ended queue implemented with a doubly linked list.
//!
//! Elements can be inserted, removed, inspected by position, and removed by
//! value at either [`End`]. Insertion and removal at an end are O(1); indexed
//! access and removal by value scan inward from the chosen end and are O(n).
//!
//! Nodes are kept in an internal pool and link to their neighbors through
//! generation-checked handles, so a broken link is detected instead of
//! dereferenced.

use alloc::string::String;
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{FromIterator, FusedIterator};

use crate::error::DeqError;
use crate::pool::{Handle, Pool};

/// Selects one end of a [`Deq`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum End {
    /// The front of the sequence.
    Head,
    /// The back of the sequence.
    Tail,
}

impl End {
    /// Both ends, head first.
    pub const BOTH: [End; 2] = [End::Head, End::Tail];

    /// Returns the other end.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::End;
    /// assert_eq!(End::Head.opposite(), End::Tail);
    /// assert_eq!(End::Tail.opposite(), End::Head);
    /// ```
    #[inline]
    pub const fn opposite(self) -> End {
        match self {
            End::Head => End::Tail,
            End::Tail => End::Head,
        }
    }

    #[inline(always)]
    const fn slot(self) -> usize {
        self as usize
    }
}

impl Display for End {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            End::Head => "head",
            End::Tail => "tail",
        })
    }
}

struct Node<T> {
    // links[End::Head] points toward the head, links[End::Tail] toward the tail.
    links: [Option<Handle>; 2],
    value: T,
}

impl<T> Node<T> {
    #[inline(always)]
    fn link(&self, toward: End) -> Option<Handle> {
        self.links[toward.slot()]
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn dangling_link(handle: Handle) -> ! {
    panic!("deque link {:?} refers to a released node", handle)
}

/// A double-ended queue implemented with a doubly linked list.
///
/// The `Deq` owns its elements. Values handed out by [`get`](Deq::get) and
/// [`rem`](Deq::rem) are moved back to the caller.
///
/// # Examples
/// ```
/// use linked_deq::Deq;
///
/// let mut deq = Deq::new();
/// deq.head_put("Head 1");
/// deq.head_put("Head 2");
/// deq.tail_put("Tail 1");
/// deq.tail_put("Tail 2");
/// assert_eq!(deq.render(), "Head 2 Head 1 Tail 1 Tail 2");
/// assert_eq!(deq.len(), 4);
///
/// assert_eq!(deq.head_get(), Some("Head 2"));
/// assert_eq!(deq.tail_get(), Some("Tail 2"));
/// assert_eq!(deq.len(), 2);
/// ```
pub struct Deq<T> {
    nodes: Pool<Node<T>>,
    ends: [Option<Handle>; 2],
    len: usize,
}

impl<T> Deq<T> {
    /// Constructs a new, empty `Deq`. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Deq {
            nodes: Pool::new(),
            ends: [None, None],
            len: 0,
        }
    }

    /// Returns the number of elements currently in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` exactly when the deque contains zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` as the new extreme element at `end`.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::{Deq, End};
    /// let mut deq = Deq::new();
    /// deq.put(End::Tail, 2);
    /// deq.put(End::Head, 1);
    /// deq.put(End::Tail, 3);
    /// assert!(deq.iter().eq(&[1, 2, 3]));
    /// ```
    pub fn put(&mut self, end: End, value: T) {
        let outermost = self.ends[end.slot()];

        let mut links = [None, None];
        links[end.opposite().slot()] = outermost;
        let handle = self.nodes.insert(Node { links, value });

        match outermost {
            Some(previous) => self.nodes[previous].links[end.slot()] = Some(handle),
            None => self.ends[end.opposite().slot()] = Some(handle),
        }

        self.ends[end.slot()] = Some(handle);
        self.len += 1;
        debug_assert_eq!(self.len, self.nodes.len());
    }

    /// Removes the extreme element at `end` and returns it, or [`None`] if
    /// the deque is empty.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::{Deq, End};
    /// let mut deq: Deq<i32> = [1, 2, 3].iter().copied().collect();
    /// assert_eq!(deq.get(End::Tail), Some(3));
    /// assert_eq!(deq.get(End::Head), Some(1));
    /// assert_eq!(deq.get(End::Head), Some(2));
    /// assert_eq!(deq.get(End::Tail), None);
    /// ```
    pub fn get(&mut self, end: End) -> Option<T> {
        let handle = self.ends[end.slot()]?;
        Some(self.unlink(handle))
    }

    /// Returns a reference to the element `index` positions inward from
    /// `end`, without removing it.
    ///
    /// This walks `index` links, so it takes O(`index`) time.
    ///
    /// # Errors
    /// Returns [`DeqError::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::{Deq, DeqError, End};
    /// let deq: Deq<char> = "abc".chars().collect();
    /// assert_eq!(deq.ith(End::Head, 0), Ok(&'a'));
    /// assert_eq!(deq.ith(End::Tail, 0), Ok(&'c'));
    /// assert_eq!(deq.ith(End::Tail, 1), Ok(&'b'));
    /// assert_eq!(
    ///     deq.ith(End::Head, 3),
    ///     Err(DeqError::IndexOutOfRange { end: End::Head, index: 3, len: 3 })
    /// );
    /// ```
    pub fn ith(&self, end: End, index: usize) -> Result<&T, DeqError> {
        let handle = self.handle_at(end, index)?;
        Ok(&self.nodes[handle].value)
    }

    /// Returns a mutable reference to the element `index` positions inward
    /// from `end`, without removing it.
    ///
    /// # Errors
    /// Returns [`DeqError::IndexOutOfRange`] if `index >= self.len()`.
    pub fn ith_mut(&mut self, end: End, index: usize) -> Result<&mut T, DeqError> {
        let handle = self.handle_at(end, index)?;
        Ok(&mut self.nodes[handle].value)
    }

    /// Returns a reference to the extreme element at `end`, or [`None`] if
    /// the deque is empty.
    #[inline]
    pub fn peek(&self, end: End) -> Option<&T> {
        self.ends[end.slot()].map(|handle| &self.nodes[handle].value)
    }

    /// Searches inward from `end` for the first element equal to `value`,
    /// removes it and returns it. Returns [`None`] and leaves the deque
    /// unchanged if there is no such element.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::{Deq, End};
    /// let mut deq: Deq<_> = ["A", "B", "C", "D"].iter().copied().collect();
    /// assert_eq!(deq.rem(End::Head, &"B"), Some("B"));
    /// assert_eq!(deq.render(), "A C D");
    /// assert_eq!(deq.rem(End::Tail, &"X"), None);
    /// assert_eq!(deq.len(), 3);
    /// ```
    pub fn rem(&mut self, end: End, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.rem_by(end, |candidate| candidate == value)
    }

    /// Searches inward from `end` for the first element matching `predicate`,
    /// removes it and returns it. Returns [`None`] and leaves the deque
    /// unchanged if no element matches.
    ///
    /// This is the caller-defined equality variant of [`rem`](Deq::rem); for
    /// example, removal by identity can be expressed with [`core::ptr::eq`].
    pub fn rem_by<F>(&mut self, end: End, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let inward = end.opposite();
        let mut cursor = self.ends[end.slot()];
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            cursor = node.link(inward);
            if predicate(&node.value) {
                return Some(self.unlink(handle));
            }
        }

        None
    }

    /// Inserts `value` at the head of the deque.
    #[inline]
    pub fn head_put(&mut self, value: T) {
        self.put(End::Head, value)
    }

    /// Removes and returns the head element, or [`None`] if the deque is empty.
    #[inline]
    pub fn head_get(&mut self) -> Option<T> {
        self.get(End::Head)
    }

    /// Returns the element `index` positions from the head.
    ///
    /// # Errors
    /// Returns [`DeqError::IndexOutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn head_ith(&self, index: usize) -> Result<&T, DeqError> {
        self.ith(End::Head, index)
    }

    /// Removes and returns the first element equal to `value`, searching from
    /// the head.
    #[inline]
    pub fn head_rem(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.rem(End::Head, value)
    }

    /// Inserts `value` at the tail of the deque.
    #[inline]
    pub fn tail_put(&mut self, value: T) {
        self.put(End::Tail, value)
    }

    /// Removes and returns the tail element, or [`None`] if the deque is empty.
    #[inline]
    pub fn tail_get(&mut self) -> Option<T> {
        self.get(End::Tail)
    }

    /// Returns the element `index` positions from the tail.
    ///
    /// # Errors
    /// Returns [`DeqError::IndexOutOfRange`] if `index >= self.len()`.
    #[inline]
    pub fn tail_ith(&self, index: usize) -> Result<&T, DeqError> {
        self.ith(End::Tail, index)
    }

    /// Removes and returns the first element equal to `value`, searching from
    /// the tail.
    #[inline]
    pub fn tail_rem(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.rem(End::Tail, value)
    }

    /// Returns `true` if the deque contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|candidate| candidate == value)
    }

    /// Calls `f` on every element, head to tail, with mutable access to the
    /// element itself. The structure of the deque is not affected.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::Deq;
    /// let mut deq: Deq<String> = vec!["alpha".to_string(), "beta".to_string()]
    ///     .into_iter()
    ///     .collect();
    /// deq.traverse(|s| s.make_ascii_uppercase());
    /// assert_eq!(deq.render(), "ALPHA BETA");
    /// ```
    pub fn traverse<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let mut cursor = self.ends[End::Head.slot()];
        while let Some(handle) = cursor {
            let node = &mut self.nodes[handle];
            f(&mut node.value);
            cursor = node.link(End::Tail);
        }
    }

    /// Returns a head-to-tail iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            ends: self.ends,
            len: self.len,
        }
    }

    /// Removes all elements, dropping them head to tail. The deque remains
    /// usable afterwards.
    pub fn clear(&mut self) {
        while self.head_get().is_some() {}
    }

    /// Releases the deque and every element still in it, head to tail.
    ///
    /// This is equivalent to dropping the deque.
    pub fn destroy(self) {
        log::trace!("destroying deque with {} nodes", self.len);
        drop(self);
    }

    /// Hands every remaining element to `cleanup`, head to tail, then
    /// releases the deque.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::Deq;
    /// let deq: Deq<u32> = (1..=4).collect();
    /// let mut seen = Vec::new();
    /// deq.destroy_with(|v| seen.push(v));
    /// assert_eq!(seen, [1, 2, 3, 4]);
    /// ```
    pub fn destroy_with<F>(mut self, mut cleanup: F)
    where
        F: FnMut(T),
    {
        log::trace!("destroying deque with {} nodes after cleanup", self.len);
        while let Some(value) = self.head_get() {
            cleanup(value);
        }
    }

    /// Renders the elements head to tail, separated by a single space.
    ///
    /// A separator is only inserted once some text has been written, so
    /// empty elements never introduce a leading space. An empty deque renders
    /// as an empty string.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::Deq;
    /// let mut deq = Deq::new();
    /// assert_eq!(deq.render(), "");
    /// deq.tail_put("ALPHA");
    /// deq.tail_put("BETA");
    /// assert_eq!(deq.render(), "ALPHA BETA");
    /// ```
    pub fn render(&self) -> String
    where
        T: AsRef<str>,
    {
        let mut out = String::new();
        for value in self.iter() {
            push_joined(&mut out, value.as_ref());
        }
        out
    }

    /// Renders the text produced by `f` for each element, head to tail,
    /// separated by a single space.
    ///
    /// Each intermediate text is dropped as soon as it has been appended.
    ///
    /// # Examples
    /// ```
    /// use linked_deq::Deq;
    /// let deq: Deq<&str> = ["ALPHA", "BETA"].iter().copied().collect();
    /// assert_eq!(deq.render_with(|s| format!("*{}*", s)), "*ALPHA* *BETA*");
    /// ```
    pub fn render_with<F, S>(&self, mut f: F) -> String
    where
        F: FnMut(&T) -> S,
        S: AsRef<str>,
    {
        let mut out = String::new();
        for value in self.iter() {
            let text = f(value);
            push_joined(&mut out, text.as_ref());
        }
        out
    }

    fn handle_at(&self, end: End, index: usize) -> Result<Handle, DeqError> {
        let out_of_range = DeqError::IndexOutOfRange {
            end,
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }

        let inward = end.opposite();
        let mut cursor = self.ends[end.slot()];
        for _ in 0..index {
            cursor = cursor.and_then(|handle| self.nodes[handle].link(inward));
        }

        cursor.ok_or(out_of_range)
    }

    /// Detaches the node referred to by `handle`, relinks its neighbors and
    /// returns its value.
    fn unlink(&mut self, handle: Handle) -> T {
        let node = match self.nodes.remove(handle) {
            Some(node) => node,
            None => dangling_link(handle),
        };

        // For each side: the neighbor beyond the removed node takes over its
        // link on the other side, or the deque's end moves inward.
        for &side in End::BOTH.iter() {
            let across = node.link(side.opposite());
            match node.link(side) {
                Some(neighbor) => self.nodes[neighbor].links[side.opposite().slot()] = across,
                None => self.ends[side.slot()] = across,
            }
        }

        self.len -= 1;
        debug_assert_eq!(self.len, self.nodes.len());
        node.value
    }
}

// The separator only follows text that has actually been written, so empty
// elements never produce a leading space.
#[inline]
fn push_joined(out: &mut String, text: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(text);
}

/// Forwards to a formatter while remembering whether any text got through.
struct Joined<'a, 'b> {
    f: &'a mut Formatter<'b>,
    wrote_any: bool,
}

impl fmt::Write for Joined<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.wrote_any |= !s.is_empty();
        self.f.write_str(s)
    }
}

impl<T> Default for Deq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Deq<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Deq<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Debug> Debug for Deq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Formats the elements head to tail, separated by a single space, the same
/// way [`render`](Deq::render) does.
impl<T: Display> Display for Deq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = Joined {
            f,
            wrote_any: false,
        };
        for value in self.iter() {
            if out.wrote_any {
                out.f.write_str(" ")?;
            }
            fmt::Write::write_fmt(&mut out, format_args!("{}", value))?;
        }
        Ok(())
    }
}

impl<T: Hash> Hash for Deq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.iter().for_each(|value| value.hash(state));
    }
}

impl<A: PartialEq<B>, B> PartialEq<Deq<B>> for Deq<A> {
    fn eq(&self, other: &Deq<B>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Deq<T> {}

impl<T> Extend<T> for Deq<T> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        iter.into_iter().for_each(|value| self.tail_put(value));
    }
}

impl<T> FromIterator<T> for Deq<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut deq = Deq::new();
        deq.extend(iter);
        deq
    }
}

/// An iterator over the elements of a deque, head to tail.
///
/// This `struct` is created by the [`iter`](Deq::iter) method on [`Deq`].
/// See its documentation for more.
pub struct Iter<'a, T> {
    nodes: &'a Pool<Node<T>>,
    ends: [Option<Handle>; 2],
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    fn step(&mut self, from: End) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }

        let nodes: &'a Pool<Node<T>> = self.nodes;
        let handle = self.ends[from.slot()]?;
        let node = &nodes[handle];
        self.ends[from.slot()] = node.link(from.opposite());
        self.len -= 1;
        Some(&node.value)
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            ends: self.ends,
            len: self.len,
        }
    }
}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<alloc::vec::Vec<_>>()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.step(End::Head)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.step(End::Tail)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over the elements of a deque, head to tail.
///
/// This `struct` is created by the [`into_iter`](Deq::into_iter) method on
/// [`Deq`] (provided by the `IntoIterator` trait).
pub struct IntoIter<T> {
    inner: Deq<T>,
}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.head_get()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.tail_get()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Deq<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Converts the `Deq` into a head-to-tail iterator yielding elements by value.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { inner: self }
    }
}

impl<'a, T> IntoIterator for &'a Deq<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
