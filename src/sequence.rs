use std::ops::DerefMut;

/// A growable, contiguous sequence used as backing storage.
///
/// [`RowMajor`] stores one sequence of whole records. [`ColumnMajor`] stores
/// one sequence per field. In both cases the sequence only needs to support
/// the handful of operations below plus slice access through [`DerefMut`].
///
/// [`RowMajor`]: crate::RowMajor
/// [`ColumnMajor`]: crate::ColumnMajor
pub trait Sequence: Default + DerefMut<Target = [Self::Item]> {
    /// The element type.
    type Item;

    /// Appends an element to the back of the sequence.
    fn push(&mut self, item: Self::Item);

    /// Removes the last element and returns it, or [`None`] if empty.
    fn pop(&mut self) -> Option<Self::Item>;

    /// Shortens the sequence to `len` elements. Has no effect if the
    /// sequence is already shorter.
    fn truncate(&mut self, len: usize);

    /// Reserves capacity for at least `additional` more elements.
    fn reserve(&mut self, additional: usize);

    /// Resizes the sequence to `new_len`, filling new slots with the values
    /// returned by `f`.
    fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> Self::Item;

    /// The number of elements the sequence can hold without reallocating.
    fn capacity(&self) -> usize;

    /// Shrinks the capacity as close to the length as possible.
    fn shrink_to_fit(&mut self);
}

/// A type constructor for [`Sequence`]s.
///
/// The same family backs every column of a [`ColumnMajor`] table, so it must
/// be able to hold any element type.
///
/// [`ColumnMajor`]: crate::ColumnMajor
pub trait SequenceFamily {
    /// The sequence holding elements of type `E`.
    type Seq<E>: Sequence<Item = E>;
}

/// Backs tables with [`Vec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VecFamily;

impl SequenceFamily for VecFamily {
    type Seq<E> = Vec<E>;
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    #[inline]
    fn push(&mut self, item: T) {
        Vec::push(self, item);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    #[inline]
    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }

    #[inline]
    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional);
    }

    #[inline]
    fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        Vec::resize_with(self, new_len, f);
    }

    #[inline]
    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    fn shrink_to_fit(&mut self) {
        Vec::shrink_to_fit(self);
    }
}

#[cfg(feature = "smallvec")]
mod small {
    use super::{Sequence, SequenceFamily};
    use smallvec::SmallVec;

    /// Backs tables with [`SmallVec`], storing up to `N` elements per
    /// sequence inline.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SmallVecFamily<const N: usize>;

    impl<const N: usize> SequenceFamily for SmallVecFamily<N> {
        type Seq<E> = SmallVec<[E; N]>;
    }

    impl<T, const N: usize> Sequence for SmallVec<[T; N]> {
        type Item = T;

        #[inline]
        fn push(&mut self, item: T) {
            SmallVec::push(self, item);
        }

        #[inline]
        fn pop(&mut self) -> Option<T> {
            SmallVec::pop(self)
        }

        #[inline]
        fn truncate(&mut self, len: usize) {
            SmallVec::truncate(self, len);
        }

        #[inline]
        fn reserve(&mut self, additional: usize) {
            SmallVec::reserve(self, additional);
        }

        #[inline]
        fn resize_with<F>(&mut self, new_len: usize, f: F)
        where
            F: FnMut() -> T,
        {
            SmallVec::resize_with(self, new_len, f);
        }

        #[inline]
        fn capacity(&self) -> usize {
            SmallVec::capacity(self)
        }

        fn shrink_to_fit(&mut self) {
            SmallVec::shrink_to_fit(self);
        }
    }
}

#[cfg(feature = "smallvec")]
pub use small::SmallVecFamily;
