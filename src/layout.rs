use crate::{AsRecordRef, Record, Sequence, SequenceFamily};
use std::iter::FusedIterator;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::RowMajor {}
    impl Sealed for super::ColumnMajor {}
}

/// Chooses how a [`Table`] arranges its records in memory.
///
/// A layout fixes the backing storage type and the views handed out on
/// access, and supplies the primitives a table delegates to. The layout is
/// a type parameter, so every call resolves statically to the matching
/// implementation and no layout tag is inspected at run time.
///
/// The trait is sealed: [`RowMajor`] and [`ColumnMajor`] are the only
/// layouts.
///
/// Indices passed to [`Layout::get`] and [`Layout::get_mut`] are checked;
/// out-of-range access yields [`None`].
///
/// [`Table`]: crate::Table
pub trait Layout: sealed::Sealed {
    /// The storage owned by a table of `T` backed by sequences from `S`.
    type Storage<T: Record, S: SequenceFamily>: Default;

    /// A shared view of one stored record.
    type Ref<'a, T: Record + 'a>: Copy + AsRecordRef<Item = T>;

    /// A mutable view of one stored record.
    type RefMut<'a, T: Record + 'a>: AsRecordRef<Item = T>;

    /// Iterates over shared views in storage order.
    type Iter<'a, T: Record + 'a>: DoubleEndedIterator<Item = Self::Ref<'a, T>>
        + ExactSizeIterator
        + FusedIterator;

    /// Iterates over mutable views in storage order.
    type IterMut<'a, T: Record + 'a>: DoubleEndedIterator<Item = Self::RefMut<'a, T>>
        + ExactSizeIterator
        + FusedIterator;

    /// The number of records in `storage`.
    fn len<T: Record, S: SequenceFamily>(storage: &Self::Storage<T, S>) -> usize;

    /// Returns a shared view of the record at `index`.
    fn get<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a Self::Storage<T, S>,
        index: usize,
    ) -> Option<Self::Ref<'a, T>>;

    /// Returns a mutable view of the record at `index`.
    fn get_mut<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a mut Self::Storage<T, S>,
        index: usize,
    ) -> Option<Self::RefMut<'a, T>>;

    /// Appends one record.
    fn push<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, record: T);

    /// Removes and returns the last record.
    fn pop<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>) -> Option<T>;

    /// Grows or shrinks `storage` to `new_len` records. New records are
    /// `T::default()`.
    fn resize<T: Record + Default, S: SequenceFamily>(
        storage: &mut Self::Storage<T, S>,
        new_len: usize,
    );

    /// Drops every record past `len`.
    fn truncate<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, len: usize);

    /// Reserves room for at least `additional` more records.
    fn reserve<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, additional: usize);

    /// The number of records `storage` can hold without reallocating.
    fn capacity<T: Record, S: SequenceFamily>(storage: &Self::Storage<T, S>) -> usize;

    /// Shrinks the capacity of `storage` to its length.
    fn shrink_to_fit<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>);

    /// Iterates over shared views of all records.
    fn iter<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a Self::Storage<T, S>,
    ) -> Self::Iter<'a, T>;

    /// Iterates over mutable views of all records.
    fn iter_mut<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a mut Self::Storage<T, S>,
    ) -> Self::IterMut<'a, T>;
}

/// Array of structures: each record is stored contiguously in a single
/// sequence, and views are plain references to the stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

/// Structure of arrays: each field is stored in its own sequence, and views
/// are assembled from one slot per sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColumnMajor;

impl Layout for RowMajor {
    type Storage<T: Record, S: SequenceFamily> = S::Seq<T>;
    type Ref<'a, T: Record + 'a> = &'a T;
    type RefMut<'a, T: Record + 'a> = &'a mut T;
    type Iter<'a, T: Record + 'a> = std::slice::Iter<'a, T>;
    type IterMut<'a, T: Record + 'a> = std::slice::IterMut<'a, T>;

    #[inline]
    fn len<T: Record, S: SequenceFamily>(storage: &Self::Storage<T, S>) -> usize {
        storage.len()
    }

    #[inline]
    fn get<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a Self::Storage<T, S>,
        index: usize,
    ) -> Option<Self::Ref<'a, T>> {
        storage.get(index)
    }

    #[inline]
    fn get_mut<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a mut Self::Storage<T, S>,
        index: usize,
    ) -> Option<Self::RefMut<'a, T>> {
        storage.get_mut(index)
    }

    #[inline]
    fn push<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, record: T) {
        Sequence::push(storage, record);
    }

    #[inline]
    fn pop<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>) -> Option<T> {
        Sequence::pop(storage)
    }

    fn resize<T: Record + Default, S: SequenceFamily>(
        storage: &mut Self::Storage<T, S>,
        new_len: usize,
    ) {
        Sequence::resize_with(storage, new_len, T::default);
    }

    fn truncate<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, len: usize) {
        Sequence::truncate(storage, len);
    }

    fn reserve<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, additional: usize) {
        Sequence::reserve(storage, additional);
    }

    #[inline]
    fn capacity<T: Record, S: SequenceFamily>(storage: &Self::Storage<T, S>) -> usize {
        Sequence::capacity(storage)
    }

    fn shrink_to_fit<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>) {
        Sequence::shrink_to_fit(storage);
    }

    #[inline]
    fn iter<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a Self::Storage<T, S>,
    ) -> Self::Iter<'a, T> {
        storage.iter()
    }

    #[inline]
    fn iter_mut<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a mut Self::Storage<T, S>,
    ) -> Self::IterMut<'a, T> {
        storage.iter_mut()
    }
}

impl Layout for ColumnMajor {
    type Storage<T: Record, S: SequenceFamily> = T::Columns<S>;
    type Ref<'a, T: Record + 'a> = T::Ref<'a>;
    type RefMut<'a, T: Record + 'a> = T::RefMut<'a>;
    type Iter<'a, T: Record + 'a> = T::Iter<'a>;
    type IterMut<'a, T: Record + 'a> = T::IterMut<'a>;

    #[inline]
    fn len<T: Record, S: SequenceFamily>(storage: &Self::Storage<T, S>) -> usize {
        T::columns_len(storage)
    }

    #[inline]
    fn get<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a Self::Storage<T, S>,
        index: usize,
    ) -> Option<Self::Ref<'a, T>> {
        T::columns_get(storage, index)
    }

    #[inline]
    fn get_mut<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a mut Self::Storage<T, S>,
        index: usize,
    ) -> Option<Self::RefMut<'a, T>> {
        T::columns_get_mut(storage, index)
    }

    #[inline]
    fn push<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, record: T) {
        T::columns_push(storage, record);
    }

    #[inline]
    fn pop<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>) -> Option<T> {
        T::columns_pop(storage)
    }

    fn resize<T: Record + Default, S: SequenceFamily>(
        storage: &mut Self::Storage<T, S>,
        new_len: usize,
    ) {
        let len = T::columns_len(storage);
        if new_len <= len {
            T::columns_truncate(storage, new_len);
            return;
        }

        // Grow by whole records so that new slots match `T::default()`
        // field for field, exactly as in a row-major table.
        T::columns_reserve(storage, new_len - len);
        for _ in len..new_len {
            T::columns_push(storage, T::default());
        }
    }

    fn truncate<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, len: usize) {
        T::columns_truncate(storage, len);
    }

    fn reserve<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>, additional: usize) {
        T::columns_reserve(storage, additional);
    }

    #[inline]
    fn capacity<T: Record, S: SequenceFamily>(storage: &Self::Storage<T, S>) -> usize {
        T::columns_capacity(storage)
    }

    fn shrink_to_fit<T: Record, S: SequenceFamily>(storage: &mut Self::Storage<T, S>) {
        T::columns_shrink_to_fit(storage);
    }

    #[inline]
    fn iter<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a Self::Storage<T, S>,
    ) -> Self::Iter<'a, T> {
        T::columns_iter(storage)
    }

    #[inline]
    fn iter_mut<'a, T: Record + 'a, S: SequenceFamily>(
        storage: &'a mut Self::Storage<T, S>,
    ) -> Self::IterMut<'a, T> {
        T::columns_iter_mut(storage)
    }
}
