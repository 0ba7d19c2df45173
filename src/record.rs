use crate::SequenceFamily;
use std::iter::FusedIterator;

#[diagnostic::on_unimplemented(
    label = "record type",
    note = "The Record trait is required to store a type in a Table; derive it with #[derive(Record)]"
)]
/// A fixed-shape record that can be stored in a [`Table`] of either layout.
///
/// The trait describes the record's columnar form: one sequence per field,
/// the views that gather one slot from each sequence, and the per-column
/// primitives [`ColumnMajor`] is built from. Every operation is generated
/// field by field, so no loop or dynamic dispatch runs across fields.
///
/// This trait should be derived using the derive macro.
///
/// [`Table`]: crate::Table
/// [`ColumnMajor`]: crate::ColumnMajor
pub trait Record: Sized + AsRecordRef<Item = Self> {
    /// One sequence per field, all kept at the same length.
    ///
    /// For each field with type `F`, this type has a field with type
    /// `S::Seq<F>`.
    type Columns<S: SequenceFamily>: Default;

    /// A shared view of one record in [`Self::Columns`].
    ///
    /// For each field with type `F`, this type has a field with type `&F`.
    type Ref<'a>: Copy + AsRecordRef<Item = Self>
    where
        Self: 'a;

    /// A mutable view of one record in [`Self::Columns`].
    ///
    /// For each field with type `F`, this type has a field with type
    /// [`FieldRef<F>`].
    ///
    /// [`FieldRef<F>`]: crate::FieldRef
    type RefMut<'a>: AsRecordRef<Item = Self>
    where
        Self: 'a;

    /// Walks all columns in lockstep, yielding [`Self::Ref`].
    type Iter<'a>: DoubleEndedIterator<Item = Self::Ref<'a>> + ExactSizeIterator + FusedIterator
    where
        Self: 'a;

    /// Walks all columns in lockstep, yielding [`Self::RefMut`].
    type IterMut<'a>: DoubleEndedIterator<Item = Self::RefMut<'a>>
        + ExactSizeIterator
        + FusedIterator
    where
        Self: 'a;

    /// The number of records, read from the first column.
    fn columns_len<S: SequenceFamily>(columns: &Self::Columns<S>) -> usize;

    /// Gathers the slots at `index` into a shared view.
    fn columns_get<'a, S: SequenceFamily>(
        columns: &'a Self::Columns<S>,
        index: usize,
    ) -> Option<Self::Ref<'a>>
    where
        Self: 'a;

    /// Gathers the slots at `index` into a mutable view.
    fn columns_get_mut<'a, S: SequenceFamily>(
        columns: &'a mut Self::Columns<S>,
        index: usize,
    ) -> Option<Self::RefMut<'a>>
    where
        Self: 'a;

    /// Splits `record` into its fields and appends each to its column.
    ///
    /// Room is reserved in every column before any value is pushed, so a
    /// failed reservation leaves all columns at their previous length.
    fn columns_push<S: SequenceFamily>(columns: &mut Self::Columns<S>, record: Self);

    /// Removes the last record from every column and reassembles it.
    fn columns_pop<S: SequenceFamily>(columns: &mut Self::Columns<S>) -> Option<Self>;

    /// Shortens every column to `len`.
    fn columns_truncate<S: SequenceFamily>(columns: &mut Self::Columns<S>, len: usize);

    /// Reserves room for `additional` records in every column.
    fn columns_reserve<S: SequenceFamily>(columns: &mut Self::Columns<S>, additional: usize);

    /// The smallest capacity among the columns.
    fn columns_capacity<S: SequenceFamily>(columns: &Self::Columns<S>) -> usize;

    /// Shrinks every column's capacity to its length.
    fn columns_shrink_to_fit<S: SequenceFamily>(columns: &mut Self::Columns<S>);

    /// Iterates over shared views of every record.
    fn columns_iter<'a, S: SequenceFamily>(columns: &'a Self::Columns<S>) -> Self::Iter<'a>
    where
        Self: 'a;

    /// Iterates over mutable views of every record.
    fn columns_iter_mut<'a, S: SequenceFamily>(
        columns: &'a mut Self::Columns<S>,
    ) -> Self::IterMut<'a>
    where
        Self: 'a;
}

/// Converts a record or any of its views into the shared columnar view.
///
/// This gives owned records, row-major references and column-major views a
/// common form, which is what lets tables of different layouts be compared.
pub trait AsRecordRef {
    /// The record being viewed.
    type Item: Record;

    /// Returns a shared view of the record.
    fn as_record_ref(&self) -> <Self::Item as Record>::Ref<'_>;
}

impl<R> AsRecordRef for &R
where
    R: AsRecordRef + ?Sized,
{
    type Item = R::Item;

    #[inline]
    fn as_record_ref(&self) -> <Self::Item as Record>::Ref<'_> {
        R::as_record_ref(self)
    }
}

impl<R> AsRecordRef for &mut R
where
    R: AsRecordRef + ?Sized,
{
    type Item = R::Item;

    #[inline]
    fn as_record_ref(&self) -> <Self::Item as Record>::Ref<'_> {
        R::as_record_ref(self)
    }
}
