use crate::{
    AsRecordRef, Cursor, CursorMut, IndexError, Iter, IterMut, Layout, Record, SequenceFamily,
    VecFamily,
};
use std::fmt::{self, Debug, Formatter};
use tracing::trace;

/// A growable collection of records whose memory arrangement is chosen by
/// the layout parameter `L`.
///
/// With [`RowMajor`], records are stored whole in one sequence and views are
/// `&T` / `&mut T`. With [`ColumnMajor`], each field has its own sequence and
/// views are the derived `{Record}Ref` / `{Record}RefMut` types. The field
/// accessors of the derived `{Record}Fields` trait work the same on every
/// view, so code written against one layout compiles unchanged against the
/// other.
///
/// `S` picks the sequence type backing the records or columns.
///
/// ```
/// use soa_layout::{ColumnMajor, Record, RowMajor, Table};
///
/// #[derive(Record, Debug, Default, Clone, PartialEq)]
/// struct Particle {
///     mass: f64,
///     tag: char,
/// }
///
/// let mut rows = Table::<Particle, RowMajor>::with_len(2);
/// let mut cols = Table::<Particle, ColumnMajor>::with_len(2);
///
/// for p in rows.iter_mut() {
///     p.set_mass(2.0);
/// }
/// for mut p in cols.iter_mut() {
///     p.set_mass(2.0);
/// }
///
/// assert_eq!(*rows.at(1).mass(), 2.0);
/// assert_eq!(*cols.at(1).mass(), 2.0);
/// assert_eq!(cols.storage().mass, [2.0, 2.0]);
/// ```
///
/// [`RowMajor`]: crate::RowMajor
/// [`ColumnMajor`]: crate::ColumnMajor
pub struct Table<T, L, S = VecFamily>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    storage: L::Storage<T, S>,
}

impl<T, L, S> Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    /// Constructs a new, empty table.
    ///
    /// The table will not allocate until records are pushed onto it.
    pub fn new() -> Self {
        Self {
            storage: Default::default(),
        }
    }

    /// Constructs a new, empty table with room for at least `capacity`
    /// records.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut out = Self::new();
        out.reserve(capacity);
        out
    }

    /// Constructs a table holding `len` default records.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut out = Self::new();
        out.resize(len);
        out
    }

    /// Returns the number of records in the table.
    #[inline]
    pub fn len(&self) -> usize {
        L::len(&self.storage)
    }

    /// Returns true if the table contains no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of records the table can hold without
    /// reallocating.
    pub fn capacity(&self) -> usize {
        L::capacity(&self.storage)
    }

    /// Appends a record to the back of the table.
    ///
    /// ```
    /// # use soa_layout::{ColumnMajor, Record, Table};
    /// #[derive(Record, Debug, PartialEq)]
    /// struct Foo(u8, u16);
    ///
    /// let mut table = Table::<Foo, ColumnMajor>::new();
    /// table.push(Foo(1, 2));
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.storage().0, [1]);
    /// assert_eq!(table.storage().1, [2]);
    /// ```
    #[inline]
    pub fn push(&mut self, record: T) {
        L::push(&mut self.storage, record);
    }

    /// Removes the last record from the table and returns it, or [`None`] if
    /// it is empty.
    pub fn pop(&mut self) -> Option<T> {
        L::pop(&mut self.storage)
    }

    /// Resizes the table to `new_len` records.
    ///
    /// Growing appends `T::default()` records. Shrinking drops the records
    /// past `new_len`.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        trace!(from = self.len(), to = new_len, "resizing table");
        L::resize(&mut self.storage, new_len);
    }

    /// Shortens the table, keeping the first `len` records. Has no effect if
    /// `len` is not less than the current length.
    pub fn truncate(&mut self, len: usize) {
        L::truncate(&mut self.storage, len);
    }

    /// Removes every record, keeping the allocated capacity.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing table");
        L::truncate(&mut self.storage, 0);
    }

    /// Reserves capacity for at least `additional` more records.
    pub fn reserve(&mut self, additional: usize) {
        trace!(
            len = self.len(),
            capacity = self.capacity(),
            additional,
            "reserving table capacity"
        );
        L::reserve(&mut self.storage, additional);
    }

    /// Shrinks the capacity of the table as much as possible.
    pub fn shrink_to_fit(&mut self) {
        trace!(
            len = self.len(),
            capacity = self.capacity(),
            "shrinking table"
        );
        L::shrink_to_fit(&mut self.storage);
    }

    /// Returns a view of the record at `index`, or [`None`] if out of
    /// bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<L::Ref<'_, T>> {
        L::get(&self.storage, index)
    }

    /// Returns a mutable view of the record at `index`, or [`None`] if out
    /// of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<L::RefMut<'_, T>> {
        L::get_mut(&mut self.storage, index)
    }

    /// Returns a view of the record at `index`.
    pub fn try_at(&self, index: usize) -> Result<L::Ref<'_, T>, IndexError> {
        let len = self.len();
        self.get(index).ok_or(IndexError { index, len })
    }

    /// Returns a mutable view of the record at `index`.
    pub fn try_at_mut(&mut self, index: usize) -> Result<L::RefMut<'_, T>, IndexError> {
        let len = self.len();
        self.get_mut(index).ok_or(IndexError { index, len })
    }

    /// Returns a view of the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn at(&self, index: usize) -> L::Ref<'_, T> {
        match self.try_at(index) {
            Ok(view) => view,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns a mutable view of the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> L::RefMut<'_, T> {
        match self.try_at_mut(index) {
            Ok(view) => view,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns a view of the first record, or [`None`] if empty.
    pub fn first(&self) -> Option<L::Ref<'_, T>> {
        self.get(0)
    }

    /// Returns a view of the last record, or [`None`] if empty.
    pub fn last(&self) -> Option<L::Ref<'_, T>> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns an iterator over views of the records.
    pub fn iter(&self) -> Iter<'_, T, L> {
        Iter {
            iter: L::iter(&self.storage),
        }
    }

    /// Returns an iterator over mutable views of the records.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, L> {
        IterMut {
            iter: L::iter_mut(&mut self.storage),
        }
    }

    /// Returns a cursor at the first record.
    pub fn begin(&self) -> Cursor<'_, T, L, S> {
        self.cursor(0)
    }

    /// Returns a cursor one past the last record.
    ///
    /// The end cursor is only meant for comparison; it never yields a view.
    pub fn end(&self) -> Cursor<'_, T, L, S> {
        self.cursor(self.len())
    }

    /// Returns a cursor at `position`.
    pub fn cursor(&self, position: usize) -> Cursor<'_, T, L, S> {
        Cursor::new(self, position)
    }

    /// Returns a mutable cursor at the first record.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, L, S> {
        self.cursor_mut(0)
    }

    /// Returns a mutable cursor at `position`.
    pub fn cursor_mut(&mut self, position: usize) -> CursorMut<'_, T, L, S> {
        CursorMut::new(self, position)
    }

    /// Returns the backing storage.
    ///
    /// For [`ColumnMajor`] tables this is the derived `{Record}Columns`
    /// struct, whose fields are the individual columns.
    ///
    /// [`ColumnMajor`]: crate::ColumnMajor
    pub fn storage(&self) -> &L::Storage<T, S> {
        &self.storage
    }
}

impl<T, L, S> Default for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, L, S> Clone for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
    L::Storage<T, S>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.storage.clone_from(&source.storage);
    }
}

impl<T, L, S> Debug for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
    for<'a> T::Ref<'a>: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for item in self.iter() {
            list.entry(&item.as_record_ref());
        }
        list.finish()
    }
}

impl<T, L1, L2, S1, S2> PartialEq<Table<T, L2, S2>> for Table<T, L1, S1>
where
    T: Record,
    L1: Layout,
    L2: Layout,
    S1: SequenceFamily,
    S2: SequenceFamily,
    for<'a> T::Ref<'a>: PartialEq,
{
    fn eq(&self, other: &Table<T, L2, S2>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.as_record_ref() == b.as_record_ref())
    }
}

impl<T, L, S> Eq for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
    for<'a> T::Ref<'a>: Eq,
{
}

impl<T, L, S> Extend<T> for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        L::reserve(&mut self.storage, lower);
        for record in iter {
            self.push(record);
        }
    }
}

impl<T, L, S> FromIterator<T> for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T, L, S> From<Vec<T>> for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<'a, T, L, S> IntoIterator for &'a Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    type Item = L::Ref<'a, T>;
    type IntoIter = Iter<'a, T, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, L, S> IntoIterator for &'a mut Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    type Item = L::RefMut<'a, T>;
    type IntoIter = IterMut<'a, T, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
