use crate::{Layout, Record, SequenceFamily, Table, VecFamily};
use std::{
    fmt::{self, Debug, Formatter},
    ops::{AddAssign, SubAssign},
};

/// The position of a cursor that does not refer to any record.
pub const NULL_POSITION: usize = usize::MAX;

/// A bidirectional position in a [`Table`].
///
/// A cursor is a borrowed table plus an index. Moving it never checks
/// bounds: it may be advanced to [`Table::end`] or beyond, in which case
/// [`Cursor::get`] returns [`None`]. `+=` and `-=` take a signed offset. Cursors compare equal when their
/// positions are equal; comparing cursors of different tables is
/// meaningless.
///
/// A cursor can be detached with [`Cursor::set_null`], after which it sits
/// at [`NULL_POSITION`], yields no record, and ignores movement.
///
/// ```
/// use soa_layout::{ColumnMajor, Record, Table};
///
/// #[derive(Record, Default)]
/// struct Sample(u32);
///
/// let table: Table<Sample, ColumnMajor> = (0..4).map(Sample).collect();
/// let mut cursor = table.begin();
/// let mut sum = 0;
/// while cursor != table.end() {
///     sum += *cursor.get().unwrap().f0();
///     cursor.move_next();
/// }
/// assert_eq!(sum, 6);
/// ```
pub struct Cursor<'a, T, L, S = VecFamily>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    table: &'a Table<T, L, S>,
    position: usize,
}

impl<'a, T, L, S> Cursor<'a, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    pub(crate) fn new(table: &'a Table<T, L, S>, position: usize) -> Self {
        Self { table, position }
    }

    /// The index this cursor refers to, or [`NULL_POSITION`].
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if the cursor has been detached with
    /// [`Cursor::set_null`].
    pub fn is_null(&self) -> bool {
        self.position == NULL_POSITION
    }

    /// Returns true if the cursor sits at [`Table::end`].
    pub fn is_end(&self) -> bool {
        self.position == self.table.len()
    }

    /// Detaches the cursor from any record.
    pub fn set_null(&mut self) {
        self.position = NULL_POSITION;
    }

    /// Returns the view [`Table::get`] would return at this position.
    #[inline]
    pub fn get(&self) -> Option<L::Ref<'a, T>> {
        self.table.get(self.position)
    }

    /// Moves to the next position.
    pub fn move_next(&mut self) {
        *self += 1;
    }

    /// Moves to the previous position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at position 0.
    pub fn move_prev(&mut self) {
        *self -= 1;
    }
}

impl<T, L, S> AddAssign<isize> for Cursor<'_, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn add_assign(&mut self, rhs: isize) {
        self.position = offset(self.position, rhs, false);
    }
}

impl<T, L, S> SubAssign<isize> for Cursor<'_, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn sub_assign(&mut self, rhs: isize) {
        self.position = offset(self.position, rhs, true);
    }
}

impl<T, L, S> Clone for Cursor<'_, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, L, S> Copy for Cursor<'_, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
}

/// A bidirectional position in a [`Table`] that can modify the record
/// under it.
///
/// Behaves like [`Cursor`], but holds the table exclusively and adds
/// [`CursorMut::get_mut`].
pub struct CursorMut<'a, T, L, S = VecFamily>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    table: &'a mut Table<T, L, S>,
    position: usize,
}

impl<'a, T, L, S> CursorMut<'a, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    pub(crate) fn new(table: &'a mut Table<T, L, S>, position: usize) -> Self {
        Self { table, position }
    }

    /// The index this cursor refers to, or [`NULL_POSITION`].
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if the cursor has been detached with
    /// [`CursorMut::set_null`].
    pub fn is_null(&self) -> bool {
        self.position == NULL_POSITION
    }

    /// Returns true if the cursor sits one past the last record.
    pub fn is_end(&self) -> bool {
        self.position == self.table.len()
    }

    /// Detaches the cursor from any record.
    pub fn set_null(&mut self) {
        self.position = NULL_POSITION;
    }

    /// Returns a view of the record under the cursor.
    #[inline]
    pub fn get(&self) -> Option<L::Ref<'_, T>> {
        self.table.get(self.position)
    }

    /// Returns a mutable view of the record under the cursor.
    #[inline]
    pub fn get_mut(&mut self) -> Option<L::RefMut<'_, T>> {
        self.table.get_mut(self.position)
    }

    /// Moves to the next position.
    pub fn move_next(&mut self) {
        *self += 1;
    }

    /// Moves to the previous position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at position 0.
    pub fn move_prev(&mut self) {
        *self -= 1;
    }

    /// Converts into a shared cursor at the same position.
    pub fn into_cursor(self) -> Cursor<'a, T, L, S> {
        Cursor::new(self.table, self.position)
    }
}

impl<T, L, S> AddAssign<isize> for CursorMut<'_, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn add_assign(&mut self, rhs: isize) {
        self.position = offset(self.position, rhs, false);
    }
}

impl<T, L, S> SubAssign<isize> for CursorMut<'_, T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
{
    fn sub_assign(&mut self, rhs: isize) {
        self.position = offset(self.position, rhs, true);
    }
}

// Moves `position` by `by`, or by `-by` when `negate` is set.
fn offset(position: usize, by: isize, negate: bool) -> usize {
    if (by < 0) != negate {
        retreat(position, by.unsigned_abs())
    } else {
        advance(position, by.unsigned_abs())
    }
}

fn advance(position: usize, by: usize) -> usize {
    if position == NULL_POSITION {
        return position;
    }
    // Stop short of the sentinel so that movement alone never detaches.
    position.saturating_add(by).min(NULL_POSITION - 1)
}

fn retreat(position: usize, by: usize) -> usize {
    if position == NULL_POSITION {
        return position;
    }
    match position.checked_sub(by) {
        Some(position) => position,
        None => panic!("cursor moved before the first record"),
    }
}

macro_rules! cursor_impls {
    ($t:ident) => {
        impl<T, L, S> PartialEq for $t<'_, T, L, S>
        where
            T: Record,
            L: Layout,
            S: SequenceFamily,
        {
            fn eq(&self, other: &Self) -> bool {
                self.position == other.position
            }
        }

        impl<T, L, S> Eq for $t<'_, T, L, S>
        where
            T: Record,
            L: Layout,
            S: SequenceFamily,
        {
        }

        impl<T, L, S> Debug for $t<'_, T, L, S>
        where
            T: Record,
            L: Layout,
            S: SequenceFamily,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                if self.is_null() {
                    f.write_str(concat!(stringify!($t), "(null)"))
                } else {
                    f.debug_tuple(stringify!($t)).field(&self.position).finish()
                }
            }
        }
    };
}

cursor_impls!(Cursor);
cursor_impls!(CursorMut);

#[cfg(test)]
mod tests {
    use super::NULL_POSITION;
    use crate::{ColumnMajor, Record, RowMajor, Table};

    #[derive(Record, Debug, Default, Clone, PartialEq)]
    #[record_derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn points<L: crate::Layout>() -> Table<Point, L> {
        (0..3).map(|i| Point { x: i, y: -i }).collect()
    }

    #[test]
    fn begin_and_end_bracket_the_records() {
        let table = points::<ColumnMajor>();
        let mut cursor = table.begin();
        assert_eq!(cursor.position(), 0);
        cursor += 3;
        assert_eq!(cursor, table.end());
        assert!(cursor.is_end());
        assert!(cursor.get().is_none());
        cursor.move_prev();
        assert_eq!(*cursor.get().unwrap().y(), -2);
    }

    // Expands a test body once per layout.
    macro_rules! both_layouts {
        ($name:ident, |$table:ident| $body:block) => {
            mod $name {
                use super::*;

                #[test]
                fn row_major() {
                    let $table = points::<RowMajor>();
                    $body
                }

                #[test]
                fn column_major() {
                    let $table = points::<ColumnMajor>();
                    $body
                }
            }
        };
    }

    both_layouts!(deref_matches_indexing, |table| {
        let mut cursor = table.begin();
        for i in 0..table.len() {
            assert_eq!(cursor.get(), table.get(i));
            assert_eq!(cursor.get(), Some(table.at(i)));
            cursor.move_next();
        }
        assert_eq!(cursor, table.end());
        assert!(cursor.get().is_none());
        assert_eq!(cursor.get(), table.get(table.len()));
        cursor.set_null();
        assert!(cursor.get().is_none());
    });

    both_layouts!(signed_offsets, |table| {
        let mut cursor = table.begin();
        cursor += 2;
        assert_eq!(cursor.position(), 2);
        cursor += -1;
        assert_eq!(cursor.position(), 1);
        cursor -= -2;
        assert_eq!(cursor, table.end());
        cursor -= 3;
        assert_eq!(cursor, table.begin());
        assert_eq!(cursor.get(), table.first());
    });

    #[test]
    fn null_is_sticky() {
        let table = points::<ColumnMajor>();
        let mut cursor = table.cursor(1);
        cursor.set_null();
        assert!(cursor.is_null());
        assert_eq!(cursor.position(), NULL_POSITION);
        cursor.move_next();
        cursor.move_prev();
        assert!(cursor.is_null());
        assert!(cursor.get().is_none());
        assert_ne!(cursor, table.end());
        assert_eq!(format!("{cursor:?}"), "Cursor(null)");
    }

    #[test]
    #[should_panic(expected = "cursor moved before the first record")]
    fn moving_before_begin_panics() {
        let table = points::<RowMajor>();
        let mut cursor = table.begin();
        cursor.move_prev();
    }

    #[test]
    fn mutable_cursor_writes_through() {
        let mut table = points::<ColumnMajor>();
        let mut cursor = table.begin_mut();
        while !cursor.is_end() {
            if let Some(mut point) = cursor.get_mut() {
                point.set_x(10);
            }
            cursor.move_next();
        }
        let cursor = cursor.into_cursor();
        assert_eq!(cursor.position(), 3);
        assert_eq!(table.storage().x, [10, 10, 10]);
        assert_eq!(table.storage().y, [0, -1, -2]);
    }
}
