/// ```
/// use soa_layout::{ColumnMajor, Record, Table, table};
/// #[derive(Record, PartialEq, Debug)]
/// #[record_derive(Debug, PartialEq)]
/// struct Foo(usize);
/// let mut t: Table<_, ColumnMajor> = table![Foo(10), Foo(20)];
/// let first = t.at(0);
/// let second = t.at(1);
/// assert_ne!(first, second);
/// t.push(Foo(30));
/// ```
mod view_outlives_push {
    /// ```compile_fail
    /// use soa_layout::{ColumnMajor, Record, Table, table};
    /// #[derive(Record, PartialEq, Debug)]
    /// #[record_derive(Debug, PartialEq)]
    /// struct Foo(usize);
    /// let mut t: Table<_, ColumnMajor> = table![Foo(10), Foo(20)];
    /// let first = t.at(0);
    /// t.push(Foo(30));
    /// println!("{:?}", first); // Added
    /// ```
    mod column_major {}

    /// ```compile_fail
    /// use soa_layout::{Record, RowMajor, Table, table};
    /// #[derive(Record, PartialEq, Debug)]
    /// struct Foo(usize);
    /// let mut t: Table<_, RowMajor> = table![Foo(10), Foo(20)];
    /// let first = t.at(0);
    /// t.resize(0); // Changed
    /// println!("{:?}", first); // Added
    /// ```
    mod row_major {}
}

/// ```
/// use soa_layout::{ColumnMajor, Record, Table, table};
/// #[derive(Record)]
/// struct Foo(usize);
/// let mut t: Table<_, ColumnMajor> = table![Foo(10), Foo(20)];
/// let mut first = t.at_mut(0);
/// first.set_f0(11);
/// let mut second = t.at_mut(1);
/// second.set_f0(21);
/// ```
mod two_mutable_views {
    /// ```compile_fail
    /// use soa_layout::{ColumnMajor, Record, Table, table};
    /// #[derive(Record)]
    /// struct Foo(usize);
    /// let mut t: Table<_, ColumnMajor> = table![Foo(10), Foo(20)];
    /// let mut first = t.at_mut(0);
    /// let mut second = t.at_mut(1);
    /// second.set_f0(21);
    /// first.set_f0(11); // Moved
    /// ```
    mod fail {}
}

/// ```
/// use soa_layout::{ColumnMajor, Record, Table, table};
/// #[derive(Record)]
/// struct Foo(usize);
/// let t: Table<_, ColumnMajor> = table![Foo(10)];
/// assert_eq!(*t.at(0).f0(), 10);
/// ```
mod read_only_view {
    /// ```compile_fail
    /// use soa_layout::{ColumnMajor, Record, Table, table};
    /// #[derive(Record)]
    /// struct Foo(usize);
    /// let t: Table<_, ColumnMajor> = table![Foo(10)];
    /// t.at(0).set_f0(11); // Changed
    /// ```
    mod fail {}
}
