/// Creates a [`Table`] containing the given records.
///
/// The layout is taken from the surrounding type annotation.
///
/// ```
/// use soa_layout::{table, ColumnMajor, Record, Table};
///
/// #[derive(Record, Debug, PartialEq)]
/// #[record_derive(Debug, PartialEq)]
/// struct Foo(u8, u16);
///
/// let table: Table<_, ColumnMajor> = table![Foo(1, 2), Foo(3, 4)];
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.storage().1, [2, 4]);
/// ```
///
/// [`Table`]: crate::Table
#[macro_export]
macro_rules! table {
    (@count $head:expr $(, $tail:expr)*) => {
        1usize $(+ $crate::table!(@replace $tail))*
    };

    (@replace $x:expr) => {
        1usize
    };

    () => {
        $crate::Table::new()
    };

    ($($x:expr),+ $(,)?) => {
        {
            let mut out = $crate::Table::new();
            out.reserve($crate::table!(@count $($x),+));
            $(
            out.push($x);
            )+
            out
        }
    };
}
