//! A collection of fixed-shape records whose memory layout is a type
//! parameter.
//!
//! A [`Table`] stores its records either as an array of structures
//! ([`RowMajor`]) or as a structure of arrays ([`ColumnMajor`]). Code that
//! builds, iterates and edits a table looks the same for both: the layout is
//! chosen where the table type is named and resolved at compile time, so
//! there is no run-time dispatch on it.
//!
//! ```
//! use soa_layout::{ColumnMajor, Record, RowMajor, Table};
//!
//! #[derive(Record, Debug, Default, Clone, PartialEq)]
//! struct Item {
//!     weight: f64,
//!     code: char,
//!     label: String,
//! }
//!
//! // Swap `ColumnMajor` for `RowMajor` and nothing else changes.
//! let mut items = Table::<Item, ColumnMajor>::with_len(3);
//! items.push(Item {
//!     weight: 1.5,
//!     code: 'z',
//!     label: "hi".into(),
//! });
//! assert_eq!(items.len(), 4);
//!
//! items.at_mut(3).set_weight(9.0);
//! assert_eq!(*items.at(3).weight(), 9.0);
//! assert_eq!(*items.at(0).weight(), 0.0);
//!
//! // Each field lives in its own column.
//! assert_eq!(items.storage().code, ['\0', '\0', '\0', 'z']);
//! ```
//!
//! # Deriving
//!
//! `#[derive(Record)]` on a struct `Foo` generates
//!
//! - `FooColumns<S>`: one sequence per field, the [`ColumnMajor`] storage,
//! - `FooRef<'a>` and `FooRefMut<'a>`: column-major views holding `&F` and
//!   [`FieldRef<F>`] for each field `F`,
//! - `FooIter<'a>` and `FooIterMut<'a>`: lockstep column iterators,
//! - [`Slot`] and [`SlotMut`] impls mapping each field position to its value,
//! - `FooFields`: a trait with `field()`, `field_mut()` and `set_field()`
//!   accessors for every field, implemented for `Foo`, `&Foo`, `&mut Foo`,
//!   `FooRef` and `FooRefMut`.
//!
//! Tuple structs get accessors named `f0`, `f0_mut`, `set_f0` and so on.
//! Extra derives for the views can be requested with
//! `#[record_derive(Debug, PartialEq)]`, optionally restricted with
//! `include(Ref)` or `exclude(RefMut)`.
//!
//! # Features
//!
//! - `serde`: [`Table`] serializes as a sequence of records.
//! - `smallvec`: adds [`SmallVecFamily`] for inline column storage.

extern crate self as soa_layout;

mod cursor;
pub use cursor::{Cursor, CursorMut, NULL_POSITION};

mod error;
pub use error::IndexError;

mod field_ref;
pub use field_ref::FieldRef;

mod iter;
pub use iter::{Iter, IterMut};

mod layout;
pub use layout::{ColumnMajor, Layout, RowMajor};

mod macros;

mod record;
pub use record::{AsRecordRef, Record};

pub mod sequence;
pub use sequence::{Sequence, SequenceFamily, VecFamily};
#[cfg(feature = "smallvec")]
pub use sequence::SmallVecFamily;

mod slot;
pub use slot::{Slot, SlotMut};

mod table;
pub use table::Table;

#[cfg(feature = "serde")]
mod serde;

mod borrow_tests;


#[cfg(test)]
mod equivalence_tests;

pub use soa_layout_derive::Record;

#[cfg(test)]
mod tests {
    use crate::{AsRecordRef, ColumnMajor, Record, RowMajor, Table};

    #[derive(Record, Debug, Clone, PartialEq, Default)]
    #[record_derive(Debug, PartialEq)]
    struct El {
        foo: u64,
        bar: u8,
        baz: [u32; 2],
    }

    const A: El = El {
        foo: 0,
        bar: 1,
        baz: [2, 3],
    };

    const B: El = El {
        foo: 4,
        bar: 5,
        baz: [6, 7],
    };

    const C: El = El {
        foo: 8,
        bar: 9,
        baz: [10, 11],
    };

    const D: El = El {
        foo: 12,
        bar: 13,
        baz: [14, 15],
    };

    const E: El = El {
        foo: 16,
        bar: 17,
        baz: [18, 19],
    };

    const ELEMENTS: [El; 5] = [A, B, C, D, E];

    // Expands a test body once per layout.
    macro_rules! both_layouts {
        ($name:ident, |$table:ident: $t:ty| $body:block) => {
            mod $name {
                use super::*;

                #[test]
                fn row_major() {
                    fn run($table: Table<$t, RowMajor>) $body
                    run(Table::new());
                }

                #[test]
                fn column_major() {
                    fn run($table: Table<$t, ColumnMajor>) $body
                    run(Table::new());
                }
            }
        };
    }

    both_layouts!(push_and_pop, |table: El| {
        let mut table = table;
        for element in ELEMENTS.into_iter() {
            table.push(element);
        }
        assert_eq!(table.len(), ELEMENTS.len());
        for element in ELEMENTS.into_iter().rev() {
            assert_eq!(Some(element), table.pop());
        }
        assert_eq!(None, table.pop());
    });

    both_layouts!(push_grows_by_one, |table: El| {
        let mut table = table;
        for (i, element) in ELEMENTS.into_iter().enumerate() {
            table.push(element.clone());
            assert_eq!(table.len(), i + 1);
            let last = table.last().unwrap();
            assert_eq!(*last.foo(), element.foo);
            assert_eq!(*last.bar(), element.bar);
            assert_eq!(*last.baz(), element.baz);
        }
    });

    both_layouts!(write_through, |table: El| {
        let mut table = table;
        table.extend(ELEMENTS);
        *table.at_mut(2).foo_mut() = 100;
        assert_eq!(table.at_mut(2).set_bar(200), 9);
        table.at_mut(2).baz_mut()[1] = 300;
        assert_eq!(*table.at(2).foo(), 100);
        assert_eq!(*table.at(2).bar(), 200);
        assert_eq!(*table.at(2).baz(), [10, 300]);
    });

    both_layouts!(writes_do_not_leak, |table: El| {
        let mut table = table;
        table.extend(ELEMENTS);
        for i in 0..ELEMENTS.len() {
            table.at_mut(i).set_foo(u64::MAX);
            for j in (0..ELEMENTS.len()).filter(|&j| j != i) {
                let view = table.at(j);
                assert_eq!(*view.bar(), ELEMENTS[j].bar);
                assert_eq!(*view.baz(), ELEMENTS[j].baz);
                if j > i {
                    assert_eq!(*view.foo(), ELEMENTS[j].foo);
                }
            }
        }
    });

    both_layouts!(resize_default_initializes, |table: El| {
        let mut table = table;
        table.push(A);
        table.resize(3);
        assert_eq!(table.len(), 3);
        assert_eq!(table.at(0).as_record_ref(), A.as_record_ref());
        assert_eq!(table.at(2).as_record_ref(), El::default().as_record_ref());
        table.resize(1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.pop(), Some(A));
        assert!(table.is_empty());
    });

    both_layouts!(iterators_match_indexing, |table: El| {
        let mut table = table;
        table.extend(ELEMENTS);
        for (i, view) in table.iter().enumerate() {
            assert_eq!(view.as_record_ref(), table.at(i).as_record_ref());
        }
        for (i, view) in table.iter().rev().enumerate() {
            let j = ELEMENTS.len() - 1 - i;
            assert_eq!(view.as_record_ref(), table.at(j).as_record_ref());
        }
        assert_eq!(table.iter().len(), ELEMENTS.len());
        for mut view in table.iter_mut() {
            *view.bar_mut() += 1;
        }
        let bars: Vec<u8> = table.iter().map(|view| *view.bar()).collect();
        assert_eq!(bars, [2, 6, 10, 14, 18]);
    });

    both_layouts!(checked_access, |table: El| {
        let mut table = table;
        table.extend([A, B]);
        assert!(table.get(2).is_none());
        assert!(table.get_mut(2).is_none());
        let err = table.try_at(7).unwrap_err();
        assert_eq!(err.to_string(), "index 7 out of bounds for table of length 2");
        assert_eq!(table.try_at_mut(2).unwrap_err().len, 2);
        assert!(table.first().is_some());
    });

    #[test]
    fn owned_records_share_accessors() {
        fn sum<F: ElFields>(fields: F) -> u64 {
            *fields.foo() + u64::from(*fields.bar())
        }

        let mut el = B;
        assert_eq!(*el.foo(), 4);
        assert_eq!(el.set_bar(50), 5);
        el.baz_mut()[0] = 60;
        assert_eq!(el, El { foo: 4, bar: 50, baz: [60, 7] });

        assert_eq!(sum(&el), 54);
        assert_eq!(sum(&mut el), 54);
        assert_eq!(sum(el.as_record_ref()), 54);

        let mut rows: Table<El, RowMajor> = ELEMENTS.into_iter().collect();
        *rows.at_mut(1).foo_mut() = 40;
        assert_eq!(sum(rows.at(1)), 45);
        assert_eq!(rows.at(1).foo(), rows.at(1).as_record_ref().foo());

        let mut cols: Table<El, ColumnMajor> = ELEMENTS.into_iter().collect();
        cols.at_mut(1).set_foo(40);
        assert_eq!(sum(cols.at(1)), 45);
        assert_eq!(sum(cols.at_mut(1)), 45);
    }

    #[test]
    fn layouts_compare_equal() {
        let rows: Table<El, RowMajor> = ELEMENTS.into_iter().collect();
        let cols: Table<El, ColumnMajor> = ELEMENTS.into_iter().collect();
        assert_eq!(rows, cols);
        assert_eq!(cols, rows);
        let mut other = cols.clone();
        other.at_mut(4).set_bar(0);
        assert_ne!(rows, other);
        other.truncate(4);
        assert_ne!(rows, other);
    }

    #[test]
    fn columns_stay_equal_length() {
        let mut table = Table::<El, ColumnMajor>::with_capacity(2);
        let check = |table: &Table<El, ColumnMajor>| {
            let columns = table.storage();
            assert_eq!(columns.foo.len(), table.len());
            assert_eq!(columns.bar.len(), table.len());
            assert_eq!(columns.baz.len(), table.len());
        };
        check(&table);
        table.extend(ELEMENTS);
        check(&table);
        table.resize(9);
        check(&table);
        table.truncate(2);
        check(&table);
        table.pop();
        check(&table);
        table.clear();
        check(&table);
        assert!(table.capacity() >= 9);
        table.shrink_to_fit();
        check(&table);
    }

    #[test]
    #[should_panic(expected = "index 3 out of bounds for table of length 0")]
    fn at_panics_out_of_bounds() {
        let table = Table::<El, ColumnMajor>::new();
        table.at(3);
    }

    #[test]
    fn debug_lists_records() {
        let table: Table<El, ColumnMajor> = [A].into_iter().collect();
        assert_eq!(
            format!("{table:?}"),
            "[ElRef { foo: 0, bar: 1, baz: [2, 3] }]"
        );
    }

    #[test]
    fn example_scenario() {
        #[derive(Record, Debug, Default, Clone, PartialEq)]
        #[record_derive(Debug, PartialEq)]
        struct Item {
            double: f64,
            character: char,
            text: String,
        }

        macro_rules! scenario {
            ($layout:ty) => {{
                let mut table = Table::<Item, $layout>::with_len(3);
                table.push(Item {
                    double: 1.5,
                    character: 'z',
                    text: "hi".into(),
                });
                assert_eq!(table.len(), 4);
                table.at_mut(3).set_double(9.0);
                assert_eq!(*table.at(3).double(), 9.0);
                assert_eq!(*table.at(0).double(), 0.0);
                table
            }};
        }

        let rows = scenario!(RowMajor);
        let cols = scenario!(ColumnMajor);
        assert_eq!(rows, cols);
        assert_eq!(cols.storage().text, ["", "", "", "hi"]);
    }
}
