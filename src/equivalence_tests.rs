//! Randomized checks that both layouts behave as the same sequence of
//! records.

use crate::{ColumnMajor, Record, RowMajor, Table};
use proptest::prelude::*;

#[derive(Record, Debug, Clone, Default, PartialEq)]
#[record_derive(Debug, PartialEq)]
struct Sample {
    id: u32,
    weight: f64,
    label: String,
}

#[derive(Debug, Clone)]
enum Op {
    Push(u32, f64, String),
    Pop,
    Resize(usize),
    Truncate(usize),
    SetWeight(usize, f64),
    SetLabel(usize, String),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u32>(), -1e6..1e6f64, "[a-z]{0,4}")
            .prop_map(|(id, weight, label)| Op::Push(id, weight, label)),
        2 => Just(Op::Pop),
        1 => (0usize..24).prop_map(Op::Resize),
        1 => (0usize..24).prop_map(Op::Truncate),
        2 => (0usize..24, -1e6..1e6f64).prop_map(|(i, w)| Op::SetWeight(i, w)),
        2 => (0usize..24, "[a-z]{0,4}").prop_map(|(i, l)| Op::SetLabel(i, l)),
        1 => Just(Op::Clear),
    ]
}

// Applies one operation to a table of either layout. Returns the popped
// record, if any, so both sides can be compared.
macro_rules! apply {
    ($table:expr, $op:expr) => {{
        let table = &mut $table;
        match $op.clone() {
            Op::Push(id, weight, label) => {
                table.push(Sample { id, weight, label });
                None
            }
            Op::Pop => table.pop(),
            Op::Resize(len) => {
                table.resize(len);
                None
            }
            Op::Truncate(len) => {
                table.truncate(len);
                None
            }
            Op::SetWeight(i, weight) => {
                if let Some(mut view) = table.get_mut(i) {
                    view.set_weight(weight);
                }
                None
            }
            Op::SetLabel(i, label) => {
                if let Some(mut view) = table.get_mut(i) {
                    *view.label_mut() = label;
                }
                None
            }
            Op::Clear => {
                table.clear();
                None
            }
        }
    }};
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn layouts_agree_under_random_edits(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut rows = Table::<Sample, RowMajor>::new();
        let mut cols = Table::<Sample, ColumnMajor>::new();
        let mut model: Vec<Sample> = Vec::new();

        for op in &ops {
            let popped_rows = apply!(rows, op);
            let popped_cols = apply!(cols, op);
            prop_assert_eq!(popped_rows, popped_cols);

            match op.clone() {
                Op::Push(id, weight, label) => model.push(Sample { id, weight, label }),
                Op::Pop => {
                    model.pop();
                }
                Op::Resize(len) => model.resize(len, Sample::default()),
                Op::Truncate(len) => model.truncate(len),
                Op::SetWeight(i, weight) => {
                    if let Some(sample) = model.get_mut(i) {
                        sample.weight = weight;
                    }
                }
                Op::SetLabel(i, label) => {
                    if let Some(sample) = model.get_mut(i) {
                        sample.label = label;
                    }
                }
                Op::Clear => model.clear(),
            }

            let columns = cols.storage();
            prop_assert_eq!(columns.id.len(), model.len());
            prop_assert_eq!(columns.weight.len(), model.len());
            prop_assert_eq!(columns.label.len(), model.len());
            prop_assert_eq!(&rows, &cols);
        }

        let expected: Table<Sample, RowMajor> = model.into();
        prop_assert_eq!(&rows, &expected);
        prop_assert_eq!(&cols, &expected);
    }

    #[test]
    fn iteration_matches_indexing(len in 0usize..32, from_back in any::<bool>()) {
        let cols: Table<Sample, ColumnMajor> = (0..len as u32)
            .map(|id| Sample { id, ..Sample::default() })
            .collect();
        let ids: Vec<u32> = if from_back {
            cols.iter().rev().map(|s| *s.id()).collect()
        } else {
            cols.iter().map(|s| *s.id()).collect()
        };
        prop_assert_eq!(ids.len(), len);
        for (i, id) in ids.into_iter().enumerate() {
            let index = if from_back { len - 1 - i } else { i };
            prop_assert_eq!(id, *cols.at(index).id());
        }
    }
}
