use serde::{Deserialize, Serialize};
use soa_layout::{ColumnMajor, Record, RowMajor, Table, table};

#[derive(Record, Debug, Clone, Copy, PartialEq, Default)]
#[record_derive(Debug, PartialEq, exclude(RefMut))]
#[record_derive(Hash, include(Ref))]
struct Rgb(u8, u8, u8);

#[derive(Record, Debug, Clone, PartialEq)]
#[record_derive(Debug, PartialEq)]
pub struct Tagged<T, const N: usize>
where
    T: Copy,
{
    pub tag: T,
    pub samples: [f32; N],
    r#type: u16,
}

#[derive(Record, Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[record_derive(Debug, PartialEq, Serialize)]
struct Entry {
    name: String,
    score: i64,
}

fn main() {
    let mut colors: Table<Rgb, ColumnMajor> = table![Rgb(1, 2, 3), Rgb(4, 5, 6)];
    colors.at_mut(1).set_f2(60);
    println!("{:?}", colors.storage());

    let mut tagged: Table<Tagged<char, 2>, RowMajor> = table![Tagged {
        tag: 'a',
        samples: [0.5, 1.5],
        r#type: 0,
    }];
    tagged.at_mut(0).set_tag('b');
    *tagged.at_mut(0).type_mut() = 7;
    let columns: Table<Tagged<char, 2>, ColumnMajor> = tagged.iter().cloned().collect();
    assert_eq!(columns, tagged);
    println!("{columns:?}");

    let entries: Table<Entry, ColumnMajor> = table![
        Entry {
            name: "first".into(),
            score: 10,
        },
        Entry {
            name: "second".into(),
            score: -3,
        },
    ];
    match serde_json::to_string(&entries) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{e}"),
    }
}
