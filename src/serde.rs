use crate::{AsRecordRef, FieldRef, Layout, Record, SequenceFamily, Table};
use serde::{
    de::{Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{Serialize, SerializeSeq, Serializer},
};
use std::{
    fmt::{self, Formatter},
    marker::PhantomData,
};

/// Serializes as a sequence of records. Both layouts produce the same
/// output, so a table may be deserialized into either.
impl<T, L, S> Serialize for Table<T, L, S>
where
    T: Record,
    L: Layout,
    S: SequenceFamily,
    for<'a> T::Ref<'a>: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for el in self {
            seq.serialize_element(&el.as_record_ref())?;
        }
        seq.end()
    }
}

impl<'de, T, L, S> Deserialize<'de> for Table<T, L, S>
where
    T: Record + Deserialize<'de>,
    L: Layout,
    S: SequenceFamily,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(TableVisitor(PhantomData))
    }
}

struct TableVisitor<T, L, S>(PhantomData<(T, L, S)>);

impl<'de, T, L, S> Visitor<'de> for TableVisitor<T, L, S>
where
    T: Record + Deserialize<'de>,
    L: Layout,
    S: SequenceFamily,
{
    type Value = Table<T, L, S>;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a sequence of records")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // Cap the preallocation so a lying length prefix cannot exhaust memory.
        let capacity = seq.size_hint().unwrap_or(0).min(4096);
        let mut out = Table::<T, L, S>::with_capacity(capacity);
        while let Some(next) = seq.next_element()? {
            out.push(next);
        }
        Ok(out)
    }
}

impl<T> Serialize for FieldRef<'_, T>
where
    T: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        (**self).serialize(serializer)
    }
}
