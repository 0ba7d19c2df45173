use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

/// A mutable handle to a single field of a record stored in a
/// [`ColumnMajor`] table.
///
/// The fields of a column-major record live in different sequences, so a
/// view of the record is assembled from one `FieldRef` per field. Reading
/// through the handle yields the stored value and writing through it
/// mutates the slot in place. The handle never owns or copies the value it
/// refers to. [`FieldRef::reborrow`] produces a second handle to the same
/// slot for a shorter lifetime.
///
/// ```
/// use soa_layout::FieldRef;
///
/// let mut slot = 1.5;
/// let mut field = FieldRef::new(&mut slot);
/// assert_eq!(field.get(), 1.5);
/// field.set(9.0);
/// assert_eq!(field, 9.0);
/// assert_eq!(slot, 9.0);
/// ```
///
/// [`ColumnMajor`]: crate::ColumnMajor
#[repr(transparent)]
pub struct FieldRef<'a, T>(&'a mut T);

impl<'a, T> FieldRef<'a, T> {
    /// Binds a handle to `slot`.
    #[inline]
    pub fn new(slot: &'a mut T) -> Self {
        Self(slot)
    }

    /// Returns a copy of the referenced value.
    #[inline]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.clone()
    }

    /// Writes `value` into the referenced slot.
    #[inline]
    pub fn set(&mut self, value: T) {
        *self.0 = value;
    }

    /// Writes `value` into the referenced slot, returning the previous value.
    #[inline]
    pub fn replace(&mut self, value: T) -> T {
        std::mem::replace(self.0, value)
    }

    /// Returns a handle to the same slot that borrows from this one.
    #[inline]
    pub fn reborrow(&mut self) -> FieldRef<'_, T> {
        FieldRef(self.0)
    }

    /// Converts the handle into the underlying mutable reference.
    #[inline]
    pub fn into_mut(self) -> &'a mut T {
        self.0
    }
}

impl<'a, T> From<&'a mut T> for FieldRef<'a, T> {
    fn from(slot: &'a mut T) -> Self {
        Self(slot)
    }
}

impl<T> Deref for FieldRef<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<T> DerefMut for FieldRef<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl<T> AsRef<T> for FieldRef<'_, T> {
    fn as_ref(&self) -> &T {
        self.0
    }
}

impl<T> AsMut<T> for FieldRef<'_, T> {
    fn as_mut(&mut self) -> &mut T {
        self.0
    }
}

impl<T> Debug for FieldRef<'_, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> Display for FieldRef<'_, T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> PartialEq<FieldRef<'_, T>> for FieldRef<'_, T>
where
    T: PartialEq,
{
    fn eq(&self, other: &FieldRef<'_, T>) -> bool {
        (*self.0).eq(&*other.0)
    }
}

impl<T> PartialEq<T> for FieldRef<'_, T>
where
    T: PartialEq,
{
    fn eq(&self, other: &T) -> bool {
        (*self.0).eq(other)
    }
}

impl<T> Eq for FieldRef<'_, T> where T: Eq {}

impl<T> PartialOrd for FieldRef<'_, T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (*self.0).partial_cmp(&*other.0)
    }
}

impl<T> Ord for FieldRef<'_, T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        (*self.0).cmp(&*other.0)
    }
}

impl<T> Hash for FieldRef<'_, T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldRef;

    #[test]
    fn writes_land_in_the_slot() {
        let mut slot = String::from("before");
        let mut field = FieldRef::new(&mut slot);
        assert_eq!(field.replace("after".into()), "before");
        field.push('!');
        assert_eq!(field.get(), "after!");
        assert_eq!(slot, "after!");
    }

    #[test]
    fn reborrow_shares_the_slot() {
        let mut slot = 3u32;
        let mut field = FieldRef::new(&mut slot);
        {
            let mut again = field.reborrow();
            again.set(4);
        }
        assert_eq!(*field, 4);
        *field.into_mut() += 1;
        assert_eq!(slot, 5);
    }

    #[test]
    fn compares_by_value() {
        let (mut a, mut b) = (1, 2);
        let a = FieldRef::new(&mut a);
        let b = FieldRef::new(&mut b);
        assert!(a < b);
        assert_ne!(a, b);
        assert_eq!(a, 1);
        assert_eq!(format!("{a:?} {b}"), "1 2");
    }
}
