/// Read access to the field at position `N` of a record or record view.
///
/// This is the positional half of the field accessor facade. The derive
/// macro implements it for the record itself and for its views, and then
/// builds the named accessors of the generated `{Record}Fields` trait on top
/// of it, so a name always resolves to the same position regardless of
/// whether the slot holds an owned value or a [`FieldRef`].
///
/// [`FieldRef`]: crate::FieldRef
pub trait Slot<const N: usize> {
    /// The type of the field at position `N`.
    type Value;

    /// Returns a reference to the field.
    fn slot(&self) -> &Self::Value;
}

/// Write access to the field at position `N`.
pub trait SlotMut<const N: usize>: Slot<N> {
    /// Returns a mutable reference to the field.
    fn slot_mut(&mut self) -> &mut Self::Value;
}

impl<const N: usize, T> Slot<N> for &T
where
    T: Slot<N> + ?Sized,
{
    type Value = T::Value;

    #[inline]
    fn slot(&self) -> &Self::Value {
        <T as Slot<N>>::slot(self)
    }
}

impl<const N: usize, T> Slot<N> for &mut T
where
    T: Slot<N> + ?Sized,
{
    type Value = T::Value;

    #[inline]
    fn slot(&self) -> &Self::Value {
        <T as Slot<N>>::slot(self)
    }
}

impl<const N: usize, T> SlotMut<N> for &mut T
where
    T: SlotMut<N> + ?Sized,
{
    #[inline]
    fn slot_mut(&mut self) -> &mut Self::Value {
        <T as SlotMut<N>>::slot_mut(self)
    }
}
