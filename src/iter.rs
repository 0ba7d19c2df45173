use crate::{Layout, Record};
use std::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
};

/// Immutable [`Table`] iterator.
///
/// This struct is created by the [`iter`] method.
///
/// [`Table`]: crate::Table
/// [`iter`]: crate::Table::iter
pub struct Iter<'a, T, L>
where
    T: 'a + Record,
    L: Layout,
{
    pub(crate) iter: L::Iter<'a, T>,
}

/// Mutable [`Table`] iterator.
///
/// This struct is created by the [`iter_mut`] method.
///
/// [`Table`]: crate::Table
/// [`iter_mut`]: crate::Table::iter_mut
pub struct IterMut<'a, T, L>
where
    T: 'a + Record,
    L: Layout,
{
    pub(crate) iter: L::IterMut<'a, T>,
}

macro_rules! iter_impls {
    ($t:ident, $item:ident) => {
        impl<'a, T, L> Iterator for $t<'a, T, L>
        where
            T: 'a + Record,
            L: Layout,
        {
            type Item = L::$item<'a, T>;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next()
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }

            #[inline]
            fn nth(&mut self, n: usize) -> Option<Self::Item> {
                self.iter.nth(n)
            }
        }

        impl<'a, T, L> DoubleEndedIterator for $t<'a, T, L>
        where
            T: 'a + Record,
            L: Layout,
        {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.iter.next_back()
            }
        }

        impl<'a, T, L> ExactSizeIterator for $t<'a, T, L>
        where
            T: 'a + Record,
            L: Layout,
        {
            fn len(&self) -> usize {
                self.iter.len()
            }
        }

        impl<'a, T, L> FusedIterator for $t<'a, T, L>
        where
            T: 'a + Record,
            L: Layout,
        {
        }

        impl<'a, T, L> Debug for $t<'a, T, L>
        where
            T: 'a + Record,
            L: Layout,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($t))
                    .field("remaining", &self.iter.len())
                    .finish()
            }
        }
    };
}

iter_impls!(Iter, Ref);
iter_impls!(IterMut, RefMut);
