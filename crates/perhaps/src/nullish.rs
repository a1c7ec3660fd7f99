//! Null-equivalence used by the default emptiness policy.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Types that can carry a null-equivalent value while still being "set".
///
/// The default policy treats a null-equivalent as absent; the nullable
/// policy keeps it as a real value. Only the unset marker (`Option::None` at
/// a raw boundary) is absent under both.
pub trait Nullish {
    fn is_null(&self) -> bool;
}

impl<T> Nullish for Option<T> {
    #[inline]
    fn is_null(&self) -> bool { self.is_none() }
}

impl<T: Nullish + ?Sized> Nullish for Box<T> {
    #[inline]
    fn is_null(&self) -> bool { (**self).is_null() }
}

impl<T: Nullish + ?Sized> Nullish for Rc<T> {
    #[inline]
    fn is_null(&self) -> bool { (**self).is_null() }
}

impl<T: Nullish + ?Sized> Nullish for Arc<T> {
    #[inline]
    fn is_null(&self) -> bool { (**self).is_null() }
}

impl<T: Nullish + ?Sized> Nullish for &T {
    #[inline]
    fn is_null(&self) -> bool { (**self).is_null() }
}

#[cfg(feature = "serde_json")]
impl Nullish for serde_json::Value {
    #[inline]
    fn is_null(&self) -> bool { matches!(self, serde_json::Value::Null) }
}

macro_rules! never_null {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Nullish for $ty {
                #[inline]
                fn is_null(&self) -> bool { false }
            }
        )*
    };
}

never_null!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    str, String,
);

impl Nullish for Cow<'_, str> {
    #[inline]
    fn is_null(&self) -> bool { false }
}

impl<T> Nullish for Vec<T> {
    #[inline]
    fn is_null(&self) -> bool { false }
}

impl<T> Nullish for [T] {
    #[inline]
    fn is_null(&self) -> bool { false }
}

impl<T> Nullish for VecDeque<T> {
    #[inline]
    fn is_null(&self) -> bool { false }
}

impl<K, V, S> Nullish for HashMap<K, V, S> {
    #[inline]
    fn is_null(&self) -> bool { false }
}

impl<T, S> Nullish for HashSet<T, S> {
    #[inline]
    fn is_null(&self) -> bool { false }
}

impl<K, V> Nullish for BTreeMap<K, V> {
    #[inline]
    fn is_null(&self) -> bool { false }
}

impl<T> Nullish for BTreeSet<T> {
    #[inline]
    fn is_null(&self) -> bool { false }
}
