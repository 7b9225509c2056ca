use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::{self, Write};
use std::time::Duration;

/// A value that can be appended to a log message.
///
/// Scalars render the way `Display` does, with one deliberate difference from
/// byte-oriented output: 8-bit integers always render as decimal numbers.
/// Sequences and sets render as `[a, b, c]`, pairs and tuples as `(a, b)`,
/// maps as a list of `(key, value)` pairs. Any other `Display` type can be
/// appended through [`Shown`].
///
/// # Examples
///
/// ```
/// # use benchlog::loggable::{to_log_string, shown};
/// assert_eq!(to_log_string(&65u8), "65");
/// assert_eq!(to_log_string(&vec![(1, "a"), (2, "b")]), "[(1, a), (2, b)]");
/// assert_eq!(to_log_string(&shown(std::net::Ipv4Addr::LOCALHOST)), "127.0.0.1");
/// ```
pub trait Loggable {
    /// Appends the text form of `self` to `out`.
    fn put(&self, out: &mut String);
}

/// Renders a single value to a new string.
pub fn to_log_string<T: Loggable + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    value.put(&mut out);
    out
}

/// Wrapper that appends any `Display` value as-is.
#[derive(Debug, Clone, Copy)]
pub struct Shown<T>(pub T);

/// Wraps `value` so that it can be appended through its `Display` impl.
pub fn shown<T: fmt::Display>(value: T) -> Shown<T> {
    Shown(value)
}

impl<T: fmt::Display> Loggable for Shown<T> {
    fn put(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}

macro_rules! loggable_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Loggable for $ty {
                #[inline]
                fn put(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }
            }
        )*
    };
}

loggable_display!(
    i16, i32, i64, i128, isize, u16, u32, u64, u128, usize, f32, f64, bool, char, str, String,
    fmt::Arguments<'_>,
);

// Never the character with that code.
impl Loggable for i8 {
    #[inline]
    fn put(&self, out: &mut String) {
        let _ = write!(out, "{}", i32::from(*self));
    }
}

impl Loggable for u8 {
    #[inline]
    fn put(&self, out: &mut String) {
        let _ = write!(out, "{}", u32::from(*self));
    }
}

impl Loggable for Duration {
    /// Seconds with the default `f64` formatting.
    fn put(&self, out: &mut String) {
        let _ = write!(out, "{}", self.as_secs_f64());
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    #[inline]
    fn put(&self, out: &mut String) {
        (**self).put(out);
    }
}

impl<T: Loggable + ?Sized> Loggable for &mut T {
    #[inline]
    fn put(&self, out: &mut String) {
        (**self).put(out);
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn put(&self, out: &mut String) {
        (**self).put(out);
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn put(&self, out: &mut String) {
        match self {
            Some(value) => {
                out.push_str("Some(");
                value.put(out);
                out.push(')');
            }
            None => out.push_str("None"),
        }
    }
}

fn put_list<'a, T, I>(items: I, out: &mut String)
where
    T: Loggable + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    out.push('[');
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.put(out);
    }
    out.push(']');
}

fn put_map<'a, K, V, I>(entries: I, out: &mut String)
where
    K: Loggable + 'a,
    V: Loggable + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    out.push('[');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        key.put(out);
        out.push_str(", ");
        value.put(out);
        out.push(')');
    }
    out.push(']');
}

impl<T: Loggable> Loggable for [T] {
    fn put(&self, out: &mut String) {
        put_list(self, out);
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn put(&self, out: &mut String) {
        put_list(self, out);
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    fn put(&self, out: &mut String) {
        put_list(self, out);
    }
}

impl<T: Loggable> Loggable for VecDeque<T> {
    fn put(&self, out: &mut String) {
        put_list(self, out);
    }
}

impl<T: Loggable> Loggable for BTreeSet<T> {
    fn put(&self, out: &mut String) {
        put_list(self, out);
    }
}

impl<T: Loggable, S> Loggable for HashSet<T, S> {
    fn put(&self, out: &mut String) {
        put_list(self, out);
    }
}

impl<K: Loggable, V: Loggable> Loggable for BTreeMap<K, V> {
    fn put(&self, out: &mut String) {
        put_map(self, out);
    }
}

impl<K: Loggable, V: Loggable, S> Loggable for HashMap<K, V, S> {
    fn put(&self, out: &mut String) {
        put_map(self, out);
    }
}

macro_rules! loggable_tuple {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Loggable, $($rest: Loggable),*> Loggable for ($first, $($rest,)*) {
            #[allow(non_snake_case)]
            fn put(&self, out: &mut String) {
                let ($first, $($rest,)*) = self;
                out.push('(');
                $first.put(out);
                $(
                    out.push_str(", ");
                    $rest.put(out);
                )*
                out.push(')');
            }
        }
    };
}

loggable_tuple!(A);
loggable_tuple!(A, B);
loggable_tuple!(A, B, C);
loggable_tuple!(A, B, C, D);
loggable_tuple!(A, B, C, D, E);
loggable_tuple!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_serialization() {
        assert_eq!(to_log_string(&12345i32), "12345");
        assert_eq!(to_log_string(&3.14159f64), "3.14159");
        assert_eq!(to_log_string(&-7i64), "-7");
    }

    #[test]
    fn test_single_byte_is_numeric() {
        assert_eq!(to_log_string(&65u8), "65");
        assert_eq!(to_log_string(&65i8), "65");
        assert_eq!(to_log_string(&-1i8), "-1");
        assert_eq!(to_log_string(&vec![65u8, 66u8]), "[65, 66]");
    }

    #[test]
    fn test_string_serialization() {
        assert_eq!(to_log_string("Hello"), "Hello");
        assert_eq!(to_log_string(&String::from("Hello")), "Hello");
        assert_eq!(to_log_string(&'x'), "x");
    }

    #[test]
    fn test_bool_serialization() {
        assert_eq!(to_log_string(&true), "true");
    }

    #[test]
    fn test_containers() {
        assert_eq!(to_log_string(&Vec::<i32>::new()), "[]");
        assert_eq!(to_log_string(&[1, 2, 3]), "[1, 2, 3]");
        assert_eq!(to_log_string(&vec![vec![1], vec![2, 3]]), "[[1], [2, 3]]");
        let set: BTreeSet<_> = [3, 1, 2].into_iter().collect();
        assert_eq!(to_log_string(&set), "[1, 2, 3]");
    }

    #[test]
    fn test_pairs_and_maps() {
        assert_eq!(to_log_string(&(1, "one")), "(1, one)");
        assert_eq!(to_log_string(&(1, 2.5, 'c')), "(1, 2.5, c)");
        let map: BTreeMap<_, _> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(to_log_string(&map), "[(a, 1), (b, 2)]");
    }

    #[test]
    fn test_option_and_duration() {
        assert_eq!(to_log_string(&Some(3u8)), "Some(3)");
        assert_eq!(to_log_string(&None::<i32>), "None");
        assert_eq!(to_log_string(&Duration::from_millis(1500)), "1.5");
    }

    #[test]
    fn test_shown() {
        struct Point(i32, i32);
        impl fmt::Display for Point {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "<{}, {}>", self.0, self.1)
            }
        }
        assert_eq!(to_log_string(&shown(Point(1, 2))), "<1, 2>");
    }
}
