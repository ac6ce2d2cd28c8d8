/// Creates a [`Vector`](crate::Vector) from a list of elements, or from an element and a count.
///
/// The list form moves each element in and allocates exactly as many slots as there are
/// elements. The `[value; n]` form clones `value` into exactly `n` slots.
///
/// # Examples
///
/// ```
/// use allocvec::prelude::*;
///
/// let v: Vector<i32> = vector![1, 2, 3];
/// assert_eq!((&v[..], v.capacity()), (&[1, 2, 3][..], 3));
///
/// let w: Vector<String> = vector!["ab".to_string(); 2];
/// assert_eq!(&w[..], &["ab", "ab"]);
///
/// let empty: Vector<u8> = vector![];
/// assert_eq!(empty.capacity(), 0);
/// ```
#[macro_export]
macro_rules! vector {
    () => (
        $crate::Vector::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::Vector::from_elem($n, $elem)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::Vector::from([$($x),+])
    );
}
