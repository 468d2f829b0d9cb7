//! Merge-style operations over ascending sequences.

use std::cmp::Ordering;
use std::iter::Fuse;

/// An iterator over the items two ascending, duplicate-free sequences have in common.
///
/// Items are compared across the two sequences with `PartialOrd`, so the element types may differ
/// (for example integers against floating-point values). Matching items are yielded from the
/// left sequence. Pairs that are incomparable are skipped on both sides.
///
/// This struct is created by the [`intersection`] function.
pub struct Intersection<I, J>
where
    I: Iterator,
    J: Iterator,
{
    left: Fuse<I>,
    right: Fuse<J>,
}

/// Returns the items common to `left` and `right`, both of which must be ascending and
/// duplicate-free. Runs in time linear in the combined length of the two sequences.
///
/// # Examples
///
/// ```
/// use balanced_collections::merge::intersection;
///
/// let left = [1, 3, 5, 7];
/// let right = [3, 4, 7, 9];
/// assert_eq!(intersection(&left, &right).collect::<Vec<&i32>>(), vec![&3, &7]);
/// ```
pub fn intersection<I, J>(left: I, right: J) -> Intersection<I::IntoIter, J::IntoIter>
where
    I: IntoIterator,
    J: IntoIterator,
{
    Intersection {
        left: left.into_iter().fuse(),
        right: right.into_iter().fuse(),
    }
}

impl<I, J> Iterator for Intersection<I, J>
where
    I: Iterator,
    J: Iterator,
    I::Item: PartialOrd<J::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let mut left = self.left.next()?;
        let mut right = self.right.next()?;
        loop {
            match left.partial_cmp(&right) {
                Some(Ordering::Equal) => return Some(left),
                Some(Ordering::Less) => left = self.left.next()?,
                Some(Ordering::Greater) => right = self.right.next()?,
                None => {
                    left = self.left.next()?;
                    right = self.right.next()?;
                },
            }
        }
    }
}
