//! Weight aggregation over trees of composite-key records.
//!
//! A record ordered by `(primary, secondary, tertiary)` keeps every record
//! with a given primary key in one contiguous run of the in-order sequence.
//! The folds here descend the tree's node linkage directly and skip every
//! subtree that lies entirely on one side of that run:
//!
//! - A node whose primary key sorts before the query can only have matches
//!   in its right subtree, and vice versa.
//! - A node whose primary key matches contributes its weight, and matches
//!   may continue on both sides, differing only in the lower components.
//!
//! The same prune-or-sum step applies one component down once the primary
//! key matches. Aggregating by secondary key alone cannot prune, because the
//! tree is not ordered by the secondary key at the top level, so
//! [`AvlTree::weight_by_secondary`] visits every node.
//!
//! | Fold                               | Cost         |
//! |------------------------------------|--------------|
//! | `weight_by_primary`                | O(k + log n) |
//! | `weight_by_primary_and_secondary`  | O(k + log n) |
//! | `weight_by_secondary`              | O(n)         |
//! | `total_weight`                     | O(n)         |
//!
//! where `k` is the number of matching records. Sums saturate at
//! `u64::MAX` instead of overflowing.

use std::cmp::Ordering;

use crate::tree::AvlTree;
use crate::tree::node::Node;

/// A record carrying a non-negative numeric weight.
pub trait Weighted {
    fn weight(&self) -> u64;
}

/// A record whose total order compares a primary component first and a
/// secondary component second.
///
/// Both methods compare `self`'s component against a query key and must
/// agree with the record's `Ord` implementation: if `a < b` then
/// `a.cmp_primary(p) <= b.cmp_primary(p)` for every `p`, and likewise for
/// the secondary component among records whose primary components are equal.
pub trait CompositeKey {
    type Primary: ?Sized;
    type Secondary: ?Sized;

    /// Order of this record's primary component relative to `primary`.
    fn cmp_primary(&self, primary: &Self::Primary) -> Ordering;

    /// Order of this record's secondary component relative to `secondary`.
    fn cmp_secondary(&self, secondary: &Self::Secondary) -> Ordering;
}

impl<T: Weighted> AvlTree<T> {
    /// Sum of every record's weight.
    pub fn total_weight(&self) -> u64 {
        return sum_all(self.root());
    }
}

impl<T: CompositeKey + Weighted> AvlTree<T> {
    /// Sum of weights of records whose primary key equals `primary`.
    pub fn weight_by_primary(&self, primary: &T::Primary) -> u64 {
        return sum_primary(self.root(), primary);
    }

    /// Sum of weights of records matching both `primary` and `secondary`.
    pub fn weight_by_primary_and_secondary(
        &self,
        primary: &T::Primary,
        secondary: &T::Secondary,
    ) -> u64 {
        return sum_primary_secondary(self.root(), primary, secondary);
    }

    /// Sum of weights of records whose secondary key equals `secondary`,
    /// whatever their primary key. Visits every node.
    pub fn weight_by_secondary(&self, secondary: &T::Secondary) -> u64 {
        return sum_secondary(self.root(), secondary);
    }

    /// [`weight_by_primary`](Self::weight_by_primary) when `secondary` is
    /// `None`, otherwise
    /// [`weight_by_primary_and_secondary`](Self::weight_by_primary_and_secondary).
    pub fn weight_by_prefix(&self, primary: &T::Primary, secondary: Option<&T::Secondary>) -> u64 {
        match secondary {
            Some(secondary) => return self.weight_by_primary_and_secondary(primary, secondary),
            None => return self.weight_by_primary(primary),
        }
    }

    /// Share of the tree's total weight held by records with primary key
    /// `primary`. Zero for an empty or weightless tree.
    pub fn fraction_by_primary(&self, primary: &T::Primary) -> f64 {
        return ratio(self.weight_by_primary(primary), self.total_weight());
    }

    /// Share of the weight under secondary key `secondary` held by records
    /// that also have primary key `primary`. Zero when nothing carries that
    /// secondary key.
    pub fn fraction_by_primary_and_secondary(
        &self,
        primary: &T::Primary,
        secondary: &T::Secondary,
    ) -> f64 {
        let matching = self.weight_by_primary_and_secondary(primary, secondary);
        return ratio(matching, self.weight_by_secondary(secondary));
    }

    /// [`fraction_by_primary`](Self::fraction_by_primary) when `secondary`
    /// is `None`, otherwise
    /// [`fraction_by_primary_and_secondary`](Self::fraction_by_primary_and_secondary).
    pub fn fraction_by_prefix(&self, primary: &T::Primary, secondary: Option<&T::Secondary>) -> f64 {
        match secondary {
            Some(secondary) => return self.fraction_by_primary_and_secondary(primary, secondary),
            None => return self.fraction_by_primary(primary),
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    return numerator as f64 / denominator as f64;
}

fn sum_all<T: Weighted>(node: Option<&Node<T>>) -> u64 {
    let Some(node) = node else {
        return 0;
    };
    return node
        .item
        .weight()
        .saturating_add(sum_all(node.left.as_deref()))
        .saturating_add(sum_all(node.right.as_deref()));
}

fn sum_primary<T>(node: Option<&Node<T>>, primary: &T::Primary) -> u64
where
    T: CompositeKey + Weighted,
{
    let Some(node) = node else {
        return 0;
    };
    match node.item.cmp_primary(primary) {
        Ordering::Equal => {
            return node
                .item
                .weight()
                .saturating_add(sum_primary(node.left.as_deref(), primary))
                .saturating_add(sum_primary(node.right.as_deref(), primary));
        }
        Ordering::Less => return sum_primary(node.right.as_deref(), primary),
        Ordering::Greater => return sum_primary(node.left.as_deref(), primary),
    }
}

fn sum_primary_secondary<T>(
    node: Option<&Node<T>>,
    primary: &T::Primary,
    secondary: &T::Secondary,
) -> u64
where
    T: CompositeKey + Weighted,
{
    let Some(node) = node else {
        return 0;
    };
    let left = node.left.as_deref();
    let right = node.right.as_deref();

    let order = node
        .item
        .cmp_primary(primary)
        .then_with(|| node.item.cmp_secondary(secondary));
    match order {
        Ordering::Equal => {
            return node
                .item
                .weight()
                .saturating_add(sum_primary_secondary(left, primary, secondary))
                .saturating_add(sum_primary_secondary(right, primary, secondary));
        }
        Ordering::Less => return sum_primary_secondary(right, primary, secondary),
        Ordering::Greater => return sum_primary_secondary(left, primary, secondary),
    }
}

fn sum_secondary<T>(node: Option<&Node<T>>, secondary: &T::Secondary) -> u64
where
    T: CompositeKey + Weighted,
{
    let Some(node) = node else {
        return 0;
    };
    let own = match node.item.cmp_secondary(secondary) {
        Ordering::Equal => node.item.weight(),
        _ => 0,
    };
    return own
        .saturating_add(sum_secondary(node.left.as_deref(), secondary))
        .saturating_add(sum_secondary(node.right.as_deref(), secondary));
}
