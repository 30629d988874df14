//! AFL fuzz harness for the AVL tree.
//!
//! This harness checks the tree against `BTreeSet` as a model:
//! 1. Membership: insert/remove report the same outcome as the model
//! 2. Order: in-order traversal equals the model's iteration order
//! 3. Structure: every AVL invariant holds after every operation
//! 4. Aggregation: prefix weight queries equal a linear scan
//!
//! Model: each record is a `(group, bucket, id)` key with a weight derived
//! from the input bytes. Small key spaces force duplicates and deep
//! rebalancing on both insert and remove paths.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use afl::fuzz;
use babynames::query::CompositeKey;
use babynames::query::Weighted;
use babynames::tree::AvlTree;

const GROUPS: u8 = 8;
const BUCKETS: u8 = 4;

/// A record ordered by its key only. The weight never takes part in
/// comparisons, so a duplicate insert with a new weight must be ignored.
#[derive(Debug, Clone, Copy)]
struct Record {
    key: (u8, u8, u8),
    weight: u64,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Weighted for Record {
    fn weight(&self) -> u64 {
        self.weight
    }
}

impl CompositeKey for Record {
    type Primary = u8;
    type Secondary = u8;

    fn cmp_primary(&self, primary: &u8) -> Ordering {
        self.key.0.cmp(primary)
    }

    fn cmp_secondary(&self, secondary: &u8) -> Ordering {
        self.key.1.cmp(secondary)
    }
}

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Insert a record, weight taken from the next byte
    Insert { record: Record },
    /// Remove the record with this key
    Remove { key: (u8, u8, u8) },
    /// Compare prefix aggregates against a scan
    Query { group: u8, bucket: u8 },
}

fn key_from(group: u8, bucket: u8, id: u8) -> (u8, u8, u8) {
    (group % GROUPS, bucket % BUCKETS, id)
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 3;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 4 => {
                let record = Record {
                    key: key_from(rest[0], rest[1], rest[2]),
                    weight: u64::from(rest[3]),
                };
                Some((FuzzOp::Insert { record }, &rest[4..]))
            }
            1 if rest.len() >= 3 => {
                let key = key_from(rest[0], rest[1], rest[2]);
                Some((FuzzOp::Remove { key }, &rest[3..]))
            }
            2 if rest.len() >= 2 => {
                let op = FuzzOp::Query {
                    group: rest[0] % GROUPS,
                    bucket: rest[1] % BUCKETS,
                };
                Some((op, &rest[2..]))
            }
            _ => None,
        }
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut tree: AvlTree<Record> = AvlTree::new();
        let mut model: BTreeSet<Record> = BTreeSet::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Insert { record } => {
                    assert_eq!(tree.insert(record), model.insert(record), "insert outcome");
                }

                FuzzOp::Remove { key } => {
                    let probe = Record { key, weight: 0 };
                    assert_eq!(tree.remove(&probe), model.remove(&probe), "remove outcome");
                }

                FuzzOp::Query { group, bucket } => {
                    let by_group: u64 = model.iter().filter(|r| r.key.0 == group).map(|r| r.weight).sum();
                    let by_both: u64 = model
                        .iter()
                        .filter(|r| r.key.0 == group && r.key.1 == bucket)
                        .map(|r| r.weight)
                        .sum();
                    let by_bucket: u64 = model.iter().filter(|r| r.key.1 == bucket).map(|r| r.weight).sum();

                    assert_eq!(tree.weight_by_primary(&group), by_group);
                    assert_eq!(tree.weight_by_primary_and_secondary(&group, &bucket), by_both);
                    assert_eq!(tree.weight_by_secondary(&bucket), by_bucket);
                }
            }

            // CRITICAL INVARIANT: structure stays balanced and ordered
            if let Err(violation) = tree.verify() {
                panic!("invariant violated after {op:?}: {violation}");
            }
        }

        assert_eq!(tree.len(), model.len(), "Length mismatch");
        let items: Vec<&Record> = tree.iter().collect();
        let expected: Vec<&Record> = model.iter().collect();
        assert_eq!(items, expected, "Order mismatch");

        let total: u64 = model.iter().map(|r| r.weight).sum();
        assert_eq!(tree.total_weight(), total, "Total weight mismatch");
    });
}
