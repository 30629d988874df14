//! Prefix aggregation over name records, checked against linear scans.

use proptest::prelude::*;

use babynames::record::Name;
use babynames::tree::AvlTree;
use babynames::year::YearNames;

// =============================================================================
// Test helpers
// =============================================================================

const NAMES: [&str; 6] = ["Emma", "emma", "Liam", "OLIVIA", "Noah", "ava"];
const COUNTIES: [&str; 5] = ["Kings", "KINGS", "Queens", "Albany", "erie"];
const GENDERS: [&str; 4] = ["F", "M", "f", "m"];

/// Records drawn from tiny vocabularies in mixed case, so that keys
/// collide case-insensitively and equal primaries land on both sides of
/// many nodes.
fn arbitrary_name() -> impl Strategy<Value = Name> {
    (
        prop::sample::select(NAMES.to_vec()),
        prop::sample::select(GENDERS.to_vec()),
        0i64..10_000,
        prop::sample::select(COUNTIES.to_vec()),
    )
        .prop_map(|(name, gender, count, county)| Name::new(name, gender, count, county).unwrap())
}

fn scan(tree: &AvlTree<Name>, keep: impl Fn(&Name) -> bool) -> u64 {
    tree.iter().filter(|name| keep(name)).map(Name::count).sum()
}

fn same(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

// =============================================================================
// Aggregation properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pruned primary-key totals equal a full scan, for any insertion order.
    #[test]
    fn weight_by_primary_matches_scan(
        names in prop::collection::vec(arbitrary_name(), 0..120),
        query in prop::sample::select(NAMES.to_vec()),
    ) {
        let tree: AvlTree<Name> = names.into_iter().collect();
        let expected = scan(&tree, |name| same(name.name(), query));
        prop_assert_eq!(tree.weight_by_primary(query), expected);
    }

    /// Pruned two-component totals equal a full scan.
    #[test]
    fn weight_by_primary_and_secondary_matches_scan(
        names in prop::collection::vec(arbitrary_name(), 0..120),
        query in prop::sample::select(NAMES.to_vec()),
        county in prop::sample::select(COUNTIES.to_vec()),
    ) {
        let tree: AvlTree<Name> = names.into_iter().collect();
        let expected = scan(&tree, |name| same(name.name(), query) && same(name.county(), county));
        prop_assert_eq!(tree.weight_by_primary_and_secondary(query, county), expected);
    }

    /// The county fraction divides by the county's total, or is 0 when empty.
    #[test]
    fn fraction_by_primary_and_secondary_is_ratio(
        names in prop::collection::vec(arbitrary_name(), 0..120),
        query in prop::sample::select(NAMES.to_vec()),
        county in prop::sample::select(COUNTIES.to_vec()),
    ) {
        let tree: AvlTree<Name> = names.into_iter().collect();
        let numerator = tree.weight_by_primary_and_secondary(query, county);
        let denominator = tree.weight_by_secondary(county);
        let fraction = tree.fraction_by_primary_and_secondary(query, county);

        if denominator == 0 {
            prop_assert_eq!(numerator, 0);
            prop_assert_eq!(fraction, 0.0);
        } else {
            prop_assert_eq!(fraction, numerator as f64 / denominator as f64);
        }
        prop_assert!((0.0..=1.0).contains(&fraction));
    }

    /// Removing a record subtracts exactly its count from its name's total.
    #[test]
    fn remove_subtracts_count(
        names in prop::collection::vec(arbitrary_name(), 1..80),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree: AvlTree<Name> = names.iter().cloned().collect();
        let target = names[pick.index(names.len())].clone();
        let stored = tree.get(&target).unwrap().clone();
        let before = tree.weight_by_primary(target.name());

        prop_assert!(tree.remove(&target));
        prop_assert_eq!(tree.weight_by_primary(target.name()), before - stored.count());
        prop_assert_eq!(tree.verify(), Ok(()));
    }
}

// =============================================================================
// Concrete scenario
// =============================================================================

fn name(name: &str, gender: &str, county: &str, count: i64) -> Name {
    Name::new(name, gender, count, county).unwrap()
}

#[test]
fn emma_and_liam() {
    let mut year = YearNames::new(2010);
    year.insert(name("Emma", "F", "Kings", 100));
    year.insert(name("Emma", "M", "Kings", 5));
    year.insert(name("Emma", "F", "Queens", 50));
    year.insert(name("Liam", "M", "Kings", 80));

    assert_eq!(year.count_by_name("emma"), 155);
    assert_eq!(year.count_by_name_county("emma", "kings"), 105);
    assert!((year.fraction_by_name("Emma") - 0.6596).abs() < 1e-4);

    assert!(year.remove(&name("Emma", "F", "Kings", 100)));
    assert_eq!(year.count_by_name("emma"), 55);
    assert_eq!(year.len(), 3);
}

#[test]
fn in_order_rendering() {
    let tree: AvlTree<Name> = [
        name("Liam", "M", "Kings", 80),
        name("Emma", "F", "Queens", 50),
        name("Emma", "F", "Kings", 100),
    ]
    .into_iter()
    .collect();

    assert_eq!(tree.to_string(), "Emma,F,100,Kings  Emma,F,50,Queens  Liam,M,80,Kings  ");
    assert_eq!(
        tree.to_tree_string(),
        concat!(
            "\n2Emma,F,50,Queens",
            "\n|--1Emma,F,100,Kings",
            "\n   |--null",
            "\n   |--null",
            "\n|--1Liam,M,80,Kings",
            "\n   |--null",
            "\n   |--null",
        )
    );
}
