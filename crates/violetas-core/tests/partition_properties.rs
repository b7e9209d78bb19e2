//! Property and distribution tests for breakout group formation.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use violetas_core::{GroupPartitioner, GroupsConfig, Roster};

fn roster(english: usize, spanish: usize) -> Roster {
    Roster::new(
        (0..english).map(|i| format!("en-{i}")),
        (0..spanish).map(|i| format!("es-{i}")),
    )
    .unwrap()
}

fn seeded(seed: u64) -> GroupPartitioner {
    GroupPartitioner::new(&GroupsConfig {
        seed: Some(seed),
        ..GroupsConfig::default()
    })
}

proptest! {
    #[test]
    fn below_gate_never_forms_groups(english in 0usize..6, spanish in 0usize..6, seed: u64) {
        prop_assume!(english + spanish < 6);
        prop_assert!(seeded(seed).partition(&roster(english, spanish)).is_none());
    }

    #[test]
    fn configured_minimum_never_lowers_the_gate(
        minimum in 0usize..6,
        english in 0usize..6,
        spanish in 0usize..6,
        seed: u64,
    ) {
        prop_assume!(english + spanish < 6);
        let mut partitioner = GroupPartitioner::new(&GroupsConfig {
            min_attendees: minimum,
            seed: Some(seed),
        });
        prop_assert!(partitioner.partition(&roster(english, spanish)).is_none());
    }

    #[test]
    fn every_attendee_lands_in_exactly_one_group(
        english in 0usize..12,
        spanish in 0usize..12,
        seed: u64,
    ) {
        prop_assume!(english + spanish >= 6);
        let input = roster(english, spanish);
        let groups = seeded(seed).partition(&input).unwrap();

        let one: BTreeSet<&String> = groups.group1.iter().collect();
        let two: BTreeSet<&String> = groups.group2.iter().collect();
        prop_assert_eq!(one.len(), groups.group1.len());
        prop_assert_eq!(two.len(), groups.group2.len());
        prop_assert!(one.is_disjoint(&two));

        let everyone: BTreeSet<&String> = input.english().iter().chain(input.spanish()).collect();
        let union: BTreeSet<&String> = one.union(&two).copied().collect();
        prop_assert_eq!(union, everyone);
    }

    #[test]
    fn group_sizes_follow_crossed_halves(
        english in 0usize..12,
        spanish in 0usize..12,
        seed: u64,
    ) {
        prop_assume!(english + spanish >= 6);
        let groups = seeded(seed).partition(&roster(english, spanish)).unwrap();
        prop_assert_eq!(groups.group1.len(), english.div_ceil(2) + spanish / 2);
        prop_assert_eq!(groups.group2.len(), english / 2 + spanish.div_ceil(2));
    }

    #[test]
    fn groups_mix_languages_when_both_halves_exist(
        english in 2usize..10,
        spanish in 2usize..10,
        seed: u64,
    ) {
        prop_assume!(english + spanish >= 6);
        let groups = seeded(seed).partition(&roster(english, spanish)).unwrap();
        for group in [&groups.group1, &groups.group2] {
            prop_assert!(group.iter().any(|n| n.starts_with("en-")));
            prop_assert!(group.iter().any(|n| n.starts_with("es-")));
        }
    }
}

const SAMPLES: usize = 6000;

#[test]
fn english_halves_are_uniformly_chosen() {
    let input = Roster::new(["A", "B", "C", "D"], ["E", "F"]).unwrap();
    let mut partitioner = seeded(2024);
    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();

    for _ in 0..SAMPLES {
        let groups = partitioner.partition(&input).unwrap();
        let mut english: Vec<String> = groups
            .group1
            .iter()
            .filter(|n| input.english().contains(*n))
            .cloned()
            .collect();
        english.sort();
        *counts.entry(english).or_default() += 1;
    }

    // C(4, 2) = 6 equally likely pairs, about 1000 each.
    assert_eq!(counts.len(), 6);
    for (pair, count) in &counts {
        assert!((850..=1150).contains(count), "{pair:?} drawn {count} times");
    }
}

#[test]
fn spanish_split_is_a_fair_coin() {
    let input = Roster::new(["A", "B", "C", "D"], ["E", "F"]).unwrap();
    let mut partitioner = seeded(77);
    let e_in_group1 = (0..SAMPLES)
        .filter(|_| {
            let groups = partitioner.partition(&input).unwrap();
            groups.group1.iter().any(|n| n == "E")
        })
        .count();
    assert!((2700..=3300).contains(&e_in_group1), "E in group1 {e_in_group1} times");
}

#[test]
fn final_order_is_shuffled() {
    let input = Roster::new(["A", "B", "C", "D"], ["E", "F"]).unwrap();
    let mut partitioner = seeded(5);
    // group1 holds two English speakers and one Spanish speaker.
    let spanish_first = (0..SAMPLES)
        .filter(|_| {
            let groups = partitioner.partition(&input).unwrap();
            input.spanish().contains(&groups.group1[0])
        })
        .count();
    assert!((1700..=2300).contains(&spanish_first), "spanish first {spanish_first} times");
}

#[test]
fn repeated_calls_do_not_remember_pairings() {
    let input = Roster::new(["A", "B", "C", "D"], ["E", "F", "G"]).unwrap();
    let mut partitioner = seeded(9);
    let distinct: BTreeSet<Vec<String>> = (0..200)
        .map(|_| {
            let mut g = partitioner.partition(&input).unwrap().group1;
            g.sort();
            g
        })
        .collect();
    assert!(distinct.len() > 1);
}
