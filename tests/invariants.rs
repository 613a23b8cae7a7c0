//! Checks that the matching invariants hold over randomly generated networks.

use detector_match::{
    math::Point2d, DetectorAttributes, LinkAttributes, MatchConfig, Matcher, Network,
    NodeAttributes, ProcessingOrder,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

const STREETS: [&str; 4] = ["Bahnhofstrasse", "Limmatquai", "Seestrasse", "Langstrasse"];

/// Generates a network of wiggly streets, each a chain of links,
/// where two-way and one-way links are mixed and some streets are dual carriageways.
fn random_network(rng: &mut StdRng) -> Network {
    let mut network = Network::new();
    for (i, name) in STREETS.into_iter().enumerate() {
        let y0 = 200.0 * i as f64;
        let nodes = (0..8)
            .map(|j| {
                network.add_node(&NodeAttributes {
                    source_id: &format!("{}-{}", i, j),
                    position: Point2d::new(
                        100.0 * j as f64 + rng.gen_range(-20.0..20.0),
                        y0 + rng.gen_range(-30.0..30.0),
                    ),
                })
            })
            .collect::<Vec<_>>();
        for pair in nodes.windows(2) {
            let oneway = rng.gen_bool(0.4);
            network
                .add_link(&LinkAttributes {
                    name,
                    oneway,
                    tail: pair[0],
                    head: pair[1],
                    geometry: None,
                })
                .unwrap();
            if oneway && rng.gen_bool(0.5) {
                network
                    .add_link(&LinkAttributes {
                        name,
                        oneway,
                        tail: pair[1],
                        head: pair[0],
                        geometry: None,
                    })
                    .unwrap();
            }
        }
    }
    network
}

fn random_matcher(seed: u64, config: MatchConfig) -> Matcher {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matcher = Matcher::with_config(random_network(&mut rng), config);
    for k in 0..40 {
        let street = rng.gen_range(0..STREETS.len());
        let axis = if rng.gen_bool(0.05) {
            "Nowhere"
        } else {
            STREETS[street]
        };
        let x = rng.gen_range(0.0..700.0);
        let y = 200.0 * street as f64 + rng.gen_range(-40.0..40.0);
        let direction = Point2d::new(
            if rng.gen_bool(0.5) { 5_000.0 } else { -5_000.0 },
            y + rng.gen_range(-100.0..100.0),
        );
        matcher.add_detector(&DetectorAttributes {
            source_id: &(1000 - k).to_string(),
            position: Point2d::new(x, y),
            axis,
            direction: Some(direction),
        });
    }
    matcher
}

#[test]
fn invariants_hold_after_matching() {
    for seed in 0..25 {
        let mut matcher = random_matcher(seed, MatchConfig::default());
        matcher.assign_all().unwrap();

        let sanity = matcher.sanity_check();
        assert!(sanity.passed(), "seed {}: {:?}", seed, sanity);

        // Every detector either holds exactly one slot or gave up
        let network = matcher.network();
        let mut seen = HashSet::new();
        for (link, orientation, assignment) in network.assignments() {
            assert!(seen.insert(assignment.detector));
            assert!(link.permits(orientation));
            assert_eq!(
                matcher.assignment_of(assignment.detector),
                Some((link.id(), orientation))
            );
        }
        for detector in matcher.iter_detectors() {
            let assigned = matcher.assignment_of(detector.id()).is_some();
            let gave_up = matcher.report().is_unassigned(detector.id());
            assert!(assigned != gave_up, "seed {}: {}", seed, detector.source_id());
        }
        assert_eq!(matcher.export().len(), seen.len());
    }
}

#[test]
fn matching_is_deterministic() {
    for seed in 0..10 {
        for order in [ProcessingOrder::Insertion, ProcessingOrder::SourceId] {
            let config = MatchConfig {
                order,
                ..Default::default()
            };
            let mut a = random_matcher(seed, config.clone());
            let mut b = random_matcher(seed, config);
            a.assign_all().unwrap();
            b.assign_all().unwrap();
            assert_eq!(a.export(), b.export());
            assert_eq!(a.report(), b.report());
        }
    }
}

#[test]
fn sanity_check_is_idempotent() {
    let mut matcher = random_matcher(7, MatchConfig::default());
    matcher.assign_all().unwrap();
    let before = matcher.export();
    let first = matcher.sanity_check();
    let second = matcher.sanity_check();
    assert!(first.passed());
    assert_eq!(first, second);
    assert_eq!(before, matcher.export());
}

#[test]
fn relevant_links_are_named_after_detectors() {
    let matcher = random_matcher(3, MatchConfig::default());
    let axes = matcher
        .iter_detectors()
        .map(|d| d.axis())
        .collect::<HashSet<_>>();
    let links = matcher.relevant_links();
    assert!(!links.is_empty());
    for link_id in links {
        let link = matcher.network().get_link(link_id).unwrap();
        assert!(axes.contains(link.name()));
    }
}
