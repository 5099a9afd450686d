use persistence::{
    Bipartite, Context, Digraph, EdgeClass, Error, Matching, OracleError, Persistence, Tarjan,
};
use quickcheck::{quickcheck, Arbitrary, Gen};
use rstest::rstest;
use std::collections::{BTreeMap, BTreeSet};

/// Left vertices are numbered from 0, right vertices from 'RIGHT'.
const RIGHT: u8 = 100;
const MAX_EDGES: usize = 12;

type Edge = (u8, u8);

#[derive(Clone, Debug)]
struct SmallGraph {
    num_left: u8,
    num_right: u8,
    edges: Vec<Edge>,
}

impl Arbitrary for SmallGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_left = u8::arbitrary(g) % 4 + 1;
        let num_right = u8::arbitrary(g) % 4 + 1;
        let mut edges = Vec::new();
        for u in 0..num_left {
            for v in RIGHT..RIGHT + num_right {
                if bool::arbitrary(g) && edges.len() < MAX_EDGES {
                    edges.push((u, v));
                }
            }
        }
        Self {
            num_left,
            num_right,
            edges,
        }
    }
}

impl SmallGraph {
    fn graph(&self) -> Bipartite<u8> {
        let mut graph = Bipartite::new();
        for u in 0..self.num_left {
            graph.add_left_node(u).unwrap();
        }
        for v in RIGHT..RIGHT + self.num_right {
            graph.add_right_node(v).unwrap();
        }
        for &(u, v) in self.edges.iter() {
            graph.add_edge(u, v).unwrap();
        }
        graph
    }
}

/// Every maximum matching, by trying each subset of the edges.
fn maximum_matchings(edges: &[Edge]) -> Vec<Vec<Edge>> {
    let mut best: Vec<Vec<Edge>> = vec![Vec::new()];
    for mask in 1u32..(1 << edges.len()) {
        let chosen: Vec<Edge> = (0..edges.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| edges[i])
            .collect();
        let mut used = BTreeSet::new();
        if !chosen.iter().all(|&(u, v)| used.insert(u) && used.insert(v)) {
            continue;
        }
        if chosen.len() > best[0].len() {
            best = vec![chosen];
        } else if chosen.len() == best[0].len() {
            best.push(chosen);
        }
    }
    best
}

fn expected_class(edge: &Edge, matchings: &[Vec<Edge>]) -> EdgeClass {
    let count = matchings.iter().filter(|m| m.contains(edge)).count();
    if count == matchings.len() {
        EdgeClass::One
    } else if count > 0 {
        EdgeClass::Weak
    } else {
        EdgeClass::Zero
    }
}

fn fixed_oracle(
    pairs: Vec<Edge>,
) -> impl Fn(&Bipartite<u8>) -> Result<Matching<u8>, OracleError> {
    move |g: &Bipartite<u8>| -> Result<Matching<u8>, OracleError> {
        Ok(Matching::from_pairs(g, pairs.clone())?)
    }
}

/// Strongly connected components from pairwise reachability; slow, but
/// obviously right.
fn naive_components(digraph: &Digraph<u8>) -> Result<Vec<BTreeSet<u8>>, OracleError> {
    let mut reach: BTreeMap<u8, BTreeSet<u8>> = BTreeMap::new();
    for &start in digraph.vertices() {
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            for &v in digraph.successors(&u)? {
                if seen.insert(v) {
                    stack.push(v);
                }
            }
        }
        reach.insert(start, seen);
    }

    let mut components: Vec<BTreeSet<u8>> = Vec::new();
    for &u in digraph.vertices() {
        if components.iter().any(|c| c.contains(&u)) {
            continue;
        }
        let component = reach[&u]
            .iter()
            .copied()
            .filter(|v| reach[v].contains(&u))
            .collect();
        components.push(component);
    }
    Ok(components)
}

fn check_against_brute_force(sg: &SmallGraph) -> bool {
    let graph = sg.graph();
    let persistence = Context::new(graph).unwrap().partition().unwrap();
    let matchings = maximum_matchings(&sg.edges);

    persistence.len() == sg.edges.len()
        && sg
            .edges
            .iter()
            .all(|e| persistence.class_of(&e.0, &e.1) == Some(expected_class(e, &matchings)))
}

fn check_oracle_independence(sg: &SmallGraph) -> bool {
    let graph = sg.graph();
    let reference = Context::new(graph.clone()).unwrap().partition().unwrap();

    maximum_matchings(&sg.edges).into_iter().all(|pairs| {
        let oracle = fixed_oracle(pairs);
        let with_tarjan = Context::with_oracles(graph.clone(), &oracle, Tarjan)
            .unwrap()
            .partition()
            .unwrap();
        let with_naive = Context::with_oracles(graph.clone(), &oracle, naive_components)
            .unwrap()
            .partition()
            .unwrap();
        with_tarjan == reference && with_naive == reference
    })
}

quickcheck! {
    fn prop_matches_brute_force(sg: SmallGraph) -> bool {
        check_against_brute_force(&sg)
    }

    fn prop_independent_of_oracles(sg: SmallGraph) -> bool {
        check_oracle_independence(&sg)
    }

    fn prop_forced_edges_are_matched(sg: SmallGraph) -> bool {
        let context = Context::new(sg.graph()).unwrap();
        let persistence = context.partition().unwrap();
        persistence
            .one()
            .iter()
            .all(|(u, v)| context.matching().contains(u, v))
    }
}

fn labelled(edges: &[(&'static str, &'static str)]) -> BTreeSet<(&'static str, &'static str)> {
    edges.iter().copied().collect()
}

fn classify(edges: &[(&'static str, &'static str)]) -> Persistence<&'static str> {
    let graph = Bipartite::from_edges(edges.iter().copied()).unwrap();
    Context::new(graph).unwrap().partition().unwrap()
}

#[rstest]
#[case::single_edge(&[("a", "1")], &[("a", "1")], &[], &[])]
#[case::four_cycle(
    &[("a", "1"), ("a", "2"), ("b", "1"), ("b", "2")],
    &[],
    &[("a", "1"), ("a", "2"), ("b", "1"), ("b", "2")],
    &[]
)]
#[case::deficient(&[("a", "1"), ("b", "1")], &[], &[("a", "1"), ("b", "1")], &[])]
#[case::disconnected(&[("a", "1"), ("b", "2")], &[("a", "1"), ("b", "2")], &[], &[])]
fn scenarios(
    #[case] edges: &[(&'static str, &'static str)],
    #[case] one: &[(&'static str, &'static str)],
    #[case] weak: &[(&'static str, &'static str)],
    #[case] zero: &[(&'static str, &'static str)],
) {
    let p = classify(edges);
    assert_eq!(p.one(), &labelled(one));
    assert_eq!(p.weak(), &labelled(weak));
    assert_eq!(p.zero(), &labelled(zero));
}

#[test]
fn jobs_and_machines() {
    let p = classify(&[
        ("a", "1"),
        ("a", "3"),
        ("b", "1"),
        ("b", "2"),
        ("b", "4"),
        ("c", "1"),
        ("c", "3"),
        ("d", "3"),
        ("d", "5"),
        ("d", "6"),
        ("e", "5"),
        ("f", "4"),
        ("f", "7"),
        ("g", "5"),
    ]);

    assert_eq!(p.one(), &labelled(&[("d", "6")]));
    assert_eq!(
        p.weak(),
        &labelled(&[
            ("a", "1"),
            ("a", "3"),
            ("b", "2"),
            ("b", "4"),
            ("c", "1"),
            ("c", "3"),
            ("e", "5"),
            ("f", "4"),
            ("f", "7"),
            ("g", "5"),
        ])
    );
    assert_eq!(p.zero(), &labelled(&[("b", "1"), ("d", "3"), ("d", "5")]));
}

#[test]
fn asymmetric_adjacency_is_rejected() {
    // 'b' does not list '3', although '3' lists 'b'.
    let adjacency: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::from([
        ("a", BTreeSet::from(["1", "3"])),
        ("b", BTreeSet::from(["1"])),
        ("1", BTreeSet::from(["a", "b"])),
        ("3", BTreeSet::from(["a", "b"])),
    ]);
    let left = BTreeSet::from(["a", "b"]);
    let right = BTreeSet::from(["1", "3"]);
    let err = persistence::classify(adjacency, left, right).unwrap_err();
    assert!(matches!(err, Error::Asymmetric { .. }));
}

#[test]
fn classification_can_be_rerun() {
    let graph = Bipartite::from_edges([("a", "1"), ("a", "2"), ("b", "1")]).unwrap();
    let context = Context::new(graph).unwrap();
    let first = context.partition().unwrap();
    let second = context.partition().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.class_of(&"b", &"1"), Some(EdgeClass::One));
    assert_eq!(first.class_of(&"a", &"2"), Some(EdgeClass::One));
    assert_eq!(first.class_of(&"a", &"1"), Some(EdgeClass::Zero));
}

#[test]
fn contexts_run_on_separate_threads() {
    let handles: Vec<_> = (0..4u8)
        .map(|k| {
            std::thread::spawn(move || {
                let edges: Vec<Edge> = (0..=k).map(|i| (i, RIGHT + i)).collect();
                let graph = Bipartite::from_edges(edges).unwrap();
                Context::new(graph).unwrap().partition().unwrap()
            })
        })
        .collect();
    for (k, handle) in handles.into_iter().enumerate() {
        let p = handle.join().unwrap();
        assert_eq!(p.one().len(), k + 1);
    }
}
