use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::prelude::*;

/// Seeded generator used throughout the tests
pub(crate) fn test_rng(seed: u64) -> Pcg64Mcg {
    Pcg64Mcg::seed_from_u64(seed)
}

/// Random graph on vertices `0..n` where each (ordered if directed) pair of distinct vertices is
/// connected with probability `p`. Weights are integral values in `1..=10`, so sums are exact.
pub(crate) fn random_graph<R: Rng>(rng: &mut R, n: u32, p: f64, kind: GraphKind) -> Graph<u32> {
    let mut graph = Graph::new(kind);
    graph.add_vertices(0..n);

    for u in 0..n {
        for v in 0..n {
            if u == v || (!kind.is_directed() && v < u) {
                continue;
            }
            if rng.random_bool(p) {
                graph.add_edge(u, v, rng.random_range(1..=10) as Weight);
            }
        }
    }

    graph
}

/// Random edge list on vertices `0..n` with possible self-loops and repeated pairs
pub(crate) fn random_edges<R: Rng>(rng: &mut R, n: u32, m: usize) -> Vec<(u32, u32, Weight)> {
    (0..m)
        .map(|_| {
            (
                rng.random_range(0..n),
                rng.random_range(0..n),
                rng.random_range(-5..=5) as Weight,
            )
        })
        .collect()
}

/// Every representation must answer the queries of `WeightedAdjacency` consistently with the
/// edges it was built from. `$build` converts a `&Graph<u32>` into the representation under test.
macro_rules! test_weighted_adjacency {
    ($env:ident, $build:expr) => {
        #[cfg(test)]
        mod $env {
            use fxhash::FxHashMap;
            use itertools::Itertools;

            use crate::{prelude::*, testing::*};

            fn check(kind: GraphKind, seed: u64) {
                let rng = &mut test_rng(seed);
                for n in [1u32, 5, 20] {
                    for m in [0, n as usize, 4 * n as usize] {
                        let edges = random_edges(rng, n, m);

                        // last write wins
                        let mut expected: FxHashMap<(u32, u32), Weight> = FxHashMap::default();
                        for &(u, v, w) in &edges {
                            expected.insert((u, v), w);
                            if !kind.is_directed() {
                                expected.insert((v, u), w);
                            }
                        }

                        let graph: Graph<u32> = Graph::from_parts(kind, 0..n, edges);
                        let repr = ($build)(&graph);

                        assert_eq!(repr.kind(), kind);
                        assert_eq!(repr.number_of_vertices(), n as usize);
                        assert_eq!(repr.ordered_vertices(), (0..n).collect_vec());

                        let loops = expected.keys().filter(|(u, v)| u == v).count();
                        let m_expected = if kind.is_directed() {
                            expected.len()
                        } else {
                            (expected.len() - loops) / 2 + loops
                        };
                        assert_eq!(repr.number_of_edges(), m_expected);
                        assert_eq!(repr.edges().count(), m_expected);
                        assert_eq!(repr.ordered_edges(), graph.ordered_edges());

                        for u in 0..n {
                            for v in 0..n {
                                assert_eq!(repr.weight_of(&u, &v), expected.get(&(u, v)).copied());
                            }
                            let neighbors = (0..n)
                                .filter(|v| expected.contains_key(&(u, *v)))
                                .collect_vec();
                            assert_eq!(repr.ordered_neighbors_of(&u), neighbors);
                            assert_eq!(repr.degree_of(&u), neighbors.len());
                        }

                        assert!(repr.neighbors_of(&n).next().is_none());
                        assert_eq!(repr.weight_of(&n, &0), None);
                    }
                }
            }

            #[test]
            fn directed_queries() {
                check(GraphKind::Directed, 1);
            }

            #[test]
            fn undirected_queries() {
                check(GraphKind::Undirected, 2);
            }
        }
    };
}

pub(crate) use test_weighted_adjacency;
