/*!
# Bipartite Graphs

A graph is bipartite if its vertices can be split into two sides such that every edge connects
both sides. Equivalently it contains no cycle of odd length.

The two-coloring is computed by BFS from every uncolored vertex in ascending order, hence
components are colored independently and the smallest vertex of each component lands on the
[`Side::Left`]. Edge directions are ignored.
*/

use std::collections::VecDeque;

use fxhash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::*;

/// Side of a vertex in a two-coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the other side
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Event emitted during the two-coloring
#[derive(Debug, Clone, PartialEq)]
pub enum ColoringEvent<V> {
    /// The vertex was put on a side
    Colored(V, Side),
    /// The edge connects two vertices on the same side; the coloring is aborted
    Conflict(V, V),
    /// Every vertex was colored without conflict
    Done,
}

/// BFS state of a two-coloring. On conflict, `Err((u, v))` holds the offending edge.
struct ColoringSearch<V> {
    sides: FxHashMap<V, Side>,
    parents: FxHashMap<V, V>,
}

impl<V: Vertex> ColoringSearch<V> {
    fn run<G, O>(graph: &G, observer: &mut O) -> Result<Self, (Self, V, V)>
    where
        G: WeightedAdjacency<V = V>,
        O: Observer<ColoringEvent<V>>,
    {
        let neighbors = undirected_neighborhoods(graph);
        let mut search = Self {
            sides: FxHashMap::default(),
            parents: FxHashMap::default(),
        };

        for start in graph.ordered_vertices() {
            if search.sides.contains_key(&start) {
                continue;
            }

            search.sides.insert(start.clone(), Side::Left);
            observer.notify(ColoringEvent::Colored(start.clone(), Side::Left));

            let mut queue = VecDeque::from([start]);
            while let Some(u) = queue.pop_front() {
                let side = search.sides[&u];
                for v in neighbors.get(&u).into_iter().flatten() {
                    match search.sides.get(*v) {
                        None => {
                            let v = (*v).clone();
                            search.sides.insert(v.clone(), side.opposite());
                            search.parents.insert(v.clone(), u.clone());
                            observer.notify(ColoringEvent::Colored(v.clone(), side.opposite()));
                            queue.push_back(v);
                        }
                        Some(other) if *other == side => {
                            let v = (*v).clone();
                            observer.notify(ColoringEvent::Conflict(u.clone(), v.clone()));
                            debug!(?u, ?v, "graph is not bipartite");
                            return Err((search, u, v));
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        observer.notify(ColoringEvent::Done);
        Ok(search)
    }

    /// Path from `u` to the root of its BFS tree
    fn path_to_root(&self, u: &V) -> Vec<V> {
        let mut path = vec![u.clone()];
        while let Some(parent) = path.last().and_then(|v| self.parents.get(v)) {
            path.push(parent.clone());
        }
        path
    }

    /// Odd cycle closed by the same-side edge `(u, v)` via their lowest common ancestor
    fn odd_cycle(&self, u: &V, v: &V) -> Vec<V> {
        let mut from_u = self.path_to_root(u);
        let mut from_v = self.path_to_root(v);

        let ancestors_of_u: FxHashSet<&V> = from_u.iter().collect();
        let lca_in_v = from_v
            .iter()
            .position(|x| ancestors_of_u.contains(x))
            .unwrap_or(from_v.len() - 1);
        let lca_in_u = from_u
            .iter()
            .position(|x| *x == from_v[lca_in_v])
            .unwrap_or(from_u.len() - 1);

        from_u.truncate(lca_in_u + 1);
        from_v.truncate(lca_in_v);
        from_u.extend(from_v.into_iter().rev());
        from_u
    }
}

/// Bipartiteness tests
pub trait Bipartite: WeightedAdjacency {
    /// Returns *true* if the graph admits a two-coloring
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(GraphKind::Undirected, [(1, 2), (2, 3), (3, 4), (4, 1)]);
    /// assert!(g.is_bipartite());
    /// assert_eq!(g.bipartite_sets(), Some((vec![1, 3], vec![2, 4])));
    /// ```
    fn is_bipartite(&self) -> bool {
        self.two_coloring().is_some()
    }

    /// Returns the side of every vertex or `None` if the graph is not bipartite
    fn two_coloring(&self) -> Option<FxHashMap<Self::V, Side>> {
        self.two_coloring_with_observer(&mut NoObserver)
    }

    /// Same as [`Bipartite::two_coloring`] but reports every colored vertex and the conflict, if any
    fn two_coloring_with_observer<O>(&self, observer: &mut O) -> Option<FxHashMap<Self::V, Side>>
    where
        O: Observer<ColoringEvent<Self::V>>,
    {
        ColoringSearch::run(self, observer)
            .ok()
            .map(|search| search.sides)
    }

    /// Returns both sides as sorted vectors or `None` if the graph is not bipartite
    fn bipartite_sets(&self) -> Option<(Vec<Self::V>, Vec<Self::V>)> {
        let sides = self.two_coloring()?;
        let (left, right): (Vec<_>, Vec<_>) = self
            .ordered_vertices()
            .into_iter()
            .partition(|u| sides[u] == Side::Left);
        Some((left, right))
    }

    /// Returns an odd cycle as sequence of its vertices, each listed once, or `None` if the
    /// graph is bipartite. Consecutive vertices (and the last and first vertex) are adjacent.
    /// A self-loop is reported as a cycle of length one.
    fn find_odd_cycle(&self) -> Option<Vec<Self::V>> {
        match ColoringSearch::run(self, &mut NoObserver) {
            Ok(_) => None,
            Err((search, u, v)) => Some(search.odd_cycle(&u, &v)),
        }
    }

    /// Returns *true* if the graph is bipartite and every vertex on the left is adjacent to every
    /// vertex on the right
    fn is_complete_bipartite(&self) -> bool {
        let Some((left, right)) = self.bipartite_sets() else {
            return false;
        };

        left.iter().all(|u| {
            right
                .iter()
                .all(|v| self.weight_of(u, v).is_some() || self.weight_of(v, u).is_some())
        })
    }
}

impl<G> Bipartite for G where G: WeightedAdjacency {}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;
    use crate::testing::*;

    fn cycle(n: u32, kind: GraphKind) -> Graph<u32> {
        Graph::from_edges(kind, (1..=n).map(|u| (u, u % n + 1)))
    }

    #[test]
    fn even_and_odd_cycles() {
        let square = cycle(4, GraphKind::Undirected);
        assert!(square.is_bipartite());
        assert_eq!(square.bipartite_sets(), Some((vec![1, 3], vec![2, 4])));
        assert!(square.find_odd_cycle().is_none());
        assert!(square.is_complete_bipartite());

        let triangle = cycle(3, GraphKind::Undirected);
        assert!(!triangle.is_bipartite());
        assert!(triangle.two_coloring().is_none());
        assert!(triangle.bipartite_sets().is_none());
        assert!(!triangle.is_complete_bipartite());
        assert_eq!(
            triangle.find_odd_cycle().map(|c| c.into_iter().sorted().collect_vec()),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn directions_are_ignored() {
        let g = cycle(5, GraphKind::Directed);
        assert!(!g.is_bipartite());
        assert_eq!(g.find_odd_cycle().unwrap().len(), 5);

        let g = cycle(6, GraphKind::Directed);
        assert_eq!(g.bipartite_sets(), Some((vec![1, 3, 5], vec![2, 4, 6])));
        assert!(!g.is_complete_bipartite());
    }

    #[test]
    fn components_are_independent() {
        let g: Graph<u32> = Graph::from_parts(GraphKind::Undirected, [9], [(1, 2), (3, 4)]);
        let sides = g.two_coloring().unwrap();
        assert_eq!(sides[&1], Side::Left);
        assert_eq!(sides[&3], Side::Left);
        assert_eq!(sides[&9], Side::Left);
        assert_eq!(g.bipartite_sets(), Some((vec![1, 3, 9], vec![2, 4])));

        let empty: Graph<u32> = Graph::undirected();
        assert!(empty.is_bipartite());
        assert_eq!(empty.bipartite_sets(), Some((vec![], vec![])));
    }

    #[test]
    fn self_loop_is_odd() {
        let g: Graph<u32> = Graph::from_edges(GraphKind::Undirected, [(1, 2), (2, 2)]);
        assert!(!g.is_bipartite());
        assert_eq!(g.find_odd_cycle(), Some(vec![2]));
    }

    #[test]
    fn odd_cycles_are_valid() {
        let mut rng = test_rng(11);
        for _ in 0..100 {
            let g = random_graph(&mut rng, 12, 0.2, GraphKind::Undirected);
            match g.find_odd_cycle() {
                None => {
                    let sides = g.two_coloring().unwrap();
                    assert!(g.edges().all(|e| sides[&e.0] != sides[&e.1]));
                }
                Some(cycle) => {
                    assert!(!g.is_bipartite());
                    assert_eq!(cycle.len() % 2, 1);
                    assert_eq!(cycle.iter().unique().count(), cycle.len());
                    for (u, v) in cycle.iter().circular_tuple_windows() {
                        assert!(g.has_edge(u, v));
                    }
                }
            }
        }
    }

    #[test]
    fn observer_sees_coloring() {
        let g = cycle(4, GraphKind::Undirected);
        let mut events = Vec::new();
        g.two_coloring_with_observer(&mut |e: ColoringEvent<u32>| events.push(e));
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], ColoringEvent::Colored(1, Side::Left));
        assert_eq!(events[4], ColoringEvent::Done);

        let g = cycle(3, GraphKind::Undirected);
        let mut conflict = None;
        g.two_coloring_with_observer(&mut |e: ColoringEvent<u32>| {
            if let ColoringEvent::Conflict(u, v) = e {
                conflict = Some((u, v));
            }
        });
        assert_eq!(conflict, Some((2, 3)));
    }
}
