/*!
# Eulerian Trails and Circuits

An Eulerian trail uses every edge exactly once; an Eulerian circuit additionally ends where it
started. [`Eulerian::is_eulerian`] classifies a graph by its degrees and by requiring all edges to
lie in one weakly connected component. Isolated vertices are ignored.

- [`Hierholzer`] splices closed sub-walks on a stack and runs in linear time,
- [`Fleury`] walks along the graph and never crosses an edge that would strand the remaining edges.
  It works on an owned copy of the graph and is considerably slower.

Both return the trail as a sequence of `(u, v)` steps or `None` if the graph is not Eulerian.
Trails are deterministic: among all valid continuations the smallest neighbor is taken.
*/

use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::{debug, trace};

use super::*;

/// Classification of a graph by the existence of Eulerian trails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EulerianKind {
    /// A closed trail exists (every vertex is balanced)
    Cycle,
    /// An open trail exists (exactly two unbalanced vertices)
    Path,
    /// No Eulerian trail exists
    NotEulerian,
}

/// Event emitted for every step of a computed trail
#[derive(Debug, Clone, PartialEq)]
pub enum EulerEvent<V> {
    Traversed(V, V),
}

/// Undirected: degree counting self-loops twice. Directed: out-degree minus in-degree.
fn degree_balance<G>(graph: &G) -> FxHashMap<&G::V, i64>
where
    G: WeightedAdjacency,
{
    let mut balance: FxHashMap<&G::V, i64> = graph.vertices().map(|u| (u, 0)).collect();
    for u in graph.vertices() {
        for v in graph.neighbors_of(u) {
            if graph.is_directed() {
                *balance.entry(u).or_default() += 1;
                *balance.entry(v).or_default() -= 1;
            } else {
                *balance.entry(u).or_default() += if u == v { 2 } else { 1 };
            }
        }
    }
    balance
}

fn classify<G>(graph: &G) -> EulerianKind
where
    G: WeightedAdjacency,
{
    if graph.is_edgeless() {
        return EulerianKind::NotEulerian;
    }

    let isolated = graph.isolated_vertices();
    let components_with_edges = graph
        .connected_components()
        .into_iter()
        .filter(|c| c.iter().any(|u| isolated.binary_search(u).is_err()))
        .count();
    if components_with_edges > 1 {
        return EulerianKind::NotEulerian;
    }

    let balance = degree_balance(graph);
    if graph.is_directed() {
        if balance.values().any(|b| b.abs() > 1) {
            return EulerianKind::NotEulerian;
        }
        let sources = balance.values().filter(|b| **b == 1).count();
        let sinks = balance.values().filter(|b| **b == -1).count();
        match (sources, sinks) {
            (0, 0) => EulerianKind::Cycle,
            (1, 1) => EulerianKind::Path,
            _ => EulerianKind::NotEulerian,
        }
    } else {
        match balance.values().filter(|d| *d % 2 == 1).count() {
            0 => EulerianKind::Cycle,
            2 => EulerianKind::Path,
            _ => EulerianKind::NotEulerian,
        }
    }
}

/// Returns a vertex a trail can start at: `start` if it is valid, otherwise the smallest valid
/// vertex if `start` is `None`. Returns `None` if the graph is not Eulerian or `start` is invalid.
fn trail_start<G>(graph: &G, start: Option<&G::V>) -> Option<G::V>
where
    G: WeightedAdjacency,
{
    let kind = classify(graph);
    let balance = degree_balance(graph);
    let can_start = |u: &G::V| match (kind, graph.is_directed()) {
        (EulerianKind::Cycle, _) => graph.degree_of(u) > 0,
        (EulerianKind::Path, true) => balance.get(u) == Some(&1),
        (EulerianKind::Path, false) => balance.get(u).is_some_and(|d| d % 2 == 1),
        (EulerianKind::NotEulerian, _) => false,
    };

    match start {
        Some(u) => can_start(u).then(|| u.clone()),
        None => graph.ordered_vertices().into_iter().find(|u| can_start(u)),
    }
}

fn report<V: Vertex, O: Observer<EulerEvent<V>>>(trail: &[(V, V)], observer: &mut O) {
    for (u, v) in trail {
        observer.notify(EulerEvent::Traversed(u.clone(), v.clone()));
    }
}

/// Hierholzer's algorithm on per-vertex lists of edge stubs.
///
/// The caller's graph is never modified.
#[derive(Debug, Clone)]
pub struct Hierholzer<V> {
    start: Option<V>,
}

impl<V> Default for Hierholzer<V> {
    fn default() -> Self {
        Self { start: None }
    }
}

impl<V: Vertex> Hierholzer<V> {
    /// Creates a new (default) instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the start vertex. It must be able to start a trail, otherwise no trail is returned.
    pub fn set_start(&mut self, start: V) {
        self.start = Some(start);
    }

    /// Updates the start vertex
    pub fn start(mut self, start: V) -> Self {
        self.set_start(start);
        self
    }

    /// Returns an Eulerian path or cycle as a list of edges, or `None` if there is none
    pub fn run<G>(&self, graph: &G) -> Option<Vec<(V, V)>>
    where
        G: WeightedAdjacency<V = V>,
    {
        self.run_with_observer(graph, &mut NoObserver)
    }

    /// Like [`Hierholzer::run`], reporting every traversed edge in trail order
    pub fn run_with_observer<G, O>(&self, graph: &G, observer: &mut O) -> Option<Vec<(V, V)>>
    where
        G: WeightedAdjacency<V = V>,
        O: Observer<EulerEvent<V>>,
    {
        let start = trail_start(graph, self.start.as_ref())?;

        // every undirected edge gets a stub at both endpoints sharing one index
        let edges = graph.ordered_edges();
        let mut stubs: FxHashMap<&V, Vec<(&V, usize)>> = FxHashMap::default();
        for (i, WeightedEdge(u, v, _)) in edges.iter().enumerate() {
            stubs.entry(u).or_default().push((v, i));
            if graph.is_undirected() && u != v {
                stubs.entry(v).or_default().push((u, i));
            }
        }
        for list in stubs.values_mut() {
            // popping from the back yields the smallest neighbor first
            list.sort_unstable_by(|a, b| b.cmp(a));
        }

        let mut used = vec![false; edges.len()];
        let mut stack = vec![&start];
        let mut walk = Vec::with_capacity(edges.len() + 1);

        while let Some(&current) = stack.last() {
            let next = stubs.get_mut(current).and_then(|list| {
                while let Some((v, i)) = list.pop() {
                    if !used[i] {
                        used[i] = true;
                        return Some(v);
                    }
                }
                None
            });

            match next {
                Some(v) => stack.push(v),
                None => walk.extend(stack.pop().cloned()),
            }
        }

        walk.reverse();
        let trail = walk.into_iter().tuple_windows().collect_vec();
        if trail.len() != graph.number_of_edges() {
            debug!(steps = trail.len(), "hierholzer could not use every edge");
            return None;
        }

        report(&trail, observer);
        Some(trail)
    }
}

/// Fleury's algorithm on an owned working copy of the graph
#[derive(Debug, Clone)]
pub struct Fleury<V> {
    start: Option<V>,
}

impl<V> Default for Fleury<V> {
    fn default() -> Self {
        Self { start: None }
    }
}

impl<V: Vertex> Fleury<V> {
    /// Creates a new (default) instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the start vertex. It must be able to start a trail, otherwise no trail is returned.
    pub fn set_start(&mut self, start: V) {
        self.start = Some(start);
    }

    /// Updates the start vertex
    pub fn start(mut self, start: V) -> Self {
        self.set_start(start);
        self
    }

    /// Returns an Eulerian path or cycle as a list of edges, or `None` if there is none
    pub fn run<G>(&self, graph: &G) -> Option<Vec<(V, V)>>
    where
        G: WeightedAdjacency<V = V>,
    {
        self.run_with_observer(graph, &mut NoObserver)
    }

    /// Like [`Fleury::run`], reporting every traversed edge in trail order
    pub fn run_with_observer<G, O>(&self, graph: &G, observer: &mut O) -> Option<Vec<(V, V)>>
    where
        G: WeightedAdjacency<V = V>,
        O: Observer<EulerEvent<V>>,
    {
        let mut current = trail_start(graph, self.start.as_ref())?;
        let mut remaining = Graph::from_graph(graph);
        let mut trail = Vec::with_capacity(graph.number_of_edges());

        loop {
            let candidates = remaining.ordered_neighbors_of(&current);
            let Some(first) = candidates.first() else {
                break;
            };

            let next = if candidates.len() == 1 {
                first.clone()
            } else {
                candidates
                    .iter()
                    .find(|v| Self::is_safe(&mut remaining, &current, v))
                    .unwrap_or(first)
                    .clone()
            };

            trace!(?current, ?next, "fleury crosses edge");
            remaining.remove_edge(&current, &next);
            trail.push((current, next.clone()));
            current = next;
        }

        if !remaining.is_edgeless() {
            debug!(
                left = remaining.number_of_edges(),
                "fleury got stuck before using every edge"
            );
            return None;
        }

        report(&trail, observer);
        Some(trail)
    }

    /// Tentatively removes `(u, v)` and checks that every remaining edge is still reachable from `v`.
    /// For undirected graphs this accepts exactly the non-bridges.
    fn is_safe(remaining: &mut Graph<V>, u: &V, v: &V) -> bool {
        let Some(weight) = remaining.remove_edge(u, v) else {
            return false;
        };

        let safe = {
            let mut reach = remaining.bfs(v);
            reach.by_ref().for_each(drop);
            remaining.edges().all(|e| reach.did_visit(&e.0))
        };

        remaining.add_edge(u.clone(), v.clone(), weight);
        safe
    }
}

/// Eulerian classification and trail construction with default settings
pub trait Eulerian: WeightedAdjacency {
    /// Classifies the graph
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(GraphKind::Undirected, [(1, 2), (2, 3), (3, 1)]);
    /// assert_eq!(g.is_eulerian(), EulerianKind::Cycle);
    /// assert_eq!(g.hierholzer(), Some(vec![(1, 2), (2, 3), (3, 1)]));
    /// ```
    fn is_eulerian(&self) -> EulerianKind {
        classify(self)
    }

    /// Runs [`Hierholzer`] from the default start vertex
    fn hierholzer(&self) -> Option<Vec<(Self::V, Self::V)>> {
        Hierholzer::new().run(self)
    }

    /// Runs [`Fleury`] from the default start vertex
    fn fleury(&self) -> Option<Vec<(Self::V, Self::V)>> {
        Fleury::new().run(self)
    }
}

impl<G> Eulerian for G where G: WeightedAdjacency {}
