use std::hash::Hash;

use fxhash::FxHashMap;
use itertools::Itertools;

/// Disjoint-set forest with path compression and union-by-rank.
///
/// Elements are arbitrary hashable keys; they are mapped to dense indices on insertion.
#[derive(Debug, Clone)]
pub struct UnionFind<T> {
    index: FxHashMap<T, usize>,
    elements: Vec<T>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    num_sets: usize,
}

impl<T> Default for UnionFind<T> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            elements: Vec::new(),
            parent: Vec::new(),
            rank: Vec::new(),
            num_sets: 0,
        }
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for UnionFind<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut uf = Self::default();
        for x in iter {
            uf.make_set(x);
        }
        uf
    }
}

impl<T: Clone + Eq + Hash> UnionFind<T> {
    /// Creates an empty structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `x` as a singleton set. Returns *false* if `x` was already known.
    pub fn make_set(&mut self, x: T) -> bool {
        if self.index.contains_key(&x) {
            return false;
        }
        let idx = self.elements.len();
        self.index.insert(x.clone(), idx);
        self.elements.push(x);
        self.parent.push(idx);
        self.rank.push(0);
        self.num_sets += 1;
        true
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns *true* if no element was added yet
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of disjoint sets
    pub fn number_of_sets(&self) -> usize {
        self.num_sets
    }

    fn find_index(&mut self, mut idx: usize) -> usize {
        let mut root = idx;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[idx] != root {
            let next = self.parent[idx];
            self.parent[idx] = root;
            idx = next;
        }

        root
    }

    /// Returns the representative of the set containing `x` or `None` if `x` is unknown
    pub fn find(&mut self, x: &T) -> Option<&T> {
        let idx = *self.index.get(x)?;
        let root = self.find_index(idx);
        Some(&self.elements[root])
    }

    /// Returns *true* if both elements are known and in the same set
    pub fn connected(&mut self, x: &T, y: &T) -> bool {
        match (self.index.get(x).copied(), self.index.get(y).copied()) {
            (Some(ix), Some(iy)) => self.find_index(ix) == self.find_index(iy),
            _ => false,
        }
    }

    /// Merges the sets of `x` and `y`, adding unknown elements first.
    /// Returns *true* if two different sets were merged.
    pub fn union(&mut self, x: T, y: T) -> bool {
        self.make_set(x.clone());
        self.make_set(y.clone());

        let rx = self.find_index(self.index[&x]);
        let ry = self.find_index(self.index[&y]);
        if rx == ry {
            return false;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }

        self.num_sets -= 1;
        true
    }

    /// Returns all sets; elements keep their insertion order within a set and sets are
    /// ordered by their first inserted element.
    pub fn sets(&mut self) -> Vec<Vec<T>> {
        let roots = (0..self.elements.len())
            .map(|i| self.find_index(i))
            .collect_vec();

        let mut groups: Vec<Vec<T>> = Vec::with_capacity(self.num_sets);
        let mut group_of_root: FxHashMap<usize, usize> = FxHashMap::default();
        for (i, root) in roots.into_iter().enumerate() {
            let g = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[g].push(self.elements[i].clone());
        }
        groups
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn union_and_find() {
        let mut uf: UnionFind<char> = "abcde".chars().collect();
        assert_eq!(uf.number_of_sets(), 5);

        assert!(uf.union('a', 'b'));
        assert!(uf.union('c', 'd'));
        assert!(!uf.union('b', 'a'));
        assert_eq!(uf.number_of_sets(), 3);

        assert!(uf.connected(&'a', &'b'));
        assert!(!uf.connected(&'a', &'c'));

        assert!(uf.union('b', 'd'));
        assert!(uf.connected(&'a', &'c'));
        let root = *uf.find(&'a').unwrap();
        assert_eq!(uf.find(&'d'), Some(&root));
        assert_eq!(uf.sets(), vec![vec!['a', 'b', 'c', 'd'], vec!['e']]);
    }

    #[test]
    fn unknown_elements() {
        let mut uf = UnionFind::new();
        assert!(uf.find(&1).is_none());
        assert!(!uf.connected(&1, &2));

        assert!(uf.union(1, 2));
        assert_eq!(uf.len(), 2);
        assert_eq!(uf.number_of_sets(), 1);
    }

    #[test]
    fn long_chain_is_compressed() {
        let mut uf: UnionFind<u32> = (0..100).collect();
        for i in 1..100 {
            uf.union(i - 1, i);
        }
        let root = *uf.find(&99).unwrap();
        for i in 0..100 {
            assert_eq!(*uf.find(&i).unwrap(), root);
        }
        assert_eq!(uf.number_of_sets(), 1);
    }
}
