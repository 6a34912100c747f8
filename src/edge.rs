use std::fmt::{Debug, Display};

use crate::vertex::{DEFAULT_WEIGHT, Vertex, Weight};

/// A weighted edge is defined by two endpoints and a weight.
/// It is up to the graph whether an edge is directed or not.
#[derive(Clone, PartialEq)]
pub struct WeightedEdge<V>(pub V, pub V, pub Weight);

impl<V: Display> Display for WeightedEdge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{};{})", self.0, self.1, self.2)
    }
}

impl<V: Debug> Debug for WeightedEdge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?},{:?};{})", self.0, self.1, self.2)
    }
}

impl<V> WeightedEdge<V> {
    /// Creates an edge with the default weight `1.0`
    pub fn unit(u: V, v: V) -> Self {
        WeightedEdge(u, v, DEFAULT_WEIGHT)
    }

    /// Returns the first endpoint
    pub fn source(&self) -> &V {
        &self.0
    }

    /// Returns the second endpoint
    pub fn target(&self) -> &V {
        &self.1
    }

    /// Returns the weight of the edge
    pub fn weight(&self) -> Weight {
        self.2
    }

    /// Splits the edge into its endpoints and weight
    pub fn into_parts(self) -> (V, V, Weight) {
        (self.0, self.1, self.2)
    }
}

impl<V: Vertex> WeightedEdge<V> {
    /// Returns *true* if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        WeightedEdge(self.1.clone(), self.0.clone(), self.2)
    }

    /// Normalizes the edge such that the smaller endpoint comes first
    pub fn normalized(&self) -> Self {
        if self.0 <= self.1 {
            self.clone()
        } else {
            self.reverse()
        }
    }

    /// Returns true if the smaller endpoint comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns the endpoints as a (cloned) pair
    pub fn endpoints(&self) -> (V, V) {
        (self.0.clone(), self.1.clone())
    }
}

impl<V> From<(V, V, Weight)> for WeightedEdge<V> {
    fn from(value: (V, V, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl<V> From<(V, V)> for WeightedEdge<V> {
    fn from(value: (V, V)) -> Self {
        WeightedEdge(value.0, value.1, DEFAULT_WEIGHT)
    }
}

impl<V: Clone> From<&(V, V, Weight)> for WeightedEdge<V> {
    fn from(value: &(V, V, Weight)) -> Self {
        WeightedEdge(value.0.clone(), value.1.clone(), value.2)
    }
}

impl<V: Clone> From<&WeightedEdge<V>> for WeightedEdge<V> {
    fn from(value: &WeightedEdge<V>) -> Self {
        value.clone()
    }
}

impl<V> From<WeightedEdge<V>> for (V, V, Weight) {
    fn from(value: WeightedEdge<V>) -> Self {
        value.into_parts()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize() {
        let e = WeightedEdge(3, 1, 2.5);
        assert!(!e.is_normalized());
        assert_eq!(e.normalized(), WeightedEdge(1, 3, 2.5));
        assert_eq!(e.reverse().reverse(), e);
        assert!(WeightedEdge('a', 'a', 1.0).is_loop());
    }

    #[test]
    fn conversions() {
        let e: WeightedEdge<&str> = ("a", "b").into();
        assert_eq!(e.weight(), DEFAULT_WEIGHT);
        assert_eq!(format!("{e}"), "(a,b;1)");

        let (u, v, w): (u32, u32, Weight) = WeightedEdge(1, 2, 0.5).into();
        assert_eq!((u, v, w), (1, 2, 0.5));
    }
}
