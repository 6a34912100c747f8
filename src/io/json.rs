//! # Json
//!
//! A graph is stored as a single document
//! ```json
//! {
//!   "graph_type": "directed",
//!   "vertices": [1, 2, "x"],
//!   "edges": [{ "source": 1, "target": 2, "weight": 0.5 }, { "source": 2, "target": "x" }]
//! }
//! ```
//! Edges without a `weight` get [`DEFAULT_WEIGHT`]. Endpoints missing in `vertices` are added.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::*;

fn default_weight() -> Weight {
    DEFAULT_WEIGHT
}

/// Serialized form of a single edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDocument<V> {
    pub source: V,
    pub target: V,
    #[serde(default = "default_weight")]
    pub weight: Weight,
}

/// Serialized form of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument<V> {
    pub graph_type: GraphKind,
    pub vertices: Vec<V>,
    pub edges: Vec<EdgeDocument<V>>,
}

impl<V: Vertex> GraphDocument<V> {
    /// Captures a graph with sorted vertices and edges
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: WeightedAdjacency<V = V>,
    {
        Self {
            graph_type: graph.kind(),
            vertices: graph.ordered_vertices(),
            edges: graph
                .ordered_edges()
                .into_iter()
                .map(|WeightedEdge(source, target, weight)| EdgeDocument {
                    source,
                    target,
                    weight,
                })
                .collect(),
        }
    }

    /// Builds a graph of any editable representation
    pub fn into_graph<G>(self) -> G
    where
        G: GraphFromScratch<V = V>,
    {
        G::from_parts(
            self.graph_type,
            self.vertices,
            self.edges
                .into_iter()
                .map(|e| WeightedEdge(e.source, e.target, e.weight)),
        )
    }
}

fn into_io_error(error: serde_json::Error) -> std::io::Error {
    if error.is_io() {
        error.into()
    } else {
        io_error!(ErrorKind::InvalidData, error)
    }
}

/// A GraphReader for the Json-Format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl JsonReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self
    }
}

impl<G> GraphReader<G> for JsonReader
where
    G: GraphFromScratch,
    G::V: DeserializeOwned,
{
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<G> {
        let document: GraphDocument<G::V> =
            serde_json::from_reader(reader).map_err(into_io_error)?;
        Ok(document.into_graph())
    }
}

/// Trait for creating graphs from a JsonReader.
/// Used as shorthand for default JsonReader settings
pub trait JsonRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_json<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_json(BufReader::new(File::open(path)?))
    }
}

impl<G> JsonRead for G
where
    G: GraphFromScratch,
    G::V: DeserializeOwned,
{
    fn try_read_json<R: BufRead>(reader: R) -> Result<Self> {
        JsonReader::new().try_read_graph(reader)
    }
}

/// A writer for the Json-Format
#[derive(Debug, Clone)]
pub struct JsonWriter {
    /// Indent the document
    pretty: bool,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates whether the document is indented
    pub fn set_pretty(&mut self, pretty: bool) {
        self.pretty = pretty;
    }

    /// Updates whether the document is indented
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.set_pretty(pretty);
        self
    }
}

impl<G> GraphWriter<G> for JsonWriter
where
    G: WeightedAdjacency,
    G::V: Serialize,
{
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        let document = GraphDocument::from_graph(graph);
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &document)
        } else {
            serde_json::to_writer(&mut writer, &document)
        };
        written.map_err(into_io_error)?;
        writeln!(writer)
    }
}

/// Trait for writing a graph to a writer in the Json-Format.
/// Shorthand for default settings.
pub trait JsonWrite {
    /// Tries to write the graph to a writer
    fn try_write_json<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_json(&mut writer)?;
        writer.flush()
    }
}

impl<G> JsonWrite for G
where
    G: WeightedAdjacency,
    G::V: Serialize,
{
    fn try_write_json<W: Write>(&self, writer: W) -> Result<()> {
        JsonWriter::default().try_write_graph(self, writer)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_document() {
        let input = r#"{
            "graph_type": "undirected",
            "vertices": [1, 2, 3, "hub"],
            "edges": [
                {"source": 1, "target": 2, "weight": 4.5},
                {"source": 2, "target": "hub"},
                {"source": "hub", "target": "new"}
            ]
        }"#;

        let g: Graph<Label> = Graph::try_read_json(input.as_bytes()).unwrap();
        assert!(g.is_undirected());
        assert_eq!(g.number_of_vertices(), 5);
        assert_eq!(g.number_of_edges(), 3);
        assert_eq!(g.weight_of(&Label::from(2), &Label::from(1)), Some(4.5));
        assert_eq!(
            g.weight_of(&Label::from(2), &Label::from("hub")),
            Some(DEFAULT_WEIGHT)
        );
        assert!(g.has_vertex(&Label::from(3)));
        assert!(g.has_vertex(&Label::from("new")));
    }

    #[test]
    fn write_document() {
        let g: Graph<u32> = Graph::from_parts(GraphKind::Directed, [9], [(2, 1, 0.5)]);

        let mut buffer = Vec::new();
        JsonWriter::new().pretty(false).try_write_graph(&g, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"graph_type\":\"directed\",\"vertices\":[1,2,9],\"edges\":[{\"source\":2,\"target\":1,\"weight\":0.5}]}\n"
        );

        let mut buffer = Vec::new();
        g.try_write_json(&mut buffer).unwrap();
        let h: Graph<u32> = Graph::try_read_json(buffer.as_slice()).unwrap();
        assert_eq!(h, g);
    }

    #[test]
    fn undirected_document() {
        let mut g: Graph<Label> = Graph::from_edges(
            GraphKind::Undirected,
            [
                (Label::from("b"), Label::from(1), 2.5),
                (Label::from(3), Label::from(1), -1.0),
                (Label::from(3), Label::from(3), 0.5),
            ],
        );
        g.add_vertex(Label::from("isolated"));

        let mut buffer = Vec::new();
        g.try_write_json(&mut buffer).unwrap();
        let document: GraphDocument<Label> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(document.graph_type, GraphKind::Undirected);
        assert_eq!(document.edges.len(), 3);

        let h: Graph<Label> = Graph::try_read_json(buffer.as_slice()).unwrap();
        assert!(h.is_undirected());
        assert!(h.has_vertex(&Label::from("isolated")));
        assert_eq!(h.ordered_edges(), g.ordered_edges());
        assert_eq!(h.weight_of(&Label::from(1), &Label::from("b")), Some(2.5));
        assert_eq!(h, g);
    }

    #[test]
    fn malformed_documents() {
        for input in [
            "",
            "{",
            r#"{"graph_type": "mixed", "vertices": [], "edges": []}"#,
            r#"{"graph_type": "directed", "vertices": [1], "edges": [{"source": 1}]}"#,
            r#"{"graph_type": "directed", "vertices": ["a"], "edges": []}"#,
        ] {
            let error = Graph::<u32>::try_read_json(input.as_bytes()).unwrap_err();
            assert!(matches!(
                error.kind(),
                ErrorKind::InvalidData | ErrorKind::UnexpectedEof
            ));
        }
    }
}
