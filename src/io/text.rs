//! # Text
//!
//! A line-oriented format:
//! ```text
//! UNDIRECTED
//! 4
//! 1 2 3 hub
//! 3
//! 1 2 4.5
//! 2 hub
//! 3 hub 0.5
//! ```
//! 1. the graph type `DIRECTED` or `UNDIRECTED` (case-insensitive),
//! 2. the number of vertices `n`,
//! 3. `n` whitespace separated vertices, possibly spread over several lines,
//! 4. the number of edges `m`,
//! 5. `m` lines `u v [weight]`; the weight defaults to [`DEFAULT_WEIGHT`].
//!
//! Blank lines and lines starting with the comment identifier (`#` by default) are skipped.
//! Undirected edges are listed once. Edge endpoints missing in the vertex list are added.

use std::io::Lines;

use super::*;

/// A GraphReader for the Text-Format
#[derive(Debug, Clone)]
pub struct TextReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for TextReader {
    fn default() -> Self {
        Self {
            comment_identifier: "#".to_string(),
        }
    }
}

impl TextReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier
    pub fn set_comment_identifier<S: Into<String>>(&mut self, c: S) {
        self.comment_identifier = c.into();
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> Self {
        self.set_comment_identifier(c);
        self
    }
}

impl<G> GraphReader<G> for TextReader
where
    G: GraphFromScratch,
    G::V: FromStr,
{
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<G> {
        let mut lines = TextLines {
            lines: reader.lines(),
            comment_identifier: &self.comment_identifier,
        };

        let kind: GraphKind = lines
            .expect_line("graph type")?
            .parse()
            .map_err(|e| io_error!(ErrorKind::InvalidData, e))?;

        let n: NumVertices = lines.parse_single("number of vertices")?;
        let mut vertices: Vec<G::V> = Vec::new();
        while vertices.len() < n {
            let line = lines.expect_line("vertex list")?;
            for token in line.split_whitespace() {
                raise_error_unless!(
                    vertices.len() < n,
                    ErrorKind::InvalidData,
                    format!("More than {n} vertices listed, found {token:?}.")
                );
                vertices.push(parse_next_value!(std::iter::once(token), "vertex"));
            }
        }

        let m: NumEdges = lines.parse_single("number of edges")?;
        let mut edges: Vec<WeightedEdge<G::V>> = Vec::new();
        for _ in 0..m {
            let line = lines.expect_line("edge")?;
            let mut parts = line.split_whitespace();

            let u = parse_next_value!(parts, "source vertex");
            let v = parse_next_value!(parts, "target vertex");
            let weight = match parts.next() {
                Some(token) => parse_next_value!(std::iter::once(token), "weight"),
                None => DEFAULT_WEIGHT,
            };
            raise_error_unless!(
                parts.next().is_none(),
                ErrorKind::InvalidData,
                format!("Unexpected trailing values in edge line {line:?}.")
            );

            edges.push(WeightedEdge(u, v, weight));
        }

        if let Some(line) = lines.next_line()? {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("Expected end of input after {m} edges, found {line:?}.")
            ));
        }

        Ok(G::from_parts(kind, vertices, edges))
    }
}

/// Non-comment, non-blank lines of the input
struct TextLines<'a, R> {
    lines: Lines<R>,
    comment_identifier: &'a str,
}

impl<R: BufRead> TextLines<'_, R> {
    /// Returns the next relevant line (trimmed) if it exists or propagates an error
    fn next_line(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(self.comment_identifier) {
                continue;
            }
            return Ok(Some(trimmed.to_string()));
        }
        Ok(None)
    }

    /// Same as [`TextLines::next_line`] but fails at the end of the input
    fn expect_line(&mut self, name: &str) -> Result<String> {
        self.next_line()?.ok_or_else(|| {
            io_error!(
                ErrorKind::InvalidData,
                format!("Premature end of input when parsing {name}.")
            )
        })
    }

    /// Parses a line consisting of a single value
    fn parse_single<T: FromStr>(&mut self, name: &str) -> Result<T> {
        let line = self.expect_line(name)?;
        let mut parts = line.split_whitespace();
        let value = parse_next_value!(parts, name);
        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!("Expected a single value for {name}, found {line:?}.")
        );
        Ok(value)
    }
}

/// Trait for creating graphs from a TextReader.
/// Used as shorthand for default TextReader settings
pub trait TextRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_text(BufReader::new(File::open(path)?))
    }
}

impl<G> TextRead for G
where
    G: GraphFromScratch,
    G::V: FromStr,
{
    fn try_read_text<R: BufRead>(reader: R) -> Result<Self> {
        TextReader::default().try_read_graph(reader)
    }
}

/// A writer for the Text-Format.
///
/// Vertices are written using their [`Display`] representation, which must be a single
/// non-empty token not starting with `#`.
#[derive(Debug, Clone, Default)]
pub struct TextWriter;

impl TextWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }
}

fn vertex_token<V: Display>(u: &V) -> Result<String> {
    let token = u.to_string();
    raise_error_unless!(
        !token.is_empty() && !token.starts_with('#') && !token.contains(char::is_whitespace),
        ErrorKind::InvalidInput,
        format!("Vertex {token:?} cannot be written as a single token.")
    );
    Ok(token)
}

impl<G> GraphWriter<G> for TextWriter
where
    G: WeightedAdjacency,
    G::V: Display,
{
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        let kind = if graph.is_directed() {
            "DIRECTED"
        } else {
            "UNDIRECTED"
        };
        writeln!(writer, "{kind}")?;

        let vertices = graph
            .ordered_vertices()
            .iter()
            .map(vertex_token)
            .collect::<Result<Vec<_>>>()?;
        writeln!(writer, "{}", vertices.len())?;
        if !vertices.is_empty() {
            writeln!(writer, "{}", vertices.join(" "))?;
        }

        let edges = graph.ordered_edges();
        writeln!(writer, "{}", edges.len())?;
        for WeightedEdge(u, v, w) in edges {
            writeln!(writer, "{} {} {}", vertex_token(&u)?, vertex_token(&v)?, w)?;
        }

        Ok(())
    }
}

/// Trait for writing a graph to a writer in the Text-Format.
/// Shorthand for default settings.
pub trait TextWrite {
    /// Tries to write the graph to a writer
    fn try_write_text<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_text_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_text(&mut writer)?;
        writer.flush()
    }
}

impl<G> TextWrite for G
where
    G: WeightedAdjacency,
    G::V: Display,
{
    fn try_write_text<W: Write>(&self, writer: W) -> Result<()> {
        TextWriter::default().try_write_graph(self, writer)
    }
}
