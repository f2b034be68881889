use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use cgmath::{Point3, Vector3};
use log::{debug, trace};

use crate::{
    io::parse::{self, Input, LineBuffer},
    mesh::{Facet, TriangleSoup, Vertex},
};


/// A reader for ASCII STL files.
///
/// All reading methods consume the reader, so the underlying source is
/// dropped (and a file closed) once parsing finished, successfully or not.
#[derive(Debug)]
pub struct Reader<R: io::Read> {
    reader: R,
}

impl Reader<File> {
    /// Creates a new `Reader` from the given file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let path = path.as_ref();
        debug!("opening STL file '{}'", path.display());

        // We don't need a `BufReader` here, because the reading methods
        // buffer internally anyway.
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: io::Read> Reader<R> {
    /// Creates a new `Reader` from the given `io::Read` instance. If you want
    /// to open a file, rather use [`Reader::open`].
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the whole file into a [`TriangleSoup`].
    pub fn read(self) -> Result<TriangleSoup, parse::Error> {
        let mut out = TriangleSoup::new();
        self.read_raw_into(&mut out)?;
        Ok(out)
    }

    /// Reads the whole file into a [`RawResult`] which, unlike
    /// [`Reader::read`], also keeps the solid name.
    pub fn read_raw(self) -> Result<RawResult, parse::Error> {
        let mut out = RawResult::new();
        self.read_raw_into(&mut out)?;
        Ok(out)
    }

    /// Reads the whole file into the given sink.
    ///
    /// This is the streaming building block of the other reading methods.
    /// The sink only ever sees complete facets: a facet is passed on when its
    /// `endfacet` line was read. If an error occurs, everything that was
    /// passed to the sink so far has to be considered garbage.
    pub fn read_raw_into(self, sink: &mut impl Sink) -> Result<(), parse::Error> {
        let mut input = LineBuffer::new(BufReader::new(self.reader));
        solid(&mut input, sink)
    }
}


// ===========================================================================
// ===== Grammar rules
// ===========================================================================
//
// One function per production. Each of them consumes exactly the lines it
// owns and uses lookahead to decide whether a repetition continues.

/// `solid <name...>`, all facets, `endsolid`.
fn solid(input: &mut impl Input, sink: &mut impl Sink) -> Result<(), parse::Error> {
    let header = input.expect_keyword("solid")?;
    let name = header.tokens()[1..].join(" ");
    debug!("reading STL solid '{}'", name);
    sink.solid_name(name);

    let num_facets = facets(input, sink)?;

    // Whatever follows `endsolid` is not read.
    input.expect_keyword("endsolid")?;
    debug!("finished reading STL solid: {} facets, {} lines", num_facets, input.line_no());

    Ok(())
}

/// Facets until the next line starts with `endsolid`. Returns the number of
/// facets read.
fn facets(input: &mut impl Input, sink: &mut impl Sink) -> Result<usize, parse::Error> {
    let mut count = 0;
    while !input.is_next("endsolid")? {
        let facet = facet(input)?;
        trace!("facet #{} ending on line {}: {:?}", count, input.line_no(), facet);

        sink.facet(facet);
        count += 1;
    }

    Ok(count)
}

/// `facet normal x y z`, outer loop, `endfacet`.
fn facet(input: &mut impl Input) -> Result<Facet, parse::Error> {
    let line = input.expect_keyword("facet")?;
    line.expect_token(1, "normal")?;
    let normal = Vector3::from(line.vec3(2)?);

    let vertices = outer_loop(input)?;
    input.expect_keyword("endfacet")?;

    Ok(Facet::new(normal, vertices))
}

/// `outer loop`, vertices until the next line starts with `endloop`,
/// `endloop`.
fn outer_loop(input: &mut impl Input) -> Result<[Vertex; 3], parse::Error> {
    input.expect_keywords(&["outer", "loop"])?;

    let mut vertices = Vec::with_capacity(3);
    while !input.is_next("endloop")? {
        vertices.push(vertex(input)?);
    }
    let end = input.expect_keyword("endloop")?;

    match vertices[..] {
        [a, b, c] => Ok([a, b, c]),
        _ => Err(parse::Error::InvalidVertexCount {
            line: end.no(),
            expected: 3,
            found: vertices.len(),
        }),
    }
}

/// `vertex x y z`.
fn vertex(input: &mut impl Input) -> Result<Vertex, parse::Error> {
    let line = input.expect_keyword("vertex")?;
    Ok(Point3::from(line.vec3(1)?))
}


// ===========================================================================
// ===== Sinks
// ===========================================================================

/// A sink can accept data from an STL file. This is mainly used for
/// [`Reader::read_raw_into`].
pub trait Sink {
    /// Is called once in the beginning with all tokens following `solid` in
    /// the first line, joined by a single space. The name is empty if there
    /// are no such tokens.
    fn solid_name(&mut self, name: String);

    /// Is called for each facet that is read from the file.
    fn facet(&mut self, facet: Facet);
}

impl Sink for TriangleSoup {
    fn solid_name(&mut self, _: String) {}

    fn facet(&mut self, facet: Facet) {
        self.push_facet(facet);
    }
}

/// Holds the raw data from a STL file.
///
/// to obtain a `RawResult`, call [`Reader::read_raw`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResult {
    /// The solid name (empty if the file doesn't specify one).
    pub solid_name: String,

    /// All facets from the file.
    pub facets: Vec<Facet>,
}

impl RawResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts the facets into a [`TriangleSoup`].
    pub fn into_soup(self) -> TriangleSoup {
        TriangleSoup::from_facets(self.facets)
    }
}

impl Sink for RawResult {
    fn solid_name(&mut self, name: String) {
        self.solid_name = name;
    }

    fn facet(&mut self, facet: Facet) {
        self.facets.push(facet);
    }
}

/// A sink that only counts facets.
#[derive(Debug, Clone, Default)]
pub struct CounterSink {
    /// The solid name (empty if the file doesn't specify one).
    pub solid_name: String,

    /// The number of facets in that file.
    pub facet_count: usize,
}

impl CounterSink {
    /// Returns an instance with no name and 0 facets.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for CounterSink {
    fn solid_name(&mut self, name: String) {
        self.solid_name = name;
    }

    fn facet(&mut self, _: Facet) {
        self.facet_count += 1;
    }
}
