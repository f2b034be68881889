//! The flat triangle soup that STL files are read into and written from.
//!
//! An STL file is just a list of unconnected triangles. We store them the
//! way most consumers (e.g. a renderer uploading vertex buffers) want them:
//! two parallel arrays with one entry per vertex. The face normal of each
//! triangle is replicated for all three of its vertices, so index `i` in
//! both arrays always describes the same corner of the same triangle.

use std::iter::FusedIterator;

use cgmath::{Point3, Vector3};
use failure::Fail;


/// Position of one triangle corner.
pub type Vertex = Point3<f64>;

/// Normal of a triangle.
pub type Normal = Vector3<f64>;


/// One triangle: a face normal plus its three corners in file order.
///
/// The order of the vertices defines the winding. Nothing checks that the
/// winding agrees with the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: Normal,
    pub vertices: [Vertex; 3],
}

impl Facet {
    pub fn new(normal: Normal, vertices: [Vertex; 3]) -> Self {
        Self { normal, vertices }
    }
}

/// Returned when the two arrays of a [`TriangleSoup`] don't describe a
/// list of triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum InvalidMesh {
    #[fail(
        display = "mesh has {} vertices but {} normals (both have to be equal)",
        vertices, normals
    )]
    LengthMismatch {
        vertices: usize,
        normals: usize,
    },

    #[fail(display = "mesh has {} vertices which is not a multiple of 3", _0)]
    NotTriangles(usize),
}


/// A triangle mesh without any shared-vertex topology.
///
/// Invariant (checked by [`TriangleSoup::check`] and upheld by all methods
/// except direct construction via [`TriangleSoup::from_raw_parts_unchecked`]):
/// `vertices.len() == normals.len()` and both are a multiple of 3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    vertices: Vec<Vertex>,
    normals: Vec<Normal>,
}

impl TriangleSoup {
    /// Creates an empty soup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty soup with room for `num_facets` triangles.
    pub fn with_capacity(num_facets: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(3 * num_facets),
            normals: Vec::with_capacity(3 * num_facets),
        }
    }

    /// Builds a soup from the given facets.
    pub fn from_facets(facets: impl IntoIterator<Item = Facet>) -> Self {
        let mut out = Self::new();
        out.extend(facets);
        out
    }

    /// Creates a soup from two parallel per-vertex arrays. Returns an error
    /// if they don't satisfy the invariant.
    pub fn from_raw_parts(
        vertices: Vec<Vertex>,
        normals: Vec<Normal>,
    ) -> Result<Self, InvalidMesh> {
        let out = Self { vertices, normals };
        out.check()?;
        Ok(out)
    }

    /// Like [`TriangleSoup::from_raw_parts`], but without the check. On
    /// malformed data, [`TriangleSoup::facets`] stops at the first incomplete
    /// triangle and writers refuse to serialize the soup.
    pub fn from_raw_parts_unchecked(vertices: Vec<Vertex>, normals: Vec<Normal>) -> Self {
        Self { vertices, normals }
    }

    /// Returns both arrays.
    pub fn into_raw_parts(self) -> (Vec<Vertex>, Vec<Normal>) {
        (self.vertices, self.normals)
    }

    /// Checks the invariant described in the type documentation.
    pub fn check(&self) -> Result<(), InvalidMesh> {
        if self.vertices.len() != self.normals.len() {
            return Err(InvalidMesh::LengthMismatch {
                vertices: self.vertices.len(),
                normals: self.normals.len(),
            });
        }

        if self.vertices.len() % 3 != 0 {
            return Err(InvalidMesh::NotTriangles(self.vertices.len()));
        }

        Ok(())
    }

    /// Appends one triangle. The normal is stored three times.
    pub fn push_facet(&mut self, facet: Facet) {
        self.vertices.extend_from_slice(&facet.vertices);
        self.normals.extend_from_slice(&[facet.normal; 3]);
    }

    pub fn num_facets(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertex positions, three per triangle.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All normals, one per vertex.
    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    /// Returns the `idx`-th triangle or `None` if it doesn't exist.
    ///
    /// As the normal is replicated for all three vertices, the one stored at
    /// the first vertex is used.
    pub fn facet(&self, idx: usize) -> Option<Facet> {
        let start = idx.checked_mul(3)?;
        let vertices = self.vertices.get(start..start + 3)?;
        let normal = *self.normals.get(start)?;

        Some(Facet {
            normal,
            vertices: [vertices[0], vertices[1], vertices[2]],
        })
    }

    /// Iterates over all triangles.
    pub fn facets(&self) -> Facets<'_> {
        Facets { soup: self, next: 0 }
    }

    /// Returns the minimum and maximum corner of the axis aligned bounding
    /// box around all vertices, or `None` if there are no vertices.
    pub fn bounding_box(&self) -> Option<(Vertex, Vertex)> {
        let (first, rest) = self.vertices.split_first()?;

        let init = (*first, *first);
        let out = rest.iter().fold(init, |(min, max), p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });

        Some(out)
    }
}

impl Extend<Facet> for TriangleSoup {
    fn extend<I: IntoIterator<Item = Facet>>(&mut self, iter: I) {
        for facet in iter {
            self.push_facet(facet);
        }
    }
}

/// Iterator over all triangles of a [`TriangleSoup`]. Created by
/// [`TriangleSoup::facets`].
#[derive(Debug, Clone)]
pub struct Facets<'a> {
    soup: &'a TriangleSoup,
    next: usize,
}

impl Iterator for Facets<'_> {
    type Item = Facet;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.soup.facet(self.next)?;
        self.next += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.soup.num_facets().saturating_sub(self.next);
        (len, Some(len))
    }
}

impl ExactSizeIterator for Facets<'_> {}
impl FusedIterator for Facets<'_> {}
