use std::io::{self, Write};

use log::debug;

use crate::{
    io::MeshWriter,
    mesh::{Facet, TriangleSoup},
};
use super::Error;


// ===============================================================================================
// ===== STL Config
// ===============================================================================================

/// Used to configure and create a [`Writer`].
#[derive(Clone, Debug, Default)]
pub struct Config {
    solid_name: Option<String>,
}

impl Config {
    /// Creates a config without solid name: the file starts with a bare
    /// `solid` line and ends with a bare `endsolid` line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solid name, which is written after `solid` and `endsolid`.
    ///
    /// The given name must be a single line of ASCII (otherwise the function
    /// panics).
    pub fn with_solid_name(self, name: impl Into<String>) -> Self {
        let solid_name = name.into();
        assert!(solid_name.is_ascii(), "STL solid name has to be ASCII");
        assert!(!solid_name.contains('\n'), "STL solid name must not contain a line break");

        Self {
            solid_name: Some(solid_name),
        }
    }

    /// Creates a [`Writer`] for the given mesh with `self` as config.
    pub fn into_writer(self, soup: &TriangleSoup) -> Writer<'_> {
        Writer::new(self, soup)
    }
}


// ===============================================================================================
// ===== STL Writer
// ===============================================================================================

/// Writes a [`TriangleSoup`] as ASCII STL file.
#[derive(Debug)]
pub struct Writer<'a> {
    config: Config,
    soup: &'a TriangleSoup,
}

impl<'a> Writer<'a> {
    pub fn new(config: Config, soup: &'a TriangleSoup) -> Self {
        Self { config, soup }
    }
}

impl MeshWriter for Writer<'_> {
    type Error = Error;

    /// Writes the mesh. Fails with [`Error::InvalidMesh`] without writing
    /// anything if the mesh's arrays don't describe a list of triangles.
    fn write_to(&self, writer: impl Write) -> Result<(), Self::Error> {
        self.soup.check()?;

        debug!("writing {} facets as ASCII STL", self.soup.num_facets());
        write_facets(writer, self.config.solid_name.as_deref(), self.soup.facets())?;

        Ok(())
    }
}

/// Low level function to write ASCII STL files.
///
/// Writes the `solid` line, one block per facet and the `endsolid` line.
/// All numbers are written with exactly six decimal places.
pub fn write_facets(
    mut w: impl Write,
    solid_name: Option<&str>,
    facets: impl IntoIterator<Item = Facet>,
) -> Result<(), io::Error> {
    match solid_name {
        Some(name) => writeln!(w, "solid {}", name)?,
        None => writeln!(w, "solid")?,
    }

    for facet in facets {
        let n = facet.normal;
        writeln!(w, "facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        writeln!(w, "  outer loop")?;
        for v in &facet.vertices {
            writeln!(w, "    vertex {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }
        writeln!(w, "  endloop")?;
        writeln!(w, "endfacet")?;
    }

    match solid_name {
        Some(name) => writeln!(w, "endsolid {}", name)?,
        None => writeln!(w, "endsolid")?,
    }

    w.flush()
}
