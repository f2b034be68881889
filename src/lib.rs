//! Reading and writing ASCII STL meshes as flat triangle soups.
//!
//! ```no_run
//! use stlsoup::io::{MeshWriter, stl};
//!
//! let soup = stl::Reader::open("part.stl")?.read()?;
//! println!("{} facets", soup.num_facets());
//!
//! stl::Config::new()
//!     .with_solid_name("part")
//!     .into_writer(&soup)
//!     .write_to_file("part_normalized.stl")?;
//! # Ok::<(), failure::Error>(())
//! ```

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod io;
pub mod mesh;

pub use self::mesh::{Facet, InvalidMesh, Normal, TriangleSoup, Vertex};
