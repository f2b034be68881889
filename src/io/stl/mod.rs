//! Reading and writing ASCII STL files.
//!
//! An ASCII STL file looks like this:
//!
//! ```text
//! solid name
//! facet normal 0.0 0.0 1.0
//!   outer loop
//!     vertex 0.0 0.0 0.0
//!     vertex 1.0 0.0 0.0
//!     vertex 0.0 1.0 0.0
//!   endloop
//! endfacet
//! endsolid name
//! ```
//!
//! Indentation and blank lines don't matter. The binary variant of STL is
//! not supported.

use std::io;

use failure::Fail;

use crate::mesh::InvalidMesh;


mod read;
mod write;

#[cfg(test)]
mod tests;

pub use crate::io::parse::Error as ParseError;
pub use self::{
    read::{CounterSink, RawResult, Reader, Sink},
    write::{write_facets, Config, Writer},
};


/// Error that can occur while writing an STL file.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "IO error: {}", _0)]
    Io(io::Error),

    #[fail(display = "cannot write invalid mesh: {}", _0)]
    InvalidMesh(InvalidMesh),
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}

impl From<InvalidMesh> for Error {
    fn from(src: InvalidMesh) -> Self {
        Error::InvalidMesh(src)
    }
}
