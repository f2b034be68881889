use std::path::Path;

use failure::{Error, ResultExt};
use stlsoup::io::stl::{RawResult, Reader};


pub mod info;
pub mod reformat;


/// Reads the whole STL file. Prints a progress message unless `quiet` is
/// set.
pub fn read_file(path: &Path, quiet: bool) -> Result<RawResult, Error> {
    log::debug!("opening '{}'", path.display());
    let reader = Reader::open(path)
        .context(format!("failed to open '{}'", path.display()))?;

    let res = if quiet {
        reader.read_raw()
    } else {
        progress!(["Reading '{}'", path.display()] => {
            reader.read_raw()
        })
    };

    let res = res.context(format!("failed to parse '{}'", path.display()))?;
    log::debug!("'{}' contains {} facets", path.display(), res.facets.len());

    Ok(res)
}
