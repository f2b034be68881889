use std::path::Path;

use failure::{bail, Error, ResultExt};
use stlsoup::io::{MeshWriter, stl::Config};

use crate::{
    args::{GlobalArgs, ReformatArgs},
    commands::read_file,
};


/// Where the reformatted solid goes.
#[derive(Debug, PartialEq)]
enum Target<'a> {
    Stdout,
    File(&'a Path),
}

pub fn run(_global_args: &GlobalArgs, args: &ReformatArgs) -> Result<(), Error> {
    let target = target(args)?;

    // Writing to stdout must not be mixed with any other output.
    let to_stdout = target == Target::Stdout;

    let raw = read_file(&args.source, to_stdout)?;
    let name = args.name.clone().unwrap_or_else(|| raw.solid_name.clone());
    let soup = raw.into_soup();

    let config = if name.is_empty() {
        Config::new()
    } else if name.is_ascii() {
        Config::new().with_solid_name(name)
    } else {
        if !to_stdout {
            warn!("The solid name '{}' is not ASCII and won't be written", name);
        }
        log::debug!("dropping non-ASCII solid name {:?}", name);
        Config::new()
    };
    let writer = config.into_writer(&soup);

    match target {
        Target::Stdout => {
            writer.write_to_stdout().context("failed to write to stdout")?;
        }
        Target::File(path) => {
            progress!(["Writing {} facets to '{}'", soup.num_facets(), path.display()] => {
                writer.write_to_file(path)
                    .context(format!("failed to write '{}'", path.display()))?
            });
        }
    }

    Ok(())
}

/// Decides where to write to. `-` means stdout. An existing file is only
/// accepted with `--force`.
fn target(args: &ReformatArgs) -> Result<Target<'_>, Error> {
    if args.target == "-" {
        return Ok(Target::Stdout);
    }

    let path = Path::new(&args.target);
    if path.exists() {
        if !args.force {
            bail!("target file '{}' already exists (use '--force' to overwrite it)", args.target);
        }
        log::debug!("'{}' exists and will be overwritten", path.display());
    }

    Ok(Target::File(path))
}
