//! Defines `Args` which is used to parse command line arguments.

use std::path::PathBuf;

use structopt::StructOpt;


#[derive(StructOpt, Debug)]
#[structopt(name = "stlsoup", about = "Inspect and rewrite ASCII STL files.")]
pub struct Args {
    #[structopt(flatten)]
    pub global: GlobalArgs,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub struct GlobalArgs {
    /// Print log output of the parser and writer. Can be given twice for
    /// more details. Ignored if `RUST_LOG` is set.
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Print information about an ASCII STL file.
    #[structopt(name = "info")]
    Info {
        #[structopt(flatten)]
        args: InfoArgs,
    },

    /// Reads an ASCII STL file and writes it again in normalized form (fixed
    /// indentation, six decimal places for all numbers).
    #[structopt(name = "reformat")]
    Reformat {
        #[structopt(flatten)]
        args: ReformatArgs,
    },
}

#[derive(StructOpt, Debug)]
pub struct InfoArgs {
    /// Number of vertices and normals to print.
    #[structopt(long = "show", default_value = "5")]
    pub show: usize,

    /// Only count the facets without keeping them in memory. The bounding
    /// box is not printed and `--show` is ignored then.
    #[structopt(long = "count-only")]
    pub count_only: bool,

    /// Path to the STL file.
    #[structopt(parse(from_os_str))]
    pub file: PathBuf,
}

#[derive(StructOpt, Debug)]
pub struct ReformatArgs {
    /// Solid name for the target file. By default, the name of the source
    /// solid is kept.
    #[structopt(long = "name", parse(try_from_str = parse_solid_name))]
    pub name: Option<String>,

    /// Overwrite the target file if it exists.
    #[structopt(short = "f", long = "force")]
    pub force: bool,

    /// Path to the source STL file.
    #[structopt(parse(from_os_str))]
    pub source: PathBuf,

    /// Path to the target file. `-` writes to stdout (and suppresses all
    /// other output).
    pub target: String,
}

fn parse_solid_name(src: &str) -> Result<String, String> {
    if !src.is_ascii() || src.contains('\n') {
        return Err(format!("'{}' is not a valid solid name (single line ASCII only)", src));
    }

    Ok(src.to_string())
}
