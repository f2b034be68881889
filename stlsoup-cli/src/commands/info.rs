use failure::{Error, ResultExt};
use stlsoup::io::stl::{CounterSink, Reader};

use crate::{
    args::{GlobalArgs, InfoArgs},
    commands::read_file,
    ui::{fmt_triple, fmt_with_thousand_sep},
};


pub fn run(_global_args: &GlobalArgs, args: &InfoArgs) -> Result<(), Error> {
    if args.count_only {
        return count_only(args);
    }

    let raw = read_file(&args.file, false)?;
    info!("Solid name: {}", display_name(&raw.solid_name));

    let soup = raw.into_soup();
    info!("Facets: {}", fmt_with_thousand_sep(soup.num_facets() as u64));
    info!("Vertices: {} (not deduplicated)", fmt_with_thousand_sep(soup.num_vertices() as u64));

    if let Some((min, max)) = soup.bounding_box() {
        info!(
            "Bounding box: {} to {}",
            fmt_triple(min.x, min.y, min.z),
            fmt_triple(max.x, max.y, max.z),
        );
    }

    let show = args.show.min(soup.num_vertices());
    if show > 0 {
        println!();
        info!("First {} vertices:", show);
        for v in &soup.vertices()[..show] {
            println!("    {}", fmt_triple(v.x, v.y, v.z));
        }

        info!("First {} normals:", show);
        for n in &soup.normals()[..show] {
            println!("    {}", fmt_triple(n.x, n.y, n.z));
        }
    }

    Ok(())
}

/// Streams the file through a `CounterSink`, so nothing but the count is
/// kept in memory.
fn count_only(args: &InfoArgs) -> Result<(), Error> {
    let path = &args.file;
    log::debug!("counting facets in '{}' without storing them", path.display());
    let reader = Reader::open(path)
        .context(format!("failed to open '{}'", path.display()))?;

    let mut sink = CounterSink::new();
    progress!(["Counting facets in '{}'", path.display()] => {
        reader.read_raw_into(&mut sink)
            .context(format!("failed to parse '{}'", path.display()))?
    });

    info!("Solid name: {}", display_name(&sink.solid_name));
    info!("Facets: {}", fmt_with_thousand_sep(sink.facet_count as u64));

    Ok(())
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "<none>"
    } else {
        name
    }
}
