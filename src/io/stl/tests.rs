use cgmath::{Point3, Vector3};
use failure::Error;

use crate::{
    io::MeshWriter,
    mesh::{Facet, TriangleSoup},
};
use super::{Config, CounterSink, ParseError, RawResult, Reader};


// ===========================================================================
// ===== Reading
// ===========================================================================
fn read_raw(data: &[u8]) -> Result<RawResult, ParseError> {
    Reader::new(data).read_raw()
}

/// Reads the given string and expects a parse error.
fn read_err(s: &str) -> ParseError {
    match Reader::new(s.as_bytes()).read() {
        Ok(soup) => panic!("expected parse error, but got {:?}", soup),
        Err(e) => e,
    }
}

fn facet(n: [f64; 3], a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Facet {
    Facet::new(Vector3::from(n), [Point3::from(a), Point3::from(b), Point3::from(c)])
}

#[test]
fn read_triangle() -> Result<(), Error> {
    let soup = Reader::new(include_test_file!("triangle.stl")).read()?;

    assert_eq!(soup.vertices(), &[
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ]);
    assert_eq!(soup.normals(), &[Vector3::new(0.0, 0.0, 1.0); 3]);

    Ok(())
}

#[test]
fn read_flat_ascii() -> Result<(), Error> {
    let res = read_raw(include_test_file!("flat_ascii.stl"))?;

    assert_eq!(res.solid_name, "MYSOLID");
    assert_eq!(res.facets, vec![
        facet([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.0, 0.0, 0.0]),
        facet([0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.0, 1.0, 0.0]),
        facet([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
    ]);

    Ok(())
}

#[test]
fn read_cube_ascii() -> Result<(), Error> {
    let res = read_raw(include_test_file!("cube_ascii.stl"))?;

    assert_eq!(res.solid_name, "vcg");
    assert_eq!(res.facets.len(), 12);

    // We only check the face at the very start, very end and somewhere in the
    // middle.
    assert_eq!(
        res.facets[0],
        facet([0.0, 0.0, 1.0], [-0.5, -0.5, 1.0], [0.5, -0.5, 1.0], [0.5, 0.5, 1.0]),
    );
    assert_eq!(
        res.facets[5],
        facet([-1.0, 0.0, 0.0], [-0.5, -0.5, 0.0], [-0.5, 0.5, 1.0], [-0.5, 0.5, 0.0]),
    );
    assert_eq!(
        res.facets[11],
        facet([0.0, 1.0, 0.0], [-0.5, 0.5, 1.0], [0.5, 0.5, 0.0], [-0.5, 0.5, 0.0]),
    );

    let soup = res.into_soup();
    assert_eq!(soup.num_vertices(), 36);
    assert_eq!(soup.normals().len(), 36);

    Ok(())
}

#[test]
fn read_counter_sink() -> Result<(), Error> {
    let mut sink = CounterSink::new();
    Reader::new(include_test_file!("cube_ascii.stl")).read_raw_into(&mut sink)?;

    assert_eq!(sink.solid_name, "vcg");
    assert_eq!(sink.facet_count, 12);

    Ok(())
}

#[test]
fn read_empty_solid() -> Result<(), Error> {
    let res = read_raw(b"solid\nendsolid\n")?;
    assert_eq!(res.solid_name, "");
    assert!(res.facets.is_empty());

    let res = read_raw(b"  solid  a  long   name\n\n endsolid a long name")?;
    assert_eq!(res.solid_name, "a long name");
    assert!(res.facets.is_empty());

    Ok(())
}

#[test]
fn ignores_data_after_endsolid() -> Result<(), Error> {
    let res = read_raw(b"solid\nendsolid\nthis is not STL\n")?;
    assert!(res.facets.is_empty());

    Ok(())
}

#[test]
fn error_wrong_header() {
    match read_err("\n\nsolidx foo\nendsolid\n") {
        ParseError::UnexpectedToken { line, expected, found } => {
            assert_eq!(line, 3);
            assert_eq!(expected, "solid");
            assert_eq!(found, "solidx");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn error_missing_normal_keyword() {
    let src = "solid\nfacet\n";
    match read_err(src) {
        ParseError::UnexpectedToken { line: 2, expected, found } => {
            assert_eq!(expected, "normal");
            assert_eq!(found, "end of line");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn error_outer_loop_has_to_be_whole_line() {
    let src = "solid\nfacet normal 0 0 1\n  outer\n";
    match read_err(src) {
        ParseError::UnexpectedToken { line: 3, expected, found } => {
            assert_eq!(expected, "outer loop");
            assert_eq!(found, "outer");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn error_invalid_number() {
    let src = "solid\nfacet normal 0 0 1\nouter loop\nvertex 1 2 x3\n";
    match read_err(src) {
        ParseError::InvalidNumber { line, text } => {
            assert_eq!(line, 4);
            assert_eq!(text, "x3");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn error_vertex_count() {
    let two = "\
        solid\n\
        facet normal 0 0 1\n\
        outer loop\n\
        vertex 0 0 0\n\
        vertex 1 0 0\n\
        endloop\n\
        endfacet\n\
        endsolid\n";
    match read_err(two) {
        ParseError::InvalidVertexCount { line: 6, expected: 3, found: 2 } => {}
        other => panic!("unexpected error: {:?}", other),
    }

    let four = "\
        solid\n\
        facet normal 0 0 1\n\
        outer loop\n\
        vertex 0 0 0\n\
        vertex 1 0 0\n\
        vertex 1 1 0\n\
        vertex 0 1 0\n\
        endloop\n\
        endfacet\n\
        endsolid\n";
    match read_err(four) {
        ParseError::InvalidVertexCount { line: 8, expected: 3, found: 4 } => {}
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn error_missing_endfacet() {
    let src = "\
        solid\n\
        facet normal 0 0 1\n\
        outer loop\n\
        vertex 0 0 0\n\
        vertex 1 0 0\n\
        vertex 0 1 0\n\
        endloop\n\
        facet normal 0 0 1\n";
    match read_err(src) {
        ParseError::UnexpectedToken { line: 8, expected, found } => {
            assert_eq!(expected, "endfacet");
            assert_eq!(found, "facet");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn error_missing_endsolid() {
    let full = String::from_utf8(include_test_file!("triangle.stl").to_vec()).unwrap();
    let truncated = full.trim_end().trim_end_matches("endsolid");

    match read_err(truncated) {
        ParseError::UnexpectedEndOfInput { line: 8 } => {}
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn error_display_contains_line() {
    let err = read_err("solid\nfacet WRONG 1 2 3\n");
    assert_eq!(
        err.to_string(),
        r#"parse error on line 2: expected "normal", found "WRONG""#,
    );
}


// ===========================================================================
// ===== Writing
// ===========================================================================
fn triangle_mesh() -> TriangleSoup {
    TriangleSoup::from_facets(vec![
        // BS normal, but it's fine for the test
        facet([0.5, 0.3, 0.1], [0.0, 0.0, 0.0], [3.0, 5.0, 8.0], [1.942, 152.99, 0.007]),
    ])
}

#[test]
fn write_triangle() -> Result<(), Error> {
    let soup = triangle_mesh();

    let res = Config::new().into_writer(&soup).write_to_memory()?;
    assert_eq_file!(&res, "triangle_written.stl");

    let res = Config::new()
        .with_solid_name("mesh")
        .into_writer(&soup)
        .write_to_memory()?;
    assert_eq_file!(&res, "triangle_written_named.stl");

    Ok(())
}

#[test]
fn write_empty() -> Result<(), Error> {
    let res = Config::new().into_writer(&TriangleSoup::new()).write_to_memory()?;
    assert_eq_file!(&res, "empty_written.stl");

    Ok(())
}

#[test]
fn write_invalid_mesh() {
    let p = Point3::new(0.0, 0.0, 0.0);
    let n = Vector3::new(0.0, 0.0, 1.0);

    let soup = TriangleSoup::from_raw_parts_unchecked(vec![p; 4], vec![n; 4]);
    let mut out = Vec::new();
    match Config::new().into_writer(&soup).write_to(&mut out) {
        Err(super::Error::InvalidMesh(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(out.is_empty());

    let soup = TriangleSoup::from_raw_parts_unchecked(vec![p; 3], vec![n; 1]);
    assert!(Config::new().into_writer(&soup).write_to_memory().is_err());
}

#[test]
#[should_panic]
fn solid_name_must_be_ascii() {
    Config::new().with_solid_name("flöte");
}

#[test]
fn written_file_reads_back() -> Result<(), Error> {
    let original = Reader::new(include_test_file!("cube_ascii.stl")).read()?;

    let bytes = Config::new().with_solid_name("cube").into_writer(&original).write_to_memory()?;
    let res = read_raw(&bytes)?;

    assert_eq!(res.solid_name, "cube");
    assert_eq!(res.into_soup(), original);

    Ok(())
}
