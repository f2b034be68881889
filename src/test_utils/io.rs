pub(crate) fn file_failure(actual: &[u8], expected: &[u8], filename: &str) {
    use std::fmt::Write;

    let mut msg = String::new();

    writeln!(msg, "===== Expected data ('{}')", filename).unwrap();
    write_data(&mut msg, expected);
    writeln!(msg).unwrap();

    writeln!(msg, "===== Actual data").unwrap();
    write_data(&mut msg, actual);

    panic!("assertion failed: \n{}", msg);

    fn write_data(msg: &mut String, data: &[u8]) {
        match std::str::from_utf8(data) {
            Ok(s) => writeln!(msg, "{}", s).unwrap(),
            Err(_) => writeln!(msg, "{:?}", data).unwrap(),
        }
    }
}

/// Compares the given bytes to the content of a file in the `test_files`
/// directory next to the calling module.
macro_rules! assert_eq_file {
    ($actual:expr, $filename:expr) => {
        let actual = $actual as &[u8];
        let expected = include_bytes!(concat!("test_files/", $filename)) as &[u8];
        if actual != expected {
            crate::test_utils::io::file_failure(actual, expected, $filename);
        }
    }
}

macro_rules! include_test_file {
    ($filename:expr) => {{
        include_bytes!(concat!("test_files/", $filename)) as &[u8]
    }}
}
