#![no_main]

use libfuzzer_sys::fuzz_target;
use stlsoup::io::{
    MeshWriter,
    stl::{Config, CounterSink, Reader},
};

fuzz_target!(|data: &[u8]| {
    // Most inputs are rejected by the parser, which is fine. We are looking
    // for panics only.
    let _ = Reader::new(data).read_raw_into(&mut CounterSink::new());

    // Whatever the parser accepts has to survive a write/read cycle with the
    // same number of facets.
    if let Ok(soup) = Reader::new(data).read() {
        let bytes = Config::new()
            .into_writer(&soup)
            .write_to_memory()
            .expect("writing a parsed mesh failed");
        let reread = Reader::new(&bytes[..]).read().expect("reading a written mesh failed");
        assert_eq!(reread.num_facets(), soup.num_facets());
    }
});
