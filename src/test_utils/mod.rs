#[macro_use]
pub(crate) mod io;
