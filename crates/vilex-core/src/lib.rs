#[cfg(not(target_endian = "little"))]
compile_error!("vilex-core requires a little-endian platform");

pub mod exclusions;
pub mod explain;
pub mod keycode;
pub mod lexicon;
pub mod pipeline;
pub mod resolver;
pub mod settings;
pub mod table;
pub mod unicode;
