// src/dump/mod.rs

//! Dump serializer.
//!
//! A dump is a JSON object with exactly three keys: `state_history`,
//! `instance` and `loglevel`.
//!
//! - [`record`] builds the borrowed [`DumpRecord`] and defines the owned
//!   form read back from disk.
//! - [`io`] writes and parses the JSON.
//! - [`replay`] re-executes a dump to prove the history is reproducible.

pub mod io;
pub mod record;
pub mod replay;

pub use io::{check_dump_keys, load_dump, parse_dump, top_level_keys};
pub use record::{DUMP_KEYS, DumpRecord, OwnedDump, dump};
pub use replay::replay;
