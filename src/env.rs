use std::io::{BufRead, Write};
use std::path::Path;

use crate::Result;

/// File access used by snapshot dump and load. Each call opens a fresh
/// handle; nothing is kept open between calls.
pub(crate) trait Env {
    fn open_sequential_file(&self, _: &Path) -> Result<Box<dyn BufRead>>;
    /// Opens `path` for writing, truncating any existing content.
    fn open_writable_file(&self, _: &Path) -> Result<Box<dyn Write>>;
}
