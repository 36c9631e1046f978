use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use fs2::FileExt;

use crate::env::Env;
use crate::Result;

/// Snapshot files on the local filesystem.
///
/// Readers hold a shared advisory lock and writers an exclusive one for as
/// long as the returned handle lives.
pub(crate) struct PosixDiskEnv;

fn map_err_with_name(method: &'static str, path: &Path, e: io::Error) -> io::Error {
    io::Error::new(e.kind(), format!("{} {}: {}", method, path.display(), e))
}

impl Env for PosixDiskEnv {
    fn open_sequential_file(&self, p: &Path) -> Result<Box<dyn BufRead>> {
        let f = OpenOptions::new()
            .read(true)
            .open(p)
            .map_err(|e| map_err_with_name("open (seq)", p, e))?;
        f.lock_shared()
            .map_err(|e| map_err_with_name("lock (shared)", p, e))?;
        Ok(Box::new(BufReader::new(f)))
    }

    fn open_writable_file(&self, p: &Path) -> Result<Box<dyn Write>> {
        if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| map_err_with_name("mkdir", parent, e))?;
        }
        let f: File = OpenOptions::new()
            .create(true)
            .write(true)
            .open(p)
            .map_err(|e| map_err_with_name("open (write)", p, e))?;
        f.lock_exclusive()
            .map_err(|e| map_err_with_name("lock (exclusive)", p, e))?;
        // truncate only once no reader can be midway through the file
        f.set_len(0)
            .map_err(|e| map_err_with_name("truncate", p, e))?;
        Ok(Box::new(BufWriter::new(f)))
    }
}
