//! Snapshot dump and load for [`SkipList`].
//!
//! A snapshot is the level-0 chain written as `key:value` lines in ascending
//! key order. It has no header, version or checksum. Loading replays each
//! line through the normal insert path, so the first occurrence of a
//! duplicated key wins and malformed lines are skipped.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::codec::{LineDecode, LineEncode};
use crate::disk_env::PosixDiskEnv;
use crate::env::Env;
use crate::skiplist::SkipList;
use crate::types::{Entry, InsertOutcome};

impl<K, V> SkipList<K, V>
where
    K: Ord + Display,
    V: Display,
{
    /// Overwrites the configured store file with the current contents and
    /// returns the number of entries written.
    pub fn dump(&self) -> crate::Result<usize> {
        self.dump_to(self.store_path())
    }

    pub fn dump_to<P: AsRef<Path>>(&self, path: P) -> crate::Result<usize> {
        let path = path.as_ref();
        info!(path = %path.display(), "dump file");
        let mut writer = PosixDiskEnv.open_writable_file(path)?;
        let count = self.write_snapshot(&mut writer)?;
        info!(path = %path.display(), count, "dump file done");
        Ok(count)
    }

    pub fn write_snapshot<W: Write>(&self, w: &mut W) -> crate::Result<usize> {
        let inner = self.inner.read();
        let mut count = 0;
        for entry in inner.chain(0) {
            entry.encode_line(w)?;
            count += 1;
        }
        w.flush()?;
        Ok(count)
    }
}

impl<K, V> SkipList<K, V>
where
    K: Ord + FromStr,
    V: FromStr,
{
    /// Inserts every entry of the configured store file and returns how many
    /// were new. Keys already present keep their current value.
    pub fn load(&self) -> crate::Result<usize> {
        self.load_from(self.store_path())
    }

    pub fn load_from<P: AsRef<Path>>(&self, path: P) -> crate::Result<usize> {
        let path = path.as_ref();
        info!(path = %path.display(), "load file");
        let reader = PosixDiskEnv.open_sequential_file(path)?;
        let inserted = self.read_snapshot(reader)?;
        info!(path = %path.display(), inserted, "load file done");
        Ok(inserted)
    }

    /// Applies a whole snapshot under a single write lock.
    ///
    /// The stream is read and decoded in full before the list is touched, so
    /// a read error leaves the list unchanged.
    pub fn read_snapshot<R: BufRead>(&self, reader: R) -> crate::Result<usize> {
        let mut entries = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            match Entry::<K, V>::decode_line(&line) {
                Some(entry) => entries.push(entry),
                None => debug!(line = n + 1, "skipping malformed snapshot line"),
            }
        }

        let mut inner = self.inner.write();
        let mut inserted = 0;
        for entry in entries {
            if inner.insert(entry.key, entry.value) == InsertOutcome::Inserted {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::{Display, Formatter};
    use std::io::{Cursor, ErrorKind};

    use pretty_assertions::assert_eq;

    use crate::{Config, Error, SkipList};

    /// Printable but not parseable.
    #[derive(Clone, Debug, PartialEq)]
    struct Point(i32, i32);

    impl Display for Point {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "({}, {})", self.0, self.1)
        }
    }

    fn make_list() -> SkipList<i32, String> {
        let list = SkipList::with_config(Config::with_max_level(8).seed(9)).unwrap();
        for (k, v) in [(3, "三"), (1, "一"), (10, "十"), (2, "二")] {
            list.insert(k, v.to_string());
        }
        list
    }

    #[test]
    fn test_write_snapshot() {
        let list = make_list();
        let mut buf = Vec::new();
        assert_eq!(list.write_snapshot(&mut buf).unwrap(), 4);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "1:一\n2:二\n3:三\n10:十\n"
        );
    }

    #[test]
    fn test_write_empty() {
        let list: SkipList<i32, String> = SkipList::new(4).unwrap();
        let mut buf = Vec::new();
        assert_eq!(list.write_snapshot(&mut buf).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_read_snapshot_skips_malformed() {
        let list: SkipList<i32, String> = SkipList::new(8).unwrap();
        let snapshot = "5:five\nno delimiter\n:empty key\n6:\n\nseven:7\n7:a:b\r\n5:again\n";
        let inserted = list.read_snapshot(Cursor::new(snapshot)).unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(
            list.entries(),
            vec![(5, "five".to_string()), (7, "a:b".to_string())]
        );
    }

    #[test]
    fn test_read_snapshot_keeps_existing() {
        let list = make_list();
        let inserted = list
            .read_snapshot(Cursor::new("1:uno\n4:cuatro\n"))
            .unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(list.query(&1), Some("一".to_string()));
        assert_eq!(list.query(&4), Some("cuatro".to_string()));
        assert_eq!(list.size(), 5);
    }

    #[test]
    fn test_dump_and_load_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store").join("dumpFile");
        let config = Config::with_max_level(8).store_path(&path);

        let list: SkipList<i32, String> = SkipList::with_config(config.clone()).unwrap();
        list.insert(8, "八".to_string());
        list.insert(4, "四".to_string());
        assert_eq!(list.dump().unwrap(), 2);
        assert!(path.exists());

        let restored: SkipList<i32, String> = SkipList::with_config(config).unwrap();
        assert_eq!(restored.load().unwrap(), 2);
        assert_eq!(restored.entries(), list.entries());
    }

    #[test]
    fn test_write_snapshot_display_only_values() {
        let list = SkipList::new(4).unwrap();
        list.insert(2, Point(3, 4));
        list.insert(1, Point(-1, 0));
        let mut buf = Vec::new();
        assert_eq!(list.write_snapshot(&mut buf).unwrap(), 2);
        assert_eq!(String::from_utf8(buf).unwrap(), "1:(-1, 0)\n2:(3, 4)\n");
    }

    #[test]
    fn test_read_error_leaves_list_unchanged() {
        let list: SkipList<i32, String> = SkipList::new(8).unwrap();
        let snapshot: &[u8] = b"1:a\n2:b\n\xff\xfe:c\n3:d\n";
        match list.read_snapshot(Cursor::new(snapshot)) {
            Err(Error::IOError(e)) => assert_eq!(e.kind(), ErrorKind::InvalidData),
            other => panic!("expected io error, got {:?}", other),
        }
        assert_eq!(list.size(), 0);
        assert!(list.entries().is_empty());
    }

    #[test]
    fn test_read_error_keeps_existing_entries() {
        let list = make_list();
        let before = list.entries();
        let snapshot: &[u8] = b"4:d\n\xff\n";
        assert!(list.read_snapshot(Cursor::new(snapshot)).is_err());
        assert_eq!(list.entries(), before);
    }
}
