//! An ordered key-value map built on a probabilistic skip list, with a
//! one-shot text snapshot for dumping and reloading its contents.

pub use crate::config::{Config, MAX_LEVEL_LIMIT};
pub use crate::error::Error;
pub use crate::skiplist::SkipList;
pub use crate::types::{DeleteOutcome, Entry, InsertOutcome};

mod arena;
mod codec;
mod config;
mod disk_env;
mod env;
mod error;
mod level;
mod persist;
mod skiplist;
mod types;

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! ensure {
    ($cond:expr,$err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}
