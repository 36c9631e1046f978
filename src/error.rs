use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error {0}")]
    IOError(#[from] io::Error),
    #[error("config error {0}")]
    ConfigError(String),
}
