//! Input acquisition for lsof listings.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::LsofaError;
use crate::Result;

/// Where to read the listing from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Standard input
    #[default]
    Stdin,
    /// A file containing saved lsof output
    File(PathBuf),
}

impl InputSource {
    /// Interpret an optional command-line argument. No argument, or `-`,
    /// means standard input.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::File(PathBuf::from(path)),
        }
    }

    /// Open the source for buffered line reading.
    ///
    /// The returned reader owns the underlying handle, so the file is closed
    /// when the reader is dropped.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            InputSource::Stdin => {
                debug!("reading listing from stdin");
                Ok(Box::new(io::stdin().lock()))
            }
            InputSource::File(path) => {
                let file = open_file(path)?;
                debug!("reading listing from {}", path.display());
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| LsofaError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
