//! Input handling for file and stdin sources.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the HTML document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    /// Stdin, already read into memory
    Stdin(String),
}

#[derive(Debug, Error)]
pub enum InputError {
    /// No file argument and nothing piped on stdin.
    #[error("no input: pass a file, '-' for stdin, or pipe a document")]
    NoTty,

    #[error("failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
}

/// Decide which source to read from.
///
/// `-` always means stdin. Without a path, stdin is used only if it is piped.
pub fn determine_input_source(path: Option<&Path>) -> Result<InputSource, InputError> {
    match path {
        Some(p) if p == Path::new("-") => read_stdin().map(InputSource::Stdin),
        Some(p) => Ok(InputSource::File(p.to_path_buf())),
        None if io::stdin().is_terminal() => Err(InputError::NoTty),
        None => read_stdin().map(InputSource::Stdin),
    }
}

fn read_stdin() -> Result<String, InputError> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(InputError::Stdin)?;
    Ok(buffer)
}

/// Load the document text for a source.
pub fn process_input(source: InputSource) -> Result<String, InputError> {
    match source {
        InputSource::File(path) => {
            fs::read_to_string(&path).map_err(|source| InputError::File { path, source })
        }
        InputSource::Stdin(content) => Ok(content),
    }
}
