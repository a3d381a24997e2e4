/*!
# IO

Utilities for reading and writing weighted graphs from and to text.

The only supported format is the whitespace-separated **edge list** (see [`edge_list`]):
```text
<node_count> <edge_count>
<from> <to> <capacity>
...
```

## Traits

- [`GraphReader`] and [`GraphWriter`] are implemented by readers and writers for a specific format
  and come with convenience wrappers that operate on files.
- [`EdgeListRead`] and [`EdgeListWrite`] are shorthands on the graph itself using default settings.

All errors are reported as [`std::io::Error`]. Malformed input uses [`ErrorKind::InvalidData`](std::io::ErrorKind::InvalidData).
*/

pub mod edge_list;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Result, Write},
    path::Path,
};

use crate::prelude::*;

pub use edge_list::*;

/// Trait for types that can read graphs in a specific format.
pub trait GraphReader<G> {
    /// Reads a graph from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a graph in the expected format.
    fn try_read_graph<R>(&self, reader: R) -> Result<G>
    where
        R: BufRead;

    /// Reads a graph from a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if its contents
    /// are not a valid representation of a graph in the expected format.
    fn try_read_graph_file<P>(&self, path: P) -> Result<G>
    where
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
pub trait GraphWriter<G> {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_graph<W>(&self, graph: &G, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_graph_file<P>(&self, graph: &G, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_graph(graph, &mut writer)?;
        writer.flush()
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next token of a token stream and returns early if it fails
macro_rules! parse_next_value {
    ($tokens : expr, $name : expr) => {{
        let Some(token) = $tokens.next_token()? else {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("Premature end of input when parsing {}.", $name)
            ));
        };

        match token.parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!(
                        "Invalid value '{}' in line {}. Cannot parse {}.",
                        token,
                        $tokens.line_number(),
                        $name
                    )
                ));
            }
        }
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;
