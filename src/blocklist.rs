//! Newline-delimited blocklist output.

use std::fs::File;
use std::io::{ BufWriter, Write };
use std::path::Path;

/// Default file name, relative to the current working directory.
pub const DEFAULT_OUTPUT: &str = "disconnect-content.txt";

/// Creates or truncates `path` and writes one domain per line, each terminated by `\n`.
pub fn write_blocklist(path: &Path, domains: &[String]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    for domain in domains {
        writeln!(file, "{}", domain)?;
    }
    file.flush()
}
