//! Stdout and file result writers

use crate::output::traits::ResultWriter;
use crate::HostsiftError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes matches to standard output
#[derive(Debug, Default)]
pub struct StdoutWriter;

impl ResultWriter for StdoutWriter {
    fn write_matches(&mut self, matches: &[&str]) -> Result<(), HostsiftError> {
        let stdout = io::stdout();
        write_lines(&mut stdout.lock(), matches).map_err(|source| HostsiftError::SinkWrite {
            path: PathBuf::from("<stdout>"),
            source,
        })
    }

    fn destination(&self) -> String {
        "stdout".to_string()
    }
}

/// Writes matches to a file, creating or truncating it
#[derive(Debug, Clone)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultWriter for FileWriter {
    fn write_matches(&mut self, matches: &[&str]) -> Result<(), HostsiftError> {
        let result = File::create(&self.path).and_then(|file| {
            let mut out = BufWriter::new(file);
            write_lines(&mut out, matches)
        });

        result.map_err(|source| HostsiftError::SinkWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes matches to `output`, or to stdout when no path is given
pub fn write_results(matches: &[&str], output: Option<&Path>) -> Result<(), HostsiftError> {
    let mut writer: Box<dyn ResultWriter> = match output {
        Some(path) => Box::new(FileWriter::new(path)),
        None => Box::new(StdoutWriter),
    };
    tracing::info!("Writing {} matches to {}", matches.len(), writer.destination());
    writer.write_matches(matches)
}

fn write_lines<W: Write>(out: &mut W, matches: &[&str]) -> io::Result<()> {
    for m in matches {
        writeln!(out, "{}", m)?;
    }
    out.flush()
}
