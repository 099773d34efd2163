//! Structured trace stream for simulation runs.
//!
//! The trace is a nested, tab-indented text format: a `<simulation>` frame
//! around everything, `<iteration>` frames around each pass over the
//! candidates, `<playahead>` frames around each candidate's rollout, and
//! `<ply>` frames around each simulated turn. The stream is informational;
//! consumers should not treat the exact byte layout as a contract.
//!
//! The log never fails a simulation. A file that cannot be opened is
//! reported through `tracing` and logging stays disabled; a write error
//! disables the stream mid-run the same way.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

#[derive(Debug, Default)]
pub struct TraceLog {
    out: Option<BufWriter<std::fs::File>>,
    path: Option<PathBuf>,
    depth: usize,
    has_header: bool,
}

impl TraceLog {
    /// A disabled log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start logging to `path`. Reopening the path already being logged to
    /// is a no-op; anything else closes the current stream first. On open
    /// failure the log stays disabled.
    pub fn open(&mut self, path: impl AsRef<Path>, append: bool) {
        let path = path.as_ref();
        if self.out.is_some() && self.path.as_deref() == Some(path) {
            return;
        }
        self.close();

        let mut options = OpenOptions::new();
        options.write(true).create(true);
        if append {
            options.append(true);
        } else {
            options.truncate(true);
        }

        match options.open(path) {
            Ok(file) => {
                self.out = Some(BufWriter::new(file));
                self.path = Some(path.to_path_buf());
            }
            Err(e) => {
                warn!(
                    "could not open {} to write simulation log: {}",
                    path.display(),
                    e
                );
            }
        }
        self.has_header = false;
        self.depth = 0;
    }

    /// Close the stream, writing the closing frame if one is open.
    pub fn close(&mut self) {
        if self.out.is_some() {
            if self.has_header {
                self.end_simulation();
            }
            if let Some(mut out) = self.out.take() {
                if let Err(e) = out.flush() {
                    warn!("simulation log flush failed: {}", e);
                }
            }
        }
        self.path = None;
        self.depth = 0;
        self.has_header = false;
    }

    pub fn is_logging(&self) -> bool {
        self.out.is_some()
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Freeform line at the current nesting depth.
    pub fn message(&mut self, text: &str) {
        self.write_line(text);
    }

    pub(crate) fn begin_simulation(&mut self) {
        if !self.is_logging() || self.has_header {
            return;
        }
        self.write_line("<simulation>");
        self.depth = 1;
        self.has_header = true;
    }

    pub(crate) fn end_simulation(&mut self) {
        if !self.is_logging() || !self.has_header {
            return;
        }
        self.depth = 0;
        self.write_line("</simulation>");
        self.has_header = false;
    }

    pub(crate) fn open_frame(&mut self, opening: &str) {
        if !self.is_logging() {
            return;
        }
        self.write_line(opening);
        self.depth += 1;
    }

    pub(crate) fn close_frame(&mut self, closing: &str) {
        if !self.is_logging() {
            return;
        }
        self.depth = self.depth.saturating_sub(1);
        self.write_line(closing);
    }

    pub(crate) fn line(&mut self, text: &str) {
        self.write_line(text);
    }

    fn write_line(&mut self, text: &str) {
        let depth = self.depth;
        let Some(out) = self.out.as_mut() else {
            return;
        };
        let result = (|| -> std::io::Result<()> {
            for _ in 0..depth {
                out.write_all(b"\t")?;
            }
            out.write_all(text.as_bytes())?;
            out.write_all(b"\n")
        })();
        if let Err(e) = result {
            warn!("simulation log write failed, disabling logging: {}", e);
            self.out = None;
            self.path = None;
        }
    }
}

impl Drop for TraceLog {
    fn drop(&mut self) {
        self.close();
    }
}
