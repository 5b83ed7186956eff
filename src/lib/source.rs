//! Opening alignment inputs as sequences of SAM text lines.
//!
//! Three kinds of input are supported:
//! - `-` (or `/dev/stdin`) reads SAM text from standard input;
//! - `.bam` and `.cram` files are converted by running `samtools view` and reading its
//!   standard output;
//! - anything else is read as SAM text, gzip-compressed or not.

use anyhow::{Context, Result, bail};
use fgoxide::io::Io;
use log::debug;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Default name of the executable used to convert binary alignment files to text.
pub const DEFAULT_SAMTOOLS: &str = "samtools";

/// Returns true if the path is "-" or "/dev/stdin".
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdin"
}

/// Returns true if the file must be converted to SAM text before it can be read.
pub fn needs_conversion<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bam") || ext.eq_ignore_ascii_case("cram"))
}

/// An open alignment input.
pub struct LineSource {
    path: PathBuf,
    reader: Box<dyn BufRead + Send>,
    converter: Option<Child>,
}

impl LineSource {
    /// Opens `path`, spawning `samtools view` for binary alignment files.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the converter cannot be started.
    pub fn open(path: &Path, samtools: &str) -> Result<Self> {
        if is_stdin_path(path) {
            debug!("Reading SAM text from standard input");
            let reader: Box<dyn BufRead + Send> = Box::new(BufReader::new(std::io::stdin()));
            return Ok(Self { path: path.to_path_buf(), reader, converter: None });
        }

        if needs_conversion(path) {
            debug!("Converting {} to SAM text with {samtools}", path.display());
            let mut child = Command::new(samtools)
                .arg("view")
                .arg(path)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .spawn()
                .with_context(|| format!("Failed to run '{samtools} view' on {}", path.display()))?;
            let stdout = child.stdout.take().context("Converter has no standard output")?;
            let reader: Box<dyn BufRead + Send> = Box::new(BufReader::new(stdout));
            return Ok(Self { path: path.to_path_buf(), reader, converter: Some(child) });
        }

        let reader = Io::default()
            .new_reader(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        Ok(Self { path: path.to_path_buf(), reader, converter: None })
    }

    /// The path this source was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterates over the remaining lines, without line terminators.
    pub fn lines(&mut self) -> impl Iterator<Item = std::io::Result<String>> + '_ {
        (&mut self.reader).lines()
    }

    /// Closes the source, checking that the converter (if any) exited successfully.
    ///
    /// # Errors
    ///
    /// Returns an error if the converter failed.
    pub fn finish(mut self) -> Result<()> {
        let Some(mut child) = self.converter.take() else {
            return Ok(());
        };
        // close our end of the pipe so a converter blocked on writing can exit
        self.reader = Box::new(std::io::empty());
        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for the converter of {}", self.path.display()))?;
        if !status.success() {
            bail!("Conversion of {} to SAM text failed with {status}", self.path.display());
        }
        Ok(())
    }
}

impl Drop for LineSource {
    /// Stops a converter that is still running, e.g. after an invalid record.
    fn drop(&mut self) {
        if let Some(mut child) = self.converter.take() {
            debug!("Stopping the converter of {}", self.path.display());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
