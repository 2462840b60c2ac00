//! Fan-out writer for a category: standard output plus the category file

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

/// Writer set attached to one category
///
/// Standard output is always part of the set; the file is absent when it
/// could not be opened, in which case the category degrades to stdout only.
pub struct FanoutWriter {
    stdout: Stdout,
    file: Option<BufWriter<File>>,
}

impl FanoutWriter {
    pub fn stdout_only() -> Self {
        Self {
            stdout: io::stdout(),
            file: None,
        }
    }

    pub fn with_file(file: File) -> Self {
        Self {
            stdout: io::stdout(),
            file: Some(BufWriter::new(file)),
        }
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Write one line to every writer in the set
    ///
    /// Standard output failures are ignored; only the file result is
    /// returned.
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        let _ = self.stdout.lock().write_all(line);
        match self.file {
            Some(ref mut file) => file.write_all(line),
            None => Ok(()),
        }
    }

    /// Flush buffered file output
    pub fn flush(&mut self) -> io::Result<()> {
        let _ = self.stdout.lock().flush();
        match self.file {
            Some(ref mut file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Flush, sync and release the file handle
    pub fn close(mut self) -> io::Result<()> {
        match self.file.take() {
            Some(writer) => {
                let file = writer.into_inner().map_err(|e| e.into_error())?;
                file.sync_all()
            }
            None => Ok(()),
        }
    }
}

/// Open `path` for appending, creating it with `mode` permissions
pub fn open_append(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}

/// Create `dir` and its parents with `mode` permissions
pub fn create_dir_all(dir: &Path, mode: u32) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(dir)
}
