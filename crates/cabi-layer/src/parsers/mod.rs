//! Source parsers for the generator inputs
//!
//! Provides parsing from input files into typed values:
//! - Function group definitions (JSON) via serde_json
//! - The version manifest (JSON) via serde_json

use crate::error::ParseError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

mod json;

pub use json::{GroupParser, ManifestParser};

/// Largest input file accepted (10MB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Parser trait for converting file content into typed values
///
/// Implement this trait to add support for new input formats.
pub trait SourceParser {
    /// The value this parser produces
    type Output;

    /// Parse content read from `origin`
    fn parse(&self, origin: &Path, content: &str) -> Result<Self::Output, ParseError>;

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str];

    /// Check if this parser can handle the given path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions().contains(&ext))
            .unwrap_or(false)
    }

    /// Read and parse a file
    ///
    /// # Errors
    /// - [`ParseError::Io`] if the file cannot be read
    /// - [`ParseError::FileTooLarge`] above [`MAX_FILE_SIZE`]
    /// - Any error from [`SourceParser::parse`]
    fn parse_file(&self, path: &Path) -> Result<Self::Output, ParseError> {
        let metadata = std::fs::metadata(path).map_err(|e| ParseError::io_error(path, e))?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(ParseError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                max: MAX_FILE_SIZE,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ParseError::io_error(path, e))?;
        self.parse(path, &content)
    }
}

/// Files under `root` the parser accepts, sorted by path
///
/// # Errors
/// [`ParseError::Io`] if `root` is not a directory or any entry below it
/// cannot be read; the error names that entry.
pub fn discover_files<P>(root: &Path, parser: &P) -> Result<Vec<PathBuf>, ParseError>
where
    P: SourceParser + ?Sized,
{
    if !root.is_dir() {
        return Err(ParseError::io_error(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            ParseError::io_error(path, std::io::Error::from(err))
        })?;
        if entry.file_type().is_file() && parser.can_parse(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    tracing::debug!(root = %root.display(), files = files.len(), "discovered definition files");
    Ok(files)
}
