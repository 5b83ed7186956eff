//! Validation of command-line inputs before any record is read.
//!
//! Failures use the structured [`MappingStatsError`] variants so callers can tell a bad
//! parameter from a missing file.

use crate::errors::{MappingStatsError, Result};
use crate::source::is_stdin_path;
use std::path::Path;

/// Validate that a file exists
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use bsmapstats_lib::validation::validate_file_exists;
///
/// assert!(validate_file_exists("/nonexistent/reads.sam", "Excluded input").is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(MappingStatsError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate the alignment inputs of one run.
///
/// Every input other than standard input must exist, and at most one input may be
/// standard input.
///
/// # Errors
/// Returns the first problem found
pub fn validate_inputs<P: AsRef<Path>>(inputs: &[(P, &str)]) -> Result<()> {
    let mut stdin_owner: Option<&str> = None;
    for (path, description) in inputs {
        if is_stdin_path(path) {
            if let Some(owner) = stdin_owner {
                return Err(MappingStatsError::InvalidParameter {
                    parameter: description.to_string(),
                    reason: format!("standard input is already used by the {owner}"),
                });
            }
            stdin_owner = Some(*description);
        } else {
            validate_file_exists(path, description)?;
        }
    }
    Ok(())
}

/// Validate that no two outputs share a path and no output overwrites an input.
///
/// # Errors
/// Returns an error naming the clashing outputs
pub fn validate_distinct_outputs<P: AsRef<Path>>(inputs: &[P], outputs: &[(P, &str)]) -> Result<()> {
    for (index, (path, name)) in outputs.iter().enumerate() {
        let path = path.as_ref();
        if inputs.iter().any(|input| input.as_ref() == path) {
            return Err(MappingStatsError::InvalidParameter {
                parameter: (*name).to_string(),
                reason: format!("'{}' is also an input", path.display()),
            });
        }
        if let Some((_, other)) = outputs[..index].iter().find(|(p, _)| p.as_ref() == path) {
            return Err(MappingStatsError::InvalidParameter {
                parameter: (*name).to_string(),
                reason: format!("'{}' is also the destination of --{other}", path.display()),
            });
        }
    }
    Ok(())
}
