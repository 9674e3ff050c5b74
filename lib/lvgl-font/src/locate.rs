//! Resolution of the source TrueType font.

use std::{
    error, fmt,
    path::{Path, PathBuf},
};

/// Returns `explicit` if given and it exists, otherwise the first existing path in `candidates`.
///
/// An explicit path that does not exist is an error; the candidates are not consulted.
///
/// # Errors
///
/// Returns [`FontNotFound`] if no font file exists at the searched locations.
pub fn locate_font(explicit: Option<&Path>, candidates: &[&str]) -> Result<PathBuf, FontNotFound> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }

        return Err(FontNotFound {
            searched: vec![path.to_path_buf()],
        });
    }

    let found = candidates
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists());
    if let Some(path) = found {
        log::info!("Found font: {}", path.display());
        return Ok(path);
    }

    Err(FontNotFound {
        searched: candidates.iter().map(PathBuf::from).collect(),
    })
}

/// No font file existed at any searched location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontNotFound {
    /// Every location that was checked, in order.
    pub searched: Vec<PathBuf>,
}

impl fmt::Display for FontNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.searched.as_slice() {
            [path] => write!(f, "font file not found: {}", path.display()),
            paths => {
                write!(f, "font file not found; searched:")?;
                for path in paths {
                    write!(f, "\n  - {}", path.display())?;
                }
                Ok(())
            }
        }
    }
}

impl error::Error for FontNotFound {}
