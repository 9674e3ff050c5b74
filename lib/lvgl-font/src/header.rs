//! Emission of the header declaring every generated font.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// The naming of a generated header.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct HeaderSpec {
    /// The file name, relative to the output directory.
    pub file_name: &'static str,
    /// The include guard macro.
    pub guard: &'static str,
    /// The comment placed above the declarations.
    pub comment: &'static str,
}

/// Renders an include-guarded header with one `LV_FONT_DECLARE` per entry of `names`.
pub fn render_header<S: AsRef<str>>(spec: &HeaderSpec, names: &[S]) -> String {
    let mut header = format!(
        "#ifndef {guard}\n#define {guard}\n\n#include \"lvgl.h\"\n\n// {comment}\n",
        guard = spec.guard,
        comment = spec.comment,
    );
    for name in names {
        header.push_str(&format!("LV_FONT_DECLARE({});\n", name.as_ref()));
    }
    header.push_str(&format!("\n#endif // {}\n", spec.guard));

    header
}

/// Writes the header described by `spec` into `dir`, returning its path.
///
/// # Errors
///
/// Returns errors when the header cannot be written.
pub fn write_header<S: AsRef<str>>(
    dir: &Path,
    spec: &HeaderSpec,
    names: &[S],
) -> io::Result<PathBuf> {
    let path = dir.join(spec.file_name);
    fs::write(&path, render_header(spec, names))?;

    log::info!("Created header file: {}", path.display());
    Ok(path)
}
