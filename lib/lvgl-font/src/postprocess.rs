//! Rewriting of the C source emitted by `lv_font_conv`.
//!
//! `lv_font_conv` names the exported `lv_font_t` after the input file and emits no include for
//! `lvgl.h`. The rewrite here is a compatibility shim for its LVGL output format: it recognises the
//! declaration purely by its textual shape, `const lv_font_t <ident> = ...`, at the start of a line.

use std::{fs, path::Path};

use anyhow::{Context, Result};

/// The prefix of the generated font declaration.
const DECLARATION_PREFIX: &str = "const lv_font_t ";

/// What is prepended to a generated source besides the symbol rename.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum DeclarationStyle {
    /// Prepend `#include "lvgl.h"`.
    #[default]
    IncludeOnly,
    /// Prepend `#include "lvgl.h"` followed by `LV_FONT_DECLARE(<name>);`.
    IncludeAndDeclare,
}

/// Returns the text placed before the generated source.
pub fn prelude(name: &str, style: DeclarationStyle) -> String {
    match style {
        DeclarationStyle::IncludeOnly => "#include \"lvgl.h\"\n\n".to_owned(),
        DeclarationStyle::IncludeAndDeclare => {
            format!("#include \"lvgl.h\"\n\nLV_FONT_DECLARE({name});\n\n")
        }
    }
}

/// Renames every font declaration in `source` to `name`, returning the new source and the number
/// of rewritten lines.
///
/// Lines that are not declarations are copied unchanged and line order is preserved.
pub fn rename_declaration(source: &str, name: &str) -> (String, usize) {
    let mut renamed = 0;
    let lines = source
        .split('\n')
        .map(|line| match rename_line(line, name) {
            Some(new_line) => {
                renamed += 1;
                new_line
            }
            None => line.to_owned(),
        })
        .collect::<Vec<_>>();

    (lines.join("\n"), renamed)
}

/// Rewrites `line` if it has the shape `<indent>const lv_font_t <ident> = <rest>`.
fn rename_line(line: &str, name: &str) -> Option<String> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];

    let after_prefix = body.strip_prefix(DECLARATION_PREFIX)?;
    let (ident, rest) = after_prefix.split_once(" = ")?;
    if ident.is_empty() || !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    Some(format!("{indent}{DECLARATION_PREFIX}{name} = {rest}"))
}

/// Applies the rename and prepends the [`prelude`], returning the new source and the number of
/// renamed lines.
pub fn postprocess(source: &str, name: &str, style: DeclarationStyle) -> (String, usize) {
    let (renamed, count) = rename_declaration(source, name);

    let mut result = prelude(name, style);
    result.push_str(&renamed);
    (result, count)
}

/// Post-processes the generated file at `path` in place, returning the number of renamed lines.
///
/// # Errors
///
/// Returns errors when the file cannot be read as UTF-8 or cannot be written back.
pub fn postprocess_file(path: &Path, name: &str, style: DeclarationStyle) -> Result<usize> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("reading generated font {}", path.display()))?;

    let (result, count) = postprocess(&source, name, style);
    fs::write(path, result)
        .with_context(|| format!("writing generated font {}", path.display()))?;

    Ok(count)
}
