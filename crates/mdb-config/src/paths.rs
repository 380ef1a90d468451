//! Path normalization.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Convert a user-supplied directory into an absolute, host-convention path.
///
/// Both `/` and `\` are accepted as separators. Relative paths are resolved
/// against `cwd`. Empty and `.` components are dropped, so the result is
/// stable under repeated normalization.
pub fn normalize_dir(raw: &str, cwd: &Path) -> PathBuf {
    let mut path = PathBuf::new();

    if raw.starts_with(['/', '\\']) {
        path.push(MAIN_SEPARATOR.to_string());
    }

    let parts = raw
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".");

    for (i, part) in parts.enumerate() {
        // A leading drive letter needs its root, or `C:` + `x` becomes `C:x`.
        if i == 0 && is_drive(part) {
            path.push(format!("{}{}", part, MAIN_SEPARATOR));
        } else {
            path.push(part);
        }
    }

    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn is_drive(part: &str) -> bool {
    let bytes = part.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
