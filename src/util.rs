const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub fn day_name(day: u8) -> &'static str {
    DAY_NAMES.get(day as usize).copied().unwrap_or("")
}

/// Appends `.png` when `path` has no extension.
pub fn with_png_extension(path: &std::path::Path) -> std::path::PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn day_names_match_index() {
        assert_eq!(day_name(0), "Sunday");
        assert_eq!(day_name(6), "Saturday");
        assert_eq!(day_name(7), "");
    }

    #[test]
    fn png_extension_added_only_when_missing() {
        assert_eq!(with_png_extension(Path::new("out")), Path::new("out.png"));
        assert_eq!(with_png_extension(Path::new("out.png")), Path::new("out.png"));
        assert_eq!(with_png_extension(Path::new("out.img")), Path::new("out.img"));
    }
}
