use std::path::{Path, PathBuf};

const INPUT_MARKER: &str = "_input";
const OUTPUT_MARKER: &str = "_output";

/// `week_input.xlsx` -> `week_output.<ext>`; `week.csv` -> `week_output.<ext>`.
/// Only the last `_input` in the file stem is replaced; the directory is kept.
pub fn derive_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match stem.rfind(INPUT_MARKER) {
        Some(pos) => format!(
            "{}{}{}",
            &stem[..pos],
            OUTPUT_MARKER,
            &stem[pos + INPUT_MARKER.len()..]
        ),
        None => format!("{stem}{OUTPUT_MARKER}"),
    };
    input.with_file_name(format!("{stem}.{extension}"))
}
