//! Turning HTML fragments into complete documents.
//!
//! Table dumps are often saved as plain `.txt` files holding only a
//! `<table>` fragment. These helpers wrap such fragments in a minimal UTF-8
//! HTML document so browsers and other tools open them correctly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::read_source;
use crate::error::Result;

/// Check whether text already looks like a full HTML document.
pub fn looks_like_full_html(document: &str) -> bool {
    let lowered = document.trim().to_lowercase();
    lowered.contains("<html") || lowered.contains("<!doctype html")
}

/// Return a complete HTML document, wrapping the input if it is a fragment.
pub fn ensure_html_document(fragment_or_document: &str, title: &str) -> String {
    if looks_like_full_html(fragment_or_document) {
        return fragment_or_document.to_string();
    }

    format!(
        "<!doctype html>\n\
         <html>\n\
         <head>\n    \
         <meta charset=\"utf-8\">\n    \
         <title>{}</title>\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         </head>\n\
         <body>\n\
         {}\n\
         </body>\n\
         </html>\n",
        escape_text(title),
        fragment_or_document
    )
}

/// Output path for a wrapped file: `x.txt` becomes `x.html`, anything else gets `.html` appended to its stem.
pub fn infer_output_path(input: &Path) -> PathBuf {
    let is_txt = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    if is_txt {
        input.with_extension("html")
    } else {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}.html", stem))
    }
}

/// Wrap a text file holding HTML into a `.html` document and return the written path.
///
/// The title defaults to the input file stem. Parent directories of the
/// output are created when missing.
pub fn wrap_file(input: &Path, output: Option<&Path>, title: Option<&str>) -> Result<PathBuf> {
    let source = read_source(input, None)?;

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let title = title.unwrap_or(&stem);
    let document = ensure_html_document(&source.text, title);

    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| infer_output_path(input));
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, document)?;

    log::info!("Wrapped {} into {}", input.display(), target.display());
    Ok(target)
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
