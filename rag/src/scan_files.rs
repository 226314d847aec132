use std::path::Path;

use lopdf::Document;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{RagError, Result};

/// Text of one PDF page. `page` is the zero-based page index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub source: String,
    pub page: u32,
    pub text: String,
}

/// Reads every matching file directly inside `dir` (no recursion) and returns
/// its pages in file-name order, then page order.
pub fn load_pdf_pages(dir: &str, include_exts: &[String]) -> Result<Vec<Page>> {
    let base = Path::new(dir);
    if !base.is_dir() {
        return Err(RagError::Loading(format!("directory not found: {}", dir)));
    }

    let files = scan_files(base, include_exts)?;
    if files.is_empty() {
        return Err(RagError::Loading(format!(
            "no files matching {} in {}",
            include_exts.join(","),
            dir
        )));
    }

    let mut pages = Vec::new();
    for path in &files {
        let loaded = extract_pages(path)?;
        debug!(file = %path, pages = loaded.len(), "loaded document");
        pages.extend(loaded);
    }
    info!(files = files.len(), pages = pages.len(), "documents loaded");
    Ok(pages)
}

fn scan_files(base: &Path, exts: &[String]) -> Result<Vec<String>> {
    let walker = WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut results = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| RagError::Loading(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_extension(path, exts) {
            continue;
        }
        results.push(path.to_string_lossy().to_string());
    }
    Ok(results)
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    let lower = path.to_string_lossy().to_lowercase();
    exts.iter().any(|ext| lower.ends_with(&ext.to_lowercase()))
}

fn extract_pages(path: &str) -> Result<Vec<Page>> {
    let doc = Document::load(path)
        .map_err(|e| RagError::Loading(format!("cannot open {}: {}", path, e)))?;

    let mut pages = Vec::new();
    // get_pages() is keyed by 1-based page number, already in order.
    for (index, number) in doc.get_pages().into_keys().enumerate() {
        let text = doc.extract_text(&[number]).map_err(|e| {
            RagError::Loading(format!("cannot read page {} of {}: {}", number, path, e))
        })?;
        pages.push(Page {
            source: path.to_string(),
            page: index as u32,
            text,
        });
    }
    Ok(pages)
}
