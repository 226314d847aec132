use crate::scan_files::Page;

/// A window of one page's text. Never spans two pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub source: String,
    pub page: u32,
    pub text: String,
}

/// Splits `text` into windows of at most `size` chars, each starting
/// `size - overlap` chars after the previous one. Windows are not trimmed, so
/// dropping the first `overlap` chars of every window after the first
/// rebuilds the input. Blank text yields nothing.
///
/// Callers must ensure `overlap < size` (see `Config::validate`).
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    if size == 0 {
        return vec![text.to_string()];
    }
    let overlap = overlap.min(size - 1);

    let chars: Vec<char> = text.chars().collect();
    let len_chars = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < len_chars {
        let end = (start + size).min(len_chars);
        chunks.push(chars[start..end].iter().collect());
        if end == len_chars {
            break;
        }
        start = end - overlap;
    }

    chunks
}

/// Chunks every page, keeping page order and each page's source metadata.
pub fn chunk_pages(pages: &[Page], size: usize, overlap: usize) -> Vec<Chunk> {
    pages
        .iter()
        .flat_map(|page| {
            chunk_text(&page.text, size, overlap)
                .into_iter()
                .map(move |text| Chunk {
                    source: page.source.clone(),
                    page: page.page,
                    text,
                })
        })
        .collect()
}
