/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, returning the pieces
/// between occurrences (excluding the needle itself).
pub fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
}

/// The first file part of a multipart/form-data body: its raw bytes plus the
/// declared metadata the upload form attached to it.
///
/// Fields:
/// - `bytes`        — the file contents
/// - `content_type` — the part's own `Content-Type` header, or empty when the
///                    browser sent none (the loader validates this value)
/// - `file_name`    — the `filename="..."` attribute, or empty
#[derive(Debug, Clone)]
pub struct FilePart {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

/// Extracts the first file part from a multipart/form-data body, including
/// its declared content type and original filename. Returns `None` if no
/// file part is found or on parse error.
pub fn multipart_extract_file(body: &[u8], boundary: &str) -> Option<FilePart> {
    let delimiter = format!("--{}", boundary);
    let delim_bytes = delimiter.as_bytes();
    let parts = split_on(body, delim_bytes);

    for part in parts {
        let sep = b"\r\n\r\n";
        if let Some(sep_pos) = find_subsequence(part, sep) {
            let header_section = &part[..sep_pos];
            let headers_str = String::from_utf8_lossy(header_section);
            if !headers_str.contains("filename=") {
                continue;
            }
            let data_start = sep_pos + sep.len();
            let raw = &part[data_start..];
            let trimmed = raw.strip_suffix(b"\r\n").unwrap_or(raw);
            return Some(FilePart {
                bytes: trimmed.to_vec(),
                content_type: parse_part_content_type(&headers_str).unwrap_or_default(),
                file_name: parse_disposition_filename(&headers_str).unwrap_or_default(),
            });
        }
    }
    None
}

/// Parses the part-level `Content-Type:` header from a part's header block.
fn parse_part_content_type(headers: &str) -> Option<String> {
    headers
        .lines()
        .map(|l| l.trim())
        .find(|l| l.to_ascii_lowercase().starts_with("content-type:"))
        .map(|l| l["content-type:".len()..].trim().to_owned())
}

/// Parses the `filename="..."` value from a Content-Disposition header string.
fn parse_disposition_filename(headers: &str) -> Option<String> {
    let key = "filename=\"";
    let pos = headers.find(key)?;
    let rest = &headers[pos + key.len()..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}
