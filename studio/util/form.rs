/// Decodes a percent-encoded string (`%XX`) and converts `+` to space.
pub fn url_decode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hi = (bytes[i + 1] as char).to_digit(16);
                let lo = (bytes[i + 2] as char).to_digit(16);
                match (hi, lo) {
                    (Some(h), Some(l)) => {
                        out.push((((h << 4) | l) as u8) as char);
                        i += 3;
                    }
                    _ => {
                        out.push('%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b as char);
                i += 1;
            }
        }
    }
    out
}

/// Percent-encodes one path segment. Unreserved characters (RFC 3986) pass
/// through; everything else — including space, `#`, `?`, `&` and quotes —
/// becomes `%XX`, so the result is safe both inside an href attribute and as
/// a literal request-path segment.
pub fn percent_encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awkward_filename_characters_survive_the_round_trip() {
        // Space, fragment and query characters would otherwise break the
        // href or never match the remembered name on the way back in.
        for name in ["my scan.png", "a#b.png", "what?.png", "ink&paper.png", "a+b.png"] {
            let encoded = percent_encode_segment(name);
            assert!(!encoded.contains(' '));
            assert!(!encoded.contains('#'));
            assert!(!encoded.contains('?'));
            assert!(!encoded.contains('&'));
            assert!(!encoded.contains('"'));
            assert_eq!(url_decode(&encoded), name);
        }
    }

    #[test]
    fn unreserved_names_pass_through_unchanged() {
        assert_eq!(percent_encode_segment("gray_2024.png"), "gray_2024.png");
        assert_eq!(url_decode("gray_2024.png"), "gray_2024.png");
    }

    #[test]
    fn decode_maps_plus_to_space_and_keeps_bad_escapes_literal() {
        assert_eq!(url_decode("a+b"), "a b");
        assert_eq!(url_decode("100%zz"), "100%zz");
    }
}
