use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding: &'static str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page bytes are not valid {encoding}")]
    Malformed { encoding: &'static str },
}

/// Decode fetched page bytes to UTF-8.
///
/// Order: byte order mark, then the `charset` parameter of `Content-Type`,
/// then a chardetng guess over the whole document.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_param)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name(),
        });
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding: encoding.name(),
    })
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_header_is_honoured() {
        let decoded = decode_page(b"caf\xe9", Some("text/html; Charset=\"ISO-8859-1\"")).unwrap();
        assert_eq!(decoded.html, "café");
    }

    #[test]
    fn bom_wins_over_header() {
        let decoded = decode_page(b"\xEF\xBB\xBFhello", Some("text/html; charset=latin1")).unwrap();
        assert_eq!(decoded.html, "hello");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn charset_param_ignores_other_parameters() {
        assert_eq!(charset_param("text/html; q=1; charset=utf-8"), Some("utf-8"));
        assert_eq!(charset_param("text/html"), None);
    }
}
