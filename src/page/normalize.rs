use crate::page::{PageIdError, PageIdResult};
use url::Url;

/// Normalizes a page identifier to its canonical URL segment
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject empty input
/// 2. If the input looks like a URL, parse it and take the last non-empty
///    path segment (this drops the query and fragment automatically)
/// 3. Otherwise treat the input as a bare title and fold spaces to
///    underscores, matching how article titles appear in URLs
///
/// Percent escapes are kept as-is: the segment is an opaque key, and
/// decoding would merge pages that Wikipedia itself keeps distinct only in
/// their escaped form.
pub fn normalize_identifier(input: &str) -> PageIdResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PageIdError::Empty);
    }

    if trimmed.contains("://") {
        let url = Url::parse(trimmed).map_err(|e| PageIdError::Parse(e.to_string()))?;

        let segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .ok_or_else(|| PageIdError::MissingSegment(trimmed.to_string()))?;

        if segment.is_empty() {
            return Err(PageIdError::MissingSegment(trimmed.to_string()));
        }

        Ok(segment)
    } else {
        Ok(trimmed.replace(' ', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_segment_extracted() {
        let seg = normalize_identifier("https://en.wikipedia.org/wiki/Minecraft").unwrap();
        assert_eq!(seg, "Minecraft");
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let seg = normalize_identifier("https://en.wikipedia.org/wiki/Minecraft/").unwrap();
        assert_eq!(seg, "Minecraft");
    }

    #[test]
    fn test_fragment_and_query_dropped() {
        let seg =
            normalize_identifier("https://en.wikipedia.org/wiki/Minecraft?x=1#History").unwrap();
        assert_eq!(seg, "Minecraft");
    }

    #[test]
    fn test_bare_title_spaces_folded() {
        let seg = normalize_identifier("  Garbage collection  ").unwrap();
        assert_eq!(seg, "Garbage_collection");
    }

    #[test]
    fn test_malformed_url_rejected() {
        assert!(matches!(
            normalize_identifier("https://"),
            Err(PageIdError::Parse(_)) | Err(PageIdError::MissingSegment(_))
        ));
    }

    #[test]
    fn test_url_with_no_path_rejected() {
        assert!(matches!(
            normalize_identifier("https://en.wikipedia.org"),
            Err(PageIdError::MissingSegment(_))
        ));
    }
}
