use url::Url;

use super::WebError;
use super::paths;
use crate::domain::is_valid_slug;

/// Slugs arrive as path segments; anything malformed cannot match a record.
pub fn validate_slug(slug: &str) -> Result<&str, WebError> {
    if slug.len() > 255 || !is_valid_slug(slug) {
        return Err(WebError::not_found("Page", slug));
    }
    Ok(slug)
}

/// Returns `next` when it is a path on this site, otherwise the course list.
#[must_use]
pub fn safe_redirect_target(next: Option<&str>) -> String {
    let Some(next) = next.map(str::trim).filter(|n| !n.is_empty()) else {
        return paths::COURSE_LIST.to_string();
    };

    let is_local = next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(char::is_control);

    if is_local {
        next.to_string()
    } else {
        tracing::warn!(next = %next, "Rejected non-local redirect target");
        paths::COURSE_LIST.to_string()
    }
}

/// Lesson videos are only linked when they are plain http(s) URLs.
#[must_use]
pub fn safe_video_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let allowed = matches!(url.scheme(), "http" | "https") && url.host_str().is_some();
    allowed.then(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("rust-101").is_ok());
        assert!(validate_slug("intro_1").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("dots.bad").is_err());
        assert!(validate_slug(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_safe_redirect_target() {
        assert_eq!(safe_redirect_target(None), "/");
        assert_eq!(safe_redirect_target(Some("")), "/");
        assert_eq!(
            safe_redirect_target(Some("/rust-101/lessons/intro/")),
            "/rust-101/lessons/intro/"
        );
        assert_eq!(safe_redirect_target(Some("https://evil.example/")), "/");
        assert_eq!(safe_redirect_target(Some("//evil.example/")), "/");
        assert_eq!(safe_redirect_target(Some("/\\evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("relative/path")), "/");
    }

    #[test]
    fn test_safe_video_url() {
        assert_eq!(
            safe_video_url("https://videos.example.com/v/1"),
            Some("https://videos.example.com/v/1".to_string())
        );
        assert!(safe_video_url("javascript:alert(1)").is_none());
        assert!(safe_video_url("not a url").is_none());
        assert!(safe_video_url("ftp://files.example.com/a.mp4").is_none());
    }
}
