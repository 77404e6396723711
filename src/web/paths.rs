//! URL builders for every page, so handlers and templates agree on routes.

use urlencoding::encode;

pub const COURSE_LIST: &str = "/";
pub const LOGIN: &str = "/accounts/login/";
pub const LOGOUT: &str = "/accounts/logout/";

#[must_use]
pub fn course_detail(slug: &str) -> String {
    format!("/{}/", encode(slug))
}

#[must_use]
pub fn enroll(slug: &str) -> String {
    format!("/{}/enroll/", encode(slug))
}

#[must_use]
pub fn lesson_detail(course_slug: &str, lesson_slug: &str) -> String {
    format!("/{}/lessons/{}/", encode(course_slug), encode(lesson_slug))
}

#[must_use]
pub fn lesson_complete(course_slug: &str, lesson_slug: &str) -> String {
    format!(
        "/{}/lessons/{}/complete/",
        encode(course_slug),
        encode(lesson_slug)
    )
}

#[must_use]
pub fn login_with_next(next: &str) -> String {
    format!("{LOGIN}?next={}", encode(next))
}

#[must_use]
pub fn stylesheet() -> &'static str {
    "/static/style.css"
}

/// Course images are stored relative to the media directory.
#[must_use]
pub fn media(path: &str) -> String {
    let encoded: Vec<_> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| encode(segment).into_owned())
        .collect();
    format!("/media/{}", encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_paths() {
        assert_eq!(course_detail("rust-101"), "/rust-101/");
        assert_eq!(enroll("rust-101"), "/rust-101/enroll/");
        assert_eq!(lesson_detail("rust-101", "intro"), "/rust-101/lessons/intro/");
        assert_eq!(
            lesson_complete("rust-101", "intro"),
            "/rust-101/lessons/intro/complete/"
        );
    }

    #[test]
    fn test_login_next_is_encoded() {
        assert_eq!(
            login_with_next("/rust-101/enroll/"),
            "/accounts/login/?next=%2Frust-101%2Fenroll%2F"
        );
    }

    #[test]
    fn test_media_path() {
        assert_eq!(media("courses/cover art.png"), "/media/courses/cover%20art.png");
        assert_eq!(media("/logo.png"), "/media/logo.png");
    }
}
