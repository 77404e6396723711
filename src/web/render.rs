//! HTML pages. Every interpolated value goes through `text` or `attr`.

use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::paths;
use super::session::FlashMessage;
use super::validation::safe_video_url;
use crate::db::User;
use crate::models::course::{Course, Lesson};
use crate::services::{CourseDetail, LessonPage};

const DESCRIPTION_EXCERPT_CHARS: usize = 200;

/// Per-request data shared by every page layout.
pub struct Chrome<'a> {
    pub user: Option<&'a User>,
    pub messages: &'a [FlashMessage],
}

impl Chrome<'_> {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            messages: &[],
        }
    }
}

fn layout(title: &str, chrome: &Chrome<'_>, body: &str) -> String {
    let account = chrome.user.map_or_else(
        || format!(r#"<a href="{}">Log in</a>"#, paths::LOGIN),
        |user| {
            format!(
                r#"<span class="user">{}</span>
      <form method="post" action="{}" class="inline"><button type="submit">Log out</button></form>"#,
                text(&user.username),
                paths::LOGOUT
            )
        },
    );

    let messages: String = chrome
        .messages
        .iter()
        .map(|m| {
            format!(
                r#"<li class="message {}">{}</li>"#,
                m.level.as_str(),
                text(&m.text)
            )
        })
        .collect();

    let messages = if messages.is_empty() {
        String::new()
    } else {
        format!(r#"<ul class="messages">{messages}</ul>"#)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · Lectern</title>
  <link rel="stylesheet" href="{css}">
</head>
<body>
  <header>
    <a class="brand" href="{home}">Lectern</a>
    <nav>{account}</nav>
  </header>
  <main>
    {messages}
    {body}
  </main>
</body>
</html>
"#,
        title = text(title),
        css = paths::stylesheet(),
        home = paths::COURSE_LIST,
    )
}

fn paragraphs(content: &str) -> String {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>\n", text(p)))
        .collect()
}

fn excerpt(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

fn course_image(course: &Course) -> String {
    course.image.as_deref().filter(|i| !i.is_empty()).map_or_else(String::new, |image| {
        format!(
            r#"<img class="cover" src="{}" alt="{}">"#,
            attr(&paths::media(image)),
            attr(&course.title)
        )
    })
}

#[must_use]
pub fn course_list(chrome: &Chrome<'_>, courses: &[Course]) -> String {
    let items: String = courses
        .iter()
        .map(|course| {
            format!(
                r#"<li class="course">
      {image}
      <h2><a href="{href}">{title}</a></h2>
      <p class="price">{price}</p>
      <p>{description}</p>
    </li>
"#,
                image = course_image(course),
                href = attr(&paths::course_detail(&course.slug)),
                title = text(&course.title),
                price = course.price,
                description = text(&excerpt(&course.description)),
            )
        })
        .collect();

    let body = if items.is_empty() {
        r#"<h1>Courses</h1><p class="empty">No courses are available yet.</p>"#.to_string()
    } else {
        format!(r#"<h1>Courses</h1><ul class="courses">{items}</ul>"#)
    };

    layout("Courses", chrome, &body)
}

fn lesson_link(course: &Course, lesson: &Lesson) -> String {
    let badge = if lesson.is_free_preview {
        r#" <span class="badge">Preview</span>"#
    } else {
        ""
    };
    format!(
        r#"<a href="{}">{}</a>{badge}"#,
        attr(&paths::lesson_detail(&course.slug, &lesson.slug)),
        text(&lesson.title)
    )
}

#[must_use]
pub fn course_detail(chrome: &Chrome<'_>, detail: &CourseDetail) -> String {
    let course = &detail.course;

    let enrollment = if detail.is_enrolled {
        r#"<p class="enrolled">You are enrolled in this course.</p>"#.to_string()
    } else if chrome.user.is_some() {
        format!(
            r#"<form method="post" action="{}"><button type="submit">Enroll</button></form>"#,
            attr(&paths::enroll(&course.slug))
        )
    } else {
        format!(
            r#"<p><a href="{}">Log in</a> to enroll.</p>"#,
            attr(&paths::login_with_next(&paths::course_detail(&course.slug)))
        )
    };

    let modules: String = detail
        .modules
        .iter()
        .map(|outline| {
            let lessons: String = outline
                .lessons
                .iter()
                .map(|lesson| format!("<li>{}</li>", lesson_link(course, lesson)))
                .collect();
            format!(
                r#"<section class="module">
      <h3>{}</h3>
      {}
      <ol>{lessons}</ol>
    </section>
"#,
                text(&outline.module.title),
                paragraphs(&outline.module.description),
            )
        })
        .collect();

    let instructor = detail.instructor.as_deref().map_or_else(String::new, |name| {
        format!(r#"<p class="instructor">Taught by {}</p>"#, text(name))
    });

    let body = format!(
        r#"<article class="course-detail">
    {image}
    <h1>{title}</h1>
    {instructor}
    <p class="price">{price}</p>
    {description}
    {enrollment}
    <h2>Curriculum</h2>
    {modules}
  </article>"#,
        image = course_image(course),
        title = text(&course.title),
        price = course.price,
        description = paragraphs(&course.description),
    );

    layout(&course.title, chrome, &body)
}

#[must_use]
pub fn lesson(chrome: &Chrome<'_>, page: &LessonPage) -> String {
    let course = &page.course;
    let lesson = &page.lesson;

    let outline: String = page
        .lessons
        .iter()
        .map(|item| {
            let mut classes = Vec::new();
            if item.id == lesson.id {
                classes.push("current");
            }
            if page.completed_lesson_ids.contains(&item.id) {
                classes.push("completed");
            }
            format!(
                r#"<li class="{}">{}</li>"#,
                classes.join(" "),
                lesson_link(course, item)
            )
        })
        .collect();

    let video = lesson
        .video_url
        .as_deref()
        .and_then(safe_video_url)
        .map_or_else(String::new, |url| {
            format!(
                r#"<p class="video"><a href="{}" rel="noopener noreferrer">Watch the video</a></p>"#,
                attr(&url)
            )
        });

    let toggle_label = if page.is_completed {
        "Mark as not completed"
    } else {
        "Mark as completed"
    };

    let nav_link = |target: Option<&Lesson>, rel: &str, label: &str| {
        target.map_or_else(String::new, |l| {
            format!(
                r#"<a rel="{rel}" href="{}">{label}: {}</a>"#,
                attr(&paths::lesson_detail(&course.slug, &l.slug)),
                text(&l.title)
            )
        })
    };

    let body = format!(
        r#"<div class="lesson-layout">
    <aside>
      <p><a href="{course_href}">{course_title}</a></p>
      <progress value="{percent}" max="100"></progress>
      <p class="progress">{percent}% complete</p>
      <ol class="outline">{outline}</ol>
    </aside>
    <article class="lesson">
      <p class="module">{module_title}</p>
      <h1>{lesson_title}</h1>
      {video}
      <div class="content">{content}</div>
      <form method="post" action="{toggle_href}">
        <button type="submit">{toggle_label}</button>
      </form>
      <nav class="pager">{prev} {next}</nav>
    </article>
  </div>"#,
        course_href = attr(&paths::course_detail(&course.slug)),
        course_title = text(&course.title),
        percent = page.progress_percent,
        module_title = text(&page.module.title),
        lesson_title = text(&lesson.title),
        content = paragraphs(&lesson.content),
        toggle_href = attr(&paths::lesson_complete(&course.slug, &lesson.slug)),
        prev = nav_link(page.prev_lesson.as_ref(), "prev", "Previous"),
        next = nav_link(page.next_lesson.as_ref(), "next", "Next"),
    );

    layout(&lesson.title, chrome, &body)
}

#[must_use]
pub fn login(chrome: &Chrome<'_>, next: &str, username: &str, error: Option<&str>) -> String {
    let error = error.map_or_else(String::new, |e| format!(r#"<p class="error">{}</p>"#, text(e)));

    let body = format!(
        r#"<h1>Log in</h1>
  {error}
  <form method="post" action="{action}" class="login">
    <input type="hidden" name="next" value="{next}">
    <label>Username <input type="text" name="username" value="{username}" autocomplete="username" required></label>
    <label>Password <input type="password" name="password" autocomplete="current-password" required></label>
    <button type="submit">Log in</button>
  </form>"#,
        action = paths::LOGIN,
        next = attr(next),
        username = attr(username),
    );

    layout("Log in", chrome, &body)
}

#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        r#"<h1>{}</h1><p>{}</p><p><a href="{}">Back to courses</a></p>"#,
        text(&heading),
        text(message),
        paths::COURSE_LIST
    );
    layout(&heading, &Chrome::anonymous(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Price;
    use crate::web::session::Level;

    fn course(title: &str) -> Course {
        Course {
            id: 1,
            title: title.to_string(),
            slug: "rust-101".to_string(),
            description: "Learn <b>Rust</b>".to_string(),
            instructor_id: 1,
            price: Price::FREE,
            is_published: true,
            image: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_course_list_escapes_content() {
        let html = course_list(&Chrome::anonymous(), &[course("<script>x</script>")]);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("Learn &lt;b&gt;Rust&lt;/b&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"href="/rust-101/""#));
    }

    #[test]
    fn test_empty_course_list() {
        let html = course_list(&Chrome::anonymous(), &[]);
        assert!(html.contains("No courses are available yet."));
    }

    #[test]
    fn test_messages_rendered() {
        let messages = [FlashMessage {
            level: Level::Success,
            text: "You have enrolled in Rust".to_string(),
        }];
        let chrome = Chrome {
            user: None,
            messages: &messages,
        };
        let html = course_list(&chrome, &[]);
        assert!(html.contains(r#"<li class="message success">You have enrolled in Rust</li>"#));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");
        let long = "a".repeat(DESCRIPTION_EXCERPT_CHARS + 10);
        let cut = excerpt(&long);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), DESCRIPTION_EXCERPT_CHARS + 1);
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(paragraphs("one\n\n\ntwo"), "<p>one</p>\n<p>two</p>\n");
        assert_eq!(paragraphs(""), "");
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::NOT_FOUND, "Missing");
        assert!(html.contains("<h1>404 Not Found</h1>"));
    }
}
