pub mod prelude;

pub mod categories;
pub mod course_modules;
pub mod courses;
pub mod lessons;
pub mod post_tags;
pub mod posts;
pub mod tags;
pub mod user_course_access;
pub mod user_lesson_progress;
pub mod users;
