pub use super::categories::Entity as Categories;
pub use super::course_modules::Entity as CourseModules;
pub use super::courses::Entity as Courses;
pub use super::lessons::Entity as Lessons;
pub use super::post_tags::Entity as PostTags;
pub use super::posts::Entity as Posts;
pub use super::tags::Entity as Tags;
pub use super::user_course_access::Entity as UserCourseAccess;
pub use super::user_lesson_progress::Entity as UserLessonProgress;
pub use super::users::Entity as Users;
