pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, NewUser};
pub use auth_service_impl::SeaOrmAuthService;

pub mod blog_service;
pub mod blog_service_impl;
pub use blog_service::{BlogError, BlogService, PostSummary};
pub use blog_service_impl::SeaOrmBlogService;

pub mod course_service;
pub mod course_service_impl;
pub use course_service::{
    CourseDetail, CourseError, CourseService, EnrollOutcome, Enrollment, LessonPage,
    ToggleOutcome, ToggleResult,
};
pub use course_service_impl::SeaOrmCourseService;
