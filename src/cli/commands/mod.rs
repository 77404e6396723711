mod admin;
mod courses;
mod demo;
mod posts;
mod users;

pub use admin::cmd_admin;
pub use courses::{cmd_list_courses, cmd_publish_course};
pub use demo::cmd_demo;
pub use posts::cmd_list_posts;
pub use users::{cmd_create_user, cmd_set_bio};
