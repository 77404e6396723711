pub mod blog;
pub mod course;
pub mod enrollment;
pub mod progress;
pub mod user;
