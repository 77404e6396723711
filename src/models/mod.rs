pub mod blog;
pub mod course;
