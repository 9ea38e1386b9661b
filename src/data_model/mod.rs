pub mod mentor;
pub mod student;
