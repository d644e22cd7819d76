pub mod json_file;
pub mod seaorm;
