pub mod db;
pub mod address;
