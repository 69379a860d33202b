pub mod entries;
pub mod food;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod profile;
pub mod status;
pub mod target;
pub mod water;
