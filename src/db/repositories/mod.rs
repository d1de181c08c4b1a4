pub mod follow;
pub mod reaction;
pub mod user;
pub mod video;
