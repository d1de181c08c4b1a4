/// Video file extensions accepted for upload (compared lowercased).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];

/// Image file extensions accepted for profile pictures (compared lowercased).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Title recorded for uploads submitted with a blank title field.
pub const UNTITLED: &str = "Untitled";

/// Session key under which the authenticated user id is stored.
pub const SESSION_USER_KEY: &str = "user_id";
