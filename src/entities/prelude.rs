pub use super::follows::Entity as Follows;
pub use super::reactions::Entity as Reactions;
pub use super::users::Entity as Users;
pub use super::videos::Entity as Videos;
