pub mod auth_service;
pub use auth_service::{AuthError, AuthService, AuthenticatedUser};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod video_service;
pub use video_service::{VideoError, VideoService, VideoSummary};

pub mod video_service_impl;
pub use video_service_impl::SeaOrmVideoService;

pub mod social_service;
pub use social_service::{SocialError, SocialService};

pub mod social_service_impl;
pub use social_service_impl::SeaOrmSocialService;

pub mod reaction_service;
pub use reaction_service::{ReactionError, ReactionService};

pub mod reaction_service_impl;
pub use reaction_service_impl::SeaOrmReactionService;

pub mod storage;
pub use storage::MediaStorage;
