pub mod error;
pub use error::StorageError;

pub mod identity;
pub use identity::{IdentityError, IdentityGateway, IdentityProvider, StoreIdentityProvider};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthSession};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalogue_service;
pub mod catalogue_service_impl;
pub use catalogue_service::{CatalogueError, CatalogueService, ImportSummary};
pub use catalogue_service_impl::SeaOrmCatalogueService;

pub mod engagement_service;
pub mod engagement_service_impl;
pub use engagement_service::{EngagementError, EngagementService, ProfileUpdate};
pub use engagement_service_impl::SeaOrmEngagementService;

pub mod rating_service;
pub mod rating_service_impl;
pub use rating_service::{RatingError, RatingService};
pub use rating_service_impl::SeaOrmRatingService;

pub mod shelf_service;
pub mod shelf_service_impl;
pub use shelf_service::{ShelfError, ShelfService};
pub use shelf_service_impl::SeaOrmShelfService;

pub mod recommendation_service;
pub mod recommendation_service_impl;
pub use recommendation_service::{RecommendationError, RecommendationService};
pub use recommendation_service_impl::SeaOrmRecommendationService;

pub mod comment_service;
pub mod comment_service_impl;
pub use comment_service::{CommentError, CommentService};
pub use comment_service_impl::SeaOrmCommentService;

pub mod media;
pub use media::{MediaError, MediaPayload, MediaRelay};
