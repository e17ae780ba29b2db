pub mod auth;
pub use auth::AuthService;
pub mod broadcast_service;
pub use broadcast_service::BroadcastService;
pub mod events_service;
pub use events_service::EventsService;
pub mod feed_service;
pub use feed_service::FeedService;
pub mod mailer;
pub use mailer::Mailer;
pub mod tenancy_service;
pub use tenancy_service::TenancyService;
