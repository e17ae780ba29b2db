pub mod broadcast_repo;
pub use broadcast_repo::BroadcastRepository;
pub mod chat_repo;
pub use chat_repo::ChatRepository;
pub mod directory_repo;
pub use directory_repo::DirectoryRepository;
pub mod events_repo;
pub use events_repo::EventsRepository;
pub mod feed_repo;
pub use feed_repo::FeedRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenantRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
