pub mod auth;
pub mod broadcast;
pub mod chat;
pub mod directory;
pub mod events;
pub mod feed;
pub mod settings;
pub mod tenancy;
