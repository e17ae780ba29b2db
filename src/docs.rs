// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Tenancy ---
        handlers::tenancy::create_tenant,
        handlers::tenancy::get_current_tenant,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Feed ---
        handlers::feed::create_post,
        handlers::feed::list_posts,
        handlers::feed::toggle_like,
        handlers::feed::create_comment,
        handlers::feed::list_comments,

        // --- Events ---
        handlers::events::create_event,
        handlers::events::list_events,
        handlers::events::rsvp,
        handlers::events::list_rsvps,

        // --- Broadcasts ---
        handlers::broadcast::create_broadcast,
        handlers::broadcast::list_broadcasts,
        handlers::broadcast::send_broadcast,
    ),
    components(
        schemas(
            // --- Tenancy ---
            models::tenancy::TenantId,
            models::tenancy::Tenant,
            handlers::tenancy::CreateTenantPayload,

            // --- Settings ---
            models::settings::TenantSettings,
            models::settings::UpdateSettingsRequest,

            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Feed ---
            models::feed::Post,
            models::feed::PostWithCounts,
            models::feed::PostComment,
            models::feed::LikeResult,
            handlers::feed::CreatePostPayload,
            handlers::feed::CreateCommentPayload,

            // --- Events ---
            models::events::RsvpStatus,
            models::events::Event,
            models::events::EventRsvp,
            handlers::events::CreateEventPayload,
            handlers::events::RsvpPayload,

            // --- Broadcasts ---
            models::broadcast::BroadcastStatus,
            models::broadcast::Broadcast,
            handlers::broadcast::CreateBroadcastPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Tenancy", description = "Gestão de Comunidades"),
        (name = "Settings", description = "Feature Config da Comunidade"),
        (name = "Feed", description = "Mural de Publicações"),
        (name = "Events", description = "Eventos e RSVPs"),
        (name = "Broadcasts", description = "Comunicados por E-mail")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
