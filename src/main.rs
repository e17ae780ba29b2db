//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::{auth::auth_guard, tenancy::tenant_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas, mas escopadas por tenant)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    // Rotas de usuário (protegidas)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    // Criar comunidade é público (bootstrap); consultar a atual passa pelo guard
    let tenancy_routes = Router::new()
        .route("/", post(handlers::tenancy::create_tenant))
        .route(
            "/current",
            get(handlers::tenancy::get_current_tenant).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), tenant_guard),
            ),
        );

    let settings_routes = Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let directory_routes = Router::new()
        .route(
            "/members",
            post(handlers::directory::create_member).get(handlers::directory::list_members),
        )
        .route("/members/{id}", get(handlers::directory::get_member))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let feed_routes = Router::new()
        .route(
            "/posts",
            post(handlers::feed::create_post).get(handlers::feed::list_posts),
        )
        .route("/posts/{id}/like", post(handlers::feed::toggle_like))
        .route(
            "/posts/{id}/comments",
            post(handlers::feed::create_comment).get(handlers::feed::list_comments),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let events_routes = Router::new()
        .route(
            "/",
            post(handlers::events::create_event).get(handlers::events::list_events),
        )
        .route("/{id}/rsvp", put(handlers::events::rsvp))
        .route("/{id}/rsvps", get(handlers::events::list_rsvps))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let chat_routes = Router::new()
        .route(
            "/{channel}/messages",
            post(handlers::chat::post_message).get(handlers::chat::list_messages),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let broadcast_routes = Router::new()
        .route(
            "/",
            post(handlers::broadcast::create_broadcast).get(handlers::broadcast::list_broadcasts),
        )
        .route("/{id}/send", post(handlers::broadcast::send_broadcast))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/tenants", tenancy_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/directory", directory_routes)
        .nest("/api/feed", feed_routes)
        .nest("/api/events", events_routes)
        .nest("/api/chat", chat_routes)
        .nest("/api/broadcasts", broadcast_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
