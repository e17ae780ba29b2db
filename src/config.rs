// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        BroadcastRepository, ChatRepository, DirectoryRepository, EventsRepository,
        FeedRepository, SettingsRepository, TenantRepository, UserRepository,
    },
    services::{
        AuthService, BroadcastService, EventsService, FeedService, Mailer, TenancyService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    // Tenant desconhecido: 404 explícito (true) ou degrada para vazio (false).
    // O modo leniente existe para compatibilidade com o comportamento antigo.
    pub tenant_strict: bool,

    pub i18n_store: I18nStore,

    // Repositórios acessados direto pelos handlers mais simples
    pub tenant_repo: TenantRepository,
    pub directory_repo: DirectoryRepository,
    pub chat_repo: ChatRepository,

    // Serviços (lógica de negócio)
    pub auth_service: AuthService,
    pub tenancy_service: TenancyService,
    pub feed_service: FeedService,
    pub events_service: EventsService,
    pub broadcast_service: BroadcastService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let tenant_strict = env::var("TENANT_STRICT")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let mailer = Mailer::from_env();
        if mailer.is_none() {
            tracing::warn!("✉️  EMAIL_API_KEY ausente: envio de broadcasts desabilitado");
        }

        // --- Monta o gráfico de dependências ---
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let directory_repo = DirectoryRepository::new(db_pool.clone());
        let feed_repo = FeedRepository::new(db_pool.clone());
        let events_repo = EventsRepository::new(db_pool.clone());
        let chat_repo = ChatRepository::new(db_pool.clone());
        let broadcast_repo = BroadcastRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let tenancy_service = TenancyService::new(
            tenant_repo.clone(),
            settings_repo,
            db_pool.clone(),
        );
        let feed_service = FeedService::new(feed_repo, db_pool.clone());
        let events_service = EventsService::new(events_repo, db_pool.clone());
        let broadcast_service = BroadcastService::new(
            broadcast_repo,
            directory_repo.clone(),
            mailer,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            tenant_strict,
            i18n_store: I18nStore::new(),
            tenant_repo,
            directory_repo,
            chat_repo,
            auth_service,
            tenancy_service,
            feed_service,
            events_service,
            broadcast_service,
        })
    }
}
