//! # Auth Service サーバー
//!
//! メールアドレスをキーにしたユーザーレコードで、サインアップとログインを提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `AUTH_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `AUTH_PORT` | **Yes** | ポート番号 |
//! | `AUTH_STORE_URL` | **Yes** | KV ストア接続 URL（`redis://...` または `memory://`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! AUTH_PORT=13001 AUTH_STORE_URL=memory:// cargo run -p edgeblog-auth-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use edgeblog_auth_service::{
    app_builder::build_app,
    config::AuthConfig,
    handler::AuthState,
    usecase::AuthUseCaseImpl,
};
use edgeblog_infra::{
    kv::open_store,
    repository::{KvUserRepository, UserRepository},
};
use edgeblog_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Auth Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("auth-service"));
    let _tracing_guard = tracing::info_span!("app", service = "auth-service").entered();

    let config = AuthConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Auth Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let store = open_store(&config.store_url)
        .await
        .context("KV ストアへの接続に失敗しました")?;

    let user_repository: Arc<dyn UserRepository> = Arc::new(KvUserRepository::new(store));
    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(AuthUseCaseImpl::new(user_repository)),
    });

    let app = build_app(auth_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Auth Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
