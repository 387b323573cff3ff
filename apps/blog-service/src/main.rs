//! # Blog Service サーバー
//!
//! ブログ投稿の CRUD とサイトマップ生成を提供する。
//!
//! ## 環境変数
//!
//! 設定項目は [`config`](edgeblog_blog_service::config) を参照。
//! ログ形式は `LOG_FORMAT`（`json` / `pretty`）で切り替える。
//!
//! ## 起動方法
//!
//! ```bash
//! BLOG_PORT=13002 BLOG_API_KEY=dev-key BLOG_STORE_URL=memory:// \
//!   BLOG_SEED_SAMPLE_POST=true cargo run -p edgeblog-blog-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use edgeblog_blog_service::{
    api_key::ApiKey,
    app_builder::build_app,
    config::BlogConfig,
    handler::BlogState,
    seed::seed_sample_post,
    usecase::BlogUseCaseImpl,
};
use edgeblog_domain::clock::{Clock, SystemClock};
use edgeblog_infra::{
    kv::open_store,
    repository::{BlogPostRepository, KvBlogPostRepository},
};
use edgeblog_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Blog Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("blog-service"));
    let _tracing_guard = tracing::info_span!("app", service = "blog-service").entered();

    let config = BlogConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Blog Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let repository: Option<Arc<dyn BlogPostRepository>> = match &config.store_url {
        Some(url) => {
            let store = open_store(url)
                .await
                .context("KV ストアへの接続に失敗しました")?;
            Some(Arc::new(KvBlogPostRepository::new(store)))
        }
        None => {
            tracing::warn!("BLOG_STORE_URL が未設定のため、投稿 API は 500 を返します");
            None
        }
    };

    if config.seed_sample_post {
        match &repository {
            Some(repository) => {
                seed_sample_post(repository.as_ref(), clock.as_ref())
                    .await
                    .context("サンプル投稿の投入に失敗しました")?;
            }
            None => tracing::warn!("ストアが未設定のため、サンプル投稿を投入しません"),
        }
    }

    let usecase = BlogUseCaseImpl::new(repository, clock, config.site_base_url);
    let blog_state = Arc::new(BlogState {
        usecase: Arc::new(usecase),
        api_key: ApiKey::new(config.api_key),
    });

    let app = build_app(blog_state, config.allowed_origins);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Blog Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
