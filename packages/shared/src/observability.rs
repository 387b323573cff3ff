//! # ログとリクエストスパン
//!
//! 両サービス共通のトレーシング初期化と、HTTP リクエスト単位のスパン・Request ID。
//!
//! | 環境変数 | 値 | デフォルト |
//! |---------|-----|-----------|
//! | `LOG_FORMAT` | `json` / `pretty`（大文字小文字を区別しない） | `pretty` |
//! | `RUST_LOG` | `EnvFilter` 形式 | [`DEFAULT_FILTER`] |
//!
//! JSON 出力ではイベントのフィールドをトップレベルに展開し、
//! 現在のスパン（`request` なら `method` / `uri` / `request_id`）を `span` に含める。

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,edgeblog=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 JSON（本番）
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値から決定する
    ///
    /// 未知の値は `Pretty` にする。subscriber の初期化前に呼ぶため、警告は stderr に直接出す。
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else if value.eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            eprintln!("WARNING: unknown LOG_FORMAT={value:?}, using pretty");
            Self::Pretty
        }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// `auth-service` / `blog-service`
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// グローバル subscriber を設定する
///
/// プロセスで 1 回だけ呼ぶ。サービス名は呼び出し側が入る `app` スパンの
/// `service` フィールドとして各行に出力される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let output = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .init();

    tracing::debug!(
        service = %config.service_name,
        format = ?config.log_format,
        "ログ出力を初期化しました"
    );
}

/// リクエストに付与された Request ID の文字列表現
///
/// `SetRequestIdLayer` より内側でのみ値がある。
#[cfg(feature = "observability")]
pub fn request_id_of<B>(request: &http::Request<B>) -> Option<&str> {
    request
        .extensions()
        .get::<tower_http::request_id::RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = request_id_of(request).unwrap_or("-"),
    )
}

/// UUID v7 の Request ID
///
/// 時刻順に並ぶため、ログを ID で並べ替えるとおおよそ到着順になる。
/// クライアントが `X-Request-Id` を付けてきた場合はそちらが使われる。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}
