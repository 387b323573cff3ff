//! # リクエストサマリログ
//!
//! 1 リクエストにつき 1 行、メソッド・パス・ステータス・所要時間をまとめて出力する tower Layer。
//! 集計やアラートはこの行（`log.type = "canonical"`）だけを見ればよいようにする。
//!
//! `TraceLayer` の内側に置くと、リクエストスパンの `request_id` が同じ行に付く。
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → CanonicalLogLineLayer → Router
//! ```
//!
//! | 結果 | レベル | `http.outcome` |
//! |------|-------|----------------|
//! | 2xx / 3xx | INFO | `success` |
//! | 4xx | INFO | `client_error` |
//! | 5xx | WARN | `server_error` |
//! | Service のエラー | ERROR | - |
//!
//! `/health` は監視から高頻度で呼ばれるため出力しない。

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Method, Request, Response, StatusCode};
use tower::{Layer, Service};

const HEALTH_PATH: &str = "/health";

/// ステータスコードの分類
fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "server_error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

/// 完了時に出力するリクエストの要点
struct RequestSummary {
    method:  Method,
    path:    String,
    started: Instant,
}

impl RequestSummary {
    fn start<B>(request: &Request<B>) -> Self {
        Self {
            method:  request.method().clone(),
            path:    request.uri().path().to_owned(),
            started: Instant::now(),
        }
    }

    fn latency_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn completed(&self, status: StatusCode) {
        let latency_ms = self.latency_ms();
        if status.is_server_error() {
            tracing::warn!(
                log.r#type = "canonical",
                http.method = %self.method,
                http.path = %self.path,
                http.status_code = status.as_u16(),
                http.outcome = outcome(status),
                http.latency_ms = latency_ms,
                "リクエスト完了"
            );
        } else {
            tracing::info!(
                log.r#type = "canonical",
                http.method = %self.method,
                http.path = %self.path,
                http.status_code = status.as_u16(),
                http.outcome = outcome(status),
                http.latency_ms = latency_ms,
                "リクエスト完了"
            );
        }
    }

    fn failed(&self, error: &dyn std::fmt::Display) {
        tracing::error!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.latency_ms = self.latency_ms(),
            error.message = %error,
            "リクエスト処理エラー"
        );
    }
}

/// リクエストサマリログを出力する Layer
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みのインスタンスで呼び出す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if request.uri().path() == HEALTH_PATH {
            return Box::pin(inner.call(request));
        }

        let summary = RequestSummary::start(&request);
        Box::pin(async move {
            let result = inner.call(request).await;
            match &result {
                Ok(response) => summary.completed(response.status()),
                Err(error) => summary.failed(error),
            }
            result
        })
    }
}
