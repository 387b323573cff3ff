//! # Router 組み立て
//!
//! 初期化済みの依存を受け取り、State → Router → レイヤーの順に組み立てる。
//! `main` と統合テストの両方から使う。
//!
//! ## ルーティング
//!
//! | パス | 処理 |
//! |------|------|
//! | `/api/blog` | 一覧・作成 |
//! | `/api/blog/`, `/api/blog/{*rest}` | 個別投稿（スラッグは 4 番目のパス要素） |
//! | `/sitemap.xml` | サイトマップ |
//! | `/health` | ヘルスチェック |
//! | その他 | 404 |

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use edgeblog_shared::{
    canonical_log::CanonicalLogLineLayer,
    cors::OriginAllowList,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    error::panic_response,
    handler::{
        BlogState,
        create_post,
        delete_post,
        get_post,
        health_check,
        list_method_not_allowed,
        list_posts,
        not_found,
        post_method_not_allowed,
        put_post,
        sitemap,
    },
    middleware::{CorsState, handle_cors},
};

/// Blog Service の Router を構築する
pub fn build_app(blog_state: Arc<BlogState>, allowed_origins: OriginAllowList) -> Router {
    let cors_state = Arc::new(CorsState::new(allowed_origins));

    let single_post = get(get_post)
        .put(put_post)
        .delete(delete_post)
        .fallback(post_method_not_allowed);

    Router::new()
        .route(
            "/api/blog",
            get(list_posts)
                .post(create_post)
                .fallback(list_method_not_allowed),
        )
        .route("/api/blog/", single_post.clone())
        .route("/api/blog/{*rest}", single_post)
        .route("/sitemap.xml", get(sitemap))
        .route("/health", get(health_check))
        .fallback(not_found)
        .with_state(blog_state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(cors_state, handle_cors))
        // レイヤー順序: 下に書いたものが外側
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
