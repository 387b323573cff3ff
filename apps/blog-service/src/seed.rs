//! # サンプル投稿の投入
//!
//! `BLOG_SEED_SAMPLE_POST=true` のとき起動時に 1 件だけ投入する。
//! 既に同じスラッグの投稿があれば上書きしない。

use edgeblog_domain::{blog_post::PostDraft, clock::Clock};
use edgeblog_infra::{InfraError, repository::BlogPostRepository};

const SAMPLE_SLUG: &str = "welcome-to-our-blog";

fn sample_draft() -> PostDraft {
    PostDraft {
        slug:             Some(SAMPLE_SLUG.to_string()),
        title:            Some("Welcome to Our Blog".to_string()),
        content:          Some(
            "<h1>Welcome!</h1><p>This is a test blog post to ensure everything is working \
             correctly.</p>"
                .to_string(),
        ),
        meta_description: Some("This is our first blog post to test the system.".to_string()),
        meta_keywords:    Some(vec![
            "welcome".to_string(),
            "blog".to_string(),
            "test".to_string(),
        ]),
        cover_image_url:  Some("https://via.placeholder.com/600x300".to_string()),
        author:           Some("Admin".to_string()),
        date_published:   None,
    }
}

/// サンプル投稿を投入する
///
/// # 戻り値
///
/// 投入した場合は `true`、既に存在した場合は `false`
pub async fn seed_sample_post(
    repository: &dyn BlogPostRepository,
    clock: &dyn Clock,
) -> Result<bool, InfraError> {
    let post = sample_draft()
        .into_new_post(clock.now())
        .map_err(|e| InfraError::unexpected(e.to_string()))?;

    let inserted = repository.insert_if_absent(&post).await?;
    if inserted {
        tracing::info!(slug = SAMPLE_SLUG, "サンプル投稿を投入しました");
    } else {
        tracing::debug!(slug = SAMPLE_SLUG, "サンプル投稿は既に存在します");
    }
    Ok(inserted)
}
