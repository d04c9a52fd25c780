//! 演示：删除书籍后，引用它的文章自动清理该引用；删除文章后，系列随之更新。
//!
//! 运行前可在 `.env` 或环境变量中设置 `RUST_LOG` 与 `CMS_DISPATCH_POLICY`。
//!
use anyhow::Context;
use cms_application::context::AppContext;
use cms_application::use_cases::{
    CreateArticle, CreateBook, CreateSeries, DeleteArticle, DeleteBook, GetArticle, GetSeries,
    ListArticlesByBook,
};
use cms_application::{Application, CmsConfig, Repositories};
use cms_domain::article::ArticleId;
use cms_domain::book::BookId;
use cms_domain::domain_event::BusinessContext;
use cms_domain::series::SeriesId;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = CmsConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let app = Application::bootstrap(&config, Repositories::in_memory())?;
    let ctx = AppContext {
        biz: BusinessContext::builder()
            .correlation_id("demo-1".to_string())
            .actor_type("user".to_string())
            .actor_id("editor".to_string())
            .build(),
        idempotency_key: None,
    };

    for (id, title, author) in [
        ("rust-book", "The Rust Programming Language", "Klabnik, Nichols"),
        ("async-book", "Asynchronous Programming in Rust", "Rust Async WG"),
    ] {
        app.execute(
            &ctx,
            CreateBook {
                book_id: BookId::new(id),
                title: title.into(),
                author: author.into(),
            },
        )
        .await?;
    }

    app.execute(
        &ctx,
        CreateArticle {
            article_id: ArticleId::new("ownership"),
            title: "Ownership, explained".into(),
            content: "Borrowing rules in practice.".into(),
            book_ids: vec![BookId::new("rust-book"), BookId::new("async-book")],
        },
    )
    .await?;
    app.execute(
        &ctx,
        CreateArticle {
            article_id: ArticleId::new("pinning"),
            title: "Why Pin exists".into(),
            content: "Self-referential futures.".into(),
            book_ids: vec![BookId::new("async-book")],
        },
    )
    .await?;
    app.execute(
        &ctx,
        CreateSeries {
            series_id: SeriesId::new("foundations"),
            title: "Foundations".into(),
            article_ids: vec![ArticleId::new("ownership"), ArticleId::new("pinning")],
        },
    )
    .await?;

    let before = app
        .query(&ctx, ListArticlesByBook { book_id: BookId::new("async-book") })
        .await?;
    info!(count = before.len(), "articles referencing async-book before deletion");

    app.execute(&ctx, DeleteBook { book_id: BookId::new("async-book") })
        .await?;

    let ownership = app
        .query(&ctx, GetArticle { article_id: ArticleId::new("ownership") })
        .await?;
    println!("{}", serde_json::to_string_pretty(&ownership)?);

    app.execute(&ctx, DeleteArticle { article_id: ArticleId::new("pinning") })
        .await?;

    let series = app
        .query(&ctx, GetSeries { series_id: SeriesId::new("foundations") })
        .await?;
    println!("{}", serde_json::to_string_pretty(&series)?);

    Ok(())
}
