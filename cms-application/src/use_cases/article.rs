use super::{detach_deleted_books, ensure_books_exist, publish_pending};
use crate::{command::Command, command_handler::CommandHandler, context::AppContext, error::AppError};
use async_trait::async_trait;
use cms_domain::article::{Article, ArticleId, ArticleRepository};
use cms_domain::book::{BookId, BookRepository};
use cms_domain::entity::Entity;
use cms_domain::eventing::EventBus;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub article_id: ArticleId,
    pub title: String,
    pub content: String,
    pub book_ids: Vec<BookId>,
}

impl Command for CreateArticle {
    const NAME: &'static str = "article.create";
}

pub struct CreateArticleHandler {
    articles: Arc<dyn ArticleRepository>,
    books: Arc<dyn BookRepository>,
    bus: Arc<dyn EventBus>,
}

impl CreateArticleHandler {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        books: Arc<dyn BookRepository>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            articles,
            books,
            bus,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateArticle> for CreateArticleHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateArticle) -> Result<(), AppError> {
        if self.articles.find_by_id(&cmd.article_id).await?.is_some() {
            return Err(AppError::Validation(format!(
                "article {} already exists",
                cmd.article_id
            )));
        }
        ensure_books_exist(self.books.as_ref(), &cmd.book_ids).await?;

        let mut article = Article::create(
            cmd.article_id,
            cmd.title,
            cmd.content,
            cmd.book_ids,
            ctx.biz.clone(),
        )?;
        self.articles.save(&article).await?;
        detach_deleted_books(self.books.as_ref(), self.articles.as_ref(), article.id()).await?;
        publish_pending(self.bus.as_ref(), &mut article).await
    }
}

/// 用户修订文章：整体替换标题、正文与引用的书籍
#[derive(Debug, Clone)]
pub struct UpdateArticle {
    pub article_id: ArticleId,
    pub title: String,
    pub content: String,
    pub book_ids: Vec<BookId>,
}

impl Command for UpdateArticle {
    const NAME: &'static str = "article.update";
}

pub struct UpdateArticleHandler {
    articles: Arc<dyn ArticleRepository>,
    books: Arc<dyn BookRepository>,
    bus: Arc<dyn EventBus>,
}

impl UpdateArticleHandler {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        books: Arc<dyn BookRepository>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            articles,
            books,
            bus,
        }
    }
}

#[async_trait]
impl CommandHandler<UpdateArticle> for UpdateArticleHandler {
    async fn handle(&self, ctx: &AppContext, cmd: UpdateArticle) -> Result<(), AppError> {
        let Some(mut article) = self.articles.find_by_id(&cmd.article_id).await? else {
            return Err(AppError::AggregateNotFound(format!(
                "article {}",
                cmd.article_id
            )));
        };
        ensure_books_exist(self.books.as_ref(), &cmd.book_ids).await?;

        article.revise(cmd.title, cmd.content, cmd.book_ids, ctx.biz.clone())?;
        self.articles.save(&article).await?;
        detach_deleted_books(self.books.as_ref(), self.articles.as_ref(), article.id()).await?;
        publish_pending(self.bus.as_ref(), &mut article).await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteArticle {
    pub article_id: ArticleId,
}

impl Command for DeleteArticle {
    const NAME: &'static str = "article.delete";
}

pub struct DeleteArticleHandler {
    articles: Arc<dyn ArticleRepository>,
    bus: Arc<dyn EventBus>,
}

impl DeleteArticleHandler {
    pub fn new(articles: Arc<dyn ArticleRepository>, bus: Arc<dyn EventBus>) -> Self {
        Self { articles, bus }
    }
}

#[async_trait]
impl CommandHandler<DeleteArticle> for DeleteArticleHandler {
    async fn handle(&self, ctx: &AppContext, cmd: DeleteArticle) -> Result<(), AppError> {
        let Some(mut article) = self.articles.find_by_id(&cmd.article_id).await? else {
            return Err(AppError::AggregateNotFound(format!(
                "article {}",
                cmd.article_id
            )));
        };

        article.delete(ctx.biz.clone());
        self.articles.delete(&cmd.article_id).await?;
        publish_pending(self.bus.as_ref(), &mut article).await
    }
}
