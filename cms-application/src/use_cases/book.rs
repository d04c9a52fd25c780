use super::publish_pending;
use crate::{command::Command, command_handler::CommandHandler, context::AppContext, error::AppError};
use async_trait::async_trait;
use cms_domain::book::{Book, BookId, BookRepository};
use cms_domain::eventing::EventBus;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CreateBook {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
}

impl Command for CreateBook {
    const NAME: &'static str = "book.create";
}

pub struct CreateBookHandler {
    books: Arc<dyn BookRepository>,
    bus: Arc<dyn EventBus>,
}

impl CreateBookHandler {
    pub fn new(books: Arc<dyn BookRepository>, bus: Arc<dyn EventBus>) -> Self {
        Self { books, bus }
    }
}

#[async_trait]
impl CommandHandler<CreateBook> for CreateBookHandler {
    async fn handle(&self, ctx: &AppContext, cmd: CreateBook) -> Result<(), AppError> {
        if self.books.exists(&cmd.book_id).await? {
            return Err(AppError::Validation(format!("book {} already exists", cmd.book_id)));
        }

        let mut book = Book::create(cmd.book_id, cmd.title, cmd.author, ctx.biz.clone())?;
        self.books.save(&book).await?;
        publish_pending(self.bus.as_ref(), &mut book).await
    }
}

/// 删除书籍。书籍删除在发布前已经提交；订阅者失败会作为本命令的错误返回。
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: BookId,
}

impl Command for DeleteBook {
    const NAME: &'static str = "book.delete";
}

pub struct DeleteBookHandler {
    books: Arc<dyn BookRepository>,
    bus: Arc<dyn EventBus>,
}

impl DeleteBookHandler {
    pub fn new(books: Arc<dyn BookRepository>, bus: Arc<dyn EventBus>) -> Self {
        Self { books, bus }
    }
}

#[async_trait]
impl CommandHandler<DeleteBook> for DeleteBookHandler {
    async fn handle(&self, ctx: &AppContext, cmd: DeleteBook) -> Result<(), AppError> {
        let Some(mut book) = self.books.find_by_id(&cmd.book_id).await? else {
            return Err(AppError::AggregateNotFound(format!("book {}", cmd.book_id)));
        };

        book.delete(ctx.biz.clone());
        self.books.delete(&cmd.book_id).await?;
        info!(book_id = %cmd.book_id, "book deleted");

        publish_pending(self.bus.as_ref(), &mut book).await
    }
}
