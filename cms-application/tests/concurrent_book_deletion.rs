//! 书籍在文章写入过程中被删除：文章最终不应留下悬空引用。
use async_trait::async_trait;
use cms_application::context::AppContext;
use cms_application::persistence::InMemoryBookRepository;
use cms_application::use_cases::{CreateArticle, CreateBook, DeleteBook, GetArticle, UpdateArticle};
use cms_application::{Application, CmsConfig, Repositories};
use cms_domain::article::ArticleId;
use cms_domain::book::{Book, BookId, BookRepository};
use cms_domain::error::DomainResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// 启用后，下一次 `exists` 在得出结果之后、返回之前停住，直到被放行
#[derive(Default)]
struct GatedBooks {
    inner: InMemoryBookRepository,
    armed: AtomicBool,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl BookRepository for GatedBooks {
    async fn find_by_id(&self, id: &BookId) -> DomainResult<Option<Book>> {
        self.inner.find_by_id(id).await
    }

    async fn exists(&self, id: &BookId) -> DomainResult<bool> {
        let found = self.inner.exists(id).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(found)
    }

    async fn save(&self, book: &Book) -> DomainResult<()> {
        self.inner.save(book).await
    }

    async fn delete(&self, id: &BookId) -> DomainResult<()> {
        self.inner.delete(id).await
    }
}

fn setup() -> (Arc<Application>, Arc<GatedBooks>) {
    let books = Arc::new(GatedBooks::default());
    let repositories = Repositories {
        books: books.clone(),
        ..Repositories::in_memory()
    };
    let app = Application::bootstrap(&CmsConfig::default(), repositories).unwrap();
    (Arc::new(app), books)
}

async fn create_book(app: &Application, id: &str) {
    app.execute(
        &AppContext::default(),
        CreateBook {
            book_id: BookId::new(id),
            title: format!("Book {id}"),
            author: "Someone".into(),
        },
    )
    .await
    .unwrap();
}

async fn delete_book(app: &Application, id: &str) {
    app.execute(&AppContext::default(), DeleteBook { book_id: BookId::new(id) })
        .await
        .unwrap();
}

async fn book_ids_of(app: &Application, id: &str) -> (Vec<String>, usize) {
    let article = app
        .query(&AppContext::default(), GetArticle { article_id: ArticleId::new(id) })
        .await
        .unwrap()
        .unwrap();
    (article.book_ids, article.version)
}

#[tokio::test]
async fn book_deleted_while_article_is_created_is_not_referenced() {
    let (app, books) = setup();
    create_book(&app, "b-1").await;
    create_book(&app, "b-2").await;

    books.armed.store(true, Ordering::SeqCst);
    let creating = tokio::spawn({
        let app = app.clone();
        async move {
            app.execute(
                &AppContext::default(),
                CreateArticle {
                    article_id: ArticleId::new("a-1"),
                    title: "Article".into(),
                    content: "...".into(),
                    book_ids: vec![BookId::new("b-1"), BookId::new("b-2")],
                },
            )
            .await
        }
    });

    // 存在性校验已通过，文章尚未保存
    books.entered.notified().await;
    delete_book(&app, "b-1").await;
    books.release.notify_one();

    creating.await.unwrap().unwrap();

    assert!(!books.exists(&BookId::new("b-1")).await.unwrap());
    let (book_ids, version) = book_ids_of(&app, "a-1").await;
    assert_eq!(book_ids, vec!["b-2"]);
    assert_eq!(version, 2);
}

#[tokio::test]
async fn book_deleted_while_article_is_updated_is_not_referenced() {
    let (app, books) = setup();
    create_book(&app, "b-1").await;
    app.execute(
        &AppContext::default(),
        CreateArticle {
            article_id: ArticleId::new("a-1"),
            title: "Article".into(),
            content: "...".into(),
            book_ids: vec![],
        },
    )
    .await
    .unwrap();

    books.armed.store(true, Ordering::SeqCst);
    let updating = tokio::spawn({
        let app = app.clone();
        async move {
            app.execute(
                &AppContext::default(),
                UpdateArticle {
                    article_id: ArticleId::new("a-1"),
                    title: "Article v2".into(),
                    content: "...".into(),
                    book_ids: vec![BookId::new("b-1")],
                },
            )
            .await
        }
    });

    books.entered.notified().await;
    delete_book(&app, "b-1").await;
    books.release.notify_one();

    updating.await.unwrap().unwrap();

    let (book_ids, version) = book_ids_of(&app, "a-1").await;
    assert!(book_ids.is_empty());
    assert_eq!(version, 3);
}

#[tokio::test]
async fn article_written_without_interference_keeps_its_version() {
    let (app, _books) = setup();
    create_book(&app, "b-1").await;
    app.execute(
        &AppContext::default(),
        CreateArticle {
            article_id: ArticleId::new("a-1"),
            title: "Article".into(),
            content: "...".into(),
            book_ids: vec![BookId::new("b-1")],
        },
    )
    .await
    .unwrap();

    let (book_ids, version) = book_ids_of(&app, "a-1").await;
    assert_eq!(book_ids, vec!["b-1"]);
    assert_eq!(version, 1);
}
