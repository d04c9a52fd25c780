use super::save_versioned;
use async_trait::async_trait;
use cms_domain::book::{Book, BookId, BookRepository};
use cms_domain::error::{DomainError, DomainResult};
use dashmap::DashMap;

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: DashMap<BookId, Book>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_by_id(&self, id: &BookId) -> DomainResult<Option<Book>> {
        Ok(self.books.get(id).map(|b| b.value().clone()))
    }

    async fn exists(&self, id: &BookId) -> DomainResult<bool> {
        Ok(self.books.contains_key(id))
    }

    async fn save(&self, book: &Book) -> DomainResult<()> {
        save_versioned(&self.books, book)
    }

    async fn delete(&self, id: &BookId) -> DomainResult<()> {
        match self.books.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(format!("book {id}"))),
        }
    }
}
