use super::save_versioned;
use async_trait::async_trait;
use cms_domain::article::{Article, ArticleId, ArticleRepository};
use cms_domain::book::BookId;
use cms_domain::entity::Entity;
use cms_domain::error::{DomainError, DomainResult};
use dashmap::DashMap;

#[derive(Default)]
pub struct InMemoryArticleRepository {
    articles: DashMap<ArticleId, Article>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.articles.get(id).map(|a| a.value().clone()))
    }

    async fn find_articles_referencing_book(
        &self,
        book_id: &BookId,
    ) -> DomainResult<Vec<Article>> {
        let mut found: Vec<Article> = self
            .articles
            .iter()
            .filter(|a| a.value().references_book(book_id))
            .map(|a| a.value().clone())
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(found)
    }

    async fn save(&self, article: &Article) -> DomainResult<()> {
        save_versioned(&self.articles, article)
    }

    async fn delete(&self, id: &ArticleId) -> DomainResult<()> {
        match self.articles.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(format!("article {id}"))),
        }
    }
}
