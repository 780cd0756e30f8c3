//! `SeaORM` implementation of the `BookService` trait.

use async_trait::async_trait;

use crate::api::types::BookDto;
use crate::db::{BookFields, Store};
use crate::services::book_service::{
    BookError, BookService, CreateBookRequest, UpdateBookRequest, check_stock,
};

pub struct SeaOrmBookService {
    store: Store,
}

impl SeaOrmBookService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookService for SeaOrmBookService {
    async fn list(&self, search: Option<&str>) -> Result<Vec<BookDto>, BookError> {
        let books = self.store.list_books(search).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get(&self, isbn: &str) -> Result<BookDto, BookError> {
        self.store
            .get_book(isbn)
            .await?
            .map(BookDto::from)
            .ok_or_else(|| BookError::NotFound(isbn.to_string()))
    }

    async fn create(&self, request: CreateBookRequest) -> Result<BookDto, BookError> {
        let isbn = request.isbn.trim().to_string();
        let available = request.available_stock.unwrap_or(request.total_stock);
        check_stock(request.total_stock, available)?;

        if self.store.get_book(&isbn).await?.is_some() {
            return Err(BookError::Conflict(isbn));
        }

        let book = self
            .store
            .create_book(
                isbn,
                BookFields {
                    title: request.title.trim().to_string(),
                    author: request.author.trim().to_string(),
                    publisher: request.publisher.trim().to_string(),
                    year: request.year,
                    category: request.category,
                    total_stock: request.total_stock,
                    available_stock: available,
                },
            )
            .await?;

        Ok(book.into())
    }

    async fn update(&self, isbn: &str, request: UpdateBookRequest) -> Result<BookDto, BookError> {
        let current = self
            .store
            .get_book(isbn)
            .await?
            .ok_or_else(|| BookError::NotFound(isbn.to_string()))?;

        let available = request.available_stock.unwrap_or(current.available_stock);
        check_stock(request.total_stock, available)?;

        let book = self
            .store
            .update_book(
                isbn,
                BookFields {
                    title: request.title.trim().to_string(),
                    author: request.author.trim().to_string(),
                    publisher: request
                        .publisher
                        .map_or(current.publisher, |publisher| publisher.trim().to_string()),
                    year: request.year,
                    category: request.category.unwrap_or(current.category),
                    total_stock: request.total_stock,
                    available_stock: available,
                },
            )
            .await?
            .ok_or_else(|| BookError::NotFound(isbn.to_string()))?;

        Ok(book.into())
    }

    async fn delete(&self, isbn: &str) -> Result<(), BookError> {
        if self.store.delete_book(isbn).await? {
            Ok(())
        } else {
            Err(BookError::NotFound(isbn.to_string()))
        }
    }
}
