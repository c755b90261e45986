use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue, Select};

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{number, parse_item, parse_number_attribute, parse_string_attribute};

// All books share one partition so a query returns them in book_id order.
const BOOKS_PARTITION: &str = "books";
// The id counter lives in its own partition of the same table.
const SEQUENCE_PARTITION: &str = "books#seq";

// Optional filter applied while walking the partition
enum BookFilter {
    Contains(String),
    IsbnEquals(String),
}

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    scan_page_size: usize,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, scan_page_size: usize) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            scan_page_size: cmp::max(scan_page_size, 1),
        }
    }

    fn key(&self, partition: &str, book_id: i64) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("catalog".to_string(), AttributeValue::S(partition.to_string())),
            ("book_id".to_string(), number(book_id)),
        ])
    }

    async fn next_id(&self) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .update_item()
            .table_name(table_name)
            .set_key(Some(self.key(SEQUENCE_PARTITION, 0)))
            .update_expression("ADD next_id :one")
            .expression_attribute_values(":one", number(1))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await?;
        match out.attributes() {
            Some(attrs) if parse_number_attribute("next_id", attrs) > 0 => Ok(parse_number_attribute("next_id", attrs)),
            _ => Err(LibraryError::database("book id sequence did not return a value", None, false)),
        }
    }

    // Walks the books partition from `min_id` in id order, skipping `offset` matching rows and
    // stopping after `limit` rows when a limit is given.
    async fn collect(&self, min_id: i64, offset: usize, limit: Option<usize>,
                     filter: Option<BookFilter>) -> LibraryResult<Vec<BookEntity>> {
        if limit == Some(0) {
            return Ok(vec![]);
        }
        let table_name: &str = self.table_name.as_ref();
        let mut books = vec![];
        let mut skipped = 0;
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let mut request = self.client
                .query()
                .table_name(table_name)
                .consistent_read(true)
                .scan_index_forward(true)
                .key_condition_expression("catalog = :catalog AND book_id >= :min_id")
                .expression_attribute_values(":catalog", AttributeValue::S(BOOKS_PARTITION.to_string()))
                .expression_attribute_values(":min_id", number(min_id))
                .limit(query_limit(offset, skipped, limit, books.len(), filter.is_some(), self.scan_page_size))
                .set_exclusive_start_key(start_key.take());
            match &filter {
                Some(BookFilter::Contains(needle)) => {
                    request = request
                        .filter_expression("contains(title_key, :needle) OR contains(short_descr_key, :needle)")
                        .expression_attribute_values(":needle", AttributeValue::S(needle.to_lowercase()));
                }
                Some(BookFilter::IsbnEquals(isbn)) => {
                    request = request
                        .filter_expression("isbn_key = :isbn")
                        .expression_attribute_values(":isbn", AttributeValue::S(isbn.to_lowercase()));
                }
                None => {}
            }

            let out = request.send().await?;
            for item in out.items().unwrap_or_default() {
                if skipped < offset {
                    skipped += 1;
                    continue;
                }
                if limit.map(|l| books.len() >= l).unwrap_or(false) {
                    break;
                }
                books.push(map_to_book(item));
            }
            if limit.map(|l| books.len() >= l).unwrap_or(false) {
                break;
            }
            match out.last_evaluated_key() {
                Some(key) => start_key = Some(key.clone()),
                None => break,
            }
        }
        Ok(books)
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let book = entity.clone().with_id(self.next_id().await?);
        let mut item = parse_item(serde_json::to_value(&book)?)?;
        item.insert("catalog".to_string(), AttributeValue::S(BOOKS_PARTITION.to_string()));
        item.insert("isbn_key".to_string(), AttributeValue::S(book.isbn.to_lowercase()));
        item.insert("title_key".to_string(), AttributeValue::S(book.title.to_lowercase()));
        item.insert("short_descr_key".to_string(), AttributeValue::S(book.short_descr.to_lowercase()));
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(item))
            .send()
            .await.map(|_| book).map_err(LibraryError::from)
    }

    // only title, short description and published date are mutable
    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .set_key(Some(self.key(BOOKS_PARTITION, entity.book_id)))
            .update_expression("SET title = :title, title_key = :title_key, short_descr = :short_descr, short_descr_key = :short_descr_key, published_date = :published_date")
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":title_key", AttributeValue::S(entity.title.to_lowercase()))
            .expression_attribute_values(":short_descr", AttributeValue::S(entity.short_descr.to_string()))
            .expression_attribute_values(":short_descr_key", AttributeValue::S(entity.short_descr.to_lowercase()))
            .expression_attribute_values(":published_date", AttributeValue::S(entity.published_date.to_string()))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn find(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .set_key(Some(self.key(BOOKS_PARTITION, id)))
            .consistent_read(true)
            .send()
            .await?;
        Ok(out.item().map(map_to_book))
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn count(&self) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let mut total = 0;
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let out = self.client
                .query()
                .table_name(table_name)
                .select(Select::Count)
                .key_condition_expression("catalog = :catalog")
                .expression_attribute_values(":catalog", AttributeValue::S(BOOKS_PARTITION.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await?;
            total += out.count() as i64;
            match out.last_evaluated_key() {
                Some(key) => start_key = Some(key.clone()),
                None => break,
            }
        }
        Ok(total)
    }

    async fn take_first(&self, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        self.collect(0, 0, Some(limit), None).await
    }

    async fn range_from_id(&self, min_id: i64, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        self.collect(min_id, 0, Some(limit), None).await
    }

    async fn skip_take(&self, offset: usize, limit: usize) -> LibraryResult<Vec<BookEntity>> {
        self.collect(0, offset, Some(limit), None).await
    }

    async fn substring_match(&self, text: &str) -> LibraryResult<Vec<BookEntity>> {
        self.collect(0, 0, None, Some(BookFilter::Contains(text.to_string()))).await
    }

    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let mut found = self.collect(0, 0, Some(1), Some(BookFilter::IsbnEquals(isbn.to_string()))).await?;
        Ok(found.pop())
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        self.collect(0, 0, None, None).await
    }
}

// Rows to ask for in one query page, capped by the scan page size. Query limits apply
// before filters, so filtered walks read whole scan pages.
fn query_limit(offset: usize, skipped: usize, limit: Option<usize>, collected: usize,
               filtered: bool, scan_page_size: usize) -> i32 {
    let wanted = match limit {
        Some(l) if !filtered => offset.saturating_sub(skipped).saturating_add(l).saturating_sub(collected),
        _ => scan_page_size,
    };
    i32::try_from(cmp::min(wanted, scan_page_size)).unwrap_or(i32::MAX)
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        isbn: parse_string_attribute("isbn", map).unwrap_or_default(),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        short_descr: parse_string_attribute("short_descr", map).unwrap_or_default(),
        long_descr: parse_string_attribute("long_descr", map).unwrap_or_default(),
        published_date: parse_string_attribute("published_date", map).unwrap_or_default(),
        thumbnail_url: parse_string_attribute("thumbnail_url", map).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use aws_sdk_dynamodb::config::{Credentials, Region};
    use aws_sdk_dynamodb::types::ScalarAttributeType;
    use lazy_static::lazy_static;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::{query_limit, DDBBookRepository};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "books_test").await;
                let _ = create_table(&client, "books_test", "catalog", Some(("book_id", ScalarAttributeType::N))).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local"]
    async fn test_should_create_find_update_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books_test", 25);
        let book = books_repo.create(&BookEntity::new("ISBN-ddb-1", "Test Book", "descr"))
            .await.expect("should create book");
        assert!(book.book_id > 0);

        let mut loaded = books_repo.find(book.book_id).await.expect("should find").expect("should exist");
        assert_eq!(book.isbn, loaded.isbn);

        loaded.title = "New Title".to_string();
        assert_eq!(1, books_repo.update(&loaded).await.expect("should update book"));
        let by_isbn = books_repo.find_by_isbn("isbn-DDB-1").await.expect("should query").expect("should exist");
        assert_eq!("New Title", by_isbn.title.as_str());

        let matched = books_repo.substring_match("new tit").await.expect("should match");
        assert!(matched.iter().any(|b| b.book_id == book.book_id));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local"]
    async fn test_should_page_books_in_id_order() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books_test", 7);
        for i in 0..30 {
            let _ = books_repo.create(&BookEntity::new(format!("isbn_page_{}", i).as_str(), "paged", "descr"))
                .await.expect("should create book");
        }
        let total = books_repo.count().await.expect("should count");
        assert!(total >= 30);
        let first = books_repo.take_first(10).await.expect("should take");
        assert_eq!(10, first.len());
        assert!(first.windows(2).all(|w| w[0].book_id < w[1].book_id));
        let second = books_repo.skip_take(10, 10).await.expect("should skip");
        assert_eq!(10, second.len());
        assert!(first[9].book_id < second[0].book_id);
        let range = books_repo.range_from_id(second[0].book_id, 10).await.expect("should range");
        assert_eq!(second, range);
    }

    #[tokio::test]
    async fn test_should_bound_query_limit() {
        assert_eq!(10, query_limit(0, 0, Some(10), 0, false, 25));
        assert_eq!(25, query_limit(30, 0, Some(10), 0, false, 25));
        assert_eq!(4, query_limit(20, 20, Some(10), 6, false, 25));
        assert_eq!(25, query_limit(0, 0, Some(1), 0, true, 25));
        assert_eq!(25, query_limit(0, 0, None, 0, false, 25));
        assert_eq!(25, query_limit(usize::MAX - 1, 0, Some(usize::MAX / 2), 0, false, 25));
        assert_eq!(i32::MAX, query_limit(usize::MAX - 1, 3, Some(usize::MAX), 0, false, usize::MAX));
    }

    #[tokio::test]
    async fn test_should_not_overflow_on_huge_page() {
        // nothing listens on the endpoint, the call fails instead of panicking
        let config = aws_sdk_dynamodb::Config::builder()
            .region(Region::new("local"))
            .credentials_provider(Credentials::new("AKIDLOCAL", "localsecret", None, None, "faked"))
            .endpoint_url("http://127.0.0.1:9")
            .build();
        let books_repo = DDBBookRepository::new(Client::from_conf(config), "books_test", 25);
        let res = books_repo.skip_take(usize::MAX - 1, usize::MAX / 2).await;
        assert!(res.is_err());
    }
}
