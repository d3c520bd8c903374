//! Post resource service: listing, search, and the create/update/delete
//! lifecycle with its validation contract.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::{Page, PageRequest};
use crate::application::repos::{
    CategoriesRepo, CreatePostParams, PostQueryFilter, PostsRepo, PostsWriteRepo, RepoError,
    UpdatePostParams, UsersRepo,
};
use crate::domain::entities::{CategoryRecord, PostOverviewRecord, PostRecord, UserRecord};

/// Raw form input for create and update. Exactly these three fields are
/// accepted; unknown fields are rejected at the HTTP boundary.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub body: String,
}

/// Field-level validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.entries.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error("post input failed validation")]
    Validation(FieldErrors),
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A post expanded for the detail view.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostRecord,
    pub author: Option<UserRecord>,
    pub categories: Vec<CategoryRecord>,
}

#[derive(Clone)]
pub struct PostService {
    reader: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
    categories: Arc<dyn CategoriesRepo>,
    users: Arc<dyn UsersRepo>,
}

struct ValidPostInput {
    title: String,
    body: String,
    category_id: Uuid,
}

impl PostService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        categories: Arc<dyn CategoriesRepo>,
        users: Arc<dyn UsersRepo>,
    ) -> Self {
        Self {
            reader,
            writer,
            categories,
            users,
        }
    }

    /// Posts with author, newest first.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Page<PostOverviewRecord>, PostServiceError> {
        let filter = PostQueryFilter::default();
        Ok(self.reader.list_overviews(&filter, page).await?)
    }

    /// Case-insensitive substring match on title, newest first. An empty
    /// query matches every post.
    pub async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Page<PostOverviewRecord>, PostServiceError> {
        let filter = PostQueryFilter {
            title_search: Some(query.to_string()),
        };
        Ok(self.reader.list_overviews(&filter, page).await?)
    }

    pub async fn load(&self, id: Uuid) -> Result<PostDetail, PostServiceError> {
        let post = self
            .reader
            .find_by_id(id)
            .await?
            .ok_or(PostServiceError::NotFound)?;
        let author = self.users.find_by_id(post.author_id).await?;
        let categories = self.reader.categories_for_post(post.id).await?;
        Ok(PostDetail {
            post,
            author,
            categories,
        })
    }

    /// Categories ordered by name, for the create/edit form.
    pub async fn category_options(&self) -> Result<Vec<CategoryRecord>, PostServiceError> {
        Ok(self.categories.list_ordered_by_name().await?)
    }

    /// Validates and persists a new post. The authenticated caller becomes
    /// the author; the submitted category is attached. Persistence is never
    /// reached when validation fails.
    pub async fn create(
        &self,
        author: &UserRecord,
        form: PostForm,
    ) -> Result<PostRecord, PostServiceError> {
        let input = self.validate(form).await?;
        let post = self
            .writer
            .create_post(CreatePostParams {
                title: input.title,
                body: input.body,
                author_id: author.id,
                category_id: input.category_id,
            })
            .await?;
        Ok(post)
    }

    /// Full overwrite of title and body plus category reassignment. The
    /// author is never changed after creation.
    pub async fn update(&self, id: Uuid, form: PostForm) -> Result<PostRecord, PostServiceError> {
        self.reader
            .find_by_id(id)
            .await?
            .ok_or(PostServiceError::NotFound)?;
        let input = self.validate(form).await?;
        let post = self
            .writer
            .update_post(UpdatePostParams {
                id,
                title: input.title,
                body: input.body,
                category_id: input.category_id,
            })
            .await
            .map_err(|err| match err {
                RepoError::NotFound => PostServiceError::NotFound,
                other => PostServiceError::Repo(other),
            })?;
        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> Result<PostRecord, PostServiceError> {
        let post = self
            .reader
            .find_by_id(id)
            .await?
            .ok_or(PostServiceError::NotFound)?;
        self.writer
            .delete_post(post.id)
            .await
            .map_err(|err| match err {
                RepoError::NotFound => PostServiceError::NotFound,
                other => PostServiceError::Repo(other),
            })?;
        Ok(post)
    }

    async fn validate(&self, form: PostForm) -> Result<ValidPostInput, PostServiceError> {
        let mut errors = FieldErrors::default();

        let title = form.title.trim().to_string();
        if title.is_empty() {
            errors.push("title", "The title field is required.");
        }

        let body = form.body.trim().to_string();
        if body.is_empty() {
            errors.push("body", "The body field is required.");
        }

        let category_raw = form.category.trim();
        let category_id = if category_raw.is_empty() {
            errors.push("category", "The category field is required.");
            None
        } else {
            match category_raw.parse::<Uuid>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push("category", "The selected category is invalid.");
                    None
                }
            }
        };

        // Category existence is checked only once the field itself parses, so
        // a single message per field reaches the form.
        let category_id = match category_id {
            Some(id) => {
                if self.categories.find_by_id(id).await?.is_none() {
                    errors.push("category", "The selected category is invalid.");
                    None
                } else {
                    Some(id)
                }
            }
            None => None,
        };

        match category_id {
            Some(category_id) if errors.is_empty() => Ok(ValidPostInput {
                title,
                body,
                category_id,
            }),
            _ => Err(PostServiceError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::domain::entities::UserCredentialRecord;

    #[derive(Default)]
    struct StubReader;

    #[async_trait]
    impl PostsRepo for StubReader {
        async fn list_overviews(
            &self,
            _filter: &PostQueryFilter,
            page: PageRequest,
        ) -> Result<Page<PostOverviewRecord>, RepoError> {
            Ok(Page::empty(page))
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<PostRecord>, RepoError> {
            Ok(None)
        }

        async fn categories_for_post(
            &self,
            _post_id: Uuid,
        ) -> Result<Vec<CategoryRecord>, RepoError> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct CountingWriter {
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl PostsWriteRepo for CountingWriter {
        async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
            *self.calls.lock().unwrap() += 1;
            let now = OffsetDateTime::now_utc();
            Ok(PostRecord {
                id: Uuid::new_v4(),
                title: params.title,
                body: params.body,
                author_id: params.author_id,
                created_at: now,
                updated_at: now,
            })
        }

        async fn update_post(&self, _params: UpdatePostParams) -> Result<PostRecord, RepoError> {
            *self.calls.lock().unwrap() += 1;
            Err(RepoError::NotFound)
        }

        async fn delete_post(&self, _id: Uuid) -> Result<(), RepoError> {
            *self.calls.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct FixedCategories {
        known: CategoryRecord,
    }

    #[async_trait]
    impl CategoriesRepo for FixedCategories {
        async fn list_ordered_by_name(&self) -> Result<Vec<CategoryRecord>, RepoError> {
            Ok(vec![self.known.clone()])
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
            Ok((id == self.known.id).then(|| self.known.clone()))
        }
    }

    struct NoUsers;

    #[async_trait]
    impl UsersRepo for NoUsers {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<UserRecord>, RepoError> {
            Ok(None)
        }

        async fn find_credentials(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentialRecord>, RepoError> {
            Ok(None)
        }
    }

    fn service_with_writer(writer: Arc<CountingWriter>) -> (PostService, CategoryRecord) {
        let category = CategoryRecord {
            id: Uuid::new_v4(),
            name: "General".to_string(),
        };
        let service = PostService::new(
            Arc::new(StubReader),
            writer,
            Arc::new(FixedCategories {
                known: category.clone(),
            }),
            Arc::new(NoUsers),
        );
        (service, category)
    }

    fn author() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: "ada".to_string(),
            display_name: "Ada".to_string(),
        }
    }

    #[tokio::test]
    async fn create_with_missing_title_never_touches_persistence() {
        let writer = Arc::new(CountingWriter::default());
        let (service, category) = service_with_writer(writer.clone());

        let result = service
            .create(
                &author(),
                PostForm {
                    title: "  ".to_string(),
                    category: category.id.to_string(),
                    body: "B".to_string(),
                },
            )
            .await;

        match result {
            Err(PostServiceError::Validation(errors)) => {
                assert_eq!(errors.get("title"), Some("The title field is required."));
                assert!(errors.get("body").is_none());
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(*writer.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_reports_every_missing_field_at_once() {
        let writer = Arc::new(CountingWriter::default());
        let (service, _) = service_with_writer(writer.clone());

        let result = service.create(&author(), PostForm::default()).await;

        match result {
            Err(PostServiceError::Validation(errors)) => {
                assert!(errors.get("title").is_some());
                assert!(errors.get("category").is_some());
                assert!(errors.get("body").is_some());
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(*writer.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let writer = Arc::new(CountingWriter::default());
        let (service, _) = service_with_writer(writer.clone());

        let result = service
            .create(
                &author(),
                PostForm {
                    title: "A".to_string(),
                    category: Uuid::new_v4().to_string(),
                    body: "B".to_string(),
                },
            )
            .await;

        match result {
            Err(PostServiceError::Validation(errors)) => {
                assert_eq!(
                    errors.get("category"),
                    Some("The selected category is invalid.")
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(*writer.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_persists_trimmed_fields_with_caller_as_author() {
        let writer = Arc::new(CountingWriter::default());
        let (service, category) = service_with_writer(writer.clone());
        let caller = author();

        let post = service
            .create(
                &caller,
                PostForm {
                    title: "  A  ".to_string(),
                    category: category.id.to_string(),
                    body: " B ".to_string(),
                },
            )
            .await
            .expect("valid input persists");

        assert_eq!(post.title, "A");
        assert_eq!(post.body, "B");
        assert_eq!(post.author_id, caller.id);
        assert_eq!(*writer.calls.lock().unwrap(), 1);
    }
}
