//! List Categories Use Case

use std::sync::Arc;

use crate::domain::entities::Category;
use crate::domain::repository::CategoryRepository;
use crate::error::LedgerResult;

pub struct ListCategoriesUseCase<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> ListCategoriesUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> LedgerResult<Vec<Category>> {
        self.repo.list().await
    }
}
