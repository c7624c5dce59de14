use entity::employees;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::DbPool;

pub const DEFAULT_PAGE_SIZE: u64 = 25;
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Zero-based page window over the employee table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Normalises raw query values: negative pages clamp to 0, non-positive
    /// sizes fall back to `default_size`, and sizes are capped at
    /// [`MAX_PAGE_SIZE`]. The page is capped so its row offset fits in `i64`.
    pub fn new(page: Option<i64>, size: Option<i64>, default_size: u64) -> Self {
        let size = match size {
            Some(size) if size > 0 => size as u64,
            _ => default_size.max(1),
        }
        .min(MAX_PAGE_SIZE);
        let page = (page.unwrap_or(0).max(0) as u64).min(i64::MAX as u64 / size);
        Self { page, size }
    }

    /// Row offset of the first record on this page, `None` when it does not
    /// fit in `i64`.
    pub fn offset(&self) -> Option<u64> {
        self.page
            .checked_mul(self.size)
            .filter(|offset| *offset <= i64::MAX as u64)
    }
}

/// Explicit queries over the `employees` table.
#[derive(Clone, Debug)]
pub struct EmployeeRepository {
    pool: DbPool,
}

impl EmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(id).one(&self.pool).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .one(&self.pool)
            .await
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, DbErr> {
        let count = employees::Entity::find()
            .filter(employees::Column::Email.eq(email))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn find_by_first_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::FirstName.eq(first_name))
            .filter(employees::Column::LastName.eq(last_name))
            .order_by_asc(employees::Column::Id)
            .one(&self.pool)
            .await
    }

    /// Inserts when `id` is unset, otherwise updates the row with that id.
    ///
    /// An update whose row has vanished fails with [`DbErr::RecordNotUpdated`].
    pub async fn save(&self, model: employees::ActiveModel) -> Result<employees::Model, DbErr> {
        if model.id.is_not_set() {
            model.insert(&self.pool).await
        } else {
            model.update(&self.pool).await
        }
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, DbErr> {
        let res = employees::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(res.rows_affected)
    }

    /// One page of employees in ascending id order. A page past any
    /// addressable offset is empty.
    pub async fn find_all_paged(&self, page: PageRequest) -> Result<Vec<employees::Model>, DbErr> {
        if page.size == 0 || page.offset().is_none() {
            return Ok(Vec::new());
        }
        employees::Entity::find()
            .order_by_asc(employees::Column::Id)
            .paginate(&self.pool, page.size)
            .fetch_page(page.page)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        employees::Entity::find().count(&self.pool).await
    }
}
