use platform_db::{EmployeeRepository, PageRequest};
use tracing::{info, instrument};

use crate::{
    EmployeeDto,
    error::{HrError, HrResult},
    mapper,
};

/// Business rules around employee records.
///
/// Existence checks and the following write are separate store calls; a
/// concurrent delete between them surfaces as [`HrError::NotFound`] and a
/// concurrent insert of the same email as [`HrError::Conflict`], both via the
/// storage layer.
#[derive(Clone, Debug)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    #[instrument(name = "hr.employees.list", skip(self), fields(page = page.page, size = page.size))]
    pub async fn list(&self, page: PageRequest) -> HrResult<Vec<EmployeeDto>> {
        let rows = self.repo.find_all_paged(page).await?;
        Ok(rows.into_iter().map(mapper::to_transfer).collect())
    }

    #[instrument(name = "hr.employees.get", skip(self))]
    pub async fn get_by_id(&self, id: i64) -> HrResult<EmployeeDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(mapper::to_transfer)
            .ok_or_else(HrError::not_found)
    }

    /// Rejects a taken email before writing; any caller-supplied id is dropped.
    #[instrument(name = "hr.employees.create", skip_all)]
    pub async fn create(&self, mut input: EmployeeDto) -> HrResult<EmployeeDto> {
        if self.repo.exists_by_email(input.email()).await? {
            return Err(HrError::duplicate_email());
        }
        input.id = None;
        let saved = self.repo.save(mapper::to_active_model(input)).await?;
        info!(employee_id = saved.id, "employee created");
        Ok(mapper::to_transfer(saved))
    }

    /// Replaces the mutable fields of employee `id`. The path id always wins
    /// over one in the payload. Email uniqueness is not re-checked here; the
    /// unique index still rejects a collision.
    #[instrument(name = "hr.employees.update", skip(self, input))]
    pub async fn update(&self, id: i64, mut input: EmployeeDto) -> HrResult<EmployeeDto> {
        self.get_by_id(id).await?;
        input.id = Some(id);
        let saved = self.repo.save(mapper::to_active_model(input)).await?;
        info!(employee_id = saved.id, "employee updated");
        Ok(mapper::to_transfer(saved))
    }

    #[instrument(name = "hr.employees.delete", skip(self))]
    pub async fn delete(&self, id: i64) -> HrResult<()> {
        self.get_by_id(id).await?;
        if self.repo.delete_by_id(id).await? == 0 {
            return Err(HrError::not_found());
        }
        info!(employee_id = id, "employee deleted");
        Ok(())
    }
}
