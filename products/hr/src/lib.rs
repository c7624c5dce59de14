//! HR module: employee records.
//!
//! [`EmployeeService`] owns the business rules (email uniqueness at creation,
//! existence before read/update/delete). Input reaches it already checked by
//! [`validate_employee`]; persistence goes through
//! [`platform_db::EmployeeRepository`].

mod dto;
mod error;
pub mod mapper;
mod service;
mod validation;

pub use dto::EmployeeDto;
pub use error::{HrError, HrResult};
pub use service::EmployeeService;
pub use validation::validate_employee;
