//! SeaORM entities for the employee records store.

pub mod employees;
