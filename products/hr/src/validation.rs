use platform_api::FieldViolation;
use validator::ValidateEmail;

use crate::EmployeeDto;

const FIRST_NAME_MAX: usize = 50;
const LAST_NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 255;

/// Field checks run at the HTTP boundary before the service sees the DTO.
/// Every violation is reported, not just the first.
pub fn validate_employee(dto: &EmployeeDto) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    check_required_text(&mut violations, "firstName", &dto.first_name, FIRST_NAME_MAX);
    check_required_text(&mut violations, "lastName", &dto.last_name, LAST_NAME_MAX);

    match dto.email.as_deref() {
        None => violations.push(FieldViolation::new("email", "must not be null")),
        Some(email) => {
            if let Some(v) = check_length("email", email, EMAIL_MAX) {
                violations.push(v);
            }
            if !email.validate_email() {
                violations.push(FieldViolation::new(
                    "email",
                    "must be a well-formed email address",
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_required_text(out: &mut Vec<FieldViolation>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        out.push(FieldViolation::new(field, "must not be blank"));
    }
    if let Some(v) = check_length(field, value, max) {
        out.push(v);
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Option<FieldViolation> {
    if value.chars().count() > max {
        Some(FieldViolation::new(
            field,
            format!("length must be between 0 and {max}"),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(result: Result<(), Vec<FieldViolation>>) -> Vec<String> {
        result
            .unwrap_err()
            .into_iter()
            .map(|v| v.field)
            .collect()
    }

    #[test]
    fn accepts_valid_employee() {
        let dto = EmployeeDto::new("Ana", "Petrova", "ana.petrova@example.com");
        assert!(validate_employee(&dto).is_ok());
    }

    #[test]
    fn blank_names_are_rejected() {
        let dto = EmployeeDto::new("   ", "", "ana@example.com");
        assert_eq!(fields(validate_employee(&dto)), vec!["firstName", "lastName"]);
    }

    #[test]
    fn name_limits_count_characters() {
        let at_limit = EmployeeDto::new("é".repeat(50), "x".repeat(100), "a@example.com");
        assert!(validate_employee(&at_limit).is_ok());

        let over = EmployeeDto::new("é".repeat(51), "x".repeat(101), "a@example.com");
        let violations = validate_employee(&over).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message, "length must be between 0 and 50");
        assert_eq!(violations[1].message, "length must be between 0 and 100");
    }

    #[test]
    fn email_must_be_present_and_well_formed() {
        let mut dto = EmployeeDto::new("Ana", "Petrova", "not-an-email");
        assert_eq!(fields(validate_employee(&dto)), vec!["email"]);

        dto.email = None;
        let violations = validate_employee(&dto).unwrap_err();
        assert_eq!(violations[0].message, "must not be null");

        dto.email = Some(String::new());
        assert_eq!(fields(validate_employee(&dto)), vec!["email"]);
    }

    #[test]
    fn overlong_email_is_rejected() {
        let local = "a".repeat(60);
        let domain = format!("{}.example.com", "d".repeat(200));
        let dto = EmployeeDto::new("Ana", "Petrova", format!("{local}@{domain}"));
        let violations = validate_employee(&dto).unwrap_err();
        assert!(
            violations
                .iter()
                .any(|v| v.field == "email" && v.message == "length must be between 0 and 255")
        );
    }
}
