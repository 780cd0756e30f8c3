use super::ApiError;

pub fn validate_id(resource: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {} ID: {}. ID must be a positive integer",
            resource, id
        )));
    }
    Ok(id)
}

/// ISBN-10 or ISBN-13, digits only except a trailing `X` check digit.
pub fn validate_isbn(isbn: &str) -> Result<&str, ApiError> {
    let isbn = isbn.trim();
    if isbn.is_empty() || isbn.len() > 13 {
        return Err(ApiError::validation(
            "ISBN must be between 1 and 13 characters",
        ));
    }
    if !isbn.is_ascii() {
        return Err(ApiError::validation(format!("Invalid ISBN: {}", isbn)));
    }

    let (body, last) = isbn.split_at(isbn.len() - 1);
    let valid = body.chars().all(|c| c.is_ascii_digit())
        && last.chars().all(|c| c.is_ascii_digit() || c == 'X' || c == 'x');
    if !valid {
        return Err(ApiError::validation(format!("Invalid ISBN: {}", isbn)));
    }

    Ok(isbn)
}

pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<(), ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} cannot be empty", field)));
    }
    validate_max_len(field, trimmed, max_len)
}

pub fn validate_max_len(field: &str, value: &str, max_len: usize) -> Result<(), ApiError> {
    if value.trim().chars().count() > max_len {
        return Err(ApiError::validation(format!(
            "{} must be {} characters or less",
            field, max_len
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ApiError::validation(format!("Invalid email: {}", email)));
    };

    if local.is_empty()
        || domain.is_empty()
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(ApiError::validation(format!("Invalid email: {}", email)));
    }

    Ok(email)
}

pub fn validate_year(year: i32) -> Result<i32, ApiError> {
    if !(0..=9999).contains(&year) {
        return Err(ApiError::validation(format!(
            "Invalid year: {}. Year must be between 0 and 9999",
            year
        )));
    }
    Ok(year)
}

/// Normalises the optional `search` query: blank means no filter.
pub fn validate_search_query(query: Option<&str>) -> Result<Option<&str>, ApiError> {
    const MAX_LEN: usize = 200;

    match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) if q.chars().count() > MAX_LEN => Err(ApiError::validation(format!(
            "Search query must be {} characters or less",
            MAX_LEN
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("Loan", 1).is_ok());
        assert!(validate_id("Loan", 0).is_err());
        assert!(validate_id("Loan", -3).is_err());
    }

    #[test]
    fn test_validate_isbn() {
        assert_eq!(validate_isbn(" 9780134685991 ").unwrap(), "9780134685991");
        assert!(validate_isbn("080442957X").is_ok());
        assert!(validate_isbn("").is_err());
        assert!(validate_isbn("97801346859910").is_err());
        assert!(validate_isbn("978-0134685").is_err());
        assert!(validate_isbn("X80442957").is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Ana", 100).is_ok());
        assert!(validate_required("name", "   ", 100).is_err());
        assert!(validate_required("national_id", "1234567890123", 12).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("juan@mail.com").is_ok());
        assert!(validate_email("juan.mail.com").is_err());
        assert!(validate_email("@mail.com").is_err());
        assert!(validate_email("juan@mail").is_err());
        assert!(validate_email("ju an@mail.com").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query(None).unwrap(), None);
        assert_eq!(validate_search_query(Some("  ")).unwrap(), None);
        assert_eq!(validate_search_query(Some(" java ")).unwrap(), Some("java"));
        let long = "a".repeat(201);
        assert!(validate_search_query(Some(&long)).is_err());
    }
}
