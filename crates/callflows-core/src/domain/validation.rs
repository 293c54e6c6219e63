use crate::CallFlowError;

/// Whether `name` is acceptable as a call flow name: non-empty and made of
/// letters and digits only.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_alphanumeric)
}

/// Validate a call flow name
pub fn validate_name(name: &str) -> Result<(), CallFlowError> {
    if name.trim().is_empty() {
        return Err(CallFlowError::InvalidArgument(
            "Call flow name is required".to_string(),
        ));
    }
    if !is_valid_name(name) {
        return Err(CallFlowError::InvalidArgument(format!(
            "Call flow name '{}' must contain only letters and digits",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["MainFlow", "flow2", "Ünïcode", "42"] {
            assert!(is_valid_name(name), "{} should be valid", name);
            assert!(validate_name(name).is_ok());
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", " ", "Main Flow", "main-flow", "main_flow", "flow!", "a.b", "tab\t"] {
            assert!(!is_valid_name(name), "{:?} should be invalid", name);
            assert!(matches!(
                validate_name(name),
                Err(CallFlowError::InvalidArgument(_))
            ));
        }
    }
}
