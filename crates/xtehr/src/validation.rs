//! Element path validation.

use crate::{XtEhrError, XtEhrResult};

/// Validates that `path` is a well-formed dot-delimited element path.
///
/// Each segment must start with an ASCII letter and contain only ASCII letters and digits,
/// e.g. `body.examinationReport.bodyPart`. A single segment (`attachments`) is allowed.
///
/// # Errors
///
/// Returns `XtEhrError::InvalidInput` describing the first problem found.
pub fn validate_element_path(path: &str) -> XtEhrResult<()> {
    const MAX_PATH_LEN: usize = 256;

    if path.trim().is_empty() {
        return Err(XtEhrError::InvalidInput(
            "element path cannot be empty".into(),
        ));
    }

    if path.len() > MAX_PATH_LEN {
        return Err(XtEhrError::InvalidInput(format!(
            "element path exceeds maximum length of {} characters",
            MAX_PATH_LEN
        )));
    }

    for segment in path.split('.') {
        let mut chars = segment.chars();
        match chars.next() {
            None => {
                return Err(XtEhrError::InvalidInput(
                    "element path contains an empty segment".into(),
                ))
            }
            Some(first) if !first.is_ascii_alphabetic() => {
                return Err(XtEhrError::InvalidInput(format!(
                    "segment '{}' must start with a letter",
                    segment
                )))
            }
            Some(_) => {}
        }

        if !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err(XtEhrError::InvalidInput(format!(
                "segment '{}' contains invalid characters (only alphanumeric allowed)",
                segment
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_element_path_accepts_catalogue_shapes() {
        assert!(validate_element_path("attachments").is_ok());
        assert!(validate_element_path("header.documentType").is_ok());
        assert!(validate_element_path("body.examinationReport.conclusion.impression").is_ok());
    }

    #[test]
    fn test_validate_element_path_rejects_empty() {
        let err = validate_element_path("  ").expect_err("should reject blank");
        assert!(matches!(err, XtEhrError::InvalidInput(msg) if msg.contains("cannot be empty")));
    }

    #[test]
    fn test_validate_element_path_rejects_empty_segments() {
        for path in [".header", "header.", "header..status"] {
            let err = validate_element_path(path).expect_err("should reject empty segment");
            assert!(matches!(err, XtEhrError::InvalidInput(msg) if msg.contains("empty segment")));
        }
    }

    #[test]
    fn test_validate_element_path_rejects_bad_characters() {
        let err = validate_element_path("header.2status").expect_err("digit first");
        assert!(matches!(err, XtEhrError::InvalidInput(msg) if msg.contains("start with a letter")));

        let err = validate_element_path("header/status").expect_err("slash");
        assert!(matches!(err, XtEhrError::InvalidInput(msg) if msg.contains("invalid characters")));
    }

    #[test]
    fn test_validate_element_path_rejects_too_long() {
        let long = "a".repeat(257);
        let err = validate_element_path(&long).expect_err("should reject too long");
        assert!(
            matches!(err, XtEhrError::InvalidInput(msg) if msg.contains("exceeds maximum length"))
        );
    }
}
