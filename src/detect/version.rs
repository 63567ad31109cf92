//! Project version reduction by versioning model

/// Reduce `version` to the precision named by `model`.
///
/// `major` keeps one numeric component, `major-minor` two and `semantic`
/// three; missing components are padded with `0`. `full`, an unknown
/// model, or a version without a leading number yields the input as is.
pub fn apply_versioning_model(model: &str, version: &str) -> String {
    let precision = match model {
        "major" => 1,
        "major-minor" => 2,
        "semantic" => 3,
        _ => return version.to_string(),
    };

    let trimmed = version.trim().trim_start_matches(['v', 'V']);
    let mut segments = trimmed.split('.').map(leading_number);

    let Some(Some(major)) = segments.next() else {
        return version.to_string();
    };

    let mut parts = vec![major];
    for _ in 1..precision {
        parts.push(segments.next().flatten().unwrap_or_else(|| "0".to_string()));
    }

    parts.join(".")
}

/// Version name used for the project version and code location
pub fn version_name(version: Option<&str>, model: Option<&str>) -> String {
    let version = version.unwrap_or_default();
    match model {
        Some(model) if !model.is_empty() => apply_versioning_model(model, version),
        _ => version.to_string(),
    }
}

fn leading_number(segment: &str) -> Option<String> {
    let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major() {
        assert_eq!(apply_versioning_model("major", "1.2.3"), "1");
        assert_eq!(apply_versioning_model("major", "v3.1"), "3");
    }

    #[test]
    fn test_major_minor() {
        assert_eq!(apply_versioning_model("major-minor", "1.0"), "1.0");
        assert_eq!(apply_versioning_model("major-minor", "4.7.12"), "4.7");
        assert_eq!(apply_versioning_model("major-minor", "2"), "2.0");
    }

    #[test]
    fn test_semantic_pads_and_strips_suffix() {
        assert_eq!(apply_versioning_model("semantic", "1.2"), "1.2.0");
        assert_eq!(apply_versioning_model("semantic", "2.5.1-SNAPSHOT"), "2.5.1");
    }

    #[test]
    fn test_full_and_unknown_keep_input() {
        assert_eq!(apply_versioning_model("full", "1.2.3-beta"), "1.2.3-beta");
        assert_eq!(apply_versioning_model("calendar", "2024.01"), "2024.01");
    }

    #[test]
    fn test_non_numeric_version_unchanged() {
        assert_eq!(apply_versioning_model("major", "release"), "release");
        assert_eq!(apply_versioning_model("major", ""), "");
    }

    #[test]
    fn test_version_name_without_model() {
        assert_eq!(version_name(Some("1.2.3"), None), "1.2.3");
        assert_eq!(version_name(Some("1.2.3"), Some("")), "1.2.3");
        assert_eq!(version_name(None, Some("major")), "");
    }
}
