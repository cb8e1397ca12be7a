/// Package name of a bare specifier, scope-aware.
///
/// `@scope/pkg/sub` → `@scope/pkg`, `pkg/sub` → `pkg`.
pub fn extract_package_name(specifier: &str) -> &str {
    if specifier.is_empty() {
        return specifier;
    }

    if specifier.starts_with('@') {
        if let Some(first_slash) = specifier.find('/') {
            if let Some(second_slash) = specifier[first_slash + 1..].find('/') {
                return &specifier[..first_slash + 1 + second_slash];
            }
        }
        return specifier;
    }

    match specifier.find('/') {
        Some(slash_idx) => &specifier[..slash_idx],
        None => specifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_packages() {
        assert_eq!(extract_package_name("react"), "react");
        assert_eq!(extract_package_name("react-dom/client"), "react-dom");
        assert_eq!(extract_package_name("next/navigation"), "next");
    }

    #[test]
    fn test_scoped_packages() {
        assert_eq!(extract_package_name("@scope/pkg"), "@scope/pkg");
        assert_eq!(extract_package_name("@scope/pkg/sub"), "@scope/pkg");
        assert_eq!(extract_package_name("@scope/pkg/a/b"), "@scope/pkg");
        assert_eq!(extract_package_name("@scope"), "@scope");
    }

    #[test]
    fn test_empty() {
        assert_eq!(extract_package_name(""), "");
    }
}
