//! Platform detection.

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
        || std::env::var("TF_BUILD").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_ci_detects_ci_variable() {
        std::env::set_var("CI", "true");
        let detected = is_ci();
        std::env::remove_var("CI");
        assert!(detected);
    }
}
