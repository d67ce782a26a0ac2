// Resource Tests
//
// Tests for the resource loading module.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::ngtsc::file_system::testing::MockFileSystem;
    use crate::ngtsc::resource::*;

    fn loader(files: &[(&str, &str)]) -> FileSystemResourceLoader {
        FileSystemResourceLoader::new(Arc::new(MockFileSystem::with_files(files)))
    }

    mod file_system_loader_tests {
        use super::*;

        #[test]
        fn should_load_existing_resource() {
            let loader = loader(&[("/app/template.html", "<div>Hello</div>")]);

            assert!(loader.can_preload("/app/template.html"));
            assert_eq!(
                loader.load("/app/template.html").unwrap(),
                "<div>Hello</div>"
            );
        }

        #[test]
        fn should_fail_for_missing_resource() {
            let loader = loader(&[]);
            let err = loader.load("/app/missing.html").unwrap_err();

            assert!(matches!(err, ResourceError::NotFound { .. }));
            assert_eq!(err.url(), "/app/missing.html");
            assert_eq!(
                err.to_string(),
                "Compilation failed. Resource file not found: /app/missing.html"
            );
        }

        #[test]
        fn should_not_load_directories() {
            let loader = loader(&[("/app/styles/a.css", "")]);
            assert!(!loader.can_preload("/app/styles"));
            assert!(loader.load("/app/styles").is_err());
        }
    }

    mod resource_error_tests {
        use super::*;

        #[test]
        fn should_create_load_failed_error() {
            let err = ResourceError::load_failed("style.css", "Permission denied");
            assert!(err.to_string().contains("Failed to load"));
            assert!(err.to_string().contains("Permission denied"));
            assert_eq!(err.url(), "style.css");
        }
    }
}
