// Logging Tests
//
// Tests for the logging module.

#[cfg(test)]
mod tests {
    use crate::ngtsc::logging::*;

    mod log_level_tests {
        use super::*;

        #[test]
        fn should_have_correct_ordering() {
            assert!(LogLevel::Debug < LogLevel::Info);
            assert!(LogLevel::Info < LogLevel::Warn);
            assert!(LogLevel::Warn < LogLevel::Error);
        }

        #[test]
        fn should_parse_level_names() {
            assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
            assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
            assert!("loud".parse::<LogLevel>().is_err());
            assert_eq!(LogLevel::Error.to_string(), "error");
        }
    }

    mod console_logger_tests {
        use super::*;

        #[test]
        fn should_default_to_info() {
            assert_eq!(ConsoleLogger::default().level(), LogLevel::Info);
        }

        #[test]
        fn should_check_level_enabled() {
            let logger = ConsoleLogger::new(LogLevel::Warn);

            assert!(!logger.is_enabled(LogLevel::Debug));
            assert!(!logger.is_enabled(LogLevel::Info));
            assert!(logger.is_enabled(LogLevel::Warn));
            assert!(logger.is_enabled(LogLevel::Error));
        }
    }

    mod mock_logger_tests {
        use super::*;

        #[test]
        fn should_record_messages_by_level() {
            let logger = MockLogger::new();
            assert!(logger.is_empty());

            logger.warn("first");
            logger.error("boom");
            logger.warn("second");

            assert_eq!(logger.messages(LogLevel::Warn), vec!["first", "second"]);
            assert_eq!(logger.messages(LogLevel::Error), vec!["boom"]);
            assert!(logger.messages(LogLevel::Info).is_empty());
        }
    }

    mod null_logger_tests {
        use super::*;

        #[test]
        fn should_not_log_anything() {
            let logger = NullLogger::new();

            logger.debug("debug message");
            logger.info("info message");
            logger.warn("warn message");
            logger.error("error message");
            assert!(!logger.is_enabled(LogLevel::Warn));
        }
    }
}
