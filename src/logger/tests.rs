//! Tests for the logger module

use crate::logger::config::*;
use crate::logger::writer::LogFileWriter;
use std::path::PathBuf;

#[cfg(test)]
mod config_tests {
    use super::*;

    fn create_test_config() -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig {
                enabled: true,
                colored: false,
            },
            file: FileConfig {
                enabled: false,
                path: PathBuf::from("test.log"),
                append: true,
                format: LogFormat::Full,
            },
            level: "info".to_string(),
        }
    }

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(config.console.colored);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = create_test_config();
        assert!(config.validate().is_ok());

        config.console.enabled = false;
        config.file.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_file_requires_path() {
        let result = FileConfig::new(true, PathBuf::new(), true, LogFormat::Json);
        assert!(result.is_err());

        // A disabled file output may leave the path empty
        assert!(FileConfig::new(false, PathBuf::new(), true, LogFormat::Json).is_ok());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Compact.as_str(), "compact");
    }

    #[test]
    fn test_log_format_default() {
        assert_eq!(LogFormat::default(), LogFormat::Full);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn property_valid_configs_validate(
            console_enabled in any::<bool>(),
            file_enabled in any::<bool>(),
            colored in any::<bool>(),
            append in any::<bool>(),
            level in prop_oneof![
                Just("trace"), Just("debug"), Just("info"), Just("WARN"), Just("error")
            ],
        ) {
            prop_assume!(console_enabled || file_enabled);

            let config = LoggerConfig {
                console: ConsoleConfig::new(console_enabled, colored),
                file: FileConfig {
                    enabled: file_enabled,
                    path: PathBuf::from("test.log"),
                    append,
                    format: LogFormat::Compact,
                },
                level: level.to_string(),
            };

            prop_assert!(config.validate().is_ok());
            prop_assert!(config.parse_level().is_ok());
        }

        #[test]
        fn property_invalid_levels_are_rejected(level in "[a-z]{1,10}") {
            prop_assume!(!["trace", "debug", "info", "warn", "error"].contains(&level.as_str()));

            let config = LoggerConfig {
                level,
                ..LoggerConfig::default()
            };
            prop_assert!(config.validate().is_err());
        }
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use crate::logger::build_layers;
    use std::io::Write;
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::layer::SubscriberExt;

    fn file_config(dir: &TempDir, append: bool, format: LogFormat) -> FileConfig {
        FileConfig {
            enabled: true,
            path: dir.path().join("nested").join("app.log"),
            append,
            format,
        }
    }

    #[test]
    fn test_writer_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true, LogFormat::Full);

        let writer = LogFileWriter::new(&config).unwrap();
        {
            let mut guard = writer.make_writer();
            guard.write_all(b"first line\n").unwrap();
        }

        let contents = std::fs::read_to_string(&config.path).unwrap();
        assert_eq!(contents, "first line\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_writer_append_and_truncate() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true, LogFormat::Full);
        std::fs::create_dir_all(config.path.parent().unwrap()).unwrap();
        std::fs::write(&config.path, "existing\n").unwrap();

        {
            let writer = LogFileWriter::new(&config).unwrap();
            writer.make_writer().write_all(b"appended\n").unwrap();
        }
        assert_eq!(
            std::fs::read_to_string(&config.path).unwrap(),
            "existing\nappended\n"
        );

        let truncating = FileConfig {
            append: false,
            ..config.clone()
        };
        {
            let writer = LogFileWriter::new(&truncating).unwrap();
            writer.make_writer().write_all(b"fresh\n").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_json_file_layer_writes_records() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            file: file_config(&dir, true, LogFormat::Json),
            level: "info".to_string(),
        };

        let layers = build_layers(&config).unwrap();
        assert_eq!(layers.len(), 1);

        let subscriber = tracing_subscriber::registry().with(layers);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(doctor_count = 3, "Doctors listed");
        });

        let contents = std::fs::read_to_string(&config.file.path).unwrap();
        let line = contents.lines().next().expect("one JSON record");
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["level"], "INFO");
        assert_eq!(record["fields"]["message"], "Doctors listed");
        assert_eq!(record["fields"]["doctor_count"], 3);
    }

    #[test]
    fn test_build_layers_console_and_file() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig {
            console: ConsoleConfig::new(true, false),
            file: file_config(&dir, true, LogFormat::Compact),
            level: "debug".to_string(),
        };

        assert_eq!(build_layers(&config).unwrap().len(), 2);
    }

    #[test]
    fn test_build_layers_without_outputs_fails() {
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            ..LoggerConfig::default()
        };
        assert!(build_layers(&config).is_err());
    }
}
