use super::*;

#[test]
fn test_every_variant_parses_from_its_primary_name() {
    for level in LogLevel::value_variants() {
        let name = level.to_possible_value().unwrap().get_name().to_string();
        assert_eq!(name.parse::<LogLevel>().unwrap(), *level);
    }
    for format in LogFormat::value_variants() {
        let name = format.to_possible_value().unwrap().get_name().to_string();
        assert_eq!(name.parse::<LogFormat>().unwrap(), *format);
    }
    for intent in ColorIntent::value_variants() {
        let name = intent.to_possible_value().unwrap().get_name().to_string();
        assert_eq!(name.parse::<ColorIntent>().unwrap(), *intent);
    }
}

#[test]
fn test_aliases() {
    let levels = [
        ("err", LogLevel::Error),
        ("fatal", LogLevel::Error),
        ("warn", LogLevel::Warning),
        ("warning", LogLevel::Warning),
        ("information", LogLevel::Info),
        ("verbose", LogLevel::Trace),
    ];
    for (input, expected) in levels {
        assert_eq!(input.parse::<LogLevel>().unwrap(), expected, "{input}");
    }

    assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("yml".parse::<LogFormat>().unwrap(), LogFormat::Yaml);
    assert_eq!("force".parse::<ColorIntent>().unwrap(), ColorIntent::Always);
    assert_eq!("none".parse::<ColorIntent>().unwrap(), ColorIntent::Never);
    assert_eq!("stdout".parse::<LogOutput>().unwrap(), LogOutput::Stdout);
}

#[test]
fn test_parsing_ignores_case_and_padding() {
    assert_eq!(" DEBUG ".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
}

#[test]
fn test_unknown_value_reports_what_was_expected() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse configuration value 'loud': invalid log level"
    );
}

#[test]
fn test_verbosity_maps_to_level() {
    assert_eq!(LogLevel::from(0), LogLevel::Error);
    assert_eq!(LogLevel::from(2), LogLevel::Info);
    assert_eq!(LogLevel::from(4), LogLevel::Trace);
    assert_eq!(LogLevel::from(u8::MAX), LogLevel::Trace);
    assert!(LogLevel::Error < LogLevel::Trace);
}

#[test]
fn test_filter_strings() {
    assert_eq!(LogLevel::Warning.as_filter_str(), "warn");
    assert_eq!(LogLevel::Trace.as_filter_str(), "trace");
}

#[test]
fn test_explicit_color_intents() {
    assert!(ColorIntent::Always.enabled());
    assert!(!ColorIntent::Never.enabled());
}

#[test]
fn test_invalid_workdir_message() {
    let error = ConfigError::InvalidWorkDir {
        path: "/invalid/path".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid working directory: /invalid/path");
}
