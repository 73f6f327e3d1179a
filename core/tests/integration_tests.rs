use option_layers_core::{
    Appearance, ConfigSource, FileParseErrorKind, HelpSection, OptionNames, OptionSpec,
    OptionValues, ParseError, ValidationError, default_values_map, format_help, get_single,
    merge_new_values, parse_command_line, parse_command_line_and_collect_unrecognized,
    parse_config_file, resolve_options, verify_option_counts,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const NO_TOKENS: [&str; 0] = [];

fn server_specs() -> Vec<OptionSpec> {
    vec![
        OptionSpec::new(
            OptionNames::with_alias("--help", "-h"),
            Appearance::OptionalNoParameter,
        ),
        OptionSpec::with_default(
            OptionNames::with_alias("--cores", "-c"),
            Appearance::Optional,
            "4",
        )
        .unwrap(),
        OptionSpec::new(
            OptionNames::with_alias("--join", "-j"),
            Appearance::MandatoryRepeat,
        ),
        OptionSpec::with_default(
            OptionNames::with_alias("--directory", "-d"),
            Appearance::Optional,
            "rethinkdb_data",
        )
        .unwrap(),
        OptionSpec::new(OptionNames::new("--no-update-check"), Appearance::OptionalNoParameter),
    ]
}

fn layered(specs: &[OptionSpec], config: &str, tokens: &[&str]) -> OptionValues {
    let mut values = default_values_map(specs);
    let file = parse_config_file(config, "test.conf", specs).unwrap();
    merge_new_values(&file, &mut values);
    let cli = parse_command_line(tokens, specs).unwrap();
    merge_new_values(&cli, &mut values);
    values
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn help_flag_yields_empty_sentinel() {
    let specs = vec![OptionSpec::new(
        OptionNames::with_alias("--help", "-h"),
        Appearance::OptionalNoParameter,
    )];

    let (values, unrecognized) =
        parse_command_line_and_collect_unrecognized(["--help"], &specs).unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values["--help"], [""]);
    assert!(unrecognized.is_empty());

    assert_eq!(parse_command_line(["--help"], &specs).unwrap(), values);
}

#[test]
fn default_survives_empty_command_line() {
    let specs = vec![
        OptionSpec::with_default(
            OptionNames::with_alias("--cores", "-c"),
            Appearance::Optional,
            "4",
        )
        .unwrap(),
    ];

    let mut values = default_values_map(&specs);
    let cli = parse_command_line(NO_TOKENS, &specs).unwrap();
    merge_new_values(&cli, &mut values);

    let mut expected = OptionValues::new();
    expected.insert("--cores".to_string(), vec!["4".to_string()]);
    assert_eq!(values, expected);
}

#[test]
fn mandatory_repeat_counts() {
    let specs = vec![OptionSpec::new(
        OptionNames::with_alias("--join", "-j"),
        Appearance::MandatoryRepeat,
    )];

    let values = parse_command_line(["-j", "a", "-j", "b"], &specs).unwrap();
    assert_eq!(values["--join"], ["a", "b"]);
    assert!(verify_option_counts(&specs, &values).is_ok());

    let values = parse_command_line(NO_TOKENS, &specs).unwrap();
    let err = verify_option_counts(&specs, &values).unwrap_err();
    assert_eq!(err.option(), "--join");
    assert!(err.to_string().contains("--join"));
}

#[test]
fn tolerant_parse_interleaves_unrecognized_around_parameters() {
    let specs = vec![
        OptionSpec::new(OptionNames::new("--recognized-foo"), Appearance::Mandatory),
        OptionSpec::new(OptionNames::new("--recognized-bar"), Appearance::Mandatory),
    ];

    let (values, unrecognized) = parse_command_line_and_collect_unrecognized(
        [
            "--recognized-foo",
            "3",
            "--unrecognized",
            "--recognized-bar",
            "4",
            "5",
        ],
        &specs,
    )
    .unwrap();

    assert_eq!(values.len(), 2);
    assert_eq!(values["--recognized-foo"], ["3"]);
    assert_eq!(values["--recognized-bar"], ["4"]);
    assert_eq!(unrecognized, ["--unrecognized", "5"]);
}

#[test]
fn config_with_unknown_option_names_file_and_line() {
    let contents = "# cluster config\ncores = 2\nmystery-knob = 11\n";
    let err = parse_config_file(contents, "/etc/rethinkdb/instances.d/a.conf", &server_specs())
        .unwrap_err();

    assert_eq!(err.path, "/etc/rethinkdb/instances.d/a.conf");
    assert_eq!(err.line, 3);
    assert_eq!(err.content, "mystery-knob = 11");
    assert_eq!(
        err.kind,
        FileParseErrorKind::UnknownOption("mystery-knob".to_string())
    );
    let message = err.to_string();
    assert!(message.contains("/etc/rethinkdb/instances.d/a.conf"));
    assert!(message.contains("mystery-knob = 11"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn defaults_map_matches_declared_defaults() {
    let specs = server_specs();
    let defaults = default_values_map(&specs);

    for spec in &specs {
        let values = defaults
            .get(spec.official_name())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        assert_eq!(values, spec.default_values(), "{}", spec.official_name());
    }
}

#[test]
fn merge_is_right_biased_for_shared_keys() {
    let mut acc = OptionValues::new();
    acc.insert("--join".into(), vec!["a".into(), "b".into(), "c".into()]);
    acc.insert("--cores".into(), vec!["4".into()]);

    let mut new = OptionValues::new();
    new.insert("--join".into(), Vec::new());

    merge_new_values(&new, &mut acc);
    assert!(acc["--join"].is_empty());
    assert_eq!(acc["--cores"], ["4"]);
}

#[test]
fn counts_are_checked_per_option() {
    let specs = server_specs();
    let mut values = default_values_map(&specs);
    values.insert("--join".into(), vec!["x".into()]);
    assert!(verify_option_counts(&specs, &values).is_ok());

    values.insert("--help".into(), vec![String::new(), String::new()]);
    assert_eq!(
        verify_option_counts(&specs, &values),
        Err(ValidationError::TooMany {
            option: "--help".to_string(),
            max: 1,
            found: 2,
        })
    );
}

#[test]
fn config_round_trip_keeps_choices_and_defaults() {
    let specs = server_specs();
    let values = layered(&specs, "join = db1:29015\ncores = 16\n", &[]);
    verify_option_counts(&specs, &values).unwrap();

    assert_eq!(values["--join"], ["db1:29015"]);
    assert_eq!(values["--cores"], ["16"]);
    assert_eq!(values["--directory"], ["rethinkdb_data"]);
    assert!(values["--help"].is_empty());
}

#[test]
fn command_line_overrides_config_per_option() {
    let specs = server_specs();
    let values = layered(
        &specs,
        "join = db1:29015\njoin = db2:29015\nno-update-check\n",
        &["-j", "db9:29015", "-d", "/var/lib/data"],
    );
    verify_option_counts(&specs, &values).unwrap();

    assert_eq!(values["--join"], ["db9:29015"]);
    assert_eq!(values["--directory"], ["/var/lib/data"]);
    assert_eq!(values["--no-update-check"], [""]);
    assert_eq!(get_single(&values, "--cores"), Some("4"));
}

#[test]
fn missing_parameter_is_a_parse_error() {
    let err = parse_command_line(["--join"], &server_specs()).unwrap_err();
    assert_eq!(err, ParseError::MissingArgument("--join".to_string()));
}

#[test]
fn resolve_options_runs_the_whole_chain() {
    let specs = server_specs();
    let config = ConfigSource::new("join = db1:29015\n", "test.conf");
    let values = resolve_options(&specs, Some(config), ["-c", "2"]).unwrap();
    assert_eq!(values["--cores"], ["2"]);
    assert_eq!(values["--join"], ["db1:29015"]);
}

#[test]
fn help_is_generated_from_specs() {
    let text = format_help(&[HelpSection::from_specs("Server options", &server_specs())]);
    assert!(text.starts_with("Server options:\n"));
    assert!(text.contains("--join, -j <value>"));
    assert!(text.contains("required, repeatable"));
    assert!(text.contains("(default: rethinkdb_data)"));
    assert_eq!(text.lines().count(), 1 + server_specs().len());
}
