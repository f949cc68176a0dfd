use super::*;

#[test]
fn parses_search_command_with_default_condition() {
    let cli = Cli::try_parse_from(["resnap", "search", "ikea", "gunde", "chair"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            ref term,
            condition: Condition::New,
        } if term.join(" ") == "ikea gunde chair"
    ));
}

#[test]
fn parses_search_condition_label() {
    let cli = Cli::try_parse_from(["resnap", "search", "lamp", "--condition", "Open box"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            condition: Condition::OpenBox,
            ..
        }
    ));
}

#[test]
fn parses_kebab_case_condition() {
    let cli = Cli::try_parse_from(["resnap", "photo", "chair.jpg", "-c", "for-parts"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Photo {
            ref path,
            condition: Condition::ForParts,
        } if path.as_os_str() == "chair.jpg"
    ));
}

#[test]
fn rejects_unknown_condition() {
    let result = Cli::try_parse_from(["resnap", "search", "lamp", "--condition", "mint"]);
    assert!(result.is_err());
}

#[test]
fn search_requires_a_term() {
    assert!(Cli::try_parse_from(["resnap", "search"]).is_err());
}

#[test]
fn session_accepts_global_service_url() {
    let cli = Cli::try_parse_from([
        "resnap",
        "session",
        "--service-url",
        "http://127.0.0.1:4000",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.service_url.as_deref(), Some("http://127.0.0.1:4000"));
    assert!(matches!(
        cli.command,
        Commands::Session {
            condition: Condition::New
        }
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["resnap"]).is_err());
}
