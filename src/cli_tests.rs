use super::*;

use clap::Parser;

#[test]
fn test_run_defaults() {
    let cli = Cli::parse_from(["repo-profiler", "run"]);
    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.path, std::path::PathBuf::from("."));
    assert_eq!(args.window_days, 730);
    assert!(!args.gitignore);
    assert!(!args.force);
}

#[test]
fn test_run_with_flags() {
    let cli = Cli::parse_from([
        "repo-profiler",
        "run",
        "/work/acme",
        "--window-days",
        "90",
        "--gitignore",
        "--force",
    ]);
    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.path, std::path::PathBuf::from("/work/acme"));
    assert_eq!(args.window_days, 90);
    assert!(args.gitignore);
    assert!(args.force);
}

#[test]
fn test_check_command() {
    let cli = Cli::parse_from(["repo-profiler", "check", "ws"]);
    assert!(matches!(cli.command, Commands::Check(_)));
}

#[test]
fn test_show_format() {
    let cli = Cli::parse_from(["repo-profiler", "show", "--format", "json"]);
    let Commands::Show(args) = cli.command else {
        panic!("expected show command");
    };
    assert_eq!(args.format, ShowFormat::Json);
}

#[test]
fn test_global_flags() {
    let cli = Cli::parse_from(["repo-profiler", "-v", "--quiet", "run"]);
    assert_eq!(cli.verbose, 1);
    assert!(cli.quiet);
}
