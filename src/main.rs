use clap::Parser;

use repo_profiler::cli::{CheckArgs, Cli, Commands, RunArgs, ShowArgs, ShowFormat};
use repo_profiler::orchestrator::{self, RunOptions};
use repo_profiler::output::{ScanProgress, print_error_full, print_warning_full};
use repo_profiler::profile::Profile;
use repo_profiler::{EXIT_ERROR, EXIT_STALE, EXIT_SUCCESS, writer};

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Run(args) => run(args, &cli),
        Commands::Check(args) => check(args),
        Commands::Show(args) => show(args),
    };

    std::process::exit(exit_code);
}

fn run(args: &RunArgs, cli: &Cli) -> i32 {
    if !args.force && !orchestrator::should_run(&args.path) {
        if !cli.quiet {
            println!("Profile is up to date; use --force to recompute.");
        }
        return EXIT_SUCCESS;
    }

    let progress = ScanProgress::new(cli.quiet);
    progress.set_stage("analyzing workspace");

    let options = RunOptions {
        window_days: args.window_days,
        respect_gitignore: args.gitignore,
        ..RunOptions::default()
    };
    let result = orchestrator::run(&args.path, &options);
    progress.finish();

    match result {
        Ok(profile) => {
            if !cli.quiet {
                println!(
                    "Profiled {} files, {} edges in {} ms; {} ranked files written to {}",
                    profile.metrics.files,
                    profile.metrics.edges,
                    profile.metrics.duration_ms,
                    profile.important_files.len(),
                    writer::profile_path(&args.path).display(),
                );
            }
            if cli.verbose > 0 {
                for file in profile.important_files.iter().take(10) {
                    println!("  {:>7.3}  {}", file.score, file.path);
                }
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error_full(e.error_type(), &e.message(), e.suggestion());
            EXIT_ERROR
        }
    }
}

fn check(args: &CheckArgs) -> i32 {
    if orchestrator::should_run(&args.path) {
        println!("recompute needed");
        EXIT_STALE
    } else {
        if writer::is_stale(&args.path) {
            print_warning_full(
                "a tracked manifest is newer than the profile",
                Some("run `repo-profiler run` to refresh"),
            );
        }
        println!("profile is fresh");
        EXIT_SUCCESS
    }
}

fn show(args: &ShowArgs) -> i32 {
    let profile = match Profile::load(&writer::profile_path(&args.path)) {
        Ok(profile) => profile,
        Err(e) => {
            print_error_full(e.error_type(), &e.message(), e.suggestion());
            return EXIT_ERROR;
        }
    };

    match args.format {
        ShowFormat::Json => match serde_json::to_string_pretty(&profile) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                print_error_full("JSON", &e.to_string(), None);
                return EXIT_ERROR;
            }
        },
        ShowFormat::Text => print!("{}", writer::render_rules(&profile)),
    }
    EXIT_SUCCESS
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
