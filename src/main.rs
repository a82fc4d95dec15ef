use smogwatch::cli::{parse_args, version_line, CliCommand, WatchCommand, USAGE};
use smogwatch::cli_output::{self, icons};
use smogwatch::models::Record;
use smogwatch::search;
use smogwatch::startup::{build_controller, logging, AppConfig};
use smogwatch::view_state::{InfoStateController, ListState};

use color_eyre::Result;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    match args.command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(ExitCode::SUCCESS);
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        CliCommand::Once | CliCommand::Watch => {}
    }

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Warning: {}", e);
    }

    let config = AppConfig::load(args.config_path.as_deref())?;
    let controller = build_controller(&config)?;

    let code = match args.command {
        CliCommand::Once => run_once(&controller).await,
        _ => run_watch(&controller).await?,
    };
    controller.shutdown();
    Ok(code)
}

/// Wait for the first refresh to settle, print it and exit.
async fn run_once(controller: &InfoStateController) -> ExitCode {
    let mut states = controller.subscribe_state();
    let state = states
        .wait_for(|s| *s != ListState::Refreshing)
        .await
        .unwrap_or_else(|| controller.state());

    if state.is_error() {
        cli_output::print_state(&state);
        return ExitCode::FAILURE;
    }
    print_lists(controller);
    ExitCode::SUCCESS
}

async fn run_watch(controller: &InfoStateController) -> Result<ExitCode> {
    let mut states = controller.subscribe_state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut keyword: Option<String> = None;

    cli_output::print_header("SMOGWATCH");
    cli_output::print_state(&controller.state());

    loop {
        tokio::select! {
            state = states.next() => {
                let Some(state) = state else { break };
                if state == ListState::ShowAll {
                    keyword = None;
                }
                render(controller, &state, keyword.as_deref());
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match WatchCommand::parse(&line) {
                    WatchCommand::Refresh => {
                        controller.refresh();
                    }
                    WatchCommand::Search(kw) => {
                        let records = all_records(controller);
                        let count = search::search(&records, &kw).len();
                        controller.filter(true, count, &kw);
                        keyword = Some(kw);
                    }
                    WatchCommand::Collapse => {
                        keyword = None;
                        controller.filter(false, 0, "");
                    }
                    WatchCommand::List => render(controller, &controller.state(), keyword.as_deref()),
                    WatchCommand::Help => println!("{}", USAGE),
                    WatchCommand::Quit => break,
                    WatchCommand::Empty => {}
                    WatchCommand::Unknown(command) => cli_output::print_step_line(
                        icons::WARNING,
                        &format!("Unknown command '{}' (h for help)", command),
                    ),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn all_records(controller: &InfoStateController) -> Vec<Record> {
    let mut records = controller.high_records().unwrap_or_default();
    records.extend(controller.low_records().unwrap_or_default());
    records
}

fn print_lists(controller: &InfoStateController) {
    cli_output::print_records("HIGH PM2.5", &controller.high_records().unwrap_or_default());
    cli_output::print_records("LOW PM2.5", &controller.low_records().unwrap_or_default());
}

fn render(controller: &InfoStateController, state: &ListState, keyword: Option<&str>) {
    cli_output::print_state(state);
    match state {
        ListState::ShowAll => print_lists(controller),
        ListState::Found => {
            let records = all_records(controller);
            let matches = search::search(&records, keyword.unwrap_or_default());
            cli_output::print_records("MATCHES", matches);
        }
        _ => {}
    }
}
