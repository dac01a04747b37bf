use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use counterdeck::cli::{Cli, Command};
use counterdeck::controller::{Controller, ControllerOptions};
use counterdeck::gateway::{CounterGateway, HttpGateway, MemoryGateway};
use counterdeck::logging::{init_tracing, Fallback};
use counterdeck::ui::counter::Action;
use counterdeck::ui::runtime::{self, RuntimeOptions};

/// Simulated round trip for the offline counter in the terminal UI.
const OFFLINE_LATENCY: Duration = Duration::from_millis(300);

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.load_config().context("Failed to load configuration")?;
    let command = cli.command();

    let fallback = match command {
        Command::Ui => Fallback::Silent,
        _ => Fallback::Stderr,
    };
    init_tracing(&config.logging, fallback);

    let options = ControllerOptions::from_config(&config);
    let frame_interval = config.ui.frame_interval();

    if cli.offline {
        let gateway = match command {
            Command::Ui => MemoryGateway::new().with_latency(OFFLINE_LATENCY),
            _ => MemoryGateway::new(),
        };
        let controller = Controller::new(gateway, options);
        return dispatch(controller, command, frame_interval, "offline".to_string());
    }

    let gateway = HttpGateway::new(&config.gateway).context("Failed to build HTTP client")?;
    let source = gateway.base_url().to_string();
    let controller = Controller::new(gateway, options);
    dispatch(controller, command, frame_interval, source)
}

fn dispatch<G: CounterGateway>(
    controller: Controller<G>,
    command: Command,
    frame_interval: Duration,
    source: String,
) -> anyhow::Result<ExitCode> {
    match command.action() {
        None => {
            runtime::run(
                Arc::new(controller),
                RuntimeOptions {
                    frame_interval,
                    source,
                },
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Some(action) => one_shot(controller, action),
    }
}

fn one_shot<G: CounterGateway>(controller: Controller<G>, action: Action) -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let succeeded = runtime.block_on(controller.perform(action));

    let state = controller.snapshot();
    if let Some(value) = state.value {
        println!("{value}");
    }
    if let Some(message) = &state.message {
        if message.is_failure() {
            eprintln!("{}", message.text);
        } else {
            println!("{}", message.text);
        }
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
