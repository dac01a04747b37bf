use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use crate::controller::Controller;
use crate::gateway::CounterGateway;
use crate::lifecycle::StopSignal;
use crate::ui::counter::Action;
use crate::ui::events::{AppEvent, ChannelObserver, EventHandler};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::render::{draw, ViewModel};
use crate::ui::terminal_guard::{setup_terminal, CounterTerminal};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// Redraw period when nothing else happens.
    pub frame_interval: Duration,
    /// Shown in the header: the service URL or "offline".
    pub source: String,
}

/// Drive the terminal UI until the user quits.
///
/// Owns a Tokio runtime for the controller's remote calls and decay timer.
/// The controller is started on entry and stopped on exit.
pub fn run<G: CounterGateway>(
    controller: Arc<Controller<G>>,
    options: RuntimeOptions,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let input_stop = StopSignal::new();
    let events = EventHandler::new(options.frame_interval, input_stop.clone());
    controller.subscribe(ChannelObserver::new(events.sender()));

    let (mut terminal, guard) = setup_terminal()?;

    let action_in_flight = Arc::new(AtomicBool::new(true));
    {
        let controller = Arc::clone(&controller);
        let in_flight = Arc::clone(&action_in_flight);
        runtime.spawn(async move {
            controller.start().await;
            in_flight.store(false, Ordering::SeqCst);
        });
    }

    let result = event_loop(&runtime, &controller, &events, &mut terminal, &action_in_flight, &options);

    controller.stop();
    input_stop.stop();
    guard.restore();
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    tracing::info!("Terminal UI exited");
    result
}

fn event_loop<G: CounterGateway>(
    runtime: &tokio::runtime::Runtime,
    controller: &Arc<Controller<G>>,
    events: &EventHandler,
    terminal: &mut CounterTerminal,
    action_in_flight: &Arc<AtomicBool>,
    options: &RuntimeOptions,
) -> anyhow::Result<()> {
    loop {
        let view = ViewModel::capture(controller, &options.source);
        terminal.draw(|frame| draw(frame, &view))?;

        match events.next(options.frame_interval) {
            Ok(AppEvent::Key(key)) => match handle_key(key, &view.counter) {
                InputAction::Quit => return Ok(()),
                InputAction::Perform(action) => {
                    spawn_action(runtime, controller, action_in_flight, action);
                }
                InputAction::ChangeTheme => {
                    controller.change_theme();
                }
                InputAction::None => {}
            },
            Ok(AppEvent::Tick | AppEvent::Resize(..) | AppEvent::StateChanged) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

/// Start `action` unless one launched from this loop is still running.
///
/// The snapshot used for key handling can lag the spawned task by a frame,
/// so the flag closes the gap before `busy` is set.
fn spawn_action<G: CounterGateway>(
    runtime: &tokio::runtime::Runtime,
    controller: &Arc<Controller<G>>,
    action_in_flight: &Arc<AtomicBool>,
    action: Action,
) {
    if action_in_flight.swap(true, Ordering::SeqCst) {
        tracing::debug!(action = action.label(), "Action already in flight");
        return;
    }
    let controller = Arc::clone(controller);
    let in_flight = Arc::clone(action_in_flight);
    runtime.spawn(async move {
        controller.perform(action).await;
        in_flight.store(false, Ordering::SeqCst);
    });
}
