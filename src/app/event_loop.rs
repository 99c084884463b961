use std::sync::Arc;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::command::{ActionId, CommandOutcome};
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::template::{PanelService, ServiceOutcome, ServiceWorker};

use super::core::App;
use super::terminal_session::TerminalSession;

struct LoopRuntime {
    session: TerminalSession,
    worker: ServiceWorker,
    loop_tx: UnboundedSender<DomainEvent>,
    loop_rx: UnboundedReceiver<DomainEvent>,
    input_pump: InputPump,
}

/// Forwards terminal events into the domain-event channel.
struct InputPump {
    task: JoinHandle<()>,
}

impl InputPump {
    fn spawn(tx: UnboundedSender<DomainEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut input_stream = EventStream::new();
            while let Some(event) = input_stream.next().await {
                let domain = match event {
                    Ok(event) => DomainEvent::Input(event),
                    Err(err) => DomainEvent::InputError(err.to_string()),
                };
                if tx.send(domain).is_err() {
                    return;
                }
            }
        });
        Self { task }
    }

    fn shutdown(&mut self) {
        self.task.abort();
    }
}

enum WaitEvent {
    Event(DomainEvent),
    Service(ServiceOutcome),
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self, service: Arc<dyn PanelService>) -> AppResult<()> {
        let mut runtime = self.initialize_loop_runtime(service)?;
        // Startup work queued during construction: the safeguard echo
        // and the initial panel loads.
        self.after_mutation(&mut runtime);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                self.render_frame(&mut runtime.session)?;
                needs_redraw = false;
            }

            let waited = wait_next_event(&mut runtime.loop_rx, &mut runtime.worker).await;
            match self.handle_waited_event(waited, &mut runtime, &mut needs_redraw) {
                LoopControl::Continue => {}
                LoopControl::Break => break,
            }
        }

        runtime.input_pump.shutdown();
        runtime.session.restore()?;
        Ok(())
    }

    fn initialize_loop_runtime(&mut self, service: Arc<dyn PanelService>) -> AppResult<LoopRuntime> {
        let session = TerminalSession::enter()?;
        let worker = ServiceWorker::spawn(service);
        let (loop_tx, loop_rx) = unbounded_channel();
        let input_pump = InputPump::spawn(loop_tx.clone());
        Ok(LoopRuntime {
            session,
            worker,
            loop_tx,
            loop_rx,
            input_pump,
        })
    }

    fn handle_waited_event(
        &mut self,
        waited: WaitEvent,
        runtime: &mut LoopRuntime,
        needs_redraw: &mut bool,
    ) -> LoopControl {
        match waited {
            WaitEvent::Event(DomainEvent::Input(event)) => {
                let outcome = self.handle_input_event(event);
                if outcome.redraw {
                    *needs_redraw = true;
                }
                for command in outcome.commands {
                    let _ = runtime.loop_tx.send(DomainEvent::Command(command));
                }
            }
            WaitEvent::Event(DomainEvent::InputError(message)) => {
                self.state.status.last_action_id = Some(ActionId::Input);
                self.state.status.message = format!("input error: {message}");
                *needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::Command(command)) => {
                let outcome = self.dispatch_command(command);
                if outcome == CommandOutcome::QuitRequested {
                    return LoopControl::Break;
                }
                self.after_mutation(runtime);
                *needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::App(event)) => {
                self.deliver_app_event(&event);
                self.after_mutation(runtime);
                *needs_redraw = true;
            }
            WaitEvent::Service(outcome) => {
                if let Some(event) = self.apply_service_outcome(outcome) {
                    let _ = runtime.loop_tx.send(DomainEvent::App(event));
                }
                self.after_mutation(runtime);
                *needs_redraw = true;
            }
            WaitEvent::Closed => return LoopControl::Break,
        }
        LoopControl::Continue
    }

    /// Settle everything a mutation may have queued: record/replay tab
    /// changes, forward app events to extensions, hand service requests
    /// to the worker, and re-derive the mode.
    fn after_mutation(&mut self, runtime: &mut LoopRuntime) {
        for event in self.pump_events() {
            let _ = runtime.loop_tx.send(DomainEvent::App(event));
        }
        for request in self.pump_requests() {
            runtime.worker.submit(request);
        }
        self.state.in_flight_requests = runtime.worker.in_flight_len();
        self.sync_mode();
    }
}

async fn wait_next_event(
    loop_rx: &mut UnboundedReceiver<DomainEvent>,
    worker: &mut ServiceWorker,
) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_event = loop_rx.recv() => {
            match maybe_event {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        maybe_outcome = worker.recv_result() => {
            match maybe_outcome {
                Some(outcome) => WaitEvent::Service(outcome),
                None => WaitEvent::Closed,
            }
        },
    }
}
