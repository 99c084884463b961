use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::nav::LoadConfig;

use super::service::{PanelService, ServiceFailure};

/// Where a template interaction started: the owning host/tab (reloaded
/// after creates and saves) and the panel's template controller base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOrigin {
    pub host: String,
    pub tab: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRequest {
    LoadPanel {
        host: String,
        tab: String,
        cnf: LoadConfig,
    },
    FetchTemplate {
        origin: TemplateOrigin,
        name: String,
    },
    CreateTemplate {
        origin: TemplateOrigin,
        name: String,
    },
    SaveTemplate {
        origin: TemplateOrigin,
        name: String,
        content: String,
        skip_validate: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome {
    PanelLoaded {
        host: String,
        tab: String,
        result: Result<String, ServiceFailure>,
    },
    Template(TemplateOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOutcome {
    Fetched {
        origin: TemplateOrigin,
        name: String,
        result: Result<String, ServiceFailure>,
    },
    Created {
        origin: TemplateOrigin,
        name: String,
        result: Result<(), ServiceFailure>,
    },
    Saved {
        origin: TemplateOrigin,
        name: String,
        content: String,
        skip_validate: bool,
        result: Result<(), ServiceFailure>,
    },
}

/// Issues service calls as independent tasks. Requests are forwarded
/// as-is: overlapping calls for the same resource run concurrently,
/// nothing is de-duplicated or cancelled, and outcomes arrive in
/// whatever order the service answers.
pub struct ServiceWorker {
    service: Arc<dyn PanelService>,
    result_tx: UnboundedSender<ServiceOutcome>,
    result_rx: UnboundedReceiver<ServiceOutcome>,
    tasks: Vec<JoinHandle<()>>,
    in_flight: usize,
}

impl ServiceWorker {
    pub fn spawn(service: Arc<dyn PanelService>) -> Self {
        let (result_tx, result_rx) = unbounded_channel();
        Self {
            service,
            result_tx,
            result_rx,
            tasks: Vec::new(),
            in_flight: 0,
        }
    }

    pub fn submit(&mut self, request: ServiceRequest) {
        let service = Arc::clone(&self.service);
        let result_tx = self.result_tx.clone();
        self.in_flight += 1;
        self.tasks.push(tokio::spawn(async move {
            let outcome = run_request(service.as_ref(), request).await;
            let _ = result_tx.send(outcome);
        }));
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight
    }

    pub async fn recv_result(&mut self) -> Option<ServiceOutcome> {
        let outcome = self.result_rx.recv().await;
        if outcome.is_some() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.tasks.retain(|task| !task.is_finished());
        }
        outcome
    }
}

impl Drop for ServiceWorker {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn run_request(service: &dyn PanelService, request: ServiceRequest) -> ServiceOutcome {
    match request {
        ServiceRequest::LoadPanel { host, tab, cnf } => {
            let result = service.fetch_panel(&cnf).await.map_err(Into::into);
            ServiceOutcome::PanelLoaded { host, tab, result }
        }
        ServiceRequest::FetchTemplate { origin, name } => {
            let result = service
                .get_template(&origin.base, &name)
                .await
                .map_err(Into::into);
            ServiceOutcome::Template(TemplateOutcome::Fetched {
                origin,
                name,
                result,
            })
        }
        ServiceRequest::CreateTemplate { origin, name } => {
            let result = service
                .create_template(&origin.base, &name)
                .await
                .map_err(Into::into);
            ServiceOutcome::Template(TemplateOutcome::Created {
                origin,
                name,
                result,
            })
        }
        ServiceRequest::SaveTemplate {
            origin,
            name,
            content,
            skip_validate,
        } => {
            let result = service
                .set_template(&origin.base, &name, &content, skip_validate)
                .await
                .map_err(Into::into);
            ServiceOutcome::Template(TemplateOutcome::Saved {
                origin,
                name,
                content,
                skip_validate,
                result,
            })
        }
    }
}
