use std::collections::VecDeque;

use crate::config::{TabConfig, WorkspaceConfig};
use crate::template::{ServiceRequest, parse_panel};

use super::tabs::{PanelBody, TabChange, TabEntry, TabHost};
use super::{NavAdapter, NavTargets};

/// One panel-load request, retained per tab as its declarative reload
/// configuration. `url` is a service-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// Side effects requested by extensions, applied by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceRequest {
    ReloadTab { host: String, tab: String },
}

/// The component tree: tab hosts plus the pending panel loads they have
/// requested. Doubles as the nav-target registry the history
/// coordinator resolves component ids against.
pub struct Workspace {
    hosts: Vec<TabHost>,
    load_target: String,
    pending_loads: VecDeque<ServiceRequest>,
}

impl Workspace {
    pub fn from_config(cfg: &WorkspaceConfig) -> Self {
        let mut host = TabHost::new(&cfg.host_id);
        let mut pending_loads = VecDeque::new();
        for tab in &cfg.tabs {
            host.push_tab(tab_entry(tab));
            pending_loads.push_back(ServiceRequest::LoadPanel {
                host: cfg.host_id.clone(),
                tab: tab.id.clone(),
                cnf: load_config(tab),
            });
        }
        Self {
            hosts: vec![host],
            load_target: cfg.load_target.clone(),
            pending_loads,
        }
    }

    pub fn hosts(&self) -> &[TabHost] {
        &self.hosts
    }

    pub fn host(&self, id: &str) -> Option<&TabHost> {
        self.hosts.iter().find(|host| host.id() == id)
    }

    pub fn host_mut(&mut self, id: &str) -> Option<&mut TabHost> {
        self.hosts.iter_mut().find(|host| host.id() == id)
    }

    pub fn main_host(&self) -> Option<&TabHost> {
        self.hosts.first()
    }

    pub fn main_host_mut(&mut self) -> Option<&mut TabHost> {
        self.hosts.first_mut()
    }

    pub fn load_target(&self) -> &str {
        &self.load_target
    }

    pub fn drain_tab_changes(&mut self) -> Vec<TabChange> {
        let mut changes = Vec::new();
        for host in &mut self.hosts {
            changes.extend(host.drain_changes());
        }
        changes
    }

    pub fn drain_load_requests(&mut self) -> Vec<ServiceRequest> {
        self.pending_loads.drain(..).collect()
    }

    /// Fill a tab body from a completed panel fetch.
    pub fn fill_tab(&mut self, host_id: &str, tab_id: &str, result: Result<String, String>) {
        let Some(tab) = self
            .host_mut(host_id)
            .and_then(|host| host.tab_mut(tab_id))
        else {
            return;
        };
        tab.body = match result {
            Ok(raw) => PanelBody::Ready(parse_panel(&raw)),
            Err(message) => PanelBody::Failed(message),
        };
    }

    /// Remove-and-recreate a tab from its retained load configuration.
    /// Tabs without one cannot be reloaded declaratively. The recreated
    /// tab is activated internally; a reload is not a navigation.
    pub fn reload_tab(&mut self, host_id: &str, tab_id: &str) -> bool {
        let Some(host) = self.host_mut(host_id) else {
            return false;
        };
        let (cnf, title, template_base) = {
            let Some(existing) = host.tab(tab_id) else {
                return false;
            };
            let Some(cnf) = existing.load_cnf.clone() else {
                return false;
            };
            (cnf, existing.title.clone(), existing.template_base.clone())
        };
        host.remove_tab(tab_id);
        host.push_tab(TabEntry {
            id: tab_id.to_string(),
            title,
            load_cnf: Some(cnf.clone()),
            template_base,
            body: PanelBody::Loading,
        });
        host.activate_internal(tab_id);
        self.pending_loads.push_back(ServiceRequest::LoadPanel {
            host: host_id.to_string(),
            tab: tab_id.to_string(),
            cnf,
        });
        true
    }

    /// Dispatch a location load into the configured load-target tab.
    pub fn load_into_target(&mut self, cnf: LoadConfig) -> bool {
        let target = self.load_target.clone();
        let Some(host) = self
            .hosts
            .iter_mut()
            .find(|host| host.tab(&target).is_some())
        else {
            return false;
        };
        let host_id = host.id().to_string();
        {
            let tab = host.tab_mut(&target).expect("target tab was just found");
            tab.load_cnf = Some(cnf.clone());
            tab.body = PanelBody::Loading;
        }
        host.activate_internal(&target);
        self.pending_loads.push_back(ServiceRequest::LoadPanel {
            host: host_id,
            tab: target,
            cnf,
        });
        true
    }
}

impl NavTargets for Workspace {
    fn nav_target_mut(&mut self, id: &str) -> Option<&mut dyn NavAdapter> {
        self.hosts
            .iter_mut()
            .find(|host| host.id() == id)
            .map(|host| host as &mut dyn NavAdapter)
    }
}

fn tab_entry(cfg: &TabConfig) -> TabEntry {
    TabEntry {
        id: cfg.id.clone(),
        title: cfg.title.clone(),
        load_cnf: Some(load_config(cfg)),
        template_base: cfg.template_base.clone(),
        body: PanelBody::Loading,
    }
}

fn load_config(cfg: &TabConfig) -> LoadConfig {
    LoadConfig {
        url: cfg.path.clone(),
        params: Vec::new(),
    }
}
