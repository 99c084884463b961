mod config_init;
mod editor_flow;

use crate::config::{Config, TabConfig};

pub(crate) fn workbench_config() -> Config {
    let mut config = Config::default();
    config.workspace.host_id = "main-tabs".to_string();
    config.workspace.load_target = "home".to_string();
    config.workspace.tabs = vec![
        TabConfig {
            id: "home".to_string(),
            title: "Home".to_string(),
            path: "/panel/home".to_string(),
            template_base: None,
        },
        TabConfig {
            id: "reports".to_string(),
            title: "Reports".to_string(),
            path: "/panel/reports".to_string(),
            template_base: Some("/tpl".to_string()),
        },
        TabConfig {
            id: "audit".to_string(),
            title: "Audit".to_string(),
            path: "/panel/audit".to_string(),
            template_base: None,
        },
    ];
    config
}
