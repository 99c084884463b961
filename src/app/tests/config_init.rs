use crate::app::App;
use crate::template::ServiceRequest;

use super::workbench_config;

#[test]
fn new_with_config_builds_the_workspace_and_installs_the_safeguard() {
    let mut app = App::new_with_config(workbench_config());

    assert_eq!(app.history.stack.current(), "0");
    assert_eq!(app.history.coordinator.current_token(), "0");
    assert_eq!(app.history.coordinator.nav_idx(), 0);

    let host = app.workspace.main_host().expect("main host should exist");
    assert_eq!(host.id(), "main-tabs");
    assert_eq!(host.tabs().len(), 3);

    let loads = app.pump_requests();
    assert_eq!(loads.len(), 3);
    assert!(loads.iter().all(|request| matches!(
        request,
        ServiceRequest::LoadPanel { host, .. } if host == "main-tabs"
    )));
}

#[test]
fn history_capacity_comes_from_the_config() {
    let mut config = workbench_config();
    config.history.max_entries = 3;
    let mut app = App::new_with_config(config);
    app.pump_events();

    for index in [1, 2, 1, 2] {
        app.dispatch_command(crate::command::Command::SelectTab { index });
        app.pump_events();
    }

    assert_eq!(app.history.stack.entry_count(), 3);
}
