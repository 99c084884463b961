use crate::app::{App, Mode};
use crate::command::Command;
use crate::template::{
    ServiceFailure, ServiceOutcome, ServiceRequest, TemplateOrigin, TemplateOutcome,
    VALIDATION_REJECTED_STATUS,
};

use super::workbench_config;

fn origin() -> TemplateOrigin {
    TemplateOrigin {
        host: "main-tabs".to_string(),
        tab: "reports".to_string(),
        base: "/tpl".to_string(),
    }
}

fn deliver_template_outcome(app: &mut App, outcome: TemplateOutcome) {
    let event = app
        .apply_service_outcome(ServiceOutcome::Template(outcome))
        .expect("template outcomes become app events");
    app.deliver_app_event(&event);
    app.sync_mode();
}

#[test]
fn edit_flow_fetches_then_opens_the_editor() {
    let mut app = App::new_with_config(workbench_config());
    app.pump_events();
    app.pump_requests();

    app.dispatch_command(Command::EditTemplate {
        origin: origin(),
        name: "site/\r\nheader".to_string(),
    });
    let requests = app.pump_requests();
    assert_eq!(
        requests,
        vec![ServiceRequest::FetchTemplate {
            origin: origin(),
            name: "site/header".to_string(),
        }]
    );

    deliver_template_outcome(
        &mut app,
        TemplateOutcome::Fetched {
            origin: origin(),
            name: "site/header".to_string(),
            result: Ok("hello {{ name }}".to_string()),
        },
    );

    assert_eq!(app.state.mode, Mode::Editor);
    let editor = app
        .interaction
        .extensions
        .editor()
        .expect("editor should be open");
    assert_eq!(editor.name, "site/header");
    assert_eq!(editor.buffer.contents(), "hello {{ name }}");
}

#[test]
fn create_flow_reloads_the_tab_then_continues_into_edit() {
    let mut app = App::new_with_config(workbench_config());
    app.pump_events();
    app.pump_requests();

    app.dispatch_command(Command::CreateTemplate {
        origin: origin(),
        name: "footer".to_string(),
    });
    app.pump_requests();

    deliver_template_outcome(
        &mut app,
        TemplateOutcome::Created {
            origin: origin(),
            name: "footer".to_string(),
            result: Ok(()),
        },
    );

    let requests = app.pump_requests();
    assert_eq!(requests.len(), 2);
    assert!(matches!(
        &requests[0],
        ServiceRequest::LoadPanel { tab, .. } if tab == "reports"
    ));
    assert!(matches!(
        &requests[1],
        ServiceRequest::FetchTemplate { name, .. } if name == "footer"
    ));
    // The reload's internal activation is not a recorded navigation.
    app.pump_events();
    assert_eq!(app.history.stack.entry_count(), 2);
}

#[test]
fn save_rejection_round_trip_resubmits_once_with_skip_validate() {
    let mut app = App::new_with_config(workbench_config());
    app.pump_events();
    app.pump_requests();

    deliver_template_outcome(
        &mut app,
        TemplateOutcome::Fetched {
            origin: origin(),
            name: "header".to_string(),
            result: Ok("original".to_string()),
        },
    );

    app.dispatch_command(Command::SubmitEditor);
    let requests = app.pump_requests();
    assert!(matches!(
        &requests[0],
        ServiceRequest::SaveTemplate { skip_validate, .. } if !skip_validate
    ));

    deliver_template_outcome(
        &mut app,
        TemplateOutcome::Saved {
            origin: origin(),
            name: "header".to_string(),
            content: "original".to_string(),
            skip_validate: false,
            result: Err(ServiceFailure::Rejected {
                status: VALIDATION_REJECTED_STATUS,
                message: "unknown tag".to_string(),
            }),
        },
    );
    assert_eq!(app.state.mode, Mode::Dialog);

    app.dispatch_command(Command::ConfirmDialog);
    app.sync_mode();
    let resubmits = app.pump_requests();
    assert_eq!(resubmits.len(), 1);
    assert!(matches!(
        &resubmits[0],
        ServiceRequest::SaveTemplate { content, skip_validate, .. }
            if content == "original" && *skip_validate
    ));
    assert_eq!(app.state.mode, Mode::Editor);
}

#[test]
fn save_success_closes_the_editor_and_reloads_the_owning_tab() {
    let mut app = App::new_with_config(workbench_config());
    app.pump_events();
    app.pump_requests();

    deliver_template_outcome(
        &mut app,
        TemplateOutcome::Fetched {
            origin: origin(),
            name: "header".to_string(),
            result: Ok("body".to_string()),
        },
    );

    deliver_template_outcome(
        &mut app,
        TemplateOutcome::Saved {
            origin: origin(),
            name: "header".to_string(),
            content: "body".to_string(),
            skip_validate: false,
            result: Ok(()),
        },
    );

    assert_eq!(app.state.mode, Mode::Normal);
    let requests = app.pump_requests();
    assert_eq!(requests.len(), 1);
    assert!(matches!(
        &requests[0],
        ServiceRequest::LoadPanel { tab, .. } if tab == "reports"
    ));
}
