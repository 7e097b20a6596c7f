use portfolio_core::{fallback_welcome, update, AppState, Effect, Msg, Role};

#[test]
fn started_requests_health_probe() {
    let (state, effects) = update(AppState::new(), Msg::Started);
    assert_eq!(effects, vec![Effect::ProbeHealth]);
    assert!(state.transcript().is_empty());
}

#[test]
fn loaded_sections_produce_welcome() {
    let (state, effects) = update(
        AppState::new(),
        Msg::HealthLoaded {
            sections: vec![
                "01_education.md".to_string(),
                "02_work_experience.txt".to_string(),
            ],
        },
    );

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::AppendMessage { role, text } => {
            assert_eq!(*role, Role::Bot);
            assert!(text.contains("education, work experience"), "{text}");
        }
        other => panic!("unexpected effect {other:?}"),
    }
    let view = state.view();
    assert_eq!(view.sections.len(), 2);
    assert_eq!(view.diagnostic, None);
}

#[test]
fn failed_probe_shows_reason_and_fallback() {
    let (state, effects) = update(
        AppState::new(),
        Msg::HealthFailed {
            reason: "http status 503".to_string(),
        },
    );

    let diagnostic = state.view().diagnostic.expect("diagnostic");
    assert!(diagnostic.contains("http status 503"));
    assert_eq!(
        effects[0],
        Effect::ShowDiagnostic("health check failed: http status 503".to_string())
    );
    assert_eq!(
        effects[1],
        Effect::AppendMessage {
            role: Role::Bot,
            text: diagnostic.clone(),
        }
    );
    assert_eq!(
        effects[2],
        Effect::AppendMessage {
            role: Role::Bot,
            text: fallback_welcome(),
        }
    );
    assert_eq!(state.transcript().len(), 2);
}
