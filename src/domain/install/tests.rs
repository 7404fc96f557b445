use super::*;

fn prompt() -> DeferredPrompt {
    DeferredPrompt {
        platforms: vec!["web".to_string()],
        offered_at: "2024-06-01T10:00:00Z".to_string(),
    }
}

fn all_prior_states() -> Vec<InstallState> {
    // Every state reachable through the public transitions.
    let mut states = vec![InstallState::default()];

    let mut offered = InstallState::default();
    offered.prompt_available(prompt());
    states.push(offered.clone());

    let mut installing = offered.clone();
    installing.start_installation();
    states.push(installing.clone());

    let mut installed = installing.clone();
    installed.complete_installation("2024-06-01T10:05:00Z".to_string());
    states.push(installed.clone());

    let mut cancelled = installing;
    cancelled.cancel_installation();
    states.push(cancelled);

    let mut reset_after_install = installed;
    reset_after_install.cancel_installation();
    states.push(reset_after_install);

    states
}

#[test]
fn complete_installation_holds_for_all_prior_states() {
    for mut state in all_prior_states() {
        state.complete_installation("2024-06-02T00:00:00Z".to_string());
        state.debug_invariant();
        assert!(state.is_installed());
        assert!(!state.is_installing());
        assert_eq!(state.install_date(), Some("2024-06-02T00:00:00Z"));
        assert!(!state.status().can_install);
        assert!(state.take_prompt().is_none());
    }
}

#[test]
fn cancel_from_installing_returns_to_initial_state() {
    let mut state = InstallState::default();
    state.start_installation();
    assert!(state.is_installing());

    state.cancel_installation();
    state.debug_invariant();
    assert_eq!(state, InstallState::default());
}

#[test]
fn invariant_holds_across_transition_sequences() {
    for mut state in all_prior_states() {
        state.start_installation();
        state.debug_invariant();
        state.prompt_available(prompt());
        state.debug_invariant();
        state.mark_running_standalone("2024-06-03T00:00:00Z".to_string());
        state.debug_invariant();
        state.cancel_installation();
        state.debug_invariant();
    }
}

#[test]
fn start_installation_is_a_noop_when_installed() {
    let mut state = InstallState::default();
    state.complete_installation("2024-06-01T00:00:00Z".to_string());

    state.start_installation();
    state.debug_invariant();
    assert!(state.is_installed());
    assert!(!state.is_installing());
}

#[test]
fn prompt_is_consumed_once() {
    let mut state = InstallState::default();
    state.prompt_available(prompt());
    assert!(state.status().can_install);
    assert_eq!(state.status().prompt_platforms, vec!["web".to_string()]);

    assert_eq!(state.take_prompt(), Some(prompt()));
    assert!(state.take_prompt().is_none());
}

#[test]
fn prompt_available_is_ignored_once_installed() {
    let mut state = InstallState::default();
    state.complete_installation("2024-06-01T00:00:00Z".to_string());

    state.prompt_available(prompt());
    assert!(!state.status().can_install);
    assert!(state.take_prompt().is_none());
}

#[test]
fn restore_never_yields_an_installing_state() {
    let state = InstallState::restore(true, Some("2024-05-01T00:00:00Z".to_string()));
    state.debug_invariant();
    assert!(state.is_installed());
    assert_eq!(state.install_date(), Some("2024-05-01T00:00:00Z"));

    // A stray date without the installed flag is dropped.
    let state = InstallState::restore(false, Some("2024-05-01T00:00:00Z".to_string()));
    assert!(!state.is_installed());
    assert_eq!(state.install_date(), None);
}

#[test]
fn mark_running_standalone_keeps_existing_date() {
    let mut state = InstallState::restore(true, Some("2024-05-01T00:00:00Z".to_string()));
    state.mark_running_standalone("2024-06-01T00:00:00Z".to_string());
    assert_eq!(state.install_date(), Some("2024-05-01T00:00:00Z"));

    let mut state = InstallState::default();
    state.mark_running_standalone("2024-06-01T00:00:00Z".to_string());
    assert_eq!(state.install_date(), Some("2024-06-01T00:00:00Z"));
}
