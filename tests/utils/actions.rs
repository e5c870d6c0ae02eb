//! Gateway event helpers - what a messaging platform would deliver
#![allow(dead_code)] // Test utilities may not all be used in every test

use rpsduel::{engine::Control, GatewayEvent, RenderInstruction, Variant};

use super::setup::TestSetup;

/// Starts a match through the dispatcher and returns its ID
pub async fn start_match(setup: &TestSetup, variant: Variant) -> String {
    let render = setup
        .dispatcher
        .dispatch(GatewayEvent::QueryStarted {
            query: String::new(),
            variant: Some(variant),
        })
        .await;

    match render.control {
        Some(Control::MoveSelection { match_id, .. }) => match_id,
        other => panic!("Expected move selection control, got {:?}", other),
    }
}

/// Builds the event for a participant pressing a move button
pub fn choice_event(match_id: &str, participant_id: &str, move_token: &str) -> GatewayEvent {
    GatewayEvent::ChoiceSubmitted {
        match_id: match_id.to_string(),
        participant_id: participant_id.to_string(),
        participant_name: display_name(participant_id),
        move_token: move_token.to_string(),
    }
}

/// Submits a move and returns what the gateway should render
pub async fn choose(
    setup: &TestSetup,
    match_id: &str,
    participant_id: &str,
    move_token: &str,
) -> RenderInstruction {
    setup
        .dispatcher
        .dispatch(choice_event(match_id, participant_id, move_token))
        .await
}

/// Display name used for a participant ID in tests ("alice" -> "Alice")
pub fn display_name(participant_id: &str) -> String {
    let mut chars = participant_id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
