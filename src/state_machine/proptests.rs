//! Property-based tests for the chat lifecycle
//!
//! These tests verify key invariants hold across all event sequences.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![
        Just(ChatState::Idle),
        Just(ChatState::Loading),
        Just(ChatState::Streaming),
        Just(ChatState::Error),
    ]
}

fn arb_busy_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![Just(ChatState::Loading), Just(ChatState::Streaming)]
}

fn arb_rest_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![Just(ChatState::Idle), Just(ChatState::Error)]
}

fn arb_event() -> impl Strategy<Value = ChatEvent> {
    prop_oneof![
        Just(ChatEvent::Submit),
        Just(ChatEvent::Delta),
        Just(ChatEvent::Completed),
        Just(ChatEvent::Failed),
        Just(ChatEvent::Reset),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Error is only ever entered from a busy state
    #[test]
    fn prop_error_only_reached_through_busy_state(
        events in proptest::collection::vec(arb_event(), 0..30)
    ) {
        let mut state = ChatState::Idle;
        for event in events {
            if let Ok(next) = transition(state, event) {
                if next == ChatState::Error && state != ChatState::Error {
                    prop_assert!(state.is_busy(), "Reached error from {:?}", state);
                }
                state = next;
            }
        }
    }

    // Streaming is only entered from a busy state via Delta
    #[test]
    fn prop_streaming_requires_delta(state in arb_state(), event in arb_event()) {
        if let Ok(ChatState::Streaming) = transition(state, event) {
            prop_assert_eq!(event, ChatEvent::Delta);
            prop_assert!(state.is_busy());
        }
    }

    // A rejected event is reported, never silently turned into a new state
    #[test]
    fn prop_busy_rejects_submit_and_reset(state in arb_busy_state()) {
        prop_assert_eq!(
            transition(state, ChatEvent::Submit),
            Err(TransitionError::Busy(state))
        );
        prop_assert_eq!(
            transition(state, ChatEvent::Reset),
            Err(TransitionError::Busy(state))
        );
    }

    #[test]
    fn prop_rest_states_accept_submit_and_reset(state in arb_rest_state()) {
        prop_assert_eq!(transition(state, ChatEvent::Submit), Ok(ChatState::Loading));
        prop_assert_eq!(transition(state, ChatEvent::Reset), Ok(ChatState::Idle));
    }

    // Stream events only make sense while a send is in flight
    #[test]
    fn prop_stream_events_require_busy_state(
        state in arb_rest_state(),
        event in prop_oneof![
            Just(ChatEvent::Delta),
            Just(ChatEvent::Completed),
            Just(ChatEvent::Failed),
        ]
    ) {
        let is_invalid = matches!(
            transition(state, event),
            Err(TransitionError::InvalidTransition { .. })
        );
        prop_assert!(is_invalid);
    }

    // Any number of deltas keeps a send streaming, and it always settles
    #[test]
    fn prop_exchange_always_settles(deltas in 0usize..20, fails in any::<bool>()) {
        let mut state = transition(ChatState::Idle, ChatEvent::Submit).unwrap();
        for _ in 0..deltas {
            state = transition(state, ChatEvent::Delta).unwrap();
            prop_assert_eq!(state, ChatState::Streaming);
        }
        let end = if fails { ChatEvent::Failed } else { ChatEvent::Completed };
        state = transition(state, end).unwrap();
        prop_assert!(!state.is_busy());
        prop_assert_eq!(state == ChatState::Error, fails);
    }
}
