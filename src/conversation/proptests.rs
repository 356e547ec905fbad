//! Property-based tests for the conversation store
//!
//! A random mix of operations is applied to a store and to a plain model
//! of the expected transcript, and the two are compared after every step.

use super::*;
use crate::llm::MessageRole;
use crate::state_machine::ChatState;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    User(String),
    Placeholder,
    /// Update the n-th entry (modulo length) with new content
    Update(usize, String),
    SetLifecycle(ChatState),
    Reset,
}

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![
        Just(ChatState::Idle),
        Just(ChatState::Loading),
        Just(ChatState::Streaming),
        Just(ChatState::Error),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ?!]{1,40}",
        Just(String::new()),
        "[ \t\n]{1,5}",
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_text().prop_map(Op::User),
        2 => Just(Op::Placeholder),
        3 => (any::<usize>(), "[a-zA-Z ]{0,30}").prop_map(|(i, s)| Op::Update(i, s)),
        2 => arb_state().prop_map(Op::SetLifecycle),
        1 => Just(Op::Reset),
    ]
}

/// Expected transcript entry: id, role, content
type Expected = (String, MessageRole, String);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Length is appends-since-reset plus the seed, in call order
    #[test]
    fn prop_transcript_matches_model(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let mut store = ConversationStore::new();
        let seed = store.seed().clone();
        let mut expected: Vec<Expected> =
            vec![(seed.id.clone(), seed.role, seed.content.clone())];

        for op in ops {
            match op {
                Op::User(text) => {
                    let accepted =
                        !text.trim().is_empty() && !store.lifecycle().is_busy();
                    match store.append_user_message(&text) {
                        Ok(id) => {
                            prop_assert!(accepted);
                            expected.push((id, MessageRole::User, text));
                        }
                        Err(_) => prop_assert!(!accepted),
                    }
                }
                Op::Placeholder => {
                    let id = store.append_placeholder_response();
                    expected.push((id, MessageRole::Assistant, String::new()));
                }
                Op::Update(index, content) => {
                    let target = index % expected.len();
                    let writable = target != 0
                        && expected[target].1 == MessageRole::Assistant
                        && store.lifecycle().is_busy();
                    let id = expected[target].0.clone();
                    prop_assert_eq!(store.update_message_content(&id, &content), writable);
                    if writable {
                        expected[target].2 = content;
                    }
                }
                Op::SetLifecycle(state) => store.set_lifecycle(state),
                Op::Reset => {
                    store.reset();
                    expected.truncate(1);
                    prop_assert_eq!(store.messages(), std::slice::from_ref(&seed));
                    prop_assert_eq!(store.lifecycle(), ChatState::Idle);
                }
            }

            let actual: Vec<Expected> = store
                .messages()
                .iter()
                .map(|m| (m.id.clone(), m.role, m.content.clone()))
                .collect();
            prop_assert_eq!(&actual, &expected);
        }
    }

    // Two updates in a row leave the second value and touch nothing else
    #[test]
    fn prop_last_update_wins(
        prefix in proptest::collection::vec("[a-z]{1,10}", 0..5),
        first in "[a-zA-Z ]{0,20}",
        second in "[a-zA-Z ]{0,20}",
    ) {
        let mut store = ConversationStore::new();
        for text in &prefix {
            store.append_user_message(text).unwrap();
            store.append_placeholder_response();
        }
        store.append_user_message("target question").unwrap();
        let id = store.append_placeholder_response();
        store.set_lifecycle(ChatState::Streaming);
        let before: Vec<Message> = store.messages().to_vec();

        store.update_message_content(&id, &first);
        store.update_message_content(&id, &second);

        let after = store.messages();
        prop_assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after) {
            if old.id == id {
                prop_assert_eq!(&new.content, &second);
                prop_assert_eq!(new.role, old.role);
                prop_assert_eq!(new.timestamp, old.timestamp);
            } else {
                prop_assert_eq!(old, new);
            }
        }
    }
}
