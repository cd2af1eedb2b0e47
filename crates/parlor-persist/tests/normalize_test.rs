use parlor_persist::{normalize_conversation, normalize_history, Loaded};
use parlor_types::{ChatModel, Role};
use serde_json::json;

#[test]
fn test_well_formed_conversation_is_valid() {
    let value = json!({
        "id": 2,
        "name": "Chat Room 2",
        "messages": [
            { "role": "user", "content": "hi" },
            { "role": "assistant", "content": "hello" }
        ],
        "model": { "id": "gpt-4", "name": "GPT-4", "tokenLimit": 8192 }
    });

    let loaded = normalize_conversation(value);
    assert!(!loaded.was_repaired());

    let conversation = loaded.into_inner();
    assert_eq!(conversation.id, 2);
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.model.id, "gpt-4");
}

#[test]
fn test_missing_model_is_repaired_with_default() {
    let value = json!({
        "id": 1,
        "name": "Chat",
        "messages": []
    });

    let loaded = normalize_conversation(value);
    assert!(loaded.was_repaired());
    assert_eq!(loaded.into_inner().model, ChatModel::default());
}

#[test]
fn test_missing_messages_are_repaired_with_empty_list() {
    let value = json!({
        "id": 4,
        "name": "Old snapshot",
        "model": { "id": "gpt-4", "name": "GPT-4", "tokenLimit": 8192 }
    });

    let loaded = normalize_conversation(value);
    assert!(loaded.was_repaired());

    let conversation = loaded.into_inner();
    assert_eq!(conversation.id, 4);
    assert!(conversation.messages.is_empty());
}

#[test]
fn test_malformed_messages_are_coerced() {
    let value = json!({
        "id": 1,
        "name": "Chat",
        "messages": [
            { "role": "assistant" },
            { "content": "no role" },
            "not an object",
            { "role": "oracle", "content": "unknown role" }
        ]
    });

    let conversation = normalize_conversation(value).into_inner();

    // The string entry is dropped; everything object-shaped is kept.
    assert_eq!(conversation.messages.len(), 3);
    assert_eq!(conversation.messages[0].role, Role::Assistant);
    assert_eq!(conversation.messages[0].content, "");
    assert_eq!(conversation.messages[1].role, Role::User);
    assert_eq!(conversation.messages[1].content, "no role");
    // Unknown roles collapse to user.
    assert_eq!(conversation.messages[2].role, Role::User);
}

#[test]
fn test_extra_fields_from_old_schema_are_ignored() {
    // Earlier schema versions stored maxLength alongside tokenLimit.
    let value = json!({
        "id": 1,
        "name": "Chat",
        "messages": [],
        "model": { "id": "gpt-3.5-turbo", "name": "GPT-3.5", "maxLength": 12000, "tokenLimit": 4096 }
    });

    let loaded = normalize_conversation(value);
    assert!(!loaded.was_repaired());
    assert_eq!(loaded.into_inner().model.token_limit, 4096);
}

#[test]
fn test_history_round_trip_always_yields_model_and_messages() {
    let value = json!([
        { "id": 1, "name": "a", "messages": [], "model": { "id": "m", "name": "M", "tokenLimit": 1 } },
        { "id": 2, "name": "b" },
        { "id": 3 }
    ]);

    let loaded = normalize_history(value);
    assert_eq!(loaded.len(), 3);
    assert!(!loaded[0].was_repaired());
    assert!(loaded[1].was_repaired());
    assert!(loaded[2].was_repaired());

    for item in loaded {
        let conversation = item.into_inner();
        assert!(!conversation.model.id.is_empty());
        let json = serde_json::to_value(&conversation).unwrap();
        assert!(json["messages"].is_array());
    }
}

#[test]
fn test_non_array_history_normalizes_to_empty() {
    assert!(normalize_history(json!({"oops": true})).is_empty());
    assert!(normalize_history(json!(null)).is_empty());
}

#[test]
fn test_loaded_branch_accessors() {
    let valid = normalize_conversation(json!({
        "id": 1, "name": "x", "messages": [],
        "model": { "id": "m", "name": "M", "tokenLimit": 1 }
    }));
    let repaired = normalize_conversation(json!({ "id": 1, "name": "x" }));

    assert!(matches!(valid, Loaded::Valid(_)));
    assert!(matches!(repaired, Loaded::Repaired(_)));
}
