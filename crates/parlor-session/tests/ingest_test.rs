use parlor_session::ReplyAccumulator;
use parlor_types::{Conversation, Message, Role};

fn conversation_with_question() -> Conversation {
    let mut conversation = Conversation::new(1, "Chat Room 1");
    conversation.messages.push(Message::user("question"));
    conversation
}

#[test]
fn test_first_chunk_appends_then_later_chunks_rewrite() {
    let mut conversation = conversation_with_question();
    let mut reply = ReplyAccumulator::new();

    reply.apply(&mut conversation, "Hel");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1].role, Role::Assistant);
    assert_eq!(conversation.messages[1].content, "Hel");

    reply.apply(&mut conversation, "lo wor");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1].content, "Hello wor");

    reply.apply(&mut conversation, "ld");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1].content, "Hello world");
    assert_eq!(reply.text(), "Hello world");
}

#[test]
fn test_single_chunk_reply() {
    let mut conversation = conversation_with_question();
    let mut reply = ReplyAccumulator::new();

    reply.apply(&mut conversation, "Hello world");

    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1].content, "Hello world");
}

#[test]
fn test_final_content_is_chunking_invariant() {
    let chunkings: Vec<Vec<&str>> = vec![
        vec!["Hello world"],
        vec!["Hel", "lo wor", "ld"],
        vec!["H", "e", "l", "l", "o", " ", "w", "o", "r", "l", "d"],
    ];

    for chunks in chunkings {
        let mut conversation = conversation_with_question();
        let mut reply = ReplyAccumulator::new();
        for chunk in chunks {
            reply.apply(&mut conversation, chunk);
        }

        assert_eq!(conversation.messages.last().unwrap().content, "Hello world");
    }
}

#[test]
fn test_empty_chunks_are_ignored() {
    let mut conversation = conversation_with_question();
    let mut reply = ReplyAccumulator::new();

    reply.apply(&mut conversation, "");
    assert!(reply.is_empty());
    assert_eq!(conversation.messages.len(), 1);

    reply.apply(&mut conversation, "Hi");
    reply.apply(&mut conversation, "");
    assert_eq!(conversation.messages.len(), 2);
    assert_eq!(conversation.messages[1].content, "Hi");
}

#[test]
fn test_accumulator_starts_empty() {
    let reply = ReplyAccumulator::new();
    assert!(reply.is_empty());
    assert_eq!(reply.text(), "");
}
