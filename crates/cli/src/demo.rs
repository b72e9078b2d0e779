//! Built-in demo conversation, used when no transcript file is given.

use sidetrack_core::ChatMessage;

pub fn demo_transcript() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("What is ownership in Rust?"),
        ChatMessage::assistant(
            "Ownership is Rust's core memory-management model. Every value has a \
             single owner, and when the owner goes out of scope the value is \
             dropped. Moving a value transfers ownership; copying is explicit for \
             anything that is not trivially copyable.\n\n\
             The compiler enforces this at build time, so there is no garbage \
             collector and no use-after-free.",
        ),
        ChatMessage::user("How do borrows relate to that?"),
        ChatMessage::assistant(
            "A borrow lets you use a value without taking ownership. You can have \
             any number of shared borrows or exactly one mutable borrow at a time, \
             never both. The borrow checker verifies that no borrow outlives the \
             owner.\n\n\
             In practice this shows up as &T for reading and &mut T for writing.",
        ),
        ChatMessage::user("When should I reach for Rc or Arc?"),
        ChatMessage::assistant(
            "When single ownership does not fit the shape of your data. Rc gives \
             shared ownership within one thread, Arc across threads. Both count \
             references at runtime and drop the value when the count hits zero.\n\n\
             Reach for them late: most designs work with plain ownership and \
             borrows, and the counters add overhead and the possibility of cycles.",
        ),
        ChatMessage::user("What about lifetimes, do I need to annotate them everywhere?"),
        ChatMessage::assistant(
            "Rarely. Lifetime elision covers the common cases, so most signatures \
             need no annotations at all. You write them when a function returns a \
             borrow whose origin is ambiguous, or when a struct stores references.\n\n\
             A lifetime never changes how long anything lives; it only names a \
             relationship the compiler must verify.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidetrack_core::{Role, generate_headers};

    #[test]
    fn test_demo_alternates_roles() {
        let messages = demo_transcript();
        assert!(messages.len() >= 8);
        assert_eq!(messages[0].role, Role::User);

        for pair in messages.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
        }
    }

    #[test]
    fn test_demo_produces_navigation_headers() {
        let headers = generate_headers(&demo_transcript());
        assert_eq!(headers.len(), 4);
        assert!(headers.iter().all(|h| h.children.len() == 1));
    }
}
