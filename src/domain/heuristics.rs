//! Keyword heuristics over chat queries.
//!
//! Substring checks and a word-count threshold, not a discourse model.
//! They gate clarification prompts and rewrite follow-up questions into
//! standalone retrieval queries.

const CONCISE_PHRASES: &[&str] = &[
    "explain less",
    "briefly",
    "short answer",
    "in short",
    "summarize",
];

const VAGUE_REFERENTS: &[&str] = &["this", "that", "it", "explain", "more", "what about"];

const FOLLOW_UP_PHRASES: &[&str] = &["explain more", "what about", "tell me more", "continue"];

/// Whether the user asked for a terse answer.
pub fn wants_concise(query: &str) -> bool {
    let q = query.to_lowercase();
    CONCISE_PHRASES.iter().any(|p| q.contains(p))
}

/// Whether the query is too under-specified to retrieve on by itself.
///
/// Short queries and queries containing a vague referent count as ambiguous.
/// A brevity request is never ambiguous: "summarize" alone is a complete
/// instruction.
pub fn is_ambiguous(query: &str) -> bool {
    let q = query.to_lowercase();
    if wants_concise(&q) {
        return false;
    }
    q.split_whitespace().count() < 3 || VAGUE_REFERENTS.iter().any(|v| q.contains(v))
}

/// Whether the query reads as a continuation of the previous one.
pub fn is_follow_up(query: &str) -> bool {
    let q = query.to_lowercase();
    FOLLOW_UP_PHRASES.iter().any(|p| q.contains(p))
}

/// Rewrites a follow-up into a standalone query by prefixing the last
/// resolved topic. Non-follow-ups, and follow-ups without a prior topic,
/// pass through unchanged.
pub fn resolve_standalone(query: &str, last_topic: Option<&str>) -> String {
    match last_topic {
        Some(topic) if is_follow_up(query) => format!("{topic} - {query}"),
        _ => query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_concise() {
        assert!(wants_concise("Briefly, what is a quorum?"));
        assert!(wants_concise("summarize the last section"));
        assert!(!wants_concise("what is a quorum?"));
    }

    #[test]
    fn test_ambiguous_short_query() {
        assert!(is_ambiguous("why?"));
        assert!(is_ambiguous("the protocol"));
    }

    #[test]
    fn test_ambiguous_vague_referent() {
        assert!(is_ambiguous("what does that paragraph mean"));
        assert!(is_ambiguous("tell me more about it"));
    }

    #[test]
    fn test_concise_request_is_not_ambiguous() {
        // "summarize" alone would trip the word-count threshold.
        assert!(!is_ambiguous("summarize"));
        assert!(!is_ambiguous("explain less please"));
    }

    #[test]
    fn test_specific_query_is_not_ambiguous() {
        assert!(!is_ambiguous("how does leader election work?"));
    }

    #[test]
    fn test_follow_up_detection() {
        assert!(is_follow_up("explain more"));
        assert!(is_follow_up("ok, tell me more about failures"));
        assert!(!is_follow_up("how are writes replicated?"));
    }

    #[test]
    fn test_resolve_standalone_concatenates_topic() {
        let standalone = resolve_standalone("explain more", Some("how does leader election work?"));
        assert_eq!(standalone, "how does leader election work? - explain more");
    }

    #[test]
    fn test_resolve_standalone_without_topic() {
        assert_eq!(resolve_standalone("explain more", None), "explain more");
    }

    #[test]
    fn test_resolve_standalone_non_follow_up() {
        let standalone = resolve_standalone("how are writes replicated?", Some("leader election"));
        assert_eq!(standalone, "how are writes replicated?");
    }
}
