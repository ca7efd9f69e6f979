//! End-to-end service flow over stub ports: deterministic embeddings, a
//! scripted model, and a canned document loader.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use doc_chat::application::{ChatPrompts, ChatService, IngestService, RetrievalService};
use doc_chat::domain::ports::{DocumentLoader, EmbeddingService, LlmService};
use doc_chat::domain::{DomainError, Embedding, FetchedDocument, MessageRole};
use doc_chat::infrastructure::InMemoryVectorIndex;

const DIM: usize = 16;
const TOP_K: usize = 3;
const HISTORY_LIMIT: usize = 2;

/// Bag-of-words hash embedding: same text always maps to the same vector,
/// shared words pull vectors together.
fn embed_text(text: &str) -> Embedding {
    let mut v = vec![0.0f32; DIM];
    for word in text.to_lowercase().split_whitespace() {
        let mut h: usize = 5381;
        for b in word.bytes() {
            h = h.wrapping_mul(33).wrapping_add(b as usize);
        }
        v[h % DIM] += 1.0;
    }
    Embedding::new(v)
}

struct StubEmbedding;

#[async_trait]
impl EmbeddingService for StubEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        Ok(embed_text(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Ok(texts.iter().map(|t| embed_text(t)).collect())
    }

    fn dimension(&self) -> usize {
        DIM
    }
}

enum LlmBehavior {
    Answer(&'static str),
    RateLimited,
    Failing,
}

struct StubLlm {
    behavior: LlmBehavior,
    seen_prompts: Mutex<Vec<String>>,
}

impl StubLlm {
    fn new(behavior: LlmBehavior) -> Self {
        Self {
            behavior,
            seen_prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.seen_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for StubLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        self.seen_prompts.lock().unwrap().push(prompt.to_string());
        match self.behavior {
            LlmBehavior::Answer(answer) => Ok(answer.to_string()),
            LlmBehavior::RateLimited => Err(DomainError::rate_limited("429 Too Many Requests")),
            LlmBehavior::Failing => Err(DomainError::external("connection reset")),
        }
    }
}

struct StubLoader {
    text: String,
}

#[async_trait]
impl DocumentLoader for StubLoader {
    async fn fetch(&self, _url: &str) -> Result<FetchedDocument, DomainError> {
        Ok(FetchedDocument {
            title: Some("Consensus Notes".to_string()),
            text: self.text.clone(),
        })
    }
}

struct Harness {
    chat: ChatService,
    ingest: IngestService,
    llm: Arc<StubLlm>,
}

fn harness(behavior: LlmBehavior, document_text: &str) -> Harness {
    let retrieval = Arc::new(RetrievalService::new(
        Arc::new(StubEmbedding),
        Arc::new(InMemoryVectorIndex::new()),
    ));
    let llm = Arc::new(StubLlm::new(behavior));
    let chat = ChatService::new(
        retrieval.clone(),
        llm.clone(),
        ChatPrompts::default(),
        TOP_K,
        HISTORY_LIMIT,
    );
    let ingest = IngestService::new(
        Arc::new(StubLoader {
            text: document_text.to_string(),
        }),
        retrieval,
        20,
        5,
    );

    Harness { chat, ingest, llm }
}

const DOCUMENT: &str = "The cluster elects a leader through a quorum vote. \
    Every node starts as a follower and waits for heartbeats from the current leader. \
    When a follower times out it becomes a candidate and requests votes from its peers. \
    A candidate that gathers a majority of votes becomes the new leader for the term. \
    Writes are accepted only by the leader and replicated to followers before they commit. \
    Snapshots compact the log so that recovering nodes do not replay the full history.";

#[tokio::test]
async fn chat_before_ingest_asks_for_a_document() {
    let h = harness(LlmBehavior::Answer("unused"), DOCUMENT);

    let reply = h.chat.respond("how does leader election work?").await.unwrap();

    assert_eq!(reply, "Please ingest a document first.");
    assert!(h.llm.prompts().is_empty());

    // The user's query is not recorded; only the bot nudge is.
    let transcript = h.chat.transcript().unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role, MessageRole::Bot);
}

#[tokio::test]
async fn ingest_chunks_and_reports_the_document() {
    let h = harness(LlmBehavior::Answer("unused"), DOCUMENT);

    let outcome = h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    assert_eq!(outcome.document.title.as_deref(), Some("Consensus Notes"));
    assert_eq!(outcome.document.word_count, DOCUMENT.split_whitespace().count());
    // 81 words, window 20, step 15.
    assert_eq!(outcome.chunk_count, 6);
}

#[tokio::test]
async fn answers_come_from_retrieved_context() {
    let h = harness(LlmBehavior::Answer("A quorum vote elects the leader."), DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    let reply = h.chat.respond("how does leader election work?").await.unwrap();

    assert_eq!(reply, "A quorum vote elects the leader.");
    assert_eq!(
        h.chat.last_topic().unwrap().as_deref(),
        Some("how does leader election work?")
    );

    let prompts = h.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("Give a clear and complete answer."));
    assert!(prompts[0].contains("Answer ONLY using the context below."));
    assert!(prompts[0].contains("leader"));
    assert!(prompts[0].ends_with("Question:\nhow does leader election work?"));

    let transcript = h.chat.transcript().unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, MessageRole::User);
    assert_eq!(transcript[1].role, MessageRole::Bot);
}

#[tokio::test]
async fn brevity_request_switches_the_style_directive() {
    let h = harness(LlmBehavior::Answer("Quorum vote."), DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    h.chat
        .respond("briefly, how does leader election work?")
        .await
        .unwrap();

    let prompts = h.llm.prompts();
    assert!(prompts[0].starts_with("Give a very short and concise answer (2-3 lines max)."));
}

#[tokio::test]
async fn ambiguous_query_without_topic_asks_for_clarification() {
    let h = harness(LlmBehavior::Answer("unused"), DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    let reply = h.chat.respond("explain more").await.unwrap();

    assert_eq!(reply, "Could you please clarify your question?");
    assert!(h.llm.prompts().is_empty());
    assert_eq!(h.chat.last_topic().unwrap(), None);
}

#[tokio::test]
async fn follow_up_is_rewritten_with_the_last_topic() {
    let h = harness(LlmBehavior::Answer("More detail."), DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    h.chat.respond("how does leader election work?").await.unwrap();
    let reply = h.chat.respond("explain more").await.unwrap();

    assert_eq!(reply, "More detail.");

    let prompts = h.llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].ends_with("Question:\nhow does leader election work? - explain more"));
    assert_eq!(
        h.chat.last_topic().unwrap().as_deref(),
        Some("how does leader election work? - explain more")
    );
}

#[tokio::test]
async fn transcript_never_exceeds_its_cap() {
    let h = harness(LlmBehavior::Answer("Answer."), DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    for i in 0..12 {
        h.chat
            .respond(&format!("question number {i} about the leader"))
            .await
            .unwrap();
        assert!(h.chat.transcript().unwrap().len() <= HISTORY_LIMIT * 2);
    }

    let transcript = h.chat.transcript().unwrap();
    assert_eq!(transcript.len(), HISTORY_LIMIT * 2);
    assert_eq!(transcript.last().unwrap().content, "Answer.");
}

#[tokio::test]
async fn rate_limited_model_degrades_to_the_busy_message() {
    let h = harness(LlmBehavior::RateLimited, DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    let reply = h.chat.respond("how does leader election work?").await.unwrap();

    assert_eq!(
        reply,
        "The system is busy right now. Please try again in a few seconds."
    );
    // Retrieval succeeded, so the topic is still remembered.
    assert!(h.chat.last_topic().unwrap().is_some());
}

#[tokio::test]
async fn failing_model_degrades_to_the_generic_message() {
    let h = harness(LlmBehavior::Failing, DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    let reply = h.chat.respond("how does leader election work?").await.unwrap();

    assert_eq!(
        reply,
        "An internal error occurred while generating the answer."
    );
}

#[tokio::test]
async fn reset_clears_the_session_for_a_new_document() {
    let h = harness(LlmBehavior::Answer("Answer."), DOCUMENT);
    h.ingest.ingest("https://docs.google.com/document/d/abc/edit").await.unwrap();

    h.chat.respond("how does leader election work?").await.unwrap();
    assert!(h.chat.last_topic().unwrap().is_some());

    // A new ingest replaces the index; the session reset rides along.
    h.ingest.ingest("https://docs.google.com/document/d/xyz/edit").await.unwrap();
    h.chat.reset().unwrap();

    assert!(h.chat.transcript().unwrap().is_empty());
    assert_eq!(h.chat.last_topic().unwrap(), None);

    // A follow-up right after the reset has no topic to lean on.
    let reply = h.chat.respond("tell me more").await.unwrap();
    assert_eq!(reply, "Could you please clarify your question?");
}
