use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tracing::{instrument, warn};

use crate::application::RetrievalService;
use crate::domain::{
    heuristics, ports::LlmService, Conversation, DomainError, Message, MessageRole,
};

/// Canned replies and prompt style directives. Overridable from the prompts
/// YAML file; defaults mirror the service's stock wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    pub ingest_first: String,
    pub clarify: String,
    pub not_in_document: String,
    pub busy: String,
    pub internal_error: String,
    pub concise_style: String,
    pub full_style: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            ingest_first: "Please ingest a document first.".into(),
            clarify: "Could you please clarify your question?".into(),
            not_in_document: "This info isn't in the document.".into(),
            busy: "The system is busy right now. Please try again in a few seconds.".into(),
            internal_error: "An internal error occurred while generating the answer.".into(),
            concise_style: "Give a very short and concise answer (2-3 lines max).".into(),
            full_style: "Give a clear and complete answer.".into(),
        }
    }
}

struct Session {
    transcript: Conversation,
    last_topic: Option<String>,
}

/// Runs one chat turn at a time against the shared session.
///
/// The session lock is never held across an await: state is read before the
/// retrieval/model calls and written back after.
pub struct ChatService {
    retrieval: Arc<RetrievalService>,
    llm: Arc<dyn LlmService>,
    prompts: ChatPrompts,
    top_k: usize,
    session: RwLock<Session>,
}

impl ChatService {
    pub fn new(
        retrieval: Arc<RetrievalService>,
        llm: Arc<dyn LlmService>,
        prompts: ChatPrompts,
        top_k: usize,
        history_limit: usize,
    ) -> Self {
        Self {
            retrieval,
            llm,
            prompts,
            top_k,
            session: RwLock::new(Session {
                transcript: Conversation::new(history_limit),
                last_topic: None,
            }),
        }
    }

    /// Answers one user query, appending both sides of the turn to the
    /// transcript. Canned replies (no document, clarification, degradation
    /// strings) come back as ordinary answers, never as errors.
    #[instrument(skip(self, query))]
    pub async fn respond(&self, query: &str) -> Result<String, DomainError> {
        if !self.retrieval.is_ready().await? {
            let reply = self.prompts.ingest_first.clone();
            self.session_mut()?.transcript.push(MessageRole::Bot, &reply);
            return Ok(reply);
        }

        let last_topic = {
            let mut session = self.session_mut()?;
            session.transcript.push(MessageRole::User, query);
            session.last_topic.clone()
        };

        let concise = heuristics::wants_concise(query);

        if heuristics::is_ambiguous(query) && last_topic.is_none() {
            let reply = self.prompts.clarify.clone();
            self.session_mut()?.transcript.push(MessageRole::Bot, &reply);
            return Ok(reply);
        }

        let standalone = heuristics::resolve_standalone(query, last_topic.as_deref());
        let retrieved = self.retrieval.search(&standalone, self.top_k).await?;

        let reply = if retrieved.is_empty() {
            self.prompts.not_in_document.clone()
        } else {
            let context = retrieved
                .iter()
                .map(|r| r.chunk.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            let answer = self.generate(&standalone, &context, concise).await;
            self.session_mut()?.last_topic = Some(standalone);
            answer
        };

        self.session_mut()?.transcript.push(MessageRole::Bot, &reply);
        Ok(reply)
    }

    /// Calls the model; failures degrade to fixed user-facing strings.
    async fn generate(&self, question: &str, context: &str, concise: bool) -> String {
        let style = if concise {
            &self.prompts.concise_style
        } else {
            &self.prompts.full_style
        };
        let prompt = build_prompt(style, &self.prompts.not_in_document, context, question);

        match self.llm.complete(&prompt).await {
            Ok(answer) => answer.trim().to_string(),
            Err(DomainError::RateLimited(e)) => {
                warn!(error = %e, "model rate limited");
                self.prompts.busy.clone()
            }
            Err(e) => {
                warn!(error = %e, "answer generation failed");
                self.prompts.internal_error.clone()
            }
        }
    }

    /// Clears the transcript and the remembered topic. Called on ingest.
    pub fn reset(&self) -> Result<(), DomainError> {
        let mut session = self.session_mut()?;
        session.transcript.clear();
        session.last_topic = None;
        Ok(())
    }

    pub fn transcript(&self) -> Result<Vec<Message>, DomainError> {
        let session = self
            .session
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(session.transcript.messages().to_vec())
    }

    pub fn last_topic(&self) -> Result<Option<String>, DomainError> {
        let session = self
            .session
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        Ok(session.last_topic.clone())
    }

    fn session_mut(&self) -> Result<RwLockWriteGuard<'_, Session>, DomainError> {
        self.session
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))
    }
}

fn build_prompt(style: &str, refusal: &str, context: &str, question: &str) -> String {
    format!(
        "{style}\n\n\
         Answer ONLY using the context below.\n\
         If the answer is not present, say: {refusal}\n\n\
         Context:\n{context}\n\n\
         Question:\n{question}"
    )
}
