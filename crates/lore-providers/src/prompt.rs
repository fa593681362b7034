//! Prompt templates and the hosted template source.
//!
//! A template is plain text with `{question}` and `{context}` placeholders.
//! Templates can be pulled by name from a hosted source once at startup, or
//! constructed from the compiled-in default for offline use.

use reqwest::Client;

use lore_core::{Error, Result};

/// Placeholder filled with the question at render time.
const QUESTION_SLOT: &str = "{question}";
/// Placeholder filled with the retrieved context at render time.
const CONTEXT_SLOT: &str = "{context}";

/// Default question-answering template used when no hosted template is
/// configured.
const DEFAULT_TEMPLATE: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, just say that you don't know. \
Use three sentences maximum and keep the answer concise.\n\
Question: {question} \n\
Context: {context} \n\
Answer:";

/// A parameterized prompt filled with runtime values before submission to
/// the language model.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Template text containing both placeholders.
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_owned(),
        }
    }
}

impl PromptTemplate {
    /// Creates a template, verifying both placeholders are present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is missing `{question}` or
    /// `{context}`.
    pub fn new<T: Into<String>>(template: T) -> Result<Self> {
        let template = template.into();
        for slot in [QUESTION_SLOT, CONTEXT_SLOT] {
            if !template.contains(slot) {
                return Err(Error::Config(format!(
                    "prompt template is missing the {slot} placeholder"
                )));
            }
        }
        Ok(Self { template })
    }

    /// Renders the template with the given question and context blob.
    pub fn render(&self, question: &str, context: &str) -> String {
        self.template
            .replace(QUESTION_SLOT, question)
            .replace(CONTEXT_SLOT, context)
    }
}

/// Client for a hosted prompt-template source.
///
/// Templates are fetched once at startup; fetch failures are startup
/// failures and propagate unmodified.
pub struct PromptHub {
    /// HTTP client for template fetches.
    client: Client,
    /// Base URL of the template source.
    base_url: String,
}

impl PromptHub {
    /// Creates a hub client for the given base URL.
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self {
            client: Client::default(),
            base_url: base_url.into(),
        }
    }

    /// Pulls a template by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the source responds with a
    /// non-success status, or the fetched text lacks the required
    /// placeholders.
    pub async fn pull(&self, name: &str) -> Result<PromptTemplate> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), name);
        tracing::info!(template = name, "pulling prompt template");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::Provider(format!(
                "prompt source returned {status} for template '{name}'"
            )));
        }

        let text = response.text().await?;
        PromptTemplate::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_renders_question_and_context() {
        let template = PromptTemplate::default();
        let rendered = template.render("Have I seen any animals recently?", "saw a dog");
        assert!(rendered.contains("Question: Have I seen any animals recently?"));
        assert!(rendered.contains("Context: saw a dog"));
        assert!(!rendered.contains(QUESTION_SLOT));
        assert!(!rendered.contains(CONTEXT_SLOT));
    }

    #[test]
    fn template_without_placeholders_is_rejected() {
        assert!(matches!(
            PromptTemplate::new("no slots at all"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PromptTemplate::new("only {question} here"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn empty_context_still_renders() {
        let template = PromptTemplate::default();
        let rendered = template.render("anything?", "");
        assert!(rendered.contains("Question: anything?"));
        assert!(rendered.contains("Context:  \n"));
    }
}
