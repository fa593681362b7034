use lore_core::{Answer, Chunk, LanguageModel, Result};
use lore_providers::PromptTemplate;

/// Separator placed between context chunks in the rendered prompt.
const CONTEXT_SEPARATOR: &str = "\n";

/// Renders a prompt from a question plus retrieved context and submits it
/// to a language model.
///
/// This is a thin wrapper: the model's text comes back verbatim and any
/// provider error propagates unmodified. An empty context produces an empty
/// context blob and the model is still called.
pub struct AnswerGenerator<M: LanguageModel> {
    /// The language model that answers the rendered prompt.
    model: M,
    /// Template filled with `{question}` and `{context}`.
    template: PromptTemplate,
}

impl<M: LanguageModel> AnswerGenerator<M> {
    /// Creates a generator around a model and template.
    pub fn new(model: M, template: PromptTemplate) -> Self {
        Self { model, template }
    }

    /// Generates an answer for the question conditioned on the context
    /// chunks, in order.
    ///
    /// # Errors
    ///
    /// Propagates any error from the language-model call.
    pub async fn generate(&self, question: &str, context: &[Chunk]) -> Result<Answer> {
        let context_blob = context
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        let prompt = self.template.render(question, &context_blob);
        tracing::debug!(
            provider = self.model.name(),
            context_chunks = context.len(),
            prompt_chars = prompt.len(),
            "generating answer"
        );

        self.model.complete(&prompt).await
    }
}
