use lore_core::{Answer, Chunk, Document, Embedder, LanguageModel, LoreConfig, Result, Scored};
use lore_index::{DocumentSplitter, VectorIndex};
use lore_providers::{PromptHub, PromptTemplate};

use crate::generator::AnswerGenerator;

/// The assembled retrieve-then-generate pipeline.
///
/// Immutable once built: the index is populated during setup and only read
/// afterwards. Each [`run`](Self::run) call passes a single in-memory record
/// through the two stages and discards it.
pub struct Pipeline<E: Embedder, M: LanguageModel> {
    /// Populated vector index used by the retrieval stage.
    index: VectorIndex<E>,
    /// Generator used by the answer stage.
    generator: AnswerGenerator<M>,
    /// Number of chunks retrieved per question.
    top_k: usize,
}

impl<E: Embedder, M: LanguageModel> Pipeline<E, M> {
    /// Starts building a pipeline from configuration and providers.
    pub fn builder(config: LoreConfig, embedder: E, model: M) -> PipelineBuilder<E, M> {
        PipelineBuilder {
            config,
            embedder,
            model,
            template: None,
            documents: Vec::new(),
        }
    }

    /// Answers a question: retrieve context, then generate.
    ///
    /// # Errors
    ///
    /// Propagates embedding and language-model failures unmodified.
    pub async fn run(&self, question: &str) -> Result<Answer> {
        tracing::info!(question, "pipeline started");

        let retrieved = self.retrieve(question).await?;
        let context: Vec<Chunk> = retrieved.into_iter().map(|scored| scored.value).collect();
        tracing::info!(context_chunks = context.len(), "retrieval stage finished");

        let answer = self.generator.generate(question, &context).await?;
        tracing::info!(
            model = answer.model,
            latency_ms = answer.latency_ms,
            "generation stage finished"
        );
        Ok(answer)
    }

    /// Runs only the retrieval stage, best match first.
    ///
    /// # Errors
    ///
    /// Propagates embedding failures unmodified.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<Scored<Chunk>>> {
        self.index.search(question, self.top_k).await
    }

    /// Number of chunks held by the index.
    pub fn indexed_chunks(&self) -> usize {
        self.index.len()
    }
}

/// One-time setup for the pipeline: validate configuration, resolve the
/// prompt template, split and embed the seed documents.
pub struct PipelineBuilder<E: Embedder, M: LanguageModel> {
    /// Pipeline configuration.
    config: LoreConfig,
    /// Embedding provider for ingestion and queries.
    embedder: E,
    /// Language model for the generation stage.
    model: M,
    /// Explicit template, overriding config and the built-in default.
    template: Option<PromptTemplate>,
    /// Documents ingested at build time.
    documents: Vec<Document>,
}

impl<E: Embedder, M: LanguageModel> PipelineBuilder<E, M> {
    /// Supplies a prompt template directly, skipping any hosted fetch.
    #[must_use]
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Adds a document to ingest during setup.
    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Builds the pipeline: fails fast on configuration errors, pulls the
    /// hosted prompt template if one is configured, then splits and embeds
    /// all seed documents.
    ///
    /// # Errors
    ///
    /// Returns configuration errors before any network work; template fetch
    /// and embedding failures propagate unmodified.
    pub async fn build(self) -> Result<Pipeline<E, M>> {
        self.config.validate()?;

        let template = match self.template {
            Some(template) => template,
            None => Self::resolve_template(&self.config).await?,
        };

        let splitter = DocumentSplitter::new(self.config.splitter.clone())?;
        let mut index = VectorIndex::new(self.embedder);
        for document in &self.documents {
            index.add(splitter.split(document)).await?;
        }
        tracing::info!(
            documents = self.documents.len(),
            chunks = index.len(),
            "pipeline ready"
        );

        Ok(Pipeline {
            index,
            generator: AnswerGenerator::new(self.model, template),
            top_k: self.config.retriever.top_k,
        })
    }

    /// Resolves the prompt template from the hosted source or the built-in
    /// default.
    async fn resolve_template(config: &LoreConfig) -> Result<PromptTemplate> {
        match (&config.providers.prompt_hub, &config.providers.prompt_template) {
            (Some(hub_url), Some(name)) => PromptHub::new(hub_url.as_str()).pull(name).await,
            _ => Ok(PromptTemplate::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_core::{Error, SplitterConfig};
    use lore_providers::mock::{BagEmbedder, MockLanguageModel};

    #[tokio::test]
    async fn invalid_config_fails_before_any_provider_call() {
        let config = LoreConfig {
            splitter: SplitterConfig {
                chunk_size: 10,
                chunk_overlap: 10,
            },
            ..LoreConfig::default()
        };
        let model = MockLanguageModel::new().with_default_response("never");

        let result = Pipeline::builder(config, BagEmbedder::default(), model.clone())
            .with_document(Document::new("some text"))
            .build()
            .await;

        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn build_ingests_documents_once() {
        let pipeline = Pipeline::builder(
            LoreConfig::default(),
            BagEmbedder::default(),
            MockLanguageModel::new().with_default_response("ok"),
        )
        .with_document(Document::new("a short note"))
        .with_document(Document::new("another short note"))
        .build()
        .await
        .unwrap();

        assert_eq!(pipeline.indexed_chunks(), 2);
    }
}
