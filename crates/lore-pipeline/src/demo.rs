use lore_core::{Answer, Document, LoreConfig, Result};
use lore_providers::{OpenAiChatModel, OpenAiEmbedder};

use crate::runner::Pipeline;

/// Journal entry ingested by the walkthrough.
pub const JOURNAL_ENTRY: &str = "Today, I went to the park and saw a dog. Life \
is great at the moment. But another boring day at work, I wish I could do \
something else";

/// Question the walkthrough asks about the journal entry.
pub const QUESTION: &str = "Have I seen any animals recently?";

/// Runs the full pipeline once against the hosted providers with default
/// configuration: ingests the journal entry, retrieves context for the
/// fixed question, and generates an answer.
///
/// # Errors
///
/// Fails when no API key is configured or a provider call fails.
pub async fn run() -> Result<Answer> {
    run_with(LoreConfig::default()).await
}

/// Same as [`run`], but over explicit configuration.
///
/// # Errors
///
/// Fails when no API key is configured or a provider call fails.
pub async fn run_with(config: LoreConfig) -> Result<Answer> {
    let embedder = OpenAiEmbedder::from_config(&config.providers)?;
    let model = OpenAiChatModel::from_config(&config.providers)?;

    let pipeline = Pipeline::builder(config, embedder, model)
        .with_document(Document::new(JOURNAL_ENTRY))
        .build()
        .await?;

    pipeline.run(QUESTION).await
}
