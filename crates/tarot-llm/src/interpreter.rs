//! The interpretation seam.

use async_trait::async_trait;
use tarot_core::Reading;

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::prompt::build_messages;
use crate::stream::AnalysisStream;

/// Something that turns a completed reading into streamed analysis text.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Start interpreting a reading.
    async fn interpret(&self, reading: &Reading) -> Result<AnalysisStream, LlmError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

#[async_trait]
impl Interpreter for LlmClient {
    async fn interpret(&self, reading: &Reading) -> Result<AnalysisStream, LlmError> {
        let messages = build_messages(self.system_prompt(), reading);
        self.stream_chat(messages).await
    }

    fn name(&self) -> &str {
        "LlmClient"
    }
}
