// SPDX-License-Identifier: Apache-2.0

//! Report writing through a chat-completion model.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::advisor::{Advisor, Report, ReportInput};
use crate::ai::prompt::{report_system_prompt, report_user_prompt};
use crate::ai::{AiClient, AiProvider, ChatMessage};
use crate::error::GrabError;

/// Advisor that asks a language model to format the report.
#[derive(Debug)]
pub struct LlmAdvisor {
    client: AiClient,
}

impl LlmAdvisor {
    /// Wraps a configured AI client.
    #[must_use]
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }
}

/// Removes `<think>...</think>` blocks that reasoning models prepend.
#[must_use]
pub fn strip_reasoning(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<think>") {
        out.push_str(&rest[..start]);
        match rest[start..].find("</think>") {
            Some(end) => rest = &rest[start + end + "</think>".len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

#[async_trait]
impl Advisor for LlmAdvisor {
    fn name(&self) -> &str {
        self.client.name()
    }

    #[instrument(
        skip(self, input),
        fields(provider = %self.client.name(), username = input.username)
    )]
    async fn compose_report(&self, input: &ReportInput<'_>) -> crate::Result<Report> {
        let messages = vec![
            ChatMessage::system(report_system_prompt(input.fields)),
            ChatMessage::user(report_user_prompt(
                input.username,
                input.profile,
                input.digest,
            )),
        ];

        let (content, stats) = self
            .client
            .complete(messages)
            .await
            .map_err(|e| match e.downcast::<GrabError>() {
                Ok(grab) => grab,
                Err(other) => GrabError::AI {
                    message: format!("{other:#}"),
                    status: None,
                    provider: self.client.name().to_string(),
                },
            })?;

        let text = strip_reasoning(&content);
        if text.is_empty() {
            return Err(GrabError::AI {
                message: "Model returned only reasoning, no report".to_string(),
                status: None,
                provider: self.client.name().to_string(),
            });
        }

        debug!(chars = text.len(), "Report composed by model");
        Ok(Report {
            text,
            stats: Some(stats),
        })
    }
}
