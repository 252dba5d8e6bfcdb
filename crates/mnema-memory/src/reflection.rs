// SPDX-FileCopyrightText: 2026 Mnema Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summaries and compression over groups of memories.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mnema_core::{GenerationAdapter, GenerationInput};
use tracing::warn;

use crate::types::Memory;

const COMPRESSION_SYSTEM_PROMPT: &str =
    "You are an expert at summarizing and compressing information while maintaining key details.";
const COMPRESSION_TEMPERATURE: f64 = 0.3;

/// Keep the memories whose `created_at` lies inside the closed interval
/// `[start, end]`. Either bound may be absent.
pub fn filter_by_time(
    memories: &[Memory],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Vec<Memory> {
    memories
        .iter()
        .filter(|m| start.is_none_or(|s| m.created_at >= s))
        .filter(|m| end.is_none_or(|e| m.created_at <= e))
        .cloned()
        .collect()
}

/// One bullet line per memory inside the time window.
///
/// The two sentinel strings distinguish an empty input from a window that
/// matched nothing.
pub fn generate_summary(
    memories: &[Memory],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> String {
    if memories.is_empty() {
        return "No memories to analyze".to_string();
    }
    let filtered = filter_by_time(memories, start, end);
    if filtered.is_empty() {
        return "No memories in the specified time period".to_string();
    }
    filtered
        .iter()
        .map(|m| format!("- {} (Type: {})", m.content, m.kind))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reshape free text into sentences: split on terminal punctuation,
/// capitalize the first word of each sentence, and close any trailing
/// fragment with a period.
pub fn normalize_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in content.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            if !current.trim().is_empty() {
                parts.push(current.trim().to_string());
            }
            current.clear();
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    let mut formatted: Vec<String> = Vec::new();
    for part in parts {
        let mut words: Vec<String> = part.split_whitespace().map(str::to_string).collect();
        if let Some(first) = words.first_mut() {
            *first = capitalize(first);
        }
        if words.is_empty() {
            continue;
        }
        let mut sentence = words.join(" ");
        if !sentence.ends_with(['.', '!', '?']) {
            sentence.push('.');
        }
        formatted.push(sentence);
    }
    formatted.join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Shortens memory content with a generation model, falling back to plain
/// truncation when the model is unavailable.
pub struct MemoryCompressor {
    generator: Arc<dyn GenerationAdapter>,
    model: String,
}

impl MemoryCompressor {
    pub fn new(generator: Arc<dyn GenerationAdapter>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Compress a memory's content to at most `max_length` characters.
    ///
    /// Infallible: a provider failure or empty reply degrades to truncating
    /// the original content instead.
    pub async fn compress(&self, memory: &Memory, max_length: usize) -> String {
        let prompt = format!(
            "Please compress the following memory content while preserving key information. \n\
             Keep the compressed version under {max_length} characters.\n\n\
             Original content:\n{}\n\nReturn only the compressed content.",
            memory.content
        );
        let input = GenerationInput {
            system: COMPRESSION_SYSTEM_PROMPT.to_string(),
            prompt,
            temperature: COMPRESSION_TEMPERATURE,
            max_tokens: max_length as u32,
            model: self.model.clone(),
        };

        match self.generator.generate(input).await {
            Ok(output) => {
                let compressed = output.text.trim();
                if compressed.is_empty() {
                    warn!(id = %memory.id, "empty compression reply, truncating original");
                    truncate_chars(&memory.content, max_length)
                } else {
                    truncate_chars(compressed, max_length)
                }
            }
            Err(error) => {
                warn!(id = %memory.id, %error, "compression failed, truncating original");
                truncate_chars(&memory.content, max_length)
            }
        }
    }
}

/// Truncate on a character boundary, never mid code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
