//! Advisory tip generation over the Gemini text API.
//!
//! The host composes this after every mutation; it must never surface an
//! error to the user, so [`bill_insight`] folds every failure into a fixed
//! fallback string.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::bills::Bill;
use crate::errors::Result;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const SYSTEM_INSTRUCTION: &str = "Você é um assistente financeiro amigável focado em ajudar \
     pessoas a não esquecerem suas contas e economizarem dinheiro.";
const NO_PENDING_MESSAGE: &str = "Você está em dia! Nenhuma conta pendente encontrada.";
const EMPTY_REPLY_MESSAGE: &str = "Continue focado no seu planejamento!";
const FALLBACK_MESSAGE: &str = "Mantenha o controle das suas finanças para um futuro tranquilo.";

/// Configuration for the Gemini endpoint.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AdvisorConfig {
    /// Loads config from env vars:
    /// - `GEMINI_API_KEY`  (default: empty, requests will be rejected upstream)
    /// - `GEMINI_MODEL`    (default: `gemini-3-flash-preview`)
    /// - `GEMINI_BASE_URL` (default: Google's public endpoint)
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self {
            base_url,
            api_key,
            model,
        }
    }
}

/// Anything that can produce an advisory string for a set of unpaid bills.
pub trait AdvisorClient {
    fn insight(&self, unpaid: &[&Bill]) -> Result<String>;
}

/// Minimal Gemini text client (blocking HTTP).
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: AdvisorConfig,
}

impl GeminiClient {
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self { http, config })
    }

    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![ContentBlock {
                parts: vec![TextPart {
                    text: user_prompt.to_string(),
                }],
            }],
            system_instruction: Some(ContentBlock {
                parts: vec![TextPart {
                    text: system_prompt.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
            }),
        };

        let response: GenerateContentResponse = self
            .http
            .post(&endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        // An empty reply is not an error here; the caller substitutes the
        // fixed encouragement string.
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text.trim().to_string())
    }
}

impl AdvisorClient for GeminiClient {
    fn insight(&self, unpaid: &[&Bill]) -> Result<String> {
        self.generate(SYSTEM_INSTRUCTION, &build_prompt(unpaid))
    }
}

/// Builds the user prompt from the unpaid bills, one `title - amount` entry
/// per bill with its due date.
pub fn build_prompt(unpaid: &[&Bill]) -> String {
    let listing = unpaid
        .iter()
        .map(|bill| {
            format!(
                "{} - {:.2} (Vence em: {})",
                bill.title,
                bill.amount,
                bill.due_date.format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Analise estas contas pendentes: {}. Dê uma dica financeira curta e motivadora em \
         português. Máximo 2 frases.",
        listing
    )
}

/// Produces the advisory string for the collection. Infallible by contract:
/// no unpaid bills, an empty model reply, and any transport failure each map
/// to a fixed message.
pub fn bill_insight(client: &dyn AdvisorClient, bills: &[Bill]) -> String {
    let unpaid: Vec<&Bill> = bills.iter().filter(|bill| !bill.is_paid).collect();
    if unpaid.is_empty() {
        return NO_PENDING_MESSAGE.to_string();
    }
    match client.insight(&unpaid) {
        Ok(reply) if !reply.trim().is_empty() => reply,
        Ok(_) => EMPTY_REPLY_MESSAGE.to_string(),
        Err(error) => {
            tracing::warn!(%error, "advisor request failed, using fallback tip");
            FALLBACK_MESSAGE.to_string()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<ContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentBlock {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bills::{BillType, Category};
    use crate::errors::BillError;
    use chrono::NaiveDate;

    struct FixedAdvisor(Result<String>);

    impl AdvisorClient for FixedAdvisor {
        fn insight(&self, _unpaid: &[&Bill]) -> Result<String> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(BillError::Storage("advisor offline".into())),
            }
        }
    }

    fn unpaid_bill(title: &str, amount: f64) -> Bill {
        Bill::new(
            title,
            amount,
            NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            Category::Utilities,
            BillType::Payable,
        )
    }

    #[test]
    fn prompt_lists_each_unpaid_bill() {
        let luz = unpaid_bill("Luz", 180.5);
        let agua = unpaid_bill("Água", 75.0);
        let prompt = build_prompt(&[&luz, &agua]);
        assert!(prompt.contains("Luz - 180.50 (Vence em: 2024-07-10)"));
        assert!(prompt.contains("Água - 75.00 (Vence em: 2024-07-10)"));
        assert!(prompt.starts_with("Analise estas contas pendentes:"));
    }

    #[test]
    fn no_unpaid_bills_short_circuits() {
        let mut paid = unpaid_bill("Luz", 10.0);
        paid.is_paid = true;
        let client = FixedAdvisor(Ok("should not be called".into()));
        assert_eq!(bill_insight(&client, &[paid]), NO_PENDING_MESSAGE);
    }

    #[test]
    fn empty_reply_uses_encouragement_message() {
        let client = FixedAdvisor(Ok("  ".into()));
        assert_eq!(
            bill_insight(&client, &[unpaid_bill("Luz", 10.0)]),
            EMPTY_REPLY_MESSAGE
        );
    }

    #[test]
    fn transport_failure_uses_fallback_message() {
        let client = FixedAdvisor(Err(BillError::Storage("advisor offline".into())));
        assert_eq!(
            bill_insight(&client, &[unpaid_bill("Luz", 10.0)]),
            FALLBACK_MESSAGE
        );
    }
}
