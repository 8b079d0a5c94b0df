//! Request decoding and response envelopes.
//!
//! A request is the whole of stdin. Callers sometimes JSON-encode the
//! payload twice (a JSON string whose content is the JSON object), so
//! [`decode_payload`] unwraps one extra level of string encoding. Responses
//! are always a single JSON line; any per-request error becomes
//! `{"success": false, "message": "..."}`.

use rand::Rng;
use serde::Serialize;
use serde_json::Value;

use crate::chatbot::{Chatbot, ScoredIntent};
use crate::error::{AssistError, Result};
use crate::ml::Record;
use crate::stunting::{StuntingAssessment, StuntingPredictor};

/// Parse a raw request, decoding a second time if the first pass yields a
/// JSON string.
///
/// # Examples
///
/// ```
/// use stunting_assist::envelope::decode_payload;
///
/// let single = decode_payload(r#"{"message": "hi"}"#).unwrap();
/// let double = decode_payload(r#""{\"message\": \"hi\"}""#).unwrap();
/// assert_eq!(single, double);
/// ```
pub fn decode_payload(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw.trim())?;
    match value {
        Value::String(inner) => {
            log::debug!("Request was double-encoded");
            Ok(serde_json::from_str(&inner)?)
        }
        other => Ok(other),
    }
}

/// Extract the required, non-empty `message` of a chat request.
pub fn chat_message(payload: &Value) -> Result<&str> {
    match payload.get("message") {
        None | Some(Value::Null) => Err(AssistError::invalid_input("No message provided")),
        Some(Value::String(message)) if message.is_empty() => {
            Err(AssistError::invalid_input("No message provided"))
        }
        Some(Value::String(message)) => Ok(message),
        Some(other) => Err(AssistError::invalid_input(format!(
            "message must be a string, got {other}"
        ))),
    }
}

/// Failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

impl Failure {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<&AssistError> for Failure {
    fn from(error: &AssistError) -> Self {
        if error.is_request_scoped() {
            log::warn!("Request rejected: {error}");
        } else {
            log::error!("Request failed: {error}");
        }
        Failure::new(error.to_string())
    }
}

/// Successful chat envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSuccess {
    pub success: bool,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents: Option<Vec<ScoredIntent>>,
}

/// Either a success body or a failure body, serialized without a wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Ok(T),
    Err(Failure),
}

impl<T: Serialize> Envelope<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(body) => Envelope::Ok(body),
            Err(e) => Envelope::Err(Failure::from(&e)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Ok(_))
    }

    /// Serialize to a single JSON line.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("Failed to serialize response: {e}");
            r#"{"success":false,"message":"Failed to serialize response"}"#.to_string()
        })
    }
}

/// Options for the chat endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatOptions {
    /// Include the ranked intents in the response.
    pub details: bool,
}

/// Options for the predict endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictOptions {
    /// Include the four-band risk level in the response.
    pub risk_level: bool,
}

/// Handle one raw chat request.
pub fn handle_chat<R: Rng + ?Sized>(
    chatbot: &Chatbot,
    raw: &str,
    options: ChatOptions,
    rng: &mut R,
) -> Envelope<ChatSuccess> {
    Envelope::from_result(chat(chatbot, raw, options, rng))
}

fn chat<R: Rng + ?Sized>(
    chatbot: &Chatbot,
    raw: &str,
    options: ChatOptions,
    rng: &mut R,
) -> Result<ChatSuccess> {
    let payload = decode_payload(raw)?;
    let message = chat_message(&payload)?;
    let reply = chatbot.respond(message, rng)?;

    Ok(ChatSuccess {
        success: true,
        reply: reply.reply,
        intents: options.details.then_some(reply.intents),
    })
}

/// Handle one raw prediction request.
pub fn handle_predict(
    predictor: &StuntingPredictor,
    raw: &str,
    options: PredictOptions,
) -> Envelope<StuntingAssessment> {
    Envelope::from_result(predict(predictor, raw, options))
}

fn predict(
    predictor: &StuntingPredictor,
    raw: &str,
    options: PredictOptions,
) -> Result<StuntingAssessment> {
    let payload = decode_payload(raw)?;
    let records = Record::parse_many(&payload)?;
    let assessment = predictor.assess(&records)?;

    Ok(if options.risk_level {
        assessment.with_risk_level()
    } else {
        assessment
    })
}
