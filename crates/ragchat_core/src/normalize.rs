use serde_json::{Map, Value};

/// The shapes an `/ask` answer payload can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerShape<'a> {
    /// Object carrying a `result` field.
    Envelope(&'a Value),
    /// Object without a `result` field.
    Object(&'a Map<String, Value>),
    /// Plain string.
    Text(&'a str),
    /// Number, boolean, null or array.
    Other(&'a Value),
}

impl<'a> AnswerShape<'a> {
    pub fn classify(answer: &'a Value) -> Self {
        match answer {
            Value::Object(fields) => match fields.get("result") {
                Some(result) => AnswerShape::Envelope(result),
                None => AnswerShape::Object(fields),
            },
            Value::String(text) => AnswerShape::Text(text),
            other => AnswerShape::Other(other),
        }
    }

    pub fn to_display(self) -> String {
        match self {
            AnswerShape::Envelope(Value::String(text)) => text.clone(),
            AnswerShape::Text(text) => text.to_owned(),
            AnswerShape::Envelope(result) => result.to_string(),
            AnswerShape::Object(fields) => Value::Object(fields.clone()).to_string(),
            AnswerShape::Other(value) => value.to_string(),
        }
    }
}

/// Converts an arbitrary answer payload into the text shown in the transcript.
///
/// Strings (top-level or under `result`) are shown verbatim; everything else is
/// shown as compact JSON.
pub fn normalize_answer(answer: &Value) -> String {
    AnswerShape::classify(answer).to_display()
}
