pub mod queries;
pub mod records;

use serde::Serialize;

/// Uniform tool return shape: either the operation's success record or an
/// error record, distinguishable only by field name. Serialized untagged so
/// a success renders as the bare record and a failure as `{"error": ...}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ToolReply<T> {
    Success(T),
    Failure(ErrorReply),
}

/// The error record every caller must be prepared to receive in place of a
/// success record.
#[derive(Debug, Serialize)]
pub struct ErrorReply {
    pub error: String,
}

impl<T> ToolReply<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(ErrorReply {
            error: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tools::records::SearchResults;

    #[test]
    fn failure_serializes_as_error_record() {
        let reply: ToolReply<SearchResults> = ToolReply::failure("boom");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"error": "boom"})
        );
    }

    #[test]
    fn success_serializes_as_bare_record() {
        let reply = ToolReply::Success(SearchResults { results: vec![] });
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"results": []})
        );
    }
}
