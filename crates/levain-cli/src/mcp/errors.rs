//! Error conversion for the MCP server

use levain_core::BakeryError;
use rmcp::ErrorData;

/// Converts a bakery error into an MCP error, prefixed with what failed.
pub fn to_mcp_error(message: &str, error: &BakeryError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}

/// Error for a lookup that found nothing.
pub fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::internal_error(format!("{kind} with ID {id} not found"), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_keeps_cause() {
        let error = to_mcp_error("Failed to get recipe", &BakeryError::RecipeNotFound { id: 7 });
        assert!(error.message.starts_with("Failed to get recipe: "));
        assert!(error.message.contains('7'));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(not_found("Step", 3).message, "Step with ID 3 not found");
    }
}
