//! Status messages for operations without a resource to show.

use std::fmt;

/// One-line outcome of an operation such as a bulk delete or an import.
pub struct OperationStatus {
    pub message: String,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Imported 2 recipes");
        assert_eq!(success.to_string(), "Success: Imported 2 recipes\n");

        let owned = OperationStatus::success(String::from("Swapped steps 3 and 4"));
        assert_eq!(owned.message, "Swapped steps 3 and 4");
    }
}
