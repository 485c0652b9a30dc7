//! Error formatting for CLI output, human or JSON.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Format an error for user display (no stack traces).
///
/// Appends the first cause when it adds information to the top-level message.
#[must_use]
pub fn format_error(err: &anyhow::Error) -> String {
    let msg = err.to_string();

    match err.source().map(ToString::to_string) {
        Some(source) if !source.is_empty() && !msg.contains(&source) => {
            format!("{msg}\nCause: {source}")
        }
        _ => msg,
    }
}

/// Exit code for an error.
///
/// * 1 - User error (dispatch, validation, configuration)
/// * 2 - Collaborator or system error
/// * 3 - Not found
#[must_use]
pub fn get_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(core_err) = err.downcast_ref::<dashbrr_core::Error>() {
        return core_err.exit_code();
    }

    if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
        return if io_err.kind() == std::io::ErrorKind::NotFound {
            3
        } else {
            2
        };
    }

    2
}

/// Stable machine-readable code for the JSON envelope.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<dashbrr_core::Error>()
        .map_or("ERROR", dashbrr_core::Error::code)
}

/// Print the JSON error envelope to stdout.
pub fn output_json_error(code: &str, message: &str, suggestion: Option<String>) {
    let error_output = ErrorOutput {
        success: false,
        error: ErrorDetail {
            code: code.to_string(),
            message: message.to_string(),
            suggestion,
        },
    };

    match serde_json::to_string(&error_output) {
        Ok(json_str) => println!("{json_str}"),
        Err(_) => {
            let escaped_code = code.replace('"', "\\\"");
            let escaped_message = message.replace('"', "\\\"");
            println!(
                "{{\"success\":false,\"error\":{{\"code\":\"{escaped_code}\",\"message\":\"{escaped_message}\"}}}}"
            );
        }
    }
}
