//! Classification of a response status into a report category.

/// How a scenario's status code is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// HTTP 200.
    Success,
    /// HTTP 503, raised by API Gateway when the backing Lambda fails.
    ServiceUnavailable,
    /// HTTP 404.
    NotFound,
    /// No response was received.
    ConnectionError,
    /// Any other status.
    Other(u16),
}

impl Outcome {
    pub fn classify(status_code: u16) -> Self {
        match status_code {
            200 => Outcome::Success,
            503 => Outcome::ServiceUnavailable,
            404 => Outcome::NotFound,
            0 => Outcome::ConnectionError,
            other => Outcome::Other(other),
        }
    }

    /// Only a 200 counts as a pass.
    pub fn is_pass(self) -> bool {
        self == Outcome::Success
    }
}
