/// Classification for retry policy.
///
/// Exchangers never retry on their own. Callers that do can use this to
/// tell transient provider trouble from requests that will never succeed.
///
/// | Class | Meaning |
/// |-------|---------|
/// | `Never` | Bad configuration, unknown currency, bad credentials or a malformed payload |
/// | `WithBackoff` | Timeouts, transport failures, rate limiting, server errors |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry. The request is fundamentally invalid and retrying won't help.
    Never,

    /// Retry later with exponential backoff.
    WithBackoff,
}
