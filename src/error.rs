//! The rejection reason type.

/// The reason value carried by a rejected asynchronous handler.
///
/// There is exactly one failure kind at this layer: "the handler rejected."
/// No subtypes, no wrapping, no retry — the reason travels verbatim to the
/// continuation, and rendering it (error page, JSON body, log line) is the
/// host framework's job. Application-level outcomes (404, 422, etc.) are
/// responses, not `RouteError`s.
pub type RouteError = Box<dyn std::error::Error + Send + Sync + 'static>;
