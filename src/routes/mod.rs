/// Router Module Index
///
/// Organizes the application's routing logic into access-segregated modules.
/// The split makes the authorization posture of each endpoint explicit at the
/// routing level, even though the member-only gate itself runs inside the
/// handlers (the 401 carries an endpoint-specific message body, which a
/// route-layer rejection could not produce).

/// Routes accessible to any client, anonymous or logged-in. The single-article
/// read applies the anonymous paywall inside its handler.
pub mod public;

/// Routes that require a session identity. Handlers reject anonymous sessions
/// with the member-only 401 body before touching the repository.
pub mod members;
