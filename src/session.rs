use crate::error::ApiError;
use tower_sessions::Session;

/// Maximum number of public article reads an anonymous session is granted
/// before further reads are denied. The counter itself keeps rising past this
/// threshold; only the comparison gates access.
pub const MAX_ANONYMOUS_VIEWS: i64 = 3;

// Session record keys. The cookie itself is opaque; these name the two fields
// held server-side for each client.
const USER_ID_KEY: &str = "user_id";
const PAGE_VIEWS_KEY: &str = "page_views";

/// SessionSnapshot
///
/// An immutable per-request view of the session's two fields, loaded once at
/// the top of a handler. Handlers never read the live session after this
/// point: policy decisions are computed from the snapshot, and writes go back
/// through an explicit `SessionUpdate`. This keeps the paywall policy a pure
/// function with no hidden coupling to the session store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Identity of the logged-in user, if any.
    pub user_id: Option<i64>,
    /// Count of anonymous public article reads so far. Absent until the first
    /// anonymous read.
    pub page_views: Option<i64>,
}

impl SessionSnapshot {
    /// Loads both fields from the framework session in one pass.
    pub async fn load(session: &Session) -> Result<Self, ApiError> {
        Ok(Self {
            user_id: session.get::<i64>(USER_ID_KEY).await?,
            page_views: session.get::<i64>(PAGE_VIEWS_KEY).await?,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// FieldUpdate
///
/// The write intent for a single session field: leave it alone, remove it, or
/// overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    Keep,
    Clear,
    Set(i64),
}

/// SessionUpdate
///
/// The explicit set of session mutations a handler wants applied. Computed by
/// policy functions (or constructed directly by the identity handlers) and
/// applied in a single step, so every session write in the codebase is visible
/// at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUpdate {
    pub user_id: FieldUpdate,
    pub page_views: FieldUpdate,
}

impl SessionUpdate {
    /// No-op update.
    pub fn none() -> Self {
        Self {
            user_id: FieldUpdate::Keep,
            page_views: FieldUpdate::Keep,
        }
    }

    /// Full reset: both fields removed (the `/clear` operation).
    pub fn reset() -> Self {
        Self {
            user_id: FieldUpdate::Clear,
            page_views: FieldUpdate::Clear,
        }
    }

    /// Successful login: identity set, the anonymous view counter untouched.
    pub fn login(user_id: i64) -> Self {
        Self {
            user_id: FieldUpdate::Set(user_id),
            page_views: FieldUpdate::Keep,
        }
    }

    /// Logout: identity removed, the anonymous view counter preserved. A
    /// client that logs out resumes anonymous counting where it left off.
    pub fn logout() -> Self {
        Self {
            user_id: FieldUpdate::Clear,
            page_views: FieldUpdate::Keep,
        }
    }

    /// apply
    ///
    /// Writes the update back to the framework session. Field order is fixed
    /// and the whole update is applied before the handler builds its response.
    pub async fn apply(&self, session: &Session) -> Result<(), ApiError> {
        apply_field(session, USER_ID_KEY, self.user_id).await?;
        apply_field(session, PAGE_VIEWS_KEY, self.page_views).await?;
        Ok(())
    }
}

async fn apply_field(session: &Session, key: &str, update: FieldUpdate) -> Result<(), ApiError> {
    match update {
        FieldUpdate::Keep => {}
        FieldUpdate::Clear => {
            session.remove::<i64>(key).await?;
        }
        FieldUpdate::Set(value) => {
            session.insert(key, value).await?;
        }
    }
    Ok(())
}

/// ViewGate
///
/// The paywall decision for a single public article read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewGate {
    Granted,
    LimitReached,
}

/// gate_anonymous_view
///
/// The core paywall policy, as a pure function over the session snapshot.
///
/// Authenticated sessions pass unconditionally with no counter mutation.
/// Anonymous sessions have their view counter initialized-and-incremented on
/// every call; access is granted while the resulting count stays at or below
/// `MAX_ANONYMOUS_VIEWS`. The counter is written even when the limit is
/// exceeded, so a blocked session keeps counting upward and stays blocked
/// until an explicit reset or login.
pub fn gate_anonymous_view(snapshot: &SessionSnapshot) -> (ViewGate, SessionUpdate) {
    if snapshot.is_authenticated() {
        return (ViewGate::Granted, SessionUpdate::none());
    }

    let views = snapshot.page_views.unwrap_or(0) + 1;
    let gate = if views <= MAX_ANONYMOUS_VIEWS {
        ViewGate::Granted
    } else {
        ViewGate::LimitReached
    };

    (
        gate,
        SessionUpdate {
            user_id: FieldUpdate::Keep,
            page_views: FieldUpdate::Set(views),
        },
    )
}
