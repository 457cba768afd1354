//! Client-side navigation to a session's meeting.
//!
//! Only the most recent navigation may change the current destination. Starting
//! a new one cancels the pending lookup of the previous one, and a result that
//! arrives after it was superseded is dropped.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::access::{resolve, AccessContext, Destination, EnrollmentLookup, EntryPoints, LookupFailure, Resolution, SessionAccess};
use crate::client::{ClientError, MeetingAccessBackend};

#[derive(Debug)]
pub enum NavigationOutcome {
    Resolved(Resolution),
    /// A newer navigation started before this one finished.
    Superseded,
    /// The session itself could not be fetched; the current destination is unchanged.
    Failed(ClientError),
}

/// Who is navigating, as known to a logged-in client.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub user_id: i64,
    pub bearer: String,
}

struct NavState {
    pending: CancellationToken,
    current: Option<Destination>,
}

pub struct Navigator<B> {
    backend: Arc<B>,
    entry_points: EntryPoints,
    state: Mutex<NavState>,
}

impl<B: MeetingAccessBackend> Navigator<B> {
    pub fn new(backend: Arc<B>, entry_points: EntryPoints) -> Self {
        Self {
            backend,
            entry_points,
            state: Mutex::new(NavState {
                pending: CancellationToken::new(),
                current: None,
            }),
        }
    }

    pub async fn current(&self) -> Option<Destination> {
        self.state.lock().await.current.clone()
    }

    /// Cancels whatever navigation is still pending.
    pub async fn cancel_pending(&self) {
        self.state.lock().await.pending.cancel();
    }

    pub async fn open_meeting(&self, session_id: i64, identity: Option<&ClientIdentity>) -> NavigationOutcome {
        let token = {
            let mut state = self.state.lock().await;
            state.pending.cancel();
            state.pending = CancellationToken::new();
            state.pending.clone()
        };

        let context = tokio::select! {
            _ = token.cancelled() => return NavigationOutcome::Superseded,
            context = self.gather(session_id, identity) => context,
        };
        let context = match context {
            Ok(context) => context,
            Err(e) => return NavigationOutcome::Failed(e),
        };

        let resolution = resolve(&context, &self.entry_points);

        let mut state = self.state.lock().await;
        if token.is_cancelled() {
            tracing::debug!(session_id, "dropping superseded navigation result");
            return NavigationOutcome::Superseded;
        }
        if let Some(failure) = &resolution.lookup_failure {
            tracing::warn!(session_id, error = %failure, "enrollment lookup failed, showing session detail");
        }
        state.current = Some(resolution.destination.clone());
        NavigationOutcome::Resolved(resolution)
    }

    async fn gather(&self, session_id: i64, identity: Option<&ClientIdentity>) -> Result<AccessContext, ClientError> {
        let unauthenticated = AccessContext {
            session_id,
            user_id: None,
            session: None,
            enrollment: EnrollmentLookup::NotChecked,
        };
        let Some(identity) = identity else {
            return Ok(unauthenticated);
        };

        let summary = self.backend.fetch_session(session_id, Some(&identity.bearer)).await?;
        let Some(summary) = summary else {
            return Ok(AccessContext {
                user_id: Some(identity.user_id),
                ..unauthenticated
            });
        };

        let enrollment = match self.backend.check_enrollment(session_id, &identity.bearer).await {
            Ok(enrolled) => EnrollmentLookup::from(enrolled),
            Err(ClientError::Unauthenticated) => return Ok(unauthenticated),
            Err(e) => EnrollmentLookup::Failed(LookupFailure(e.to_string())),
        };

        Ok(AccessContext {
            session_id,
            user_id: Some(identity.user_id),
            session: Some(SessionAccess {
                published: summary.published,
                meeting_link: summary.meeting_link,
            }),
            enrollment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessState;
    use crate::protocol::SessionSummary;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    const LINK: &str = "https://meet.example.com/room-42";

    #[derive(Default)]
    struct FakeBackend {
        enrolled: bool,
        fail_check: bool,
        reject_token: bool,
        /// Delay applied to lookups of session 1 only
        slow_session_delay: Option<Duration>,
        checks: AtomicUsize,
    }

    #[async_trait]
    impl MeetingAccessBackend for FakeBackend {
        async fn fetch_session(&self, session_id: i64, _bearer: Option<&str>) -> Result<Option<SessionSummary>, ClientError> {
            if session_id == 1 {
                if let Some(delay) = self.slow_session_delay {
                    tokio::time::sleep(delay).await;
                }
            }
            if session_id == 404 {
                return Ok(None);
            }
            Ok(Some(SessionSummary {
                id: session_id,
                course_id: 3,
                starts_at: Utc::now(),
                ends_at: Utc::now(),
                published: true,
                meeting_link: self.enrolled.then(|| LINK.to_string()),
            }))
        }

        async fn check_enrollment(&self, _session_id: i64, _bearer: &str) -> Result<bool, ClientError> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            if self.reject_token {
                return Err(ClientError::Unauthenticated);
            }
            if self.fail_check {
                return Err(ClientError::UnexpectedStatus(503));
            }
            Ok(self.enrolled)
        }
    }

    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn student() -> Option<&'static ClientIdentity> {
        static STUDENT: std::sync::OnceLock<ClientIdentity> = std::sync::OnceLock::new();
        Some(STUDENT.get_or_init(|| ClientIdentity {
            user_id: 7,
            bearer: "token".to_string(),
        }))
    }

    fn navigator(backend: FakeBackend) -> Navigator<FakeBackend> {
        Navigator::new(Arc::new(backend), EntryPoints::default())
    }

    fn resolved(outcome: NavigationOutcome) -> Resolution {
        match outcome {
            NavigationOutcome::Resolved(r) => r,
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn enrolled_user_lands_on_meeting_link() {
        let nav = navigator(FakeBackend {
            enrolled: true,
            ..Default::default()
        });
        let r = resolved(nav.open_meeting(42, student()).await);
        assert_eq!(r.state, AccessState::Enrolled);
        assert_eq!(nav.current().await, Some(Destination::MeetingLink { url: LINK.to_string() }));
    }

    #[tokio::test]
    async fn missing_token_goes_to_login_without_calls() {
        let nav = navigator(FakeBackend::default());
        let r = resolved(nav.open_meeting(42, None).await);
        assert_eq!(r.state, AccessState::Unauthenticated);
        assert_eq!(nav.backend.checks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_token_is_unauthenticated() {
        let nav = navigator(FakeBackend {
            reject_token: true,
            ..Default::default()
        });
        let r = resolved(nav.open_meeting(42, student()).await);
        assert_eq!(r.state, AccessState::Unauthenticated);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let nav = navigator(FakeBackend::default());
        let r = resolved(nav.open_meeting(404, student()).await);
        assert_eq!(r.destination, Destination::NotFound);
    }

    #[tokio::test]
    async fn failed_check_fails_closed_without_retry() {
        let nav = navigator(FakeBackend {
            fail_check: true,
            ..Default::default()
        });
        let r = resolved(nav.open_meeting(42, student()).await);
        assert_eq!(r.destination, Destination::SessionDetail { session_id: 42 });
        assert!(r.lookup_failure.is_some());
        assert_eq!(nav.backend.checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_check_is_warned_exactly_once() {
        let warnings = WarnCounter::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(warnings.clone()));

        let nav = navigator(FakeBackend {
            fail_check: true,
            ..Default::default()
        });
        resolved(nav.open_meeting(42, student()).await);
        assert_eq!(warnings.0.load(Ordering::SeqCst), 1);

        let nav = navigator(FakeBackend::default());
        resolved(nav.open_meeting(42, student()).await);
        assert_eq!(warnings.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_navigation_never_overrides_newer_one() {
        let nav = Arc::new(navigator(FakeBackend {
            enrolled: true,
            slow_session_delay: Some(Duration::from_millis(200)),
            ..Default::default()
        }));

        let slow = {
            let nav = Arc::clone(&nav);
            tokio::spawn(async move { nav.open_meeting(1, student()).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = resolved(nav.open_meeting(404, student()).await);
        assert_eq!(fast.destination, Destination::NotFound);

        let slow = slow.await.unwrap();
        assert!(matches!(slow, NavigationOutcome::Superseded));
        assert_eq!(nav.current().await, Some(Destination::NotFound));
    }

    #[tokio::test]
    async fn cancelled_navigation_leaves_destination_unset() {
        let nav = Arc::new(navigator(FakeBackend {
            slow_session_delay: Some(Duration::from_millis(200)),
            ..Default::default()
        }));
        let pending = {
            let nav = Arc::clone(&nav);
            tokio::spawn(async move { nav.open_meeting(1, student()).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        nav.cancel_pending().await;

        assert!(matches!(pending.await.unwrap(), NavigationOutcome::Superseded));
        assert_eq!(nav.current().await, None);
    }
}
