use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{subscriber::DefaultGuard, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use crate::domain::entities::{Course, CourseStatus, Session};
use crate::domain::value_objects::{CourseId, MeetingLink, Schedule, SessionId, UserId};

pub const MEETING_LINK: &str = "https://meet.example.com/j/4242?pwd=s3cr3t";

pub fn session(id: i64, course_id: i64, published: bool) -> Session {
    let now = Utc::now();
    Session {
        id: SessionId::new(id),
        course_id: CourseId::new(course_id),
        schedule: Schedule::new(now + Duration::hours(1), now + Duration::hours(2)).unwrap(),
        meeting_link: MeetingLink::from_stored(MEETING_LINK.to_string()),
        published,
    }
}

pub fn course(id: i64, instructor_id: i64, status: CourseStatus) -> Course {
    Course {
        id: CourseId::new(id),
        instructor_id: UserId::new(instructor_id),
        title: format!("Course {id}"),
        status,
    }
}

/// Counts WARN events seen by the subscriber it is layered onto.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Installs a WARN counter as this thread's subscriber until the guard drops.
pub fn count_warnings() -> (WarnCounter, DefaultGuard) {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    (counter, tracing::subscriber::set_default(subscriber))
}
