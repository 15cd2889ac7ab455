//! Handlers for spinning the wheel and asking when it was last spun.

use crate::gamehop::wheel::{UrlShortener, wheel_url};
use crate::gamehop::{Elapsed, Session};
use chrono::{DateTime, Utc};
use serenity::model::id::UserId;
use tokio::sync::RwLock;
use tracing::info;

/// Builds the wheel link from the current queue and stamps the spin time.
///
/// The queue is read under the read guard, which is released while the link is
/// shortened; only the timestamp update takes the write guard.
pub async fn spin(
    session: &RwLock<Session>,
    shortener: &dyn UrlShortener,
    invoker: UserId,
) -> String {
    info!(user_id = %invoker, "wheel spin requested");
    let long_url = match wheel_url(session.read().await.suggestions()) {
        Ok(url) => url,
        Err(e) => return e.to_string(),
    };
    let url = shortener.shorten(&long_url).await;
    session.write().await.mark_spun(Utc::now());
    format!("Spin the wheel to decide: {url}")
}

pub fn last_spun(session: &Session, now: DateTime<Utc>) -> String {
    match session.last_spin() {
        Some(at) => {
            let Elapsed { minutes, seconds } = Elapsed::between(at, now);
            format!("The wheel was last spun {minutes}m {seconds}s ago.")
        }
        None => "The wheel has not been spun yet.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamehop::Suggestion;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    struct Prefixing;

    #[async_trait]
    impl UrlShortener for Prefixing {
        async fn shorten(&self, long_url: &str) -> String {
            format!("short:{}", long_url.len())
        }
    }

    #[tokio::test]
    async fn spin_on_empty_queue_leaves_timestamp_alone() {
        let session = RwLock::new(Session::default());
        let reply = spin(&session, &Prefixing, UserId::new(1)).await;
        assert_eq!(reply, "There are no game suggestions to choose from.");
        assert!(session.read().await.last_spin().is_none());
    }

    #[tokio::test]
    async fn spin_returns_shortened_link_and_records_time() {
        let session = RwLock::new(Session::restore(
            vec![Suggestion::new("Go", UserId::new(1))],
            Vec::new(),
        ));
        let reply = spin(&session, &Prefixing, UserId::new(1)).await;
        assert!(reply.starts_with("Spin the wheel to decide: short:"));
        let guard = session.read().await;
        assert!(guard.last_spin().is_some());
        assert_eq!(guard.suggestions().len(), 1);
        assert!(guard.current().is_none());
    }

    #[test]
    fn last_spun_formats_minutes_and_seconds() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut s = Session::default();
        assert_eq!(last_spun(&s, t0), "The wheel has not been spun yet.");
        s.mark_spun(t0);
        assert_eq!(
            last_spun(&s, t0 + Duration::seconds(3 * 60 + 7)),
            "The wheel was last spun 3m 7s ago."
        );
    }
}
