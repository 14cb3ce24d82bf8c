//! Notify-on-write: tells the presentation layer which pages to re-render

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;

/// Notice that the listed public/admin pages are stale
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Revalidation {
    pub paths: Vec<String>,
    pub at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Revalidator {
    sender: broadcast::Sender<Revalidation>,
}

impl Revalidator {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notice. Having no subscriber is not an error.
    pub fn publish<I, S>(&self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let notice = Revalidation {
            paths: paths.into_iter().map(Into::into).collect(),
            at: Utc::now(),
        };
        tracing::debug!(paths = ?notice.paths, "Revalidating");
        let _ = self.sender.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Revalidation> {
        self.sender.subscribe()
    }
}

impl Default for Revalidator {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let revalidator = Revalidator::default();
        let mut rx = revalidator.subscribe();

        revalidator.publish(["/admin/tours", "/"]);

        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.paths, vec!["/admin/tours".to_string(), "/".to_string()]);
    }

    #[test]
    fn test_publish_without_subscribers() {
        Revalidator::new(4).publish(vec![String::from("/")]);
    }
}
