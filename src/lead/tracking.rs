//! Best-effort conversion tracking
//!
//! Events go to a pixel-style collector on a detached task. Nothing here can
//! fail the caller: a missing runtime, a network error or a rejected request
//! only produce a debug log line.

use reqwest::Client;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default pixel collection endpoint
pub const DEFAULT_PIXEL_ENDPOINT: &str = "https://www.facebook.com/tr";

const PIXEL_TIMEOUT: Duration = Duration::from_secs(5);

/// Conversion events fired by the funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingEvent {
    /// Landing view shown
    PageView,
    /// Lead accepted by the capture endpoint
    Lead,
}

impl TrackingEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PageView => "PageView",
            Self::Lead => "Lead",
        }
    }

    /// Static metadata attached to the event
    pub fn custom_data(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::PageView => &[],
            Self::Lead => &[
                ("content_name", "IUL Lead Form"),
                ("content_category", "Insurance"),
            ],
        }
    }
}

/// Sink for conversion events. Implementations must never block or fail.
pub trait ConversionTracker: Send + Sync {
    fn track(&self, event: TrackingEvent);
}

/// Forward an event if a collector is configured
pub fn track_if_present(tracker: Option<&dyn ConversionTracker>, event: TrackingEvent) {
    match tracker {
        Some(tracker) => tracker.track(event),
        None => tracing::trace!(event = event.name(), "No conversion collector configured"),
    }
}

/// Pixel collector fired with image-style GET requests
#[derive(Debug, Clone)]
pub struct PixelTracker {
    client: Client,
    pixel_id: String,
    endpoint: String,
}

impl PixelTracker {
    pub fn new(pixel_id: impl Into<String>, endpoint: impl Into<String>) -> Option<Self> {
        let client = Client::builder().timeout(PIXEL_TIMEOUT).build().ok()?;
        Some(Self {
            client,
            pixel_id: pixel_id.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Query string for an event
    fn query(&self, event: TrackingEvent) -> Vec<(String, String)> {
        let mut query = vec![
            ("id".to_string(), self.pixel_id.clone()),
            ("ev".to_string(), event.name().to_string()),
            ("noscript".to_string(), "1".to_string()),
        ];
        query.extend(
            event
                .custom_data()
                .iter()
                .map(|(key, value)| (format!("cd[{key}]"), (*value).to_string())),
        );
        query
    }

    /// Spawn the request on the current runtime, if there is one
    fn send(&self, event: TrackingEvent) -> Option<JoinHandle<()>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let request = self.client.get(&self.endpoint).query(&self.query(event));

        Some(handle.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(event = event.name(), "Conversion event delivered");
                }
                Ok(response) => {
                    tracing::debug!(
                        event = event.name(),
                        status = %response.status(),
                        "Conversion collector rejected event"
                    );
                }
                Err(e) => {
                    tracing::debug!(event = event.name(), error = %e, "Conversion event not delivered");
                }
            }
        }))
    }
}

impl ConversionTracker for PixelTracker {
    fn track(&self, event: TrackingEvent) {
        if self.send(event).is_none() {
            tracing::debug!(event = event.name(), "No async runtime, conversion event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::sync::Mutex;

    /// Collector that records events in memory
    #[derive(Default)]
    struct RecordingTracker {
        events: Mutex<Vec<TrackingEvent>>,
    }

    impl ConversionTracker for RecordingTracker {
        fn track(&self, event: TrackingEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_names() {
        assert_eq!(TrackingEvent::PageView.name(), "PageView");
        assert_eq!(TrackingEvent::Lead.name(), "Lead");
    }

    #[test]
    fn test_lead_metadata() {
        let data = TrackingEvent::Lead.custom_data();
        assert!(data.contains(&("content_name", "IUL Lead Form")));
        assert!(data.contains(&("content_category", "Insurance")));
        assert!(TrackingEvent::PageView.custom_data().is_empty());
    }

    #[test]
    fn test_track_if_present_without_collector_is_noop() {
        track_if_present(None, TrackingEvent::Lead);
    }

    #[test]
    fn test_track_if_present_forwards() {
        let tracker = RecordingTracker::default();
        track_if_present(Some(&tracker), TrackingEvent::Lead);
        assert_eq!(*tracker.events.lock().unwrap(), vec![TrackingEvent::Lead]);
    }

    #[test]
    fn test_query_includes_custom_data() {
        let tracker = PixelTracker::new("123", DEFAULT_PIXEL_ENDPOINT).unwrap();
        let query = tracker.query(TrackingEvent::Lead);
        assert!(query.contains(&("id".to_string(), "123".to_string())));
        assert!(query.contains(&("ev".to_string(), "Lead".to_string())));
        assert!(query.contains(&(
            "cd[content_category]".to_string(),
            "Insurance".to_string()
        )));
    }

    #[test]
    fn test_track_without_runtime_does_not_panic() {
        let tracker = PixelTracker::new("123", "http://127.0.0.1:9/tr").unwrap();
        assert!(tracker.send(TrackingEvent::PageView).is_none());
        tracker.track(TrackingEvent::PageView);
    }

    #[tokio::test]
    async fn test_send_fires_pixel_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/tr")
                    .query_param("id", "987")
                    .query_param("ev", "Lead")
                    .query_param("cd[content_name]", "IUL Lead Form");
                then.status(200);
            })
            .await;

        let tracker = PixelTracker::new("987", server.url("/tr")).unwrap();
        let handle = tracker.send(TrackingEvent::Lead).unwrap();
        handle.await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_collector_failure_is_swallowed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tr");
                then.status(500);
            })
            .await;

        let tracker = PixelTracker::new("987", server.url("/tr")).unwrap();
        let handle = tracker.send(TrackingEvent::PageView).unwrap();
        assert!(handle.await.is_ok());
    }
}
