//! Device location and heading updates
//!
//! The platform side pushes position fixes and compass readings through a
//! [`LocationPublisher`]; the navigation service consumes them from the
//! paired [`LocationProvider`]. There is no error channel: a provider that
//! stops producing simply yields no more updates.

use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::DomainError;
use domain::entities::LocationFix;
use domain::value_objects::{GeoLocation, HeadingReading};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::error::ApplicationError;

/// Number of updates buffered before publishers wait
pub const DEFAULT_BUFFER: usize = 64;

/// A single update from the device
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    /// New position
    Fix(LocationFix),
    /// New compass reading
    Heading(HeadingReading),
}

/// Create a connected publisher/provider pair
#[must_use]
pub fn location_channel(buffer: usize) -> (LocationPublisher, LocationProvider) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (LocationPublisher { tx }, LocationProvider { rx })
}

/// Sending half, held by the platform integration
#[derive(Debug, Clone)]
pub struct LocationPublisher {
    tx: mpsc::Sender<LocationEvent>,
}

impl LocationPublisher {
    /// Publish a position fix
    ///
    /// A negative or non-finite `accuracy_m` is reported by platforms without
    /// an accuracy estimate and is stored as unknown.
    ///
    /// # Errors
    ///
    /// Returns a domain error for out-of-range coordinates and an internal
    /// error once the provider has been dropped.
    pub async fn publish_fix(
        &self,
        latitude: f64,
        longitude: f64,
        accuracy_m: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ApplicationError> {
        let location = GeoLocation::new(latitude, longitude).map_err(DomainError::from)?;
        let mut fix = LocationFix::new(location, timestamp);
        if let Some(accuracy) = accuracy_m.filter(|a| a.is_finite() && *a >= 0.0) {
            fix = fix.with_accuracy(accuracy);
        }
        self.publish(LocationEvent::Fix(fix)).await
    }

    /// Publish a compass reading
    ///
    /// # Errors
    ///
    /// Returns an internal error once the provider has been dropped.
    pub async fn publish_heading(&self, reading: HeadingReading) -> Result<(), ApplicationError> {
        self.publish(LocationEvent::Heading(reading)).await
    }

    /// Publish any event
    ///
    /// # Errors
    ///
    /// Returns an internal error once the provider has been dropped.
    pub async fn publish(&self, event: LocationEvent) -> Result<(), ApplicationError> {
        trace!(?event, "Publishing location event");
        self.tx
            .send(event)
            .await
            .map_err(|_| ApplicationError::Internal("location listener stopped".to_string()))
    }

    /// Feed a recorded sequence of events, pausing `interval` between them
    ///
    /// Returns how many events were delivered.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the provider is dropped mid-replay.
    pub async fn replay<I>(&self, events: I, interval: Duration) -> Result<usize, ApplicationError>
    where
        I: IntoIterator<Item = LocationEvent>,
    {
        let mut delivered = 0;
        for event in events {
            if delivered > 0 && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
            self.publish(event).await?;
            delivered += 1;
        }
        debug!(delivered, "Replay finished");
        Ok(delivered)
    }
}

/// Receiving half, consumed by the navigation service
#[derive(Debug)]
pub struct LocationProvider {
    rx: mpsc::Receiver<LocationEvent>,
}

impl LocationProvider {
    /// Wait for the next update; `None` once every publisher is gone
    pub async fn next(&mut self) -> Option<LocationEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::Heading;

    use super::*;

    #[tokio::test]
    async fn test_fix_roundtrip() {
        let (publisher, mut provider) = location_channel(DEFAULT_BUFFER);
        let now = Utc::now();

        publisher.publish_fix(37.5665, 126.978, None, now).await.unwrap();

        let Some(LocationEvent::Fix(fix)) = provider.next().await else {
            panic!("expected a fix");
        };
        assert_eq!(fix.location, GeoLocation::seoul_city_hall());
        assert_eq!(fix.timestamp, now);
        assert_eq!(fix.accuracy_m, None);
    }

    #[tokio::test]
    async fn test_fix_carries_accuracy() {
        let (publisher, mut provider) = location_channel(DEFAULT_BUFFER);

        publisher
            .publish_fix(37.5665, 126.978, Some(8.5), Utc::now())
            .await
            .unwrap();
        publisher
            .publish_fix(37.5665, 126.978, Some(-1.0), Utc::now())
            .await
            .unwrap();
        publisher
            .publish_fix(37.5665, 126.978, Some(f64::NAN), Utc::now())
            .await
            .unwrap();

        let mut accuracies = Vec::new();
        for _ in 0..3 {
            let Some(LocationEvent::Fix(fix)) = provider.next().await else {
                panic!("expected a fix");
            };
            accuracies.push(fix.accuracy_m);
        }
        assert_eq!(accuracies, vec![Some(8.5), None, None]);
    }

    #[tokio::test]
    async fn test_invalid_fix_rejected() {
        let (publisher, _provider) = location_channel(DEFAULT_BUFFER);
        let result = publisher.publish_fix(91.0, 0.0, None, Utc::now()).await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn test_heading_event() {
        let (publisher, mut provider) = location_channel(DEFAULT_BUFFER);
        publisher
            .publish_heading(HeadingReading::new(-1.0, 270.0))
            .await
            .unwrap();

        let Some(LocationEvent::Heading(reading)) = provider.next().await else {
            panic!("expected a heading");
        };
        assert_eq!(reading.resolve(), Heading::from_degrees(270.0));
    }

    #[tokio::test]
    async fn test_closed_provider() {
        let (publisher, provider) = location_channel(DEFAULT_BUFFER);
        drop(provider);
        let result = publisher.publish_fix(37.5, 127.0, Some(12.0), Utc::now()).await;
        assert!(matches!(result, Err(ApplicationError::Internal(_))));
    }

    #[test]
    fn test_provider_ends_when_publishers_dropped() {
        let (publisher, mut provider) = location_channel(1);
        drop(publisher);
        assert!(tokio_test::block_on(provider.next()).is_none());
    }

    #[test]
    fn test_cloned_publishers_share_channel() {
        let (publisher, mut provider) = location_channel(DEFAULT_BUFFER);
        let second = publisher.clone();
        tokio_test::block_on(async {
            tokio_test::assert_ok!(
                publisher
                    .publish_fix(37.5, 127.0, Some(12.0), Utc::now())
                    .await
            );
            tokio_test::assert_ok!(
                second
                    .publish_heading(HeadingReading::new(45.0, 40.0))
                    .await
            );
            drop(publisher);
            drop(second);

            assert!(matches!(provider.next().await, Some(LocationEvent::Fix(_))));
            assert!(matches!(provider.next().await, Some(LocationEvent::Heading(_))));
            assert!(provider.next().await.is_none());
        });
    }

    #[tokio::test]
    async fn test_replay_preserves_order() {
        let (publisher, mut provider) = location_channel(DEFAULT_BUFFER);
        let now = Utc::now();
        let events = vec![
            LocationEvent::Fix(LocationFix::new(GeoLocation::seoul_city_hall(), now)),
            LocationEvent::Heading(HeadingReading::new(10.0, 12.0)),
            LocationEvent::Fix(LocationFix::new(GeoLocation::gangnam_station(), now)),
        ];

        let delivered = publisher
            .replay(events.clone(), Duration::from_millis(1))
            .await
            .unwrap();
        assert_eq!(delivered, 3);

        for expected in events {
            assert_eq!(provider.next().await, Some(expected));
        }
    }
}
