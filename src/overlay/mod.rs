//! Text overlay: clock, last-visit location and brand.
//!
//! Everything here is best-effort. A failed lookup or an unreadable record
//! degrades to placeholder text and a log line.

mod clock;
mod location;
mod visit;

use web_time::SystemTime;

pub use self::clock::{format_clock, unix_millis};
#[cfg(feature = "net")]
pub use self::location::IpApiClient;
pub use self::location::{
    location_label, LocationData, LocationSource, UNKNOWN_LOCATION,
};
pub use self::visit::{FileStore, MemoryStore, VisitLog, VisitRecord, VisitStore};
use crate::error::SceneError;
use crate::options::OverlayOptions;

/// Overlay text state for one mount.
#[derive(Debug, Clone)]
pub struct Overlay {
    brand: String,
    clock: String,
    location: String,
    log: VisitLog,
    previous: Option<VisitRecord>,
}

impl Overlay {
    /// Empty overlay; the location line stays blank until
    /// [`mount`](Self::mount) or a lookup fills it.
    #[must_use]
    pub fn new(options: &OverlayOptions) -> Self {
        Self {
            brand: options.brand.clone(),
            clock: String::new(),
            location: " ".to_owned(),
            log: VisitLog::new(options.storage_key.clone()),
            previous: None,
        }
    }

    /// Read the stored visit once and show it until a lookup replaces it.
    pub fn mount(&mut self, store: &dyn VisitStore) {
        self.previous = self.log.load(store);
        if let Some(record) = &self.previous {
            self.location =
                location_label(Some((&record.city, &record.country)));
        }
    }

    /// Refresh the clock label. Returns `true` when the text changed.
    pub fn update_clock(&mut self, now: SystemTime, utc_offset_minutes: i32) -> bool {
        let next = format_clock(now, utc_offset_minutes);
        if next == self.clock {
            return false;
        }
        self.clock = next;
        true
    }

    /// Show the outcome of a lookup and persist it when it named a place.
    pub fn apply_location(
        &mut self,
        result: Result<LocationData, SceneError>,
        store: &mut dyn VisitStore,
        now: SystemTime,
    ) -> &str {
        let data = match result {
            Ok(data) => data,
            Err(e) => {
                log::error!("failed to fetch location: {e}");
                self.location = UNKNOWN_LOCATION.to_owned();
                return &self.location;
            }
        };
        self.location = location_label(data.place());
        if let Some((city, country)) = data.place() {
            let record = VisitRecord {
                city: city.to_owned(),
                country: country.to_owned(),
                timestamp: unix_millis(now),
            };
            if let Err(e) = self.log.save(store, &record) {
                log::warn!("could not store last visit: {e}");
            }
        }
        &self.location
    }

    /// Run one blocking lookup against `source` and apply it.
    pub fn refresh_location(
        &mut self,
        source: &dyn LocationSource,
        store: &mut dyn VisitStore,
        now: SystemTime,
    ) -> &str {
        let result = source.fetch();
        self.apply_location(result, store, now)
    }

    /// `HH:MM` label.
    #[must_use]
    pub fn clock(&self) -> &str {
        &self.clock
    }

    /// Last-visit label.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Brand text.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Visit stored before this mount.
    #[must_use]
    pub fn previous_visit(&self) -> Option<&VisitRecord> {
        self.previous.as_ref()
    }
}
