use tzf_rs::DefaultFinder;

/// Resolves the IANA timezone identifier covering a coordinate pair.
pub trait TimezoneLookup: Send + Sync {
    fn timezone_at(&self, latitude: f64, longitude: f64) -> Option<String>;
}

/// Offline lookup backed by the polygons bundled with `tzf-rs`.
pub struct TzfLookup {
    finder: DefaultFinder,
}

impl TzfLookup {
    /// Loading the polygon data takes a moment, so build this once at startup.
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneLookup for TzfLookup {
    fn timezone_at(&self, latitude: f64, longitude: f64) -> Option<String> {
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_zones_for_major_cities() {
        let lookup = TzfLookup::new();
        assert_eq!(
            lookup.timezone_at(51.5074, -0.1278).as_deref(),
            Some("Europe/London")
        );
        assert_eq!(
            lookup.timezone_at(35.6762, 139.6503).as_deref(),
            Some("Asia/Tokyo")
        );
        assert_eq!(
            lookup.timezone_at(40.7128, -74.0060).as_deref(),
            Some("America/New_York")
        );
    }
}
