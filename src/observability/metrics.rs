//! Route table metrics.
//!
//! # Metrics
//! - `route_binder_routes_registered_total` (counter): mounted routes by method
//! - `route_binder_duplicate_routes_total` (counter): duplicate registrations by method

pub(crate) const ROUTES_REGISTERED: &str = "route_binder_routes_registered_total";
pub(crate) const DUPLICATE_ROUTES: &str = "route_binder_duplicate_routes_total";

/// Record a mounted route.
pub fn record_route_registered(method: &str) {
    ::metrics::counter!(ROUTES_REGISTERED, "method" => method.to_string()).increment(1);
}

/// Record a rejected or ignored duplicate registration.
pub fn record_duplicate_route(method: &str) {
    ::metrics::counter!(DUPLICATE_ROUTES, "method" => method.to_string()).increment(1);
}


#[cfg(test)]
mod tests {
    use super::testing::CountingRecorder;
    use super::*;

    #[test]
    fn test_duplicate_counter() {
        let recorder = CountingRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            record_duplicate_route("GET");
            record_duplicate_route("PUT");
            record_route_registered("GET");
        });
        assert_eq!(recorder.count(DUPLICATE_ROUTES), 2);
        assert_eq!(recorder.count(ROUTES_REGISTERED), 1);
    }
}
