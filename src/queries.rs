//! Read-only views derived from a loaded [Feed].
//!
//! Whenever several objects qualify, the results are ordered by id so that the
//! same feed always gives the same answers.

use crate::objects::*;
use crate::Feed;
use chrono::Weekday;
use itertools::Itertools;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl Feed {
    /// The route whose short name is exactly `short_name`.
    ///
    /// If several routes share that short name, the one with the smallest id is returned.
    pub fn route_by_short_name(&self, short_name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .filter(|(_, r)| r.short_name == short_name)
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, r)| r)
    }

    /// The trips of `route`, in the order of `trips.txt`
    pub fn route_trips<'a>(&'a self, route: &'a Route) -> impl Iterator<Item = &'a Trip> + 'a {
        route.trips.iter().filter_map(move |id| self.trips.get(id))
    }

    /// The distinct shapes drawn by the trips of `route`, by shape id
    pub fn route_shapes(&self, route: &Route) -> Vec<&Shape> {
        self.route_trips(route)
            .filter_map(|t| t.shape.as_ref())
            .unique()
            .sorted()
            .filter_map(|id| self.shapes.get(id))
            .collect()
    }

    /// The shape of `route` with the most points, the smallest shape id on ties
    pub fn longest_shape(&self, route: &Route) -> Option<&Shape> {
        self.route_shapes(route)
            .into_iter()
            .fold(None, |longest: Option<&Shape>, s| match longest {
                Some(l) if l.len() >= s.len() => Some(l),
                _ => Some(s),
            })
    }

    /// The distinct stops served by the trips of `route`, by stop id.
    ///
    /// Always empty if the stop times were not loaded.
    pub fn route_stops(&self, route: &Route) -> Vec<&Stop> {
        self.route_trips(route)
            .flat_map(|t| t.stop_times.iter().map(|st| &st.stop))
            .unique()
            .sorted()
            .filter_map(|id| self.stops.get(id))
            .collect()
    }

    /// The headsigns of `route` for the directions `0` and `1`.
    ///
    /// For each direction, the headsign of the first trip with the longest shape is kept.
    /// A trip must have more than 0 shape points to be picked in direction `0` and more
    /// than 1 in direction `1`; any direction other than `0` counts as `1`. Trips without
    /// shape are ignored. A direction without any qualifying trip gets an empty headsign.
    pub fn headsigns(&self, route: &Route) -> [String; 2] {
        let mut longest = [0, 1];
        let mut headsigns = [String::new(), String::new()];

        for trip in self.route_trips(route) {
            let shape_len = match trip.shape.as_ref().and_then(|id| self.shapes.get(id)) {
                Some(shape) => shape.len(),
                None => continue,
            };
            let direction = if trip.direction == "0" { 0 } else { 1 };
            if shape_len > longest[direction] {
                longest[direction] = shape_len;
                headsigns[direction] = trip.headsign.trim().to_owned();
            }
        }

        headsigns
    }

    /// The service ids running on each day from Monday to Sunday.
    ///
    /// A service appears once per day it runs; within a day, services are sorted by id.
    pub fn calendar(&self) -> Vec<&str> {
        WEEK.iter()
            .flat_map(|day| {
                self.calendar
                    .values()
                    .filter(move |c| c.valid_weekday(*day))
                    .map(|c| c.service_id.as_str())
                    .sorted()
            })
            .collect()
    }

    /// The services running on `date`, sorted by id
    pub fn services_on(&self, date: chrono::NaiveDate) -> Vec<&str> {
        self.calendar
            .values()
            .filter(|c| c.is_active_on(date))
            .map(|c| c.service_id.as_str())
            .sorted()
            .collect()
    }
}
