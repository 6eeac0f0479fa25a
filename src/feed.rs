use crate::error::LoadWarning;
use crate::id::Collection;
use crate::objects::*;
use crate::{Error, FeedReader, RawFeed};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Data structure with all the objects of a feed, linked together
///
/// The feed owns every object. [Trip] and [StopTime] only hold [crate::Id] of the objects they reference,
/// to be resolved through the collections below.
#[derive(Debug, Default)]
pub struct Feed {
    /// Directory the feed was read from
    pub dir: PathBuf,
    /// Time needed to read and parse the files in milliseconds
    pub read_duration: i64,
    /// Weekly patterns, by service id
    pub calendar: HashMap<String, CalendarEntry>,
    pub shapes: Collection<Shape>,
    pub routes: Collection<Route>,
    pub trips: Collection<Trip>,
    pub stops: Collection<Stop>,
    /// Rows skipped or degraded because of unknown references, in the order they were met
    pub warnings: Vec<LoadWarning>,
}

impl Feed {
    /// Loads the feed found in the directory `path`.
    ///
    /// `stop_times.txt` is only read when `read_stop_times` is set, otherwise every trip has no stop times.
    pub fn load<P>(path: P, read_stop_times: bool) -> Result<Feed, Error>
    where
        P: AsRef<Path>,
    {
        FeedReader::default()
            .read_stop_times(read_stop_times)
            .read(path)
    }

    /// Loads the feed found in the directory `path`, stop times included
    pub fn from_path<P>(path: P) -> Result<Feed, Error>
    where
        P: AsRef<Path>,
    {
        FeedReader::default().read(path)
    }

    pub fn print_stats(&self) {
        println!("Feed data:");
        println!("  Read in {} ms", self.read_duration);
        println!("  Calendar entries: {}", self.calendar.len());
        println!("  Shapes: {}", self.shapes.len());
        println!("  Routes: {}", self.routes.len());
        println!("  Trips: {}", self.trips.len());
        println!("  Stops: {}", self.stops.len());
        println!("  Warnings: {}", self.warnings.len());
    }

    pub fn get_route<'a>(&'a self, id: &str) -> Result<&'a Route, Error> {
        self.routes
            .get_by_str(id)
            .map(|(_, r)| r)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }

    pub fn get_trip<'a>(&'a self, id: &str) -> Result<&'a Trip, Error> {
        self.trips
            .get_by_str(id)
            .map(|(_, t)| t)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }

    pub fn get_shape<'a>(&'a self, id: &str) -> Result<&'a Shape, Error> {
        self.shapes
            .get_by_str(id)
            .map(|(_, s)| s)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }

    pub fn get_stop<'a>(&'a self, id: &str) -> Result<&'a Stop, Error> {
        self.stops
            .get_by_str(id)
            .map(|(_, s)| s)
            .ok_or_else(|| Error::ReferenceError(id.to_owned()))
    }

    pub fn get_calendar_entry<'a>(&'a self, service_id: &str) -> Result<&'a CalendarEntry, Error> {
        self.calendar
            .get(service_id)
            .ok_or_else(|| Error::ReferenceError(service_id.to_owned()))
    }

    fn warn(&mut self, warning: LoadWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Creates the trips and appends each of them to its route, in file order
    fn link_trips(&mut self, raw_trips: Vec<RawTrip>) {
        for t in raw_trips {
            let route_id = match self.routes.get_id(t.route_id.trim()) {
                Some(id) => id,
                None => {
                    self.warn(LoadWarning::UnknownRoute {
                        trip_id: t.id,
                        route_id: t.route_id,
                    });
                    continue;
                }
            };
            if self.trips.contains(&t.id) {
                self.warn(LoadWarning::DuplicateTrip { trip_id: t.id });
                continue;
            }
            let shape = if t.shape_id.is_empty() {
                None
            } else {
                let shape = self.shapes.get_id(&t.shape_id);
                if shape.is_none() {
                    self.warn(LoadWarning::UnknownShape {
                        trip_id: t.id.clone(),
                        shape_id: t.shape_id.clone(),
                    });
                }
                shape
            };

            let (trip_id, _) = self.trips.insert(
                t.id.clone(),
                Trip {
                    id: t.id,
                    route: route_id.clone(),
                    shape,
                    service_id: t.service_id,
                    direction: t.direction,
                    headsign: t.headsign,
                    stop_times: Vec::new(),
                },
            );
            if let Some(route) = self.routes.get_mut(&route_id) {
                route.trips.push(trip_id);
            }
        }
    }

    /// Appends the stop times to their trips, then sorts each trip by stop sequence
    fn link_stop_times(&mut self, raw_stop_times: Vec<RawStopTime>) {
        for s in raw_stop_times {
            if !self.trips.contains(&s.trip_id) {
                self.warn(LoadWarning::UnknownTrip { trip_id: s.trip_id });
                continue;
            }
            let stop = match self.stops.get_id(&s.stop_id) {
                Some(id) => id,
                None => {
                    self.warn(LoadWarning::UnknownStop {
                        trip_id: s.trip_id,
                        stop_id: s.stop_id,
                    });
                    continue;
                }
            };
            if let Some((trip_id, trip)) = self.trips.get_mut_by_str(&s.trip_id) {
                trip.stop_times.push(StopTime {
                    stop,
                    trip: trip_id,
                    time: s.time,
                    departure_time: s.departure_time,
                    sequence: s.sequence,
                });
            }
        }

        for trip in self.trips.values_mut() {
            trip.stop_times.sort_by_key(|st| st.sequence);
        }
    }
}

/// Builds the shapes from their points.
///
/// The points of a shape are expected to be contiguous in `shapes.txt`: a shape is
/// committed each time the shape id changes. If the points of a shape are split in
/// several blocks, only the last block is kept.
pub(crate) fn group_shapes(points: Vec<RawShapePoint>) -> Collection<Shape> {
    let mut shapes = Collection::default();
    let mut current: Option<Shape> = None;
    for p in points {
        let same_shape = current.as_ref().map_or(false, |s| s.id == p.id);
        if !same_shape {
            if let Some(done) = current.take() {
                commit_shape(&mut shapes, done);
            }
            current = Some(Shape {
                id: p.id.clone(),
                coords: Vec::new(),
            });
        }
        if let Some(shape) = current.as_mut() {
            shape.coords.push(p.coord());
        }
    }
    if let Some(done) = current {
        commit_shape(&mut shapes, done);
    }

    for shape in shapes.values_mut() {
        shape.coords.sort_by_key(|c| c.sequence);
    }
    shapes
}

fn commit_shape(shapes: &mut Collection<Shape>, shape: Shape) {
    let (id, previous) = shapes.insert(shape.id.clone(), shape);
    if previous.is_some() {
        debug!("points of shape {} are not contiguous, previous ones dropped", id);
    }
}

impl From<RawFeed> for Feed {
    /// Links the rows in dependency order: calendar, shapes, routes, trips, stops, then stop times
    fn from(raw: RawFeed) -> Feed {
        let mut feed = Feed {
            dir: raw.dir,
            read_duration: raw.read_duration,
            calendar: raw
                .calendar
                .into_iter()
                .map(|c| (c.service_id.clone(), CalendarEntry::from(c)))
                .collect(),
            shapes: group_shapes(raw.shapes),
            ..Feed::default()
        };

        for r in raw.routes {
            feed.routes.insert(r.id.clone(), Route::from(r));
        }

        feed.link_trips(raw.trips);

        for s in raw.stops {
            feed.stops.insert(s.id.clone(), Stop::from(s));
        }

        if let Some(stop_times) = raw.stop_times {
            feed.link_stop_times(stop_times);
        }

        feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: &str, sequence: u32) -> RawShapePoint {
        RawShapePoint {
            id: id.to_owned(),
            latitude: 45.,
            longitude: 4.,
            sequence,
        }
    }

    fn sequences(shape: &Shape) -> Vec<u32> {
        shape.coords.iter().map(|c| c.sequence).collect()
    }

    #[test]
    fn shuffled_points_are_sorted() {
        let shapes = group_shapes(vec![point("A", 3), point("A", 1), point("A", 7), point("A", 2)]);
        let (_, a) = shapes.get_by_str("A").unwrap();
        assert_eq!(vec![1, 2, 3, 7], sequences(a));
    }

    #[test]
    fn contiguous_groups() {
        let shapes = group_shapes(vec![
            point("A", 1),
            point("A", 2),
            point("B", 1),
            point("B", 2),
            point("B", 3),
        ]);
        assert_eq!(2, shapes.len());
        assert_eq!(2, shapes.get_by_str("A").unwrap().1.len());
        assert_eq!(3, shapes.get_by_str("B").unwrap().1.len());
    }

    #[test]
    fn split_group_keeps_last_block() {
        let shapes = group_shapes(vec![
            point("A", 1),
            point("A", 2),
            point("A", 3),
            point("B", 1),
            point("A", 9),
            point("A", 8),
        ]);
        assert_eq!(2, shapes.len());
        assert_eq!(vec![8, 9], sequences(shapes.get_by_str("A").unwrap().1));
    }

    #[test]
    fn no_points() {
        assert!(group_shapes(Vec::new()).is_empty());
    }
}
