use crate::id::Id;
use crate::serde_helpers::*;
use chrono::{Datelike, NaiveDate, Weekday};
use rgb::RGB8;
use std::fmt;

/// Kind of vehicle serving a [Route]
#[derive(Derivative, Debug, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
#[derivative(Default)]
pub enum RouteType {
    /// Tram, streetcar or any light rail system within a metropolitan area
    #[derivative(Default)]
    LightRail,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
}

impl RouteType {
    /// The route type of a `route_type` code, `None` outside of `0..=7`
    pub fn from_code(code: u16) -> Option<RouteType> {
        Some(match code {
            0 => RouteType::LightRail,
            1 => RouteType::Subway,
            2 => RouteType::Rail,
            3 => RouteType::Bus,
            4 => RouteType::Ferry,
            5 => RouteType::CableCar,
            6 => RouteType::Gondola,
            7 => RouteType::Funicular,
            _ => return None,
        })
    }
}

/// A position. The sequence number is only meaningful for the points of a [Shape]
#[derive(Debug, Serialize, Default, Clone, Copy, PartialEq)]
pub struct Coord {
    pub latitude: f64,
    pub longitude: f64,
    pub sequence: u32,
}

/// Weekly pattern of a service, keyed by `service_id` in the feed
#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub service_id: String,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CalendarEntry {
    pub fn valid_weekday(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Whether the service runs on `date`.
    ///
    /// A missing `start_date` or `end_date` leaves that side of the period open.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= date)
            && self.end_date.map_or(true, |end| date <= end)
            && self.valid_weekday(date.weekday())
    }
}

impl From<RawCalendar> for CalendarEntry {
    fn from(raw: RawCalendar) -> Self {
        CalendarEntry {
            service_id: raw.service_id,
            monday: raw.monday,
            tuesday: raw.tuesday,
            wednesday: raw.wednesday,
            thursday: raw.thursday,
            friday: raw.friday,
            saturday: raw.saturday,
            sunday: raw.sunday,
            start_date: raw.start_date,
            end_date: raw.end_date,
        }
    }
}

/// Physical path taken by the vehicles. Its points are sorted by sequence once loaded
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct Shape {
    pub id: String,
    pub coords: Vec<Coord>,
}

impl Shape {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub coord: Coord,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A line, made of the [Trip] listed in `trips` in the order of `trips.txt`
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct Route {
    pub id: String,
    pub short_name: String,
    pub long_name: String,
    pub agency_id: Option<String>,
    pub description: Option<String>,
    pub route_type: RouteType,
    pub url: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub trips: Vec<Id<Trip>>,
}

impl Route {
    /// The `route_color` as RGB, `None` if the column is absent or empty
    pub fn color_rgb(&self) -> Result<Option<RGB8>, crate::Error> {
        parse_optional_color(self.color.as_deref())
    }

    /// The `route_text_color` as RGB, `None` if the column is absent or empty
    pub fn text_color_rgb(&self) -> Result<Option<RGB8>, crate::Error> {
        parse_optional_color(self.text_color.as_deref())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.long_name.is_empty() {
            write!(f, "{}", self.long_name)
        } else {
            write!(f, "{}", self.short_name)
        }
    }
}

impl From<RawRoute> for Route {
    fn from(raw: RawRoute) -> Self {
        Route {
            id: raw.id,
            short_name: raw.short_name,
            long_name: raw.long_name,
            agency_id: raw.agency_id,
            description: raw.description,
            route_type: raw.route_type,
            url: raw.url,
            color: raw.color,
            text_color: raw.text_color,
            trips: Vec::new(),
        }
    }
}

/// One visit of a [Trip] at a [Stop]
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StopTime {
    pub stop: Id<Stop>,
    pub trip: Id<Trip>,
    /// Arrival, in seconds since midnight of the service day
    pub time: u32,
    pub departure_time: Option<u32>,
    pub sequence: u32,
}

/// A vehicle journey. Its stop times are only loaded on request, sorted by sequence
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Trip {
    pub id: String,
    pub route: Id<Route>,
    pub shape: Option<Id<Shape>>,
    pub service_id: String,
    pub direction: String,
    pub headsign: String,
    pub stop_times: Vec<StopTime>,
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route id: {}, service id: {}",
            self.route, self.service_id
        )
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawCalendar {
    pub service_id: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub monday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub tuesday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub wednesday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub thursday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub friday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub saturday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub sunday: bool,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawShapePoint {
    #[serde(rename = "shape_id")]
    pub id: String,
    #[serde(rename = "shape_pt_lat", deserialize_with = "de_lenient_float")]
    pub latitude: f64,
    #[serde(rename = "shape_pt_lon", deserialize_with = "de_lenient_float")]
    pub longitude: f64,
    #[serde(rename = "shape_pt_sequence", deserialize_with = "de_lenient_int")]
    pub sequence: u32,
}

impl RawShapePoint {
    pub fn coord(&self) -> Coord {
        Coord {
            latitude: self.latitude,
            longitude: self.longitude,
            sequence: self.sequence,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawRoute {
    #[serde(rename = "route_id", deserialize_with = "de_trimmed")]
    pub id: String,
    #[serde(rename = "route_short_name", deserialize_with = "de_trimmed")]
    pub short_name: String,
    #[serde(rename = "route_long_name", deserialize_with = "de_trimmed")]
    pub long_name: String,
    #[serde(default, deserialize_with = "de_optional_trimmed")]
    pub agency_id: Option<String>,
    #[serde(
        rename = "route_desc",
        alias = "description",
        default,
        deserialize_with = "de_optional_trimmed"
    )]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_route_type")]
    pub route_type: RouteType,
    #[serde(
        rename = "route_url",
        alias = "url",
        default,
        deserialize_with = "de_optional_trimmed"
    )]
    pub url: Option<String>,
    #[serde(rename = "route_color", default, deserialize_with = "de_optional_trimmed")]
    pub color: Option<String>,
    #[serde(
        rename = "route_text_color",
        alias = "text_color",
        default,
        deserialize_with = "de_optional_trimmed"
    )]
    pub text_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTrip {
    #[serde(rename = "trip_id")]
    pub id: String,
    pub route_id: String,
    pub service_id: String,
    #[serde(rename = "direction_id", default)]
    pub direction: String,
    #[serde(default)]
    pub shape_id: String,
    #[serde(rename = "trip_headsign", default)]
    pub headsign: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawStop {
    #[serde(rename = "stop_id")]
    pub id: String,
    #[serde(rename = "stop_name", default)]
    pub name: String,
    #[serde(rename = "stop_lat", deserialize_with = "de_lenient_float")]
    pub latitude: f64,
    #[serde(rename = "stop_lon", deserialize_with = "de_lenient_float")]
    pub longitude: f64,
}

impl From<RawStop> for Stop {
    fn from(raw: RawStop) -> Self {
        Stop {
            coord: Coord {
                latitude: raw.latitude,
                longitude: raw.longitude,
                sequence: 0,
            },
            id: raw.id,
            name: raw.name,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawStopTime {
    pub trip_id: String,
    pub stop_id: String,
    #[serde(rename = "stop_sequence", deserialize_with = "de_lenient_int")]
    pub sequence: u32,
    #[serde(rename = "arrival_time", deserialize_with = "deserialize_time")]
    pub time: u32,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub departure_time: Option<u32>,
}
