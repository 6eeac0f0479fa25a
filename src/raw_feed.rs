use crate::objects::*;
use crate::{Error, FeedReader};
use chrono::Utc;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const CALENDAR_FILE: &str = "calendar.txt";
pub const SHAPES_FILE: &str = "shapes.txt";
pub const ROUTES_FILE: &str = "routes.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const STOPS_FILE: &str = "stops.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";

/// The rows of each file of a feed directory, decoded but not linked
///
/// Rows are kept in file order, which [crate::Feed] relies on to group the shape points.
#[derive(Debug, Default)]
pub struct RawFeed {
    /// Directory the feed was read from
    pub dir: PathBuf,
    /// Time needed to read and parse the files in milliseconds
    pub read_duration: i64,
    pub calendar: Vec<RawCalendar>,
    pub shapes: Vec<RawShapePoint>,
    pub routes: Vec<RawRoute>,
    pub trips: Vec<RawTrip>,
    pub stops: Vec<RawStop>,
    /// None when the stop times were not requested
    pub stop_times: Option<Vec<RawStopTime>>,
}

/// Decodes every row of a csv `reader`, in order.
///
/// The header line must hold every mandatory column of `O`; a missing one fails the whole file.
pub fn read_objs<T, O>(mut reader: T, file_name: &str) -> Result<Vec<O>, Error>
where
    for<'de> O: Deserialize<'de>,
    T: std::io::Read,
{
    let mut bom = Vec::with_capacity(3);
    reader
        .by_ref()
        .take(3)
        .read_to_end(&mut bom)
        .map_err(|e| Error::NamedFileIO {
            file_name: file_name.to_owned(),
            source: e,
        })?;
    if bom == [0xefu8, 0xbbu8, 0xbfu8] {
        bom.clear();
    }
    let chained = bom.as_slice().chain(reader);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(chained);
    // We store the headers to be able to return them in case of errors
    let headers = reader
        .headers()
        .map_err(|e| Error::CSVError {
            file_name: file_name.to_owned(),
            source: e,
            line_in_error: None,
        })?
        .clone();

    let mut res = Vec::new();
    for rec in reader.records() {
        let r = rec.map_err(|e| Error::CSVError {
            file_name: file_name.to_owned(),
            source: e,
            line_in_error: None,
        })?;
        let o = r.deserialize(Some(&headers)).map_err(|e| Error::CSVError {
            file_name: file_name.to_owned(),
            source: e,
            line_in_error: Some(crate::error::LineError {
                headers: headers.iter().map(|s| s.to_owned()).collect(),
                values: r.iter().map(|s| s.to_owned()).collect(),
            }),
        })?;
        res.push(o);
    }

    info!("{} {}", file_name, res.len());
    Ok(res)
}

fn read_objs_from_path<O>(dir_path: &Path, file_name: &str) -> Result<Vec<O>, Error>
where
    for<'de> O: Deserialize<'de>,
{
    let path = dir_path.join(file_name);
    if path.exists() {
        File::open(path)
            .map_err(|e| Error::NamedFileIO {
                file_name: file_name.to_owned(),
                source: e,
            })
            .and_then(|r| read_objs(std::io::BufReader::new(r), file_name))
    } else {
        Err(Error::MissingFile(file_name.to_owned()))
    }
}

impl RawFeed {
    /// Reads a feed directory, including the stop times
    pub fn from_path<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        Self::from_path_params(path, &FeedReader::default())
    }

    /// Reads the files in dependency order and stops at the first one that cannot be read
    pub(crate) fn from_path_params<P>(path: P, params: &FeedReader) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let p = path.as_ref();
        if !p.is_dir() {
            return Err(Error::NotADirectory(format!("{}", p.display())));
        }
        let now = Utc::now();

        let calendar = read_objs_from_path(p, CALENDAR_FILE)?;
        let shapes = read_objs_from_path(p, SHAPES_FILE)?;
        let routes = read_objs_from_path(p, ROUTES_FILE)?;
        let trips = read_objs_from_path(p, TRIPS_FILE)?;
        let stops = read_objs_from_path(p, STOPS_FILE)?;
        let stop_times = if params.read_stop_times {
            Some(read_objs_from_path(p, STOP_TIMES_FILE)?)
        } else {
            None
        };

        Ok(Self {
            dir: p.to_path_buf(),
            calendar,
            shapes,
            routes,
            trips,
            stops,
            stop_times,
            read_duration: Utc::now().signed_duration_since(now).num_milliseconds(),
        })
    }

    /// Prints on stdout the number of rows read in each file
    pub fn print_stats(&self) {
        println!("Feed files:");
        println!("  Read in {} ms", self.read_duration);
        println!("  Calendar: {} rows", self.calendar.len());
        println!("  Shapes: {} points", self.shapes.len());
        println!("  Routes: {} rows", self.routes.len());
        println!("  Trips: {} rows", self.trips.len());
        println!("  Stops: {} rows", self.stops.len());
        match &self.stop_times {
            Some(stop_times) => println!("  Stop times: {} rows", stop_times.len()),
            None => println!("  Stop times: not read"),
        }
    }
}
