use thiserror::Error;

#[derive(Debug)]
pub struct LineError {
    pub headers: Vec<String>,
    pub values: Vec<String>,
}

/// An error that can occur when loading a feed.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cound not find file {0}")]
    MissingFile(String),
    #[error("The id {0} is not known")]
    ReferenceError(String),
    #[error("Could not read feed: {0} is not a directory")]
    NotADirectory(String),
    #[error("'{0}' is not a valid color")]
    InvalidColor(String),
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("impossible to read csv file '{file_name}'")]
    CSVError {
        file_name: String,
        #[source]
        source: csv::Error,
        line_in_error: Option<LineError>,
    },
}

/// A row skipped or degraded while linking the feed.
///
/// Referencing rows are never fatal: the loader records one of these and goes on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    #[error("trip {trip_id} references the unknown route {route_id}, trip skipped")]
    UnknownRoute { trip_id: String, route_id: String },
    #[error("trip {trip_id} references the unknown shape {shape_id}, trip kept without shape")]
    UnknownShape { trip_id: String, shape_id: String },
    #[error("trip {trip_id} is defined several times, only the first one is kept")]
    DuplicateTrip { trip_id: String },
    #[error("a stop time references the unknown trip {trip_id}, stop time skipped")]
    UnknownTrip { trip_id: String },
    #[error("a stop time of trip {trip_id} references the unknown stop {stop_id}, stop time skipped")]
    UnknownStop { trip_id: String, stop_id: String },
}
