use crate::{Error, Feed, RawFeed};
use std::path::Path;

/// Allows to parameterize how the feed is loaded
///
/// ```
///let feed = transit_feed::FeedReader::default()
///    .without_stop_times()
///    .read("fixtures/basic")?;
///assert_eq!(0, feed.get_trip("T1")?.stop_times.len());
/// # Ok::<(), transit_feed::Error>(())
///```
#[derive(Derivative, Debug, Clone)]
#[derivative(Default)]
pub struct FeedReader {
    /// [crate::StopTime] are the largest part of a feed and not always needed. This allows to skip reading them
    #[derivative(Default(value = "true"))]
    pub read_stop_times: bool,
}

impl FeedReader {
    /// Configures the reader to not read the stop times
    ///
    /// This can be useful to save time and memory with large datasets when only the routes and their geometry are needed
    /// Returns Self and can be chained
    pub fn without_stop_times(&mut self) -> &mut Self {
        self.read_stop_times = false;
        self
    }

    /// Configures the reader to read or not the stop times (default: true)
    pub fn read_stop_times(&mut self, read_stop_times: bool) -> &mut Self {
        self.read_stop_times = read_stop_times;
        self
    }

    /// Reads and links the feed found in the directory `path`
    pub fn read<P>(&self, path: P) -> Result<Feed, Error>
    where
        P: AsRef<Path>,
    {
        self.raw_from_path(path).map(Feed::from)
    }

    /// Reads the rows of the feed found in the directory `path`, without linking them
    pub fn raw_from_path<P>(&self, path: P) -> Result<RawFeed, Error>
    where
        P: AsRef<Path>,
    {
        RawFeed::from_path_params(path, self)
    }
}
