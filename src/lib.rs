/*! Loads a static [GTFS](https://gtfs.org/) feed directory into memory, links its objects together and answers
a few questions about its routes (shapes, stops, headsigns) and its services.

To get started, see [Feed::load].

## What is read

Six files of the feed directory are read, in this order since each one references ids defined by the previous ones:
`calendar.txt`, `shapes.txt`, `routes.txt`, `trips.txt`, `stops.txt` and, when requested, `stop_times.txt`.

A file that cannot be read at all (missing file, unreadable header, missing mandatory column) fails the load with an [Error].
A cell that cannot be decoded does not: the field takes its zero value.
A row referencing an unknown object is skipped (or, for an unknown shape, kept without shape) and a [LoadWarning] is recorded.

## Design decisions

### Two representations

The [RawFeed] representation holds the rows as close as possible to their CSV representation, in file order.

[Feed] links them. Objects are owned by the feed; references between objects are typed [Id] that can only be
obtained from the feed collections.

### Shapes grouping

The points of a shape are expected to be contiguous in `shapes.txt`. A shape whose points are split into several
blocks only keeps its last block.
*/

#[macro_use]
extern crate derivative;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod error;
mod feed;
mod feed_reader;
mod id;
pub(crate) mod objects;
mod queries;
mod raw_feed;
mod serde_helpers;

#[cfg(test)]
mod tests;

pub use error::{Error, LoadWarning};
pub use feed::Feed;
pub use feed_reader::FeedReader;
pub use id::{Collection, Id};
pub use objects::*;
pub use raw_feed::{read_objs, RawFeed};
