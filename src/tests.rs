use crate::objects::*;
use crate::{Error, Feed, FeedReader, LoadWarning, RawFeed};
use rgb::RGB8;

fn ids<'a, T: 'a>(objs: impl IntoIterator<Item = &'a T>, id: impl Fn(&T) -> &str) -> Vec<String> {
    objs.into_iter().map(|o| id(o).to_owned()).collect()
}

#[test]
fn read_calendar() {
    let feed = Feed::from_path("fixtures/basic").expect("impossible to read feed");
    assert_eq!(2, feed.calendar.len());
    let mon_wed = feed.get_calendar_entry("mon_wed").unwrap();
    assert!(mon_wed.monday);
    assert!(!mon_wed.tuesday);
    assert!(mon_wed.wednesday);
    assert!(!mon_wed.sunday);
    assert_eq!(
        chrono::NaiveDate::from_ymd_opt(2024, 12, 31),
        mon_wed.end_date
    );
}

#[test]
fn read_shapes() {
    let feed = Feed::from_path("fixtures/basic").expect("impossible to read feed");
    assert_eq!(2, feed.shapes.len());
    let s3 = feed.get_shape("S3").unwrap();
    assert_eq!(3, s3.len());
    assert_eq!(45.1, s3.coords[0].latitude);
    assert_eq!(4.1, s3.coords[0].longitude);
    let s5 = feed.get_shape("S5").unwrap();
    let sequences: Vec<u32> = s5.coords.iter().map(|c| c.sequence).collect();
    assert_eq!(vec![10, 20, 30, 40, 50], sequences);
}

#[test]
fn read_routes() {
    let feed = Feed::from_path("fixtures/basic").expect("impossible to read feed");
    assert_eq!(3, feed.routes.len());

    let r1 = feed.get_route("R1").unwrap();
    assert_eq!(RouteType::Bus, r1.route_type);
    assert_eq!(Some("TCL".to_owned()), r1.agency_id);
    assert_eq!(Some("".to_owned()), r1.description);
    assert_eq!(Some("http://example.com/n".to_owned()), r1.url);
    assert_eq!(Some(RGB8::new(255, 0, 0)), r1.color_rgb().unwrap());
    assert_eq!(Some(RGB8::new(255, 255, 255)), r1.text_color_rgb().unwrap());

    let r2 = feed.get_route("R2").unwrap();
    assert_eq!("M", r2.short_name);
    assert_eq!("Metro", r2.long_name);
    assert_eq!(RouteType::Subway, r2.route_type);
    assert_eq!(None, r2.color_rgb().unwrap());

    assert_eq!(RouteType::LightRail, feed.get_route("R3").unwrap().route_type);
}

#[test]
fn trips_are_linked_in_file_order() {
    let feed = Feed::from_path("fixtures/basic").expect("impossible to read feed");
    assert_eq!(3, feed.trips.len());
    assert!(feed.warnings.is_empty());

    let r1 = feed.get_route("R1").unwrap();
    assert_eq!(vec!["T1", "T2"], ids(feed.route_trips(r1), |t| &t.id));

    let t1 = feed.get_trip("T1").unwrap();
    assert_eq!("R1", t1.route.as_str());
    assert_eq!(Some("S3"), t1.shape.as_deref());
    assert_eq!("weekdays", t1.service_id);
    assert_eq!("0", t1.direction);

    let t3 = feed.get_trip("T3").unwrap();
    assert_eq!(None, t3.shape);
    assert_eq!(vec!["T3"], ids(feed.route_trips(feed.get_route("R2").unwrap()), |t| &t.id));
    assert!(feed.get_route("R3").unwrap().trips.is_empty());
}

#[test]
fn read_stop_times() {
    let feed = Feed::load("fixtures/basic", true).expect("impossible to read feed");
    let stop_times = &feed.get_trip("T1").unwrap().stop_times;
    let sequences: Vec<u32> = stop_times.iter().map(|st| st.sequence).collect();
    assert_eq!(vec![1, 2, 3], sequences);
    assert_eq!("B", stop_times[1].stop.as_str());
    assert_eq!("T1", stop_times[1].trip.as_str());
    assert_eq!(8 * 3600 + 5 * 60, stop_times[1].time);
    assert_eq!(Some(8 * 3600 + 11 * 60), stop_times[2].departure_time);

    let late = &feed.get_trip("T2").unwrap().stop_times;
    assert_eq!(25 * 3600 + 10 * 60, late[0].time);
    assert_eq!(None, late[1].departure_time);
    assert_eq!("Gamma", feed.stops[&late[0].stop].name);
}

#[test]
fn skip_stop_times() {
    let feed = Feed::load("fixtures/basic", false).expect("impossible to read feed");
    assert_eq!(3, feed.trips.len());
    assert!(feed.trips.values().all(|t| t.stop_times.is_empty()));
    assert_eq!(3, feed.stops.len());

    let r1 = feed.get_route("R1").unwrap();
    assert!(feed.route_stops(r1).is_empty());
}

#[test]
fn stop_times_file_is_not_opened_when_skipped() {
    let feed = FeedReader::default()
        .without_stop_times()
        .read("fixtures/no_stop_times")
        .expect("impossible to read feed");
    assert_eq!(3, feed.trips.len());

    match Feed::load("fixtures/no_stop_times", true) {
        Err(Error::MissingFile(f)) => assert_eq!("stop_times.txt", f),
        other => panic!("unexpected result {:?}", other.map(|f| f.trips.len())),
    }
}

#[test]
fn missing_required_file() {
    match Feed::load("fixtures/missing_routes", false) {
        Err(Error::MissingFile(f)) => assert_eq!("routes.txt", f),
        other => panic!("unexpected result {:?}", other.map(|f| f.routes.len())),
    }
}

#[test]
fn route_queries() {
    let feed = Feed::from_path("fixtures/basic").expect("impossible to read feed");
    let r1 = feed.route_by_short_name("N").expect("no route N");
    assert_eq!("R1", r1.id);
    assert!(feed.route_by_short_name("Z").is_none());

    assert_eq!(vec!["S3", "S5"], ids(feed.route_shapes(r1), |s| &s.id));
    assert_eq!("S5", feed.longest_shape(r1).unwrap().id);
    assert_eq!(vec!["A", "B", "C"], ids(feed.route_stops(r1), |s| &s.id));
    assert_eq!(
        ["Outbound".to_owned(), "Inbound".to_owned()],
        feed.headsigns(r1)
    );

    let r2 = feed.route_by_short_name("M").expect("no route M");
    assert!(feed.route_shapes(r2).is_empty());
    assert!(feed.longest_shape(r2).is_none());
    assert_eq!([String::new(), String::new()], feed.headsigns(r2));
}

#[test]
fn calendar_by_weekday() {
    let feed = Feed::load("fixtures/basic", false).expect("impossible to read feed");
    assert_eq!(
        vec![
            "mon_wed", "weekdays", // monday
            "weekdays", // tuesday
            "mon_wed", "weekdays", // wednesday
            "weekdays", // thursday
            "weekdays", // friday
        ],
        feed.calendar()
    );
    let saturday = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    assert!(feed.services_on(saturday).is_empty());
}

#[test]
fn unknown_references_are_skipped() {
    let feed = Feed::from_path("fixtures/broken_references").expect("impossible to read feed");
    assert_eq!(
        vec![
            LoadWarning::UnknownRoute {
                trip_id: "T2".to_owned(),
                route_id: "R9".to_owned()
            },
            LoadWarning::UnknownShape {
                trip_id: "T3".to_owned(),
                shape_id: "S9".to_owned()
            },
            LoadWarning::DuplicateTrip {
                trip_id: "T1".to_owned()
            },
            LoadWarning::UnknownTrip {
                trip_id: "T2".to_owned()
            },
            LoadWarning::UnknownStop {
                trip_id: "T1".to_owned(),
                stop_id: "Z".to_owned()
            },
        ],
        feed.warnings
    );

    assert_eq!(2, feed.trips.len());
    assert!(feed.get_trip("T2").is_err());
    let r1 = feed.get_route("R1").unwrap();
    assert_eq!(vec!["T1", "T3"], ids(feed.route_trips(r1), |t| &t.id));

    let t1 = feed.get_trip("T1").unwrap();
    assert_eq!("Centre", t1.headsign);
    assert_eq!(vec!["A", "B"], ids(&t1.stop_times, |st| st.stop.as_str()));
    assert_eq!(None, feed.get_trip("T3").unwrap().shape);
}

#[test]
fn split_shape_keeps_its_last_block() {
    let feed = Feed::load("fixtures/interleaved_shapes", false).expect("impossible to read feed");
    assert_eq!(2, feed.shapes.len());
    let s3 = feed.get_shape("S3").unwrap();
    let sequences: Vec<u32> = s3.coords.iter().map(|c| c.sequence).collect();
    assert_eq!(vec![8, 9], sequences);

    let r1 = feed.get_route("R1").unwrap();
    assert_eq!("S3", feed.longest_shape(r1).unwrap().id);
    // the single point shape of direction 1 does not pass its threshold
    assert_eq!(["Outbound".to_owned(), String::new()], feed.headsigns(r1));
}

#[test]
fn raw_rows_keep_file_order() {
    let raw = FeedReader::default()
        .raw_from_path("fixtures/basic")
        .expect("impossible to read feed");
    assert_eq!(8, raw.shapes.len());
    assert_eq!(2, raw.shapes[0].sequence);
    assert_eq!(5, raw.stop_times.as_ref().map_or(0, |st| st.len()));

    let without = FeedReader::default()
        .read_stop_times(false)
        .raw_from_path("fixtures/basic")
        .expect("impossible to read feed");
    assert!(without.stop_times.is_none());
    assert!(RawFeed::from_path("fixtures/missing_routes").is_err());
}

#[test]
fn unknown_ids() {
    let feed = Feed::from_path("fixtures/basic").expect("impossible to read feed");
    match feed.get_stop("Utopia") {
        Err(Error::ReferenceError(id)) => assert_eq!("Utopia", id),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(feed.get_calendar_entry("sundays").is_err());
    assert!(feed.routes.get_id("R4").is_none());
}

#[test]
fn display() {
    assert_eq!(
        "Sorano".to_owned(),
        format!(
            "{}",
            Stop {
                name: "Sorano".to_owned(),
                ..Stop::default()
            }
        )
    );

    assert_eq!(
        "Long route name".to_owned(),
        format!(
            "{}",
            Route {
                long_name: "Long route name".to_owned(),
                short_name: "L".to_owned(),
                ..Route::default()
            }
        )
    );

    assert_eq!(
        "Short route name".to_owned(),
        format!(
            "{}",
            Route {
                short_name: "Short route name".to_owned(),
                ..Route::default()
            }
        )
    );
}

#[test]
fn serialize_linked_objects() {
    let feed = Feed::from_path("fixtures/basic").expect("impossible to read feed");
    let trip = serde_json::to_value(feed.get_trip("T1").unwrap()).unwrap();
    assert_eq!("R1", trip["route"]);
    assert_eq!("S3", trip["shape"]);
    assert_eq!("A", trip["stop_times"][0]["stop"]);

    let route = serde_json::to_value(feed.get_route("R1").unwrap()).unwrap();
    assert_eq!("Bus", route["route_type"]);
    assert_eq!(2, route["trips"].as_array().unwrap().len());
}
