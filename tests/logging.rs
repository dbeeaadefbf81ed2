#![cfg(feature = "log")]

use std::sync::Mutex;

use deboor::prelude::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use nalgebra::Point3;

struct Recorder(Mutex<Vec<(Level, String)>>);

impl Log for Recorder {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.0
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static RECORDER: Recorder = Recorder(Mutex::new(vec![]));

#[test]
fn evaluation_and_validation_are_logged() {
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let curve = NurbsCurve::try_open_uniform(
        2,
        vec![
            ControlPoint::new(Point3::new(0., 0., 0.), 1.),
            ControlPoint::new(Point3::new(1., 2., 0.), 0.5),
            ControlPoint::new(Point3::new(2., 0., 1.), 2.),
            ControlPoint::new(Point3::new(3., 1., 0.), 1.),
        ],
    )
    .unwrap();
    curve.evaluate(5.);

    let options = CrossValidationOptions::default()
        .with_samples(5)
        .with_position_tolerance(-1.);
    assert!(cross_validate(&curve, &BasisSummation, &DeBoor, &options).is_err());

    let records = RECORDER.0.lock().unwrap();
    let has = |level: Level, text: &str| {
        records
            .iter()
            .any(|(l, message)| *l == level && message.contains(text))
    };
    assert!(has(Level::Debug, "nurbs curve: degree 2, 4 control points"));
    assert!(has(Level::Trace, "clamped to"));
    assert!(has(Level::Trace, "in span"));
    assert!(has(Level::Debug, "cross validation over"));
    assert!(has(Level::Warn, "exceeded tolerance"));
}
