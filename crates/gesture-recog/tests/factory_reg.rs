//! Predefined shape regression test
//!
//! Every template of the automatic classifier must be recognized as a
//! shape identical to itself, and the set must survive a save and load.

use gesture_core::{Gesture, Polyline};
use gesture_recog::factory::{
    Mirror, arches, automatic_classifier, cross, gamma, helix, l_shape, line, mirror,
    open_circle, rotate, spiral, u_shape, v_shape, wave, zigzag,
};
use gesture_test::{RegParams, regout_path};
use std::f64::consts::PI;

fn named_shapes() -> Vec<(&'static str, Polyline)> {
    vec![
        ("V1", v_shape()),
        ("V2", rotate(&v_shape(), PI)),
        ("U1", u_shape()),
        ("Gamma1", gamma()),
        ("V5", mirror(&rotate(&v_shape(), PI), Mirror::Vertical)),
        ("Line3", rotate(&line(), PI / 2.0)),
        ("O1", open_circle()),
        ("X3", mirror(&cross(), Mirror::Horizontal)),
        ("Spiral1", spiral(1.5, 10.0, 10.0)),
        ("Helix1", helix(2.0, 1.5, 50.0, 50.0, 50.0, 20.0)),
        ("Wave3", wave(3)),
        ("Arche2", arches(2)),
        ("ZigZag4", zigzag(4)),
        ("Angle1", l_shape()),
    ]
}

#[test]
fn factory_reg() {
    let mut rp = RegParams::new("factory");
    let c = automatic_classifier().unwrap();

    eprintln!("=== Automatic classifier ===");
    rp.compare_values(31.0, c.num_classes() as f64, 0.0);
    for name in ["V1", "Line4", "X2", "Wave4", "Arche4", "ZigZag1", "Angle1"] {
        rp.compare_bool(true, c.contains_class(name));
    }

    // --- Each shape is matched at distance zero ---
    for (name, shape) in named_shapes() {
        let g = Gesture::new(shape).unwrap();
        let r = c.classify(&g).unwrap();
        let best = r.best().unwrap();
        if rp.display() {
            eprintln!("  {name}: {} at {:.2e}", best.name, best.distance);
        }
        rp.compare_bool(true, r.is_recognized());
        rp.compare_values(0.0, best.distance, 1e-6);
        rp.compare_values(0.0, c.distance_to_class(&g, name).unwrap().unwrap(), 1e-6);
    }

    // a single hump is both the first wave and the first arch
    let hump = Gesture::new(wave(1)).unwrap();
    rp.compare_strings("Wave1", c.classify(&hump).unwrap().name().unwrap_or(""));
    rp.compare_values(0.0, c.distance_between_classes("Wave1", "Arche1").unwrap().unwrap(), 1e-9);

    // --- Save and load ---
    eprintln!("=== Round trip ===");
    let path = regout_path("automatic.cl").unwrap();
    c.write_to_file(&path).unwrap();
    let back = gesture_recog::ShapeMatchingClassifier::read_from_file(&path).unwrap();
    rp.compare_bool(true, back.class_names() == c.class_names());
    for (name, shape) in named_shapes() {
        let g = Gesture::new(shape).unwrap();
        let d = back.distance_to_class(&g, name).unwrap().unwrap();
        rp.compare_values(0.0, d, 1e-6);
    }

    assert!(rp.cleanup());
}
