//! Shape-matching classifier regression test
//!
//! Covers template and example matching, rejection, the rotation-invariant
//! preset and persistence.

use gesture_core::{Gesture, Polyline};
use gesture_recog::factory::{l_shape, line, rotate, v_shape};
use gesture_recog::{
    GestureClassifier, Recognition, RecogError, ShapeMatchingClassifier, ShapeMatchingOptions,
};
use gesture_test::{Jitter, RegParams, densify, gesture, jittered_gestures, regout_path};

fn stroke(points: &Polyline) -> Gesture {
    Gesture::new(points.clone()).unwrap()
}

fn templates() -> ShapeMatchingClassifier {
    let mut c = ShapeMatchingClassifier::new();
    c.add_class_with_template("V", &v_shape()).unwrap();
    c.add_class_with_template("L", &l_shape()).unwrap();
    c
}

#[test]
fn shape_reg_classify() {
    let mut rp = RegParams::new("shape_classify");
    let mut jitter = Jitter::new(29);
    let mut c = templates();

    // --- Jittered strokes match their template ---
    eprintln!("=== Templates ===");
    let v = densify(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)], 6);
    let l = densify(&[(0.0, 0.0), (0.0, 100.0), (100.0, 100.0)], 6);
    for g in jittered_gestures(&v, 5, 2.0, &mut jitter) {
        rp.compare_strings("V", c.classify(&g).unwrap().name().unwrap_or(""));
    }
    for g in jittered_gestures(&l, 5, 2.0, &mut jitter) {
        rp.compare_strings("L", c.classify(&g).unwrap().name().unwrap_or(""));
    }

    // --- An upside-down V is rejected but still scored ---
    let flipped = stroke(&rotate(&v_shape(), std::f64::consts::PI));
    match c.classify(&flipped).unwrap() {
        Recognition::Unrecognized { best: Some(best) } => {
            if rp.display() {
                eprintln!("  flipped V: nearest {} at {:.2}", best.name, best.distance);
            }
            rp.compare_bool(true, best.distance > c.options().max_distance);
        }
        other => {
            eprintln!("  unexpected {other:?}");
            rp.compare_bool(true, false);
        }
    }
    rp.compare_bool(true, c.classify_and_resample(&flipped).unwrap().is_none());

    // --- Threshold boundary is inclusive ---
    eprintln!("=== Threshold ===");
    let sample = gesture(&jitter.perturb(&v, 3.0));
    let distance = c.classify(&sample).unwrap().best().unwrap().distance;
    rp.compare_bool(true, distance > 0.0);
    c.set_max_distance(distance).unwrap();
    rp.compare_bool(true, c.classify(&sample).unwrap().is_recognized());
    c.set_max_distance(distance * 0.999).unwrap();
    rp.compare_bool(false, c.classify(&sample).unwrap().is_recognized());
    c.set_max_distance(30.0).unwrap();

    // --- Minimum stroke length ---
    let short = gesture(&[(0.0, 0.0), (19.0, 0.0)]);
    rp.compare_bool(
        true,
        c.classify(&short).unwrap() == Recognition::Unrecognized { best: None },
    );
    c.set_min_stroke_length(10.0).unwrap();
    rp.compare_bool(true, c.classify(&short).unwrap().best().is_some());

    // --- Examples take over from the direct template ---
    eprintln!("=== Examples ===");
    let mut e = ShapeMatchingClassifier::new();
    e.add_class("V").unwrap();
    e.add_class("L").unwrap();
    rp.compare_bool(true, e.sorted_classes(&sample).unwrap().is_empty());
    for g in jittered_gestures(&v, 4, 2.0, &mut jitter) {
        e.add_example("V", g).unwrap();
    }
    for g in jittered_gestures(&l, 4, 2.0, &mut jitter) {
        e.add_example("L", g).unwrap();
    }
    let r = e.classify_and_resample(&sample).unwrap().unwrap();
    rp.compare_strings("V", &r.name);
    rp.compare_values(100.0, r.input.len() as f64, 0.0);
    rp.compare_bool(true, e.templates("V").unwrap().contains(&r.template));
    let sorted = e.sorted_classes(&sample).unwrap();
    rp.compare_strings("V", &sorted[0].name);
    rp.compare_values(r.distance, sorted[0].distance, 0.0);
    rp.compare_bool(true, sorted[0].distance <= sorted[1].distance);
    let between = e.distance_between_classes("V", "L").unwrap().unwrap();
    rp.compare_bool(true, between > 0.0);
    let rep = e.representative("V").unwrap().unwrap();
    rp.compare_bool(true, e.templates("V").unwrap().contains(rep));
    rp.compare_values(100.0, rep.len() as f64, 0.0);

    // --- Class management errors ---
    rp.compare_bool(
        true,
        matches!(e.add_example("missing", sample.clone()), Err(RecogError::ClassNotFound(_))),
    );
    rp.compare_bool(true, matches!(e.add_class("V"), Err(RecogError::DuplicateClass(_))));

    assert!(rp.cleanup());
}

#[test]
fn shape_reg_unrelated_stroke() {
    let mut rp = RegParams::new("shape_unrelated");
    let mut c = ShapeMatchingClassifier::new();
    c.add_class_with_template("V", &v_shape()).unwrap();
    c.add_class_with_template("Line", &line()).unwrap();

    // --- A zig-zag climbing the page matches neither template ---
    eprintln!("=== Zig-zag ===");
    let zigzag = gesture(&[(0.0, 0.0), (100.0, 25.0), (0.0, 50.0), (100.0, 75.0), (0.0, 100.0)]);
    match c.classify(&zigzag).unwrap() {
        Recognition::Unrecognized { best: Some(best) } => {
            if rp.display() {
                eprintln!("  zig-zag: nearest {} at {:.2}", best.name, best.distance);
            }
            rp.compare_strings("Line", &best.name);
            rp.compare_values(45.25, best.distance, 0.05);
        }
        other => {
            eprintln!("  unexpected {other:?}");
            rp.compare_bool(true, false);
        }
    }
    rp.compare_bool(true, c.classify_and_resample(&zigzag).unwrap().is_none());

    // --- A flat zig-zag stays within the threshold of Line ---
    let flat = gesture(&[(0.0, 0.0), (25.0, 100.0), (50.0, 0.0), (75.0, 100.0), (100.0, 0.0)]);
    let r = c.classify(&flat).unwrap();
    rp.compare_strings("Line", r.name().unwrap_or(""));
    rp.compare_values(25.51, r.best().unwrap().distance, 0.05);

    assert!(rp.cleanup());
}

#[test]
fn shape_reg_rotation() {
    let mut rp = RegParams::new("shape_rotation");
    let mut plain = ShapeMatchingClassifier::new();
    let mut dollar = ShapeMatchingClassifier::dollar1();
    rp.compare_values(64.0, dollar.options().num_points as f64, 0.0);
    for c in [&mut plain, &mut dollar] {
        c.add_class_with_template("V", &v_shape()).unwrap();
        c.add_class_with_template("L", &l_shape()).unwrap();
    }

    eprintln!("=== Rotated input ===");
    for angle in [0.2, 0.4, -0.3] {
        let g = stroke(&rotate(&v_shape(), angle));
        let p = plain.sorted_classes(&g).unwrap();
        let d = dollar.sorted_classes(&g).unwrap();
        let pv = p.iter().find(|s| s.name == "V").unwrap().distance;
        let dv = d.iter().find(|s| s.name == "V").unwrap().distance;
        if rp.display() {
            eprintln!("  angle {angle:+.1}: plain={pv:.3} rotation-invariant={dv:.3}");
        }
        rp.compare_bool(true, dv < pv);
        rp.compare_values(0.0, dv, 1e-6);
        rp.compare_strings("V", dollar.classify(&g).unwrap().name().unwrap_or(""));
    }

    // --- The rotation-invariant preset has no stroke-length gate ---
    let tiny = gesture(&[(0.0, 0.0), (2.0, 4.0), (4.0, 0.0)]);
    rp.compare_bool(true, plain.classify(&tiny).unwrap().best().is_none());
    rp.compare_strings("V", dollar.classify(&tiny).unwrap().name().unwrap_or(""));

    assert!(rp.cleanup());
}

#[test]
fn shape_reg_persistence() {
    let mut rp = RegParams::new("shape_persistence");
    let mut jitter = Jitter::new(41);
    let mut c = templates();
    c.add_class("Z").unwrap();
    let z = densify(&[(0.0, 100.0), (100.0, 100.0), (0.0, 0.0), (100.0, 0.0)], 5);
    for g in jittered_gestures(&z, 3, 2.0, &mut jitter) {
        c.add_example("Z", g).unwrap();
    }

    // --- File round trip reproduces classification ---
    eprintln!("=== Round trip ===");
    let path = regout_path("shape.cl").unwrap();
    c.write_to_file(&path).unwrap();
    let mut back = ShapeMatchingClassifier::read_from_file(&path).unwrap();
    rp.compare_bool(true, back.class_names() == c.class_names());
    rp.compare_bool(true, back.examples("Z").unwrap() == c.examples("Z").unwrap());
    for shape in [&z, &densify(&[(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)], 4)] {
        let g = gesture(&jitter.perturb(shape, 2.0));
        let a = GestureClassifier::classify(&mut c, &g).unwrap();
        let b = GestureClassifier::classify(&mut back, &g).unwrap();
        rp.compare_bool(true, a.name() == b.name());
        rp.compare_values(
            a.best().unwrap().distance,
            b.best().unwrap().distance,
            1e-6,
        );
    }

    // loading with other options recomputes example templates
    let options = ShapeMatchingOptions::dollar1();
    let bytes = c.write_to_bytes().unwrap();
    let rotated = ShapeMatchingClassifier::read_from_bytes_with_options(&bytes, options).unwrap();
    rp.compare_values(64.0, rotated.templates("Z").unwrap()[0].len() as f64, 0.0);
    rp.compare_values(64.0, rotated.template("V").unwrap().unwrap().len() as f64, 0.0);

    // --- Malformed definitions ---
    eprintln!("=== Malformed ===");
    let err = ShapeMatchingClassifier::read_from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
    rp.compare_bool(true, matches!(err, RecogError::Format { class_index: Some(2), .. }));
    let mut trailing = bytes.clone();
    trailing.push(7);
    rp.compare_bool(
        true,
        matches!(
            ShapeMatchingClassifier::read_from_bytes(&trailing),
            Err(RecogError::Format { class_index: None, .. })
        ),
    );
    let mut bad_utf = bytes.clone();
    // first name byte, after the class count and the name length
    bad_utf[6] = 0xff;
    rp.compare_bool(
        true,
        matches!(
            ShapeMatchingClassifier::read_from_bytes(&bad_utf),
            Err(RecogError::Format {
                class_index: Some(0),
                position: 4,
                ..
            })
        ),
    );

    assert!(rp.cleanup());
}
