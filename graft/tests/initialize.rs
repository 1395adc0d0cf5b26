mod common;

use common::{Flaky, Opaque, Point, Probe, grid, points, read_points, rows};
use graft::{
    ArrayType, ConstructError, ElementType, GraftError, Leaf, ObjectArray, PrimitiveArray, Scalar,
    Value, ValueExt,
};
use graft_testhelpers::{IPanic, test};
use insta::assert_snapshot;

#[test]
fn zeroes_int_array() -> Result<(), IPanic> {
    let mut counters = Value::from(vec![1i32, 2, 3, 4, 5]);

    graft::initialize(Some(&mut counters))?;

    assert_eq!(
        counters.as_primitive_array(),
        Some(&PrimitiveArray::I32(vec![0, 0, 0, 0, 0]))
    );
    Ok(())
}

#[test]
fn zeroes_each_primitive_kind() -> Result<(), IPanic> {
    let cases = [
        (PrimitiveArray::from(vec![true, true]), PrimitiveArray::Bool(vec![false, false])),
        (PrimitiveArray::from(vec!['a']), PrimitiveArray::Char(vec!['\0'])),
        (PrimitiveArray::from(vec![-1i8]), PrimitiveArray::I8(vec![0])),
        (PrimitiveArray::from(vec![u64::MAX]), PrimitiveArray::U64(vec![0])),
        (PrimitiveArray::from(vec![1.5f32]), PrimitiveArray::F32(vec![0.0])),
        (PrimitiveArray::from(vec![f64::NAN]), PrimitiveArray::F64(vec![0.0])),
    ];
    for (before, after) in cases {
        let mut value = Value::from(before);
        value.initialize()?;
        assert_eq!(value.as_primitive_array(), Some(&after));
    }
    Ok(())
}

#[test]
fn recurses_into_present_rows_only() -> Result<(), IPanic> {
    let mut value = grid(vec![Some(vec![4, 5]), None, Some(vec![6])]);

    graft::initialize(Some(&mut value))?;

    assert_eq!(rows(&value), vec![Some(vec![0, 0]), None, Some(vec![0])]);
    Ok(())
}

#[test]
fn fills_absent_leaves_in_present_sub_arrays() -> Result<(), IPanic> {
    let row_type = ArrayType::of_objects(Point::TYPE);
    let mut outer = ObjectArray::new(ElementType::Array(row_type), 3);
    outer.set(1, Some(points(vec![None, Some(Point::new(7, 8)), None]).into()))?;
    let mut value = Value::from(outer);

    graft::initialize(Some(&mut value))?;

    let outer = value.as_object_array().expect("a Point[][]");
    assert!(outer.get(0).is_none(), "absent rows are not allocated");
    assert!(outer.get(2).is_none(), "absent rows are not allocated");
    let row = outer
        .get(1)
        .and_then(Value::as_object_array)
        .expect("row 1 is still there");
    assert_eq!(
        read_points(row),
        vec![
            Some(Point::default()),
            Some(Point::new(7, 8)),
            Some(Point::default()),
        ]
    );
    Ok(())
}

#[test]
fn instantiated_rows_are_filled_but_missing_rows_stay_missing() -> Result<(), IPanic> {
    let ty = ArrayType::of_objects(Point::TYPE).nested();

    let mut shallow = Value::from(ty.instantiate(&[2])?);
    graft::initialize(Some(&mut shallow))?;
    let shallow = shallow.as_object_array().expect("a Point[][]");
    assert!(shallow.slots().iter().all(Option::is_none));

    let mut deep = Value::from(ty.instantiate(&[2, 2])?);
    graft::initialize(Some(&mut deep))?;
    let deep = deep.as_object_array().expect("a Point[][]");
    for row in deep.slots() {
        let row = row
            .as_ref()
            .and_then(Value::as_object_array)
            .expect("allocated row");
        assert_eq!(read_points(row), vec![Some(Point::default()); 2]);
    }
    Ok(())
}

#[test]
fn absent_and_non_array_roots_are_noops() -> Result<(), IPanic> {
    graft::initialize(None)?;

    let mut point = Value::object(Point::new(1, 2));
    graft::initialize(Some(&mut point))?;
    assert_eq!(point.downcast_ref::<Point>(), Some(&Point::new(1, 2)));

    let mut scalar = Value::from(Scalar::I32(9));
    graft::initialize(Some(&mut scalar))?;
    assert!(matches!(scalar, Value::Scalar(Scalar::I32(9))));
    Ok(())
}

#[test]
fn present_leaves_need_no_factory() -> Result<(), IPanic> {
    let mut value = Value::from(ObjectArray::from_slots(
        ElementType::Object(Opaque::TYPE),
        vec![Some(Value::object(Opaque(3)))],
    )?);

    graft::initialize(Some(&mut value))?;

    let opaque = value.as_object_array().and_then(|a| a.get(0));
    assert_eq!(
        opaque.and_then(Value::downcast_ref::<Opaque>),
        Some(&Opaque(3))
    );
    Ok(())
}

#[test]
fn missing_factory() {
    let mut value = Value::from(ObjectArray::new(ElementType::Object(Opaque::TYPE), 2));

    let err = graft::initialize(Some(&mut value)).unwrap_err();

    assert!(matches!(
        err,
        GraftError::DefaultConstructionFailed {
            type_name: "Opaque",
            source: ConstructError::NoDefault,
            ..
        }
    ));
    assert_snapshot!(err.to_string(), @"cannot construct a default Opaque at [0]: no default factory registered");
}

#[test]
fn factory_failure_is_wrapped() {
    let mut value = Value::from(ObjectArray::new(ElementType::Object(Probe::TYPE), 1));

    let err = graft::initialize(Some(&mut value)).unwrap_err();

    assert_snapshot!(err.to_string(), @"cannot construct a default Probe at [0]: factory failed: probe offline");
    let source = core::error::Error::source(&err).expect("wrapped construct error");
    assert_eq!(source.to_string(), "factory failed: probe offline");
}

#[test]
fn construction_failure_keeps_earlier_slots() {
    let mut value = Value::from(ObjectArray::new(ElementType::Object(Flaky::TYPE), 4));

    let err = graft::initialize(Some(&mut value)).unwrap_err();

    assert_eq!(err.path().steps(), &[2]);
    let slots = value.as_object_array().expect("a Flaky[]").slots();
    let built: Vec<Option<usize>> = slots
        .iter()
        .map(|slot| slot.as_ref().and_then(|v| v.downcast_ref::<Flaky>()).map(|f| f.0))
        .collect();
    assert_eq!(built, vec![Some(0), Some(1), None, None]);
}
