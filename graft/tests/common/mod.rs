//! Leaf types and graph builders shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use graft::{
    ArrayType, ConstructError, ElementType, Leaf, Mergeable, Object, ObjectArray, ObjectType,
    PrimitiveArray, ScalarKind, Value, leaf,
};

/// A mergeable, default-constructible leaf that counts the merges it received.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub merges: u32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, merges: 0 }
    }
}

impl Mergeable for Point {
    fn merge_from(&mut self, other: &Self) {
        self.x = other.x;
        self.y = other.y;
        self.merges += 1;
    }
}

leaf!(Point, with_default, with_merge);

/// A leaf with no capabilities at all.
#[derive(Debug, PartialEq)]
pub struct Opaque(pub u8);

leaf!(Opaque);

/// A leaf whose factory always fails.
#[derive(Debug)]
pub struct Probe;

impl Object for Probe {
    fn object_type(&self) -> &'static ObjectType {
        Self::TYPE
    }
}

impl Leaf for Probe {
    const TYPE: &'static ObjectType = &ObjectType::new::<Probe>("Probe")
        .with_factory(|| Err(ConstructError::failed("probe offline")));
}

/// A leaf whose factory succeeds twice, then fails forever.
#[derive(Debug)]
pub struct Flaky(pub usize);

static FLAKY_BUILT: AtomicUsize = AtomicUsize::new(0);

fn build_flaky() -> Result<Box<dyn Object>, ConstructError> {
    let built = FLAKY_BUILT.fetch_add(1, Ordering::SeqCst);
    if built < 2 {
        Ok(Box::new(Flaky(built)))
    } else {
        Err(ConstructError::failed("out of flakes"))
    }
}

impl Object for Flaky {
    fn object_type(&self) -> &'static ObjectType {
        Self::TYPE
    }
}

impl Leaf for Flaky {
    const TYPE: &'static ObjectType = &ObjectType::new::<Flaky>("Flaky").with_factory(build_flaky);
}

/// `i32[][]` from rows, `None` marking an absent row.
pub fn grid(rows: Vec<Option<Vec<i32>>>) -> Value {
    let slots = rows.into_iter().map(|row| row.map(Value::from)).collect();
    ObjectArray::from_slots(
        ElementType::Array(ArrayType::primitive(ScalarKind::I32)),
        slots,
    )
    .unwrap()
    .into()
}

/// The rows of an `i32[][]`, `None` for absent rows.
pub fn rows(value: &Value) -> Vec<Option<Vec<i32>>> {
    let grid = value.as_object_array().expect("an object array");
    grid.slots()
        .iter()
        .map(|slot| {
            slot.as_ref().map(|row| match row.as_primitive_array() {
                Some(PrimitiveArray::I32(values)) => values.clone(),
                other => panic!("expected an i32 row, got {other:?}"),
            })
        })
        .collect()
}

/// `Point[]` from optional points.
pub fn points(slots: Vec<Option<Point>>) -> ObjectArray {
    ObjectArray::from_slots(
        ElementType::Object(Point::TYPE),
        slots.into_iter().map(|p| p.map(Value::object)).collect(),
    )
    .unwrap()
}

/// The points of a `Point[]`, `None` for absent slots.
pub fn read_points(array: &ObjectArray) -> Vec<Option<Point>> {
    array
        .slots()
        .iter()
        .map(|slot| slot.as_ref().and_then(|v| v.downcast_ref::<Point>()).cloned())
        .collect()
}
