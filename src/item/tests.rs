#![cfg(test)]

use super::*;
use crate::util::count::CallCount;

#[test]
fn test_map_short_circuits_absent() {
    let calls = CallCount::new();
    let counted = calls.clone();
    let out = Item::<u8>::Absent.map(|x| {
        counted.bump();
        x + 1
    });

    assert_eq!(out, Item::Absent, "Mapping an absent item should stay absent.");
    assert_eq!(
        calls.get(),
        0,
        "The function should never be invoked on an absent item."
    );

    let out = Item::Present(1_u8).map(|x| {
        calls.bump();
        x + 1
    });
    assert_eq!(out, Item::Present(2));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_map_catching_contains_panics() {
    assert_eq!(
        Item::Present(2).map_catching(|x| 10 / x),
        Item::Present(5),
        "A function that succeeds should behave exactly like map."
    );
    assert_eq!(
        Item::Present(0).map_catching(|x| 10 / x),
        Item::Absent,
        "A panicking function should produce an absent item, not unwind."
    );

    let calls = CallCount::new();
    let counted = calls.clone();
    let out = Item::<i32>::Absent.map_catching(|x| {
        counted.bump();
        10 / x
    });
    assert_eq!(out, Item::Absent);
    assert_eq!(
        calls.get(),
        0,
        "map_catching should also short-circuit absent items."
    );
}

#[test]
fn test_accessors() {
    assert_eq!(Item::Present(3).present(), Some(3));
    assert_eq!(Item::<i32>::Absent.present(), None);

    assert_eq!(Item::Present(3).unwrap_or(7), 3);
    assert_eq!(Item::Absent.unwrap_or(7), 7);

    assert_eq!(Item::Present(3).as_ref(), Item::Present(&3));
    assert_eq!(Item::<i32>::Absent.as_ref(), Item::Absent);

    assert_eq!(Item::Present(3).value(), 3);
}

#[test]
fn test_value_panics_on_absent() {
    crate::util::panic::assert_panics!({ Item::<i32>::Absent.value() });
}

#[test]
fn test_option_conversions() {
    assert_eq!(Item::from(Some(1)), Item::Present(1));
    assert_eq!(Item::<i32>::from(None), Item::Absent);
    assert_eq!(Option::from(Item::Present(1)), Some(1));
    assert_eq!(Option::<i32>::from(Item::<i32>::Absent), None);
}

#[test]
fn test_variant_predicates() {
    assert!(Item::Present(0).is_present());
    assert!(!Item::Present(0).is_absent());
    assert!(Item::<i32>::Absent.is_absent());
}

#[test]
fn test_debug_rendering() {
    assert_eq!(format!("{:?}", Item::Present(12)), "12");
    assert_eq!(format!("{:?}", Item::<i32>::Absent), "_");
    assert_eq!(format!("{:?}", Item::Present("a")), "\"a\"");
}
