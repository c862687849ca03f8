//! Labels for the coded header fields.

use crate::format::Value;

const ORIENTATION: &[(u8, &str)] = &[
    (0, "Left to Right Top To Bottom"),
    (1, "Right to Left Top To Bottom"),
    (2, "Left to Right Bottom To Top"),
    (3, "Right To Left Bottom to Top"),
    (4, "Top To Bottom Left to Right"),
    (5, "Top To Bottom Right to Left"),
    (6, "Bottom to Top Left to Right"),
    (7, "Bottom to Top Right to Left"),
    (0xff, "Undefined"),
];

const PACKING: &[(u8, &str)] = &[
    (0, "Packed"),
    (1, "8-bit boundary, left justified"),
    (2, "8-bit boundary, right justified"),
    (3, "16-bit boundary, left justified"),
    (4, "16-bit boundary, right justified"),
    (5, "32-bit boundary, left justified"),
    (6, "32-bit boundary, right justified"),
];

const INTERLEAVE: &[(u8, &str)] = &[(0, "Pixel"), (1, "Line"), (2, "Channel (planar)")];

const DESCRIPTOR: &[(u8, &str)] = &[
    (0, "Grayscale"),
    (1, "Red, printing density"),
    (2, "Green, printing density"),
    (3, "Blue, printing density"),
    (4, "Red, Rec709"),
    (5, "Green, Rec709"),
    (6, "Blue, Rec709"),
    (0xff, "Undefined"),
];

const METRIC: &[(u8, &str)] = &[(0, "universal")];

fn lookup(table: &[(u8, &'static str)], code: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, label)| label)
}

fn label_or_unknown(table: &[(u8, &'static str)], code: u8) -> String {
    match lookup(table, code) {
        Some(label) => label.to_owned(),
        None => format!("Unknown {}", Value::U8(code)),
    }
}

/// Image orientation label.
pub fn orientation(code: u8) -> String {
    label_or_unknown(ORIENTATION, code)
}

/// Data packing label.
pub fn packing(code: u8) -> String {
    label_or_unknown(PACKING, code)
}

/// Component interleave label.
pub fn interleave(code: u8) -> String {
    label_or_unknown(INTERLEAVE, code)
}

/// Image element descriptor label.
pub fn descriptor(code: u8) -> String {
    label_or_unknown(DESCRIPTOR, code)
}

/// Image element metric, `universal` or the plain code.
pub fn metric(code: u8) -> String {
    match lookup(METRIC, code) {
        Some(label) => label.to_owned(),
        None => Value::U8(code).to_string(),
    }
}
