use std::borrow::Cow;
use std::fmt;

/// A header field value tagged with its stored width.
///
/// Displaying a value substitutes the width's sentinel literal when every
/// bit is set, which is how Cineon marks a field as not specified.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    I32(i32),
    F32(f32),
    Text(Cow<'a, str>),
}

impl Value<'_> {
    /// Whether the value holds its width's all-ones bit pattern.
    pub fn is_undefined(&self) -> bool {
        match *self {
            Value::U8(v) => v == u8::MAX,
            Value::U16(v) => v == u16::MAX,
            Value::U32(v) => v == u32::MAX,
            // Compared as bits, -1 and the 0xffffffff NaN
            Value::I32(v) => v as u32 == u32::MAX,
            Value::F32(v) => v.to_bits() == u32::MAX,
            Value::Text(_) => false,
        }
    }

    fn sentinel(&self) -> &'static str {
        match self {
            Value::U8(_) => "0xff",
            Value::U16(_) => "0xffff",
            Value::U32(_) | Value::I32(_) | Value::F32(_) => "0xffffffff",
            Value::Text(_) => "",
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return f.write_str(self.sentinel());
        }
        match self {
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<u8> for Value<'_> {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value<'_> {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u32> for Value<'_> {
    fn from(v: u32) -> Self {
        Value::U32(v)
    }
}

impl From<i32> for Value<'_> {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Text(Cow::Borrowed(v))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Value::Text(Cow::Owned(v))
    }
}
