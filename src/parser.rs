use log::trace;
use nom::branch::alt;
use nom::bytes::complete::{tag, take};
use nom::number::complete::{be_f32, be_i32, be_u32, be_u8, le_f32, le_i32, le_u32, le_u8};
use nom::sequence::pair;
use nom::{Finish, IResult, ToUsize};

use crate::header::ByteOrder;
use crate::CineonError;

impl From<nom::Err<nom::error::Error<&[u8]>>> for CineonError {
    fn from(_error: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        Self::ParserError
    }
}

pub(crate) trait ReadBytes {
    fn read_u8<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], u8>;
    fn read_u32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], u32>;
    fn read_i32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], i32>;
    fn read_f32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], f32>;
    fn read_u8_pair<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], (u8, u8)>;
    fn read_f32_pair<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], (f32, f32)>;
}

/// Matches the magic cookie in either byte order and reports which one.
pub(crate) fn check_magick(input: &[u8], magick: u32) -> Result<(&[u8], ByteOrder), CineonError> {
    let be = magick.to_be_bytes();
    let le = magick.to_le_bytes();
    let (i, found) = alt((tag(&be[..]), tag(&le[..])))(input)
        .finish()
        .map_err(|_: nom::error::Error<&[u8]>| CineonError::NotCineonImage)?;
    let order = if found == &be[..] {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
    Ok((i, order))
}

pub(crate) fn read_bytes<C: ToUsize>(
    count: C,
) -> impl Fn(&[u8]) -> Result<(&[u8], &[u8]), CineonError> {
    let c = count.to_usize();
    move |input: &[u8]| {
        take(c)(input)
            .finish() // Using complete and not streaming functions, so acceptable
            .map_err(|_: nom::error::Error<&[u8]>| CineonError::ParserError)
    }
}

/// Skips a reserved region.
pub(crate) fn skip<C: ToUsize>(count: C) -> impl Fn(&[u8]) -> Result<&[u8], CineonError> {
    let c = count.to_usize();
    move |input: &[u8]| {
        trace!("skipping {} reserved bytes", c);
        read_bytes(c)(input).map(|(i, _)| i)
    }
}

/// Reads a fixed-width text field, cut at the first NUL.
///
/// Invalid UTF-8 is replaced rather than rejected, headers written by
/// old devices often carry garbage after the terminator.
pub(crate) fn read_string<C: ToUsize>(
    count: C,
) -> impl Fn(&[u8]) -> Result<(&[u8], String), CineonError> {
    let c = count.to_usize();
    move |input: &[u8]| {
        let (i, v) = read_bytes(c)(input)?;
        let end = v.iter().position(|&b| b == 0).unwrap_or(v.len());
        Ok((i, String::from_utf8_lossy(&v[..end]).into_owned()))
    }
}

#[derive(Default, Clone)]
pub(crate) struct LittleEndian;

impl ReadBytes for LittleEndian {
    fn read_u8<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], u8> {
        le_u8(input)
    }
    fn read_u32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], u32> {
        le_u32(input)
    }
    fn read_i32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], i32> {
        le_i32(input)
    }
    fn read_f32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], f32> {
        le_f32(input)
    }
    fn read_u8_pair<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], (u8, u8)> {
        pair(le_u8, le_u8)(input)
    }
    fn read_f32_pair<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], (f32, f32)> {
        pair(le_f32, le_f32)(input)
    }
}

#[derive(Default, Clone)]
pub(crate) struct BigEndian;

impl ReadBytes for BigEndian {
    fn read_u8<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], u8> {
        be_u8(input)
    }
    fn read_u32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], u32> {
        be_u32(input)
    }
    fn read_i32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], i32> {
        be_i32(input)
    }
    fn read_f32<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], f32> {
        be_f32(input)
    }
    fn read_u8_pair<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], (u8, u8)> {
        pair(be_u8, be_u8)(input)
    }
    fn read_f32_pair<'a>(&self, input: &'a [u8]) -> IResult<&'a [u8], (f32, f32)> {
        pair(be_f32, be_f32)(input)
    }
}

/// Byte-order dispatching reader, chosen once from the magic cookie.
pub(crate) struct Endian(ByteOrder);

impl Endian {
    pub(crate) fn new(order: ByteOrder) -> Self {
        Self(order)
    }

    fn reader(&self) -> &'static dyn ReadBytes {
        match self.0 {
            ByteOrder::BigEndian => &BigEndian,
            ByteOrder::LittleEndian => &LittleEndian,
        }
    }

    pub(crate) fn run<'b, F, V>(&self, func: F) -> impl Fn(&'b [u8]) -> IResult<&'b [u8], V>
    where
        F: for<'r, 'a> Fn(&'r (dyn ReadBytes + 'static), &'a [u8]) -> IResult<&'a [u8], V> + Copy,
    {
        let reader = self.reader();
        move |input: &'b [u8]| func(reader, input)
    }
}
