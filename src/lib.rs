mod format;
mod header;
pub mod labels;
mod parser;
mod render;

use std::io::Read;

use log::debug;
use thiserror::Error;

pub use format::Value;
pub use header::{
    ByteOrder, DataFormatInfo, FileInformation, FilmInfo, Header, ImageChannel, ImageInfo,
    OriginationInfo, HEADER_SIZE, MAGIC_COOKIE, MAX_ELEMENTS,
};
pub use render::{render_header, xml_tag, Mode, Renderer, Section};

use header::{GENERIC_HEADER_SIZE, INDUSTRY_HEADER_SIZE};
use parser::ReadBytes;
use parser::{check_magick, read_string, skip, Endian};

/// Cineon Error
#[derive(Debug, Error)]
pub enum CineonError {
    /// The file is not a Cineon image
    #[error("not a Cineon image")]
    NotCineonImage,
    /// An error occurred while parsing the file
    #[error("malformed or truncated header")]
    ParserError,
    /// The header could not be read from its source
    #[error("unable to read header: {0}")]
    Io(#[from] std::io::Error),
}

/// Cineon Parser
#[derive(Default)]
pub struct Cineon;

impl Cineon {
    /// Checks whether the input is a cineon image.
    pub fn is_cineon(&self, input: &[u8]) -> bool {
        check_magick(input, MAGIC_COOKIE).is_ok()
    }

    /// Parses the header of a cineon image.
    pub fn parse_header(&self, input: &[u8]) -> Result<Header, CineonError> {
        self.parse_header_inner(input).map(|(_, v)| v)
    }

    /// Reads and parses the header from the start of a stream.
    ///
    /// Only the generic and industry headers are consumed.
    pub fn read_header<R: Read>(&self, reader: R) -> Result<Header, CineonError> {
        let mut content = Vec::with_capacity(HEADER_SIZE);
        reader.take(HEADER_SIZE as u64).read_to_end(&mut content)?;
        debug!("read {} header bytes", content.len());
        self.parse_header(&content)
    }

    fn parse_header_inner<'a>(&self, input: &'a [u8]) -> Result<(&'a [u8], Header), CineonError> {
        let (_, byte_order) = check_magick(input, MAGIC_COOKIE)?;
        debug!("byte order {:?}", byte_order);
        let parser = Endian::new(byte_order);
        let (i, file_info) = Self::parse_file_info(input, &parser)?;
        let (i, image_info) = Self::parse_image_info(i, &parser)?;
        let (i, data_format_info) = Self::parse_data_format_info(i, &parser)?;
        let (i, origination_info) = Self::parse_origination_info(i, &parser)?;
        debug_assert_eq!(input.len() - i.len(), GENERIC_HEADER_SIZE);
        let (i, film_info) = Self::parse_film_info(i, &parser)?;
        debug_assert_eq!(input.len() - i.len(), GENERIC_HEADER_SIZE + INDUSTRY_HEADER_SIZE);
        let header = Header {
            byte_order,
            file_info,
            image_info,
            data_format_info,
            origination_info,
            film_info,
        };

        Ok((i, header))
    }

    fn parse_file_info<'a>(
        input: &'a [u8],
        parser: &Endian,
    ) -> Result<(&'a [u8], FileInformation), CineonError> {
        let (i, magic_number) = parser.run(ReadBytes::read_u32)(input)?;
        let (i, image_offset) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, generic_size) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, industry_size) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, user_size) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, file_size) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, version) = read_string(8u8)(i)?;
        let (i, filename) = read_string(100u8)(i)?;
        let (i, creation_date) = read_string(12u8)(i)?;
        let (i, creation_time) = read_string(12u8)(i)?;
        let i = skip(36u8)(i)?;
        Ok((
            i,
            FileInformation {
                magic_number,
                image_offset,
                generic_size,
                industry_size,
                user_size,
                file_size,
                version,
                filename,
                creation_date,
                creation_time,
            },
        ))
    }

    fn parse_image_info<'a>(
        input: &'a [u8],
        parser: &Endian,
    ) -> Result<(&'a [u8], ImageInfo), CineonError> {
        let (i, orientation) = parser.run(ReadBytes::read_u8)(input)?;
        let (i, number_of_elements) = parser.run(ReadBytes::read_u8)(i)?;
        debug!("{} image elements", number_of_elements);
        let i = skip(2u8)(i)?;

        // All eight records are stored whatever the element count
        let mut channel: [ImageChannel; MAX_ELEMENTS] = [ImageChannel::default(); MAX_ELEMENTS];
        let mut state = i;
        for item in channel.iter_mut() {
            let (i, (metric, descriptor)) = parser.run(ReadBytes::read_u8_pair)(state)?;
            let (i, bit_depth) = parser.run(ReadBytes::read_u8)(i)?;
            let i = skip(1u8)(i)?;
            let (i, pixels_per_line) = parser.run(ReadBytes::read_u32)(i)?;
            let (i, lines_per_element) = parser.run(ReadBytes::read_u32)(i)?;
            let (i, low_data) = parser.run(ReadBytes::read_f32)(i)?;
            let (i, low_quantity) = parser.run(ReadBytes::read_f32)(i)?;
            let (i, high_data) = parser.run(ReadBytes::read_f32)(i)?;
            let (i, high_quantity) = parser.run(ReadBytes::read_f32)(i)?;
            *item = ImageChannel {
                metric,
                descriptor,
                bit_depth,
                pixels_per_line,
                lines_per_element,
                low_data,
                low_quantity,
                high_data,
                high_quantity,
            };
            state = i;
        }
        let (i, (white_point_x, white_point_y)) = parser.run(ReadBytes::read_f32_pair)(state)?;
        let (i, (red_primary_x, red_primary_y)) = parser.run(ReadBytes::read_f32_pair)(i)?;
        let (i, (green_primary_x, green_primary_y)) = parser.run(ReadBytes::read_f32_pair)(i)?;
        let (i, (blue_primary_x, blue_primary_y)) = parser.run(ReadBytes::read_f32_pair)(i)?;
        let (i, label_text) = read_string(200u8)(i)?;
        let i = skip(28u8)(i)?;
        Ok((
            i,
            ImageInfo {
                orientation,
                number_of_elements,
                channel,
                white_point: [white_point_x, white_point_y],
                red_primary: [red_primary_x, red_primary_y],
                green_primary: [green_primary_x, green_primary_y],
                blue_primary: [blue_primary_x, blue_primary_y],
                label_text,
            },
        ))
    }

    fn parse_data_format_info<'a>(
        input: &'a [u8],
        parser: &Endian,
    ) -> Result<(&'a [u8], DataFormatInfo), CineonError> {
        let (i, interleave) = parser.run(ReadBytes::read_u8)(input)?;
        let (i, packing) = parser.run(ReadBytes::read_u8)(i)?;
        let (i, data_sign) = parser.run(ReadBytes::read_u8)(i)?;
        let (i, image_sense) = parser.run(ReadBytes::read_u8)(i)?;
        let (i, line_padding) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, channel_padding) = parser.run(ReadBytes::read_u32)(i)?;
        let i = skip(20u8)(i)?;
        Ok((
            i,
            DataFormatInfo {
                interleave,
                packing,
                data_sign,
                image_sense,
                line_padding,
                channel_padding,
            },
        ))
    }

    fn parse_origination_info<'a>(
        input: &'a [u8],
        parser: &Endian,
    ) -> Result<(&'a [u8], OriginationInfo), CineonError> {
        let (i, x_offset) = parser.run(ReadBytes::read_i32)(input)?;
        let (i, y_offset) = parser.run(ReadBytes::read_i32)(i)?;
        let (i, source_image_file_name) = read_string(100u8)(i)?;
        let (i, source_date) = read_string(12u8)(i)?;
        let (i, source_time) = read_string(12u8)(i)?;
        let (i, input_device) = read_string(64u8)(i)?;
        let (i, input_device_model_number) = read_string(32u8)(i)?;
        let (i, input_device_serial_number) = read_string(32u8)(i)?;
        let (i, x_device_pitch) = parser.run(ReadBytes::read_f32)(i)?;
        let (i, y_device_pitch) = parser.run(ReadBytes::read_f32)(i)?;
        let (i, gamma) = parser.run(ReadBytes::read_f32)(i)?;
        let i = skip(40u8)(i)?;
        Ok((
            i,
            OriginationInfo {
                x_offset,
                y_offset,
                source_image_file_name,
                source_date,
                source_time,
                input_device,
                input_device_model_number,
                input_device_serial_number,
                x_device_pitch,
                y_device_pitch,
                gamma,
            },
        ))
    }

    fn parse_film_info<'a>(
        input: &'a [u8],
        parser: &Endian,
    ) -> Result<(&'a [u8], FilmInfo), CineonError> {
        let (i, film_manufacturing_id_code) = parser.run(ReadBytes::read_u8)(input)?;
        let (i, film_type) = parser.run(ReadBytes::read_u8)(i)?;
        let (i, perfs_offset) = parser.run(ReadBytes::read_u8)(i)?;
        let i = skip(1u8)(i)?;
        let (i, prefix) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, count) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, format) = read_string(32u8)(i)?;
        let (i, frame_position) = parser.run(ReadBytes::read_u32)(i)?;
        let (i, frame_rate) = parser.run(ReadBytes::read_f32)(i)?;
        let (i, frame_id) = read_string(32u8)(i)?;
        let (i, slate_info) = read_string(200u8)(i)?;
        let i = skip(740usize)(i)?;
        Ok((
            i,
            FilmInfo {
                film_manufacturing_id_code,
                film_type,
                perfs_offset,
                prefix,
                count,
                format,
                frame_position,
                frame_rate,
                frame_id,
                slate_info,
            },
        ))
    }
}
