/// Cineon format version V4.5

/// Maximum number of image elements
pub const MAX_ELEMENTS: usize = 8;

/// Magic Cookie value
pub const MAGIC_COOKIE: u32 = 0x802A5FD7;

/// Generic header length (in bytes)
pub const GENERIC_HEADER_SIZE: usize = 1024;

/// Motion picture industry header length (in bytes)
pub const INDUSTRY_HEADER_SIZE: usize = 1024;

/// Total length of the header read from a file
pub const HEADER_SIZE: usize = GENERIC_HEADER_SIZE + INDUSTRY_HEADER_SIZE;

/// Byte order of the values stored in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first
    BigEndian,
    /// Least significant byte first
    LittleEndian,
}

impl ByteOrder {
    /// Byte order of the running host.
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::BigEndian
    }
}

/// File Information
#[derive(Default, Debug, Clone)]
pub struct FileInformation {
    /// Indicates start of Cineon image file, once decoded always equal
    /// to [`MAGIC_COOKIE`].
    pub magic_number: u32,
    /// Offset to image data (in bytes)
    pub image_offset: u32,
    /// Generic Header length (in bytes)
    pub generic_size: u32,
    /// Industry Header length (in bytes)
    pub industry_size: u32,
    /// User defined header length (in bytes)
    pub user_size: u32,
    /// Total file size (in bytes)
    pub file_size: u32,
    /// Version number of header format
    pub version: String, // 8 bytes
    /// Filename
    pub filename: String, // 100 bytes
    /// Create date
    pub creation_date: String, // 12 bytes
    /// Create time
    pub creation_time: String, // 12 bytes
}

/// Image Channel
///
/// Codes are kept as stored so that undefined (all ones) values survive.
#[derive(Default, Debug, Clone, Copy)]
pub struct ImageChannel {
    /// Metric code, first designator byte (0 = universal)
    pub metric: u8,
    /// Channel descriptor, second designator byte
    pub descriptor: u8,
    /// Bits per pixel
    pub bit_depth: u8,
    /// Pixels per line
    pub pixels_per_line: u32,
    /// Lines per element
    pub lines_per_element: u32,

    /// Reference low data code value
    pub low_data: f32,
    /// Reference low quantity represented
    pub low_quantity: f32,
    /// Reference high data code value
    pub high_data: f32,
    /// Reference high quantity represented
    pub high_quantity: f32,
}

/// Image Information
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Image orientation code
    pub orientation: u8,
    /// Number of elements (1-8)
    pub number_of_elements: u8,
    /// Image element data structures
    pub channel: [ImageChannel; MAX_ELEMENTS],
    /// White point (x,y, pair)
    pub white_point: [f32; 2],
    /// Red primary chromaticity (x, y pair)
    pub red_primary: [f32; 2],
    /// Green primary chromaticity (x, y pair)
    pub green_primary: [f32; 2],
    /// Blue primary chromaticity (x, y pair)
    pub blue_primary: [f32; 2],

    /// Label text
    pub label_text: String, // 200 bytes
}

impl Default for ImageInfo {
    fn default() -> Self {
        Self {
            orientation: 0,
            number_of_elements: 1,
            channel: [ImageChannel::default(); MAX_ELEMENTS],
            white_point: [0.; 2],
            red_primary: [0.; 2],
            green_primary: [0.; 2],
            blue_primary: [0.; 2],
            label_text: String::new(),
        }
    }
}

/// Data Format Information
#[derive(Default, Debug, Clone)]
pub struct DataFormatInfo {
    /// Data interleave code
    pub interleave: u8,
    /// Packing code
    pub packing: u8,
    /// Data sign (0 = unsigned, 1 = signed)
    pub data_sign: u8,
    /// Image sense (0 = positive image, 1 = negative image)
    pub image_sense: u8,
    /// End of line padding
    pub line_padding: u32,
    /// End of image padding
    pub channel_padding: u32,
}

/// Origination Information
#[derive(Default, Debug, Clone)]
pub struct OriginationInfo {
    /// X offset
    pub x_offset: i32,
    /// Y offset
    pub y_offset: i32,

    /// Source image filename
    pub source_image_file_name: String, // 100 bytes
    /// Source date
    pub source_date: String, // 12 bytes
    /// Source time
    pub source_time: String, // 12 bytes
    /// Input device name
    pub input_device: String, // 64 bytes
    /// Input device model number
    pub input_device_model_number: String, // 32 bytes
    /// Input device serial number
    pub input_device_serial_number: String, // 32 bytes

    /// X device pitch (samples/mm)
    pub x_device_pitch: f32,
    /// Y device pitch (samples/mm)
    pub y_device_pitch: f32,
    /// Gamma
    pub gamma: f32,
}

/// Motion Picture and Television Industry Specific Information
#[derive(Default, Debug, Clone)]
pub struct FilmInfo {
    /// Film edge code manufacturing ID code
    pub film_manufacturing_id_code: u8,
    /// Film edge code type
    pub film_type: u8,
    /// Film edge code offset in perfs
    pub perfs_offset: u8,
    /// Film edge code prefix
    pub prefix: u32,
    /// Film edge code count
    pub count: u32,

    /// Format string, e.g. Academy
    pub format: String, // 32 bytes

    /// Frame position in sequence
    pub frame_position: u32,

    /// Frame rate of original (frame / sec)
    pub frame_rate: f32,

    /// Frame identification, e.g. keyframe
    pub frame_id: String, // 32 bytes
    /// Slate information
    pub slate_info: String, // 200 bytes
}

impl FilmInfo {
    /// Film edge code assembled from its five components.
    ///
    /// Empty when every component is undefined.
    pub fn edge_code(&self) -> String {
        if self.film_manufacturing_id_code == u8::MAX
            && self.film_type == u8::MAX
            && self.perfs_offset == u8::MAX
            && self.prefix == u32::MAX
            && self.count == u32::MAX
        {
            return String::new();
        }
        format!(
            "{:02}{:02}{:02}{:06}{:04}",
            self.film_manufacturing_id_code,
            self.film_type,
            self.perfs_offset,
            self.prefix,
            self.count
        )
    }
}

/// Generic File and Image Header Information
#[derive(Default, Debug, Clone)]
pub struct Header {
    /// Byte order the header was stored in
    pub byte_order: ByteOrder,

    /// File Information
    pub file_info: FileInformation,

    /// Image Information
    pub image_info: ImageInfo,

    /// Data Format Information
    pub data_format_info: DataFormatInfo,

    /// Origination Information
    pub origination_info: OriginationInfo,

    /// Film Information
    pub film_info: FilmInfo,
}

impl Header {
    /// Whether the stored values had to be byte swapped for this host.
    pub fn requires_byte_swap(&self) -> bool {
        self.byte_order != ByteOrder::native()
    }

    /// Image elements in use, in stored order.
    pub fn elements(&self) -> &[ImageChannel] {
        let count = (self.image_info.number_of_elements as usize).min(MAX_ELEMENTS);
        &self.image_info.channel[..count]
    }
}
