//! Text and XML presentation of a parsed header.

use std::io::{self, Write};

use quick_xml::escape::escape;

use crate::format::Value;
use crate::header::{Header, ImageChannel};
use crate::labels;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const XML_ROOT: &str = "cineon";

/// Display widths narrower than the stored field
const FILM_CODE_WIDTH: usize = 16;
const SLATE_INFO_WIDTH: usize = 100;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One `Label: value` line per field
    PlainText,
    /// One element per field under a `<cineon>` root
    Xml {
        /// Emit the `<?xml ...?>` line first
        declaration: bool,
    },
}

/// Turns a field label into an XML tag name.
pub fn xml_tag(label: &str) -> String {
    label
        .chars()
        .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

/// Cuts `text` to at most `width` bytes without splitting a character.
fn clip(text: &str, width: usize) -> &str {
    if text.len() <= width {
        return text;
    }
    let mut end = width;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Writes fields in the selected mode.
pub struct Renderer<W: Write> {
    out: W,
    mode: Mode,
}

/// A numbered block of fields, only reachable inside [`Renderer::section`].
pub struct Section<'r, W: Write> {
    renderer: &'r mut Renderer<W>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: Mode) -> Self {
        Self { out, mode }
    }

    /// Writes a top level field.
    pub fn field<'v, V: Into<Value<'v>>>(&mut self, label: &str, value: V) -> io::Result<()> {
        self.emit(false, label, &value.into())
    }

    /// Opens a section, lets `body` fill it, then closes it.
    pub fn section<F>(&mut self, label: &str, ordinal: Option<usize>, body: F) -> io::Result<()>
    where
        F: FnOnce(&mut Section<'_, W>) -> io::Result<()>,
    {
        match (self.mode, ordinal) {
            (Mode::PlainText, Some(n)) => writeln!(self.out, "{}# {}", label, n)?,
            (Mode::PlainText, None) => writeln!(self.out, "{}", label)?,
            (Mode::Xml { .. }, Some(n)) => writeln!(self.out, "  <{} id=\"{}\">", xml_tag(label), n)?,
            (Mode::Xml { .. }, None) => writeln!(self.out, "  <{}>", xml_tag(label))?,
        }
        body(&mut Section { renderer: &mut *self })?;
        if let Mode::Xml { .. } = self.mode {
            writeln!(self.out, "  </{}>", xml_tag(label))?;
        }
        Ok(())
    }

    /// Declaration and root element, XML only.
    pub fn begin(&mut self) -> io::Result<()> {
        if let Mode::Xml { declaration } = self.mode {
            if declaration {
                writeln!(self.out, "{}", XML_DECLARATION)?;
            }
            writeln!(self.out, "<{}>", XML_ROOT)?;
        }
        Ok(())
    }

    /// Closes the root element and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        if let Mode::Xml { .. } = self.mode {
            writeln!(self.out, "</{}>", XML_ROOT)?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, nested: bool, label: &str, value: &Value<'_>) -> io::Result<()> {
        let indent = if nested { "  " } else { "" };
        match self.mode {
            Mode::PlainText => writeln!(self.out, "{}{}: {}", indent, label, value),
            Mode::Xml { .. } => {
                let tag = xml_tag(label);
                let text = value.to_string();
                writeln!(self.out, "{}  <{}>{}</{}>", indent, tag, escape(text.as_str()), tag)
            }
        }
    }
}

impl<W: Write> Section<'_, W> {
    /// Writes a field indented under the section.
    pub fn field<'v, V: Into<Value<'v>>>(&mut self, label: &str, value: V) -> io::Result<()> {
        self.renderer.emit(true, label, &value.into())
    }
}

/// Writes every header field in the fixed presentation order.
pub fn render_header<W: Write>(header: &Header, mode: Mode, out: W) -> io::Result<W> {
    let mut r = Renderer::new(out, mode);
    r.begin()?;

    let file = &header.file_info;
    r.field("Version", file.version.as_str())?;
    r.field("Magic Number", format!("{:08x}", file.magic_number))?;
    r.field("Endian Swap", if header.requires_byte_swap() { "true" } else { "false" })?;
    r.field("Image Offset", file.image_offset)?;
    r.field("Generic Size", file.generic_size)?;
    r.field("Industry Size", file.industry_size)?;
    r.field("User Size", file.user_size)?;
    r.field("File Size", file.file_size)?;
    r.field("Filename", file.filename.as_str())?;
    r.field("Creation Date", file.creation_date.as_str())?;
    r.field("Creation Time", file.creation_time.as_str())?;

    let image = &header.image_info;
    r.field("Image Orientation", labels::orientation(image.orientation))?;
    r.field("Number of Elements", image.number_of_elements)?;
    for (i, element) in header.elements().iter().enumerate() {
        r.section("Image Element", Some(i + 1), |s| render_element(s, element))?;
    }

    let pairs = [
        ("White Point", image.white_point),
        ("Red Primary", image.red_primary),
        ("Green Primary", image.green_primary),
        ("Blue Primary", image.blue_primary),
    ];
    for (name, [x, y]) in pairs.iter() {
        r.field(&format!("{} X", name), *x)?;
        r.field(&format!("{} Y", name), *y)?;
    }
    r.field("Label Text", image.label_text.as_str())?;

    let data = &header.data_format_info;
    r.field("Interleave", labels::interleave(data.interleave))?;
    r.field("Packing", labels::packing(data.packing))?;
    r.field("Data Sign", data.data_sign)?;
    r.field("End of Line Padding", data.line_padding)?;
    r.field("End of Image Padding", data.channel_padding)?;

    let origin = &header.origination_info;
    r.field("X Offset", origin.x_offset)?;
    r.field("Y Offset", origin.y_offset)?;
    r.field("Source Image Filename", origin.source_image_file_name.as_str())?;
    r.field("Source Date", origin.source_date.as_str())?;
    r.field("Source Time", origin.source_time.as_str())?;
    r.field("Input Device", origin.input_device.as_str())?;
    r.field("Input Device Model Number", origin.input_device_model_number.as_str())?;
    r.field("Input Device Serial Number", origin.input_device_serial_number.as_str())?;
    r.field("X Device Pitch", origin.x_device_pitch)?;
    r.field("Y Device Pitch", origin.y_device_pitch)?;
    r.field("Gamma", origin.gamma)?;

    let film = &header.film_info;
    r.field("Film Code", clip(&film.edge_code(), FILM_CODE_WIDTH))?;
    r.field("Format", film.format.as_str())?;
    r.field("Frame Position", film.frame_position)?;
    r.field("Frame Rate", film.frame_rate)?;
    r.field("Frame Id", film.frame_id.as_str())?;
    r.field("Slate Info", clip(&film.slate_info, SLATE_INFO_WIDTH))?;

    r.finish()
}

fn render_element<W: Write>(s: &mut Section<'_, W>, element: &ImageChannel) -> io::Result<()> {
    s.field("Metric", labels::metric(element.metric))?;
    s.field("Descriptor", labels::descriptor(element.descriptor))?;
    s.field("Bit Size", element.bit_depth)?;
    s.field("Width", element.pixels_per_line)?;
    s.field("Height", element.lines_per_element)?;
    s.field("Low Data", element.low_data)?;
    s.field("Low Quantity", element.low_quantity)?;
    s.field("High Data", element.high_data)?;
    s.field("High Quantity", element.high_quantity)
}
