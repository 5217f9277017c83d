//! Escaped node tree primitives.
//!
//! An OTB file is a 4-byte zero header followed by one node tree. A node is
//! delimited by [`NODE_START`] and [`NODE_END`]; inside a node's payload any
//! literal `0xFD`/`0xFE`/`0xFF` byte is preceded by the [`ESCAPE`] byte. The
//! delimiters themselves are never escaped.

use crate::error::{OtbError, OtbResult};

/// Escape marker for payload bytes that collide with the delimiters.
pub const ESCAPE: u8 = 0xFD;
/// Node start delimiter.
pub const NODE_START: u8 = 0xFE;
/// Node end delimiter.
pub const NODE_END: u8 = 0xFF;

/// One parsed node: its unescaped payload and its child nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Payload bytes with escapes already stripped.
    pub payload: Vec<u8>,
    /// Child nodes in file order.
    pub children: Vec<Node>,
}

/// Parses a whole OTB buffer into its root node.
///
/// # Errors
///
/// Fails on a bad header, truncation, stray delimiters, or trailing bytes
/// after the root node closes.
pub fn parse_tree(data: &[u8]) -> OtbResult<Node> {
    if data.len() < 4 || data[..4] != [0, 0, 0, 0] {
        return Err(OtbError::InvalidHeader);
    }
    let mut pos = 4;
    if data.get(pos) != Some(&NODE_START) {
        return Err(OtbError::UnexpectedByte {
            byte: data.get(pos).copied().unwrap_or(0),
            offset: pos,
        });
    }
    pos += 1;
    let root = parse_node(data, &mut pos)?;
    if pos != data.len() {
        return Err(OtbError::TrailingData { offset: pos });
    }
    Ok(root)
}

/// Parses one node body; `pos` sits just past the opening `NODE_START` and
/// is left just past the closing `NODE_END`.
fn parse_node(data: &[u8], pos: &mut usize) -> OtbResult<Node> {
    let mut node = Node::default();
    loop {
        let Some(&byte) = data.get(*pos) else {
            return Err(OtbError::UnexpectedEof { offset: *pos });
        };
        *pos += 1;
        match byte {
            ESCAPE => {
                let Some(&escaped) = data.get(*pos) else {
                    return Err(OtbError::UnexpectedEof { offset: *pos });
                };
                *pos += 1;
                node.payload.push(escaped);
            }
            NODE_START => node.children.push(parse_node(data, pos)?),
            NODE_END => return Ok(node),
            _ => node.payload.push(byte),
        }
    }
}

/// Bounds-checked little-endian cursor over an unescaped node payload.
pub struct PayloadReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    /// Creates a reader over a node payload.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns true if every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Number of bytes left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> OtbResult<u8> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Err(OtbError::UnexpectedEof { offset: self.pos });
        };
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a little-endian u16.
    pub fn read_u16(&mut self) -> OtbResult<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a little-endian u32.
    pub fn read_u32(&mut self) -> OtbResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> OtbResult<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(OtbError::UnexpectedEof {
                offset: self.data.len(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }
}

/// Builds the escaped byte stream node by node.
#[derive(Debug, Default)]
pub struct NodeWriter {
    buffer: Vec<u8>,
}

impl NodeWriter {
    /// Creates a writer holding the 4-byte zero file header.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: vec![0, 0, 0, 0],
        }
    }

    /// Opens a node.
    pub fn begin_node(&mut self) {
        self.buffer.push(NODE_START);
    }

    /// Closes the current node.
    pub fn end_node(&mut self) {
        self.buffer.push(NODE_END);
    }

    /// Writes one payload byte, escaping it when needed.
    pub fn write_u8(&mut self, value: u8) {
        if matches!(value, ESCAPE | NODE_START | NODE_END) {
            self.buffer.push(ESCAPE);
        }
        self.buffer.push(value);
    }

    /// Writes a little-endian u16 payload value.
    pub fn write_u16(&mut self, value: u16) {
        for byte in value.to_le_bytes() {
            self.write_u8(byte);
        }
    }

    /// Writes a little-endian u32 payload value.
    pub fn write_u32(&mut self, value: u32) {
        for byte in value.to_le_bytes() {
            self.write_u8(byte);
        }
    }

    /// Writes raw payload bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_u8(byte);
        }
    }

    /// Writes one TLV attribute: id, u16 length, payload.
    ///
    /// # Errors
    ///
    /// Fails if the payload does not fit a u16 length.
    pub fn write_attribute(&mut self, id: u8, payload: &[u8]) -> OtbResult<()> {
        let length = u16::try_from(payload.len()).map_err(|_| OtbError::AttributeTooLong {
            id,
            length: payload.len(),
        })?;
        self.write_u8(id);
        self.write_u16(length);
        self.write_bytes(payload);
        Ok(())
    }

    /// Consumes the writer and returns the finished buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &[u8]) -> Vec<u8> {
        let mut data = vec![0, 0, 0, 0, NODE_START];
        data.extend_from_slice(body);
        data.push(NODE_END);
        data
    }

    #[test]
    fn parse_empty_root() {
        let node = parse_tree(&wrap(&[])).unwrap();
        assert!(node.payload.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn parse_payload_and_children() {
        let data = wrap(&[1, 2, NODE_START, 9, NODE_END, NODE_START, NODE_END]);
        let node = parse_tree(&data).unwrap();
        assert_eq!(node.payload, vec![1, 2]);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].payload, vec![9]);
    }

    #[test]
    fn escape_stripped_on_parse() {
        let data = wrap(&[ESCAPE, NODE_END, ESCAPE, ESCAPE, ESCAPE, NODE_START]);
        let node = parse_tree(&data).unwrap();
        assert_eq!(node.payload, vec![NODE_END, ESCAPE, NODE_START]);
    }

    #[test]
    fn bad_header_rejected() {
        assert_eq!(parse_tree(&[0, 0, 0]), Err(OtbError::InvalidHeader));
        assert_eq!(
            parse_tree(&[1, 0, 0, 0, NODE_START, NODE_END]),
            Err(OtbError::InvalidHeader)
        );
    }

    #[test]
    fn truncated_node_rejected() {
        let data = [0, 0, 0, 0, NODE_START, 1, 2];
        assert!(matches!(
            parse_tree(&data),
            Err(OtbError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn truncated_escape_rejected() {
        let data = [0, 0, 0, 0, NODE_START, ESCAPE];
        assert!(matches!(
            parse_tree(&data),
            Err(OtbError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut data = wrap(&[1]);
        data.push(0x42);
        assert!(matches!(
            parse_tree(&data),
            Err(OtbError::TrailingData { .. })
        ));
    }

    #[test]
    fn writer_escapes_reserved_bytes() {
        let mut writer = NodeWriter::new();
        writer.begin_node();
        writer.write_bytes(&[1, ESCAPE, NODE_START, NODE_END]);
        writer.end_node();
        let bytes = writer.into_bytes();
        let parsed = parse_tree(&bytes).unwrap();
        assert_eq!(parsed.payload, vec![1, ESCAPE, NODE_START, NODE_END]);
    }

    #[test]
    fn payload_reader_primitives() {
        let mut reader = PayloadReader::new(&[7, 0x34, 0x12, 1, 0, 0, 0, 9]);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 1);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_bytes(1).unwrap(), &[9]);
        assert!(reader.is_empty());
        assert!(matches!(
            reader.read_u8(),
            Err(OtbError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn attribute_tlv_shape() {
        let mut writer = NodeWriter::new();
        writer.begin_node();
        writer.write_attribute(0x10, &[0x64, 0x00]).unwrap();
        writer.end_node();
        let node = parse_tree(&writer.into_bytes()).unwrap();
        assert_eq!(node.payload, vec![0x10, 0x02, 0x00, 0x64, 0x00]);
    }
}
