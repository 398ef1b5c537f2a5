// [File format]
// The file consists of a header and a body. The header is as follows:
//  - Magic number (5 bytes, varint `u32`): fc 52 47 4e 50
//  - Version number (1 byte): 1
//  - Memo string
//
// The body is the `RangeDocument` encoded with the bincode standard configuration.
//
// `VarIntEncoding`: https://github.com/bincode-org/bincode/blob/trunk/docs/spec.md#varintencoding

use crate::document::*;
use crate::error::*;
use bincode::Encode;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: u32 = 0x504e4752;
const VERSION: u8 = 1;

fn encode_into_std_write<E: Encode, W: Write>(
    val: E,
    writer: &mut W,
    err_msg: &str,
) -> RangeResult<usize> {
    bincode::encode_into_std_write(val, writer, bincode::config::standard())
        .map_err(|e| RangeError::File(format!("{err_msg}: {e}")))
}

#[inline]
fn read_error(err_msg: &str) -> impl FnOnce(bincode::error::DecodeError) -> RangeError + '_ {
    move |e: bincode::error::DecodeError| RangeError::File(format!("{err_msg}: {e}"))
}

#[inline]
fn io_error<E: Display>(err_msg: &str) -> impl FnOnce(E) -> RangeError + '_ {
    move |e| RangeError::File(format!("{err_msg}: {e}"))
}

/// Saves a range document into a standard writer.
///
/// The document is validated first; an invalid document is not written. If you want to save the
/// document into a file, use [`save_document_to_file`] instead.
pub fn save_document_into_std_write<W: Write>(
    document: &RangeDocument,
    memo: &str,
    writer: &mut W,
) -> RangeResult<()> {
    document.validate()?;

    encode_into_std_write(MAGIC, writer, "Failed to write magic number")?;
    encode_into_std_write(VERSION, writer, "Failed to write version number")?;
    encode_into_std_write(memo, writer, "Failed to write memo")?;
    encode_into_std_write(document, writer, "Failed to write document")?;

    writer.flush().map_err(io_error("Failed to flush writer"))
}

/// Saves a range document into a file, overwriting it if it exists.
pub fn save_document_to_file<P: AsRef<Path>>(
    document: &RangeDocument,
    memo: &str,
    path: P,
) -> RangeResult<()> {
    let file = File::create(path).map_err(io_error("Failed to create file"))?;
    let mut writer = BufWriter::new(file);
    save_document_into_std_write(document, memo, &mut writer)
}

/// Loads a range document and its memo string from a standard reader.
///
/// The loaded document is validated before it is returned.
pub fn load_document_from_std_read<R: Read>(reader: &mut R) -> RangeResult<(RangeDocument, String)> {
    let config = bincode::config::standard();

    let magic: u32 = bincode::decode_from_std_read(reader, config)
        .map_err(read_error("Failed to read magic number"))?;
    if magic != MAGIC {
        return Err(RangeError::File("Magic number is invalid".to_string()));
    }

    let version: u8 = bincode::decode_from_std_read(reader, config)
        .map_err(read_error("Failed to read version number"))?;
    if version != VERSION {
        return Err(RangeError::File("Version number is invalid".to_string()));
    }

    let memo: String = bincode::decode_from_std_read(reader, config)
        .map_err(read_error("Failed to read memo"))?;

    let document: RangeDocument = bincode::decode_from_std_read(reader, config)
        .map_err(read_error("Failed to read document"))?;

    document.validate()?;
    Ok((document, memo))
}

/// Loads a range document and its memo string from a file.
pub fn load_document_from_file<P: AsRef<Path>>(path: P) -> RangeResult<(RangeDocument, String)> {
    let file = File::open(path).map_err(io_error("Failed to open file"))?;
    let mut reader = BufReader::new(file);
    load_document_from_std_read(&mut reader)
}
