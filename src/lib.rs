//! A codec for the NTLM Challenge message.
//!
//! The Challenge message is the second of the three NTLM handshake messages (Negotiate,
//! Challenge, Authenticate); it is sent by the server and carries the server's nonce, the
//! negotiated capability flags and the target's identity metadata. This crate covers the binary
//! representation of that message: decoding a raw byte buffer into a structured message, encoding
//! a structured message back into wire bytes, and managing the variable-length trailing region
//! (target name, target information, optional version block) addressed through internal
//! offset/length fields. Hash computation and handshake orchestration live elsewhere.
//!
//! Sample usage:
//! ```
//! let mut msg = ntlmchallenge::ChallengeMessage::new();
//! msg.flags |= ntlmchallenge::Flags::NEGOTIATE_UNICODE
//!     | ntlmchallenge::Flags::NEGOTIATE_NTLM
//!     ;
//! msg.set_target_name("DOMAIN")
//!     .expect("target name already set");
//! msg.set_target_info(&[
//!     ntlmchallenge::TargetInfoEntry {
//!         entry_type: ntlmchallenge::TargetInfoType::NbDomainName,
//!         value: ntlmchallenge::TargetInfoValue::Text("DOMAIN".to_owned()),
//!     },
//! ])
//!     .expect("target info already set");
//! msg.set_server_challenge(None)
//!     .expect("server challenge already set");
//!
//! let wire = msg.to_bytes(ntlmchallenge::ByteOrder::LittleEndian);
//!
//! let parsed = ntlmchallenge::ChallengeMessage::try_from(wire.as_slice())
//!     .expect("decoding challenge message failed");
//! assert_eq!(parsed.target_name().unwrap().as_deref(), Some("DOMAIN"));
//! ```


#[cfg(windows)]
mod encoding_windows;

#[cfg(not(windows))]
mod encoding_utf8;


use std::fmt;

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::OsRng;

#[cfg(windows)]
use crate::encoding_windows::{ansi_string_to_rust, rust_string_to_ansi};

#[cfg(not(windows))]
use crate::encoding_utf8::{ansi_string_to_rust, rust_string_to_ansi};


/// The magic value at the start of every NTLMSSP data packet.
const NTLMSSP_MAGIC: [u8; 8] = *b"NTLMSSP\0";

/// The message type number of the Challenge message.
const CHALLENGE_MESSAGE_TYPE: u32 = 0x0000_0002;

/// The size of the fixed Challenge header; the payload region starts here.
const PAYLOAD_START: u32 = 48;

/// Difference between the FILETIME epoch (1601-01-01) and the Unix epoch (1970-01-01) in
/// 100-nanosecond intervals.
const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;


bitflags! {
    /// NTLM operation flags.
    #[derive(Clone, Copy, Debug, Default, Hash, Eq, Ord, PartialEq, PartialOrd)]
    pub struct Flags: u32 {
        const NEGOTIATE_UNICODE = 0x0000_0001;
        const NEGOTIATE_OEM = 0x0000_0002;
        const REQUEST_TARGET = 0x0000_0004;
        const UNKNOWN_8 = 0x0000_0008;
        const NEGOTIATE_SIGN = 0x0000_0010;
        const NEGOTIATE_SEAL = 0x0000_0020;
        const NEGOTIATE_DATAGRAM = 0x0000_0040;
        const NEGOTIATE_LANMAN_KEY = 0x0000_0080;
        const NEGOTIATE_NETWARE = 0x0000_0100;
        const NEGOTIATE_NTLM = 0x0000_0200;
        const UNKNOWN_400 = 0x0000_0400;
        const NEGOTIATE_ANONYMOUS = 0x0000_0800;
        const NEGOTIATE_DOMAIN_SUPPLIED = 0x0000_1000;
        const NEGOTIATE_WORKSTATION_SUPPLIED = 0x0000_2000;
        const NEGOTIATE_LOCAL_CALL = 0x0000_4000;
        const NEGOTIATE_ALWAYS_SIGN = 0x0000_8000;
        const TARGET_TYPE_DOMAIN = 0x0001_0000;
        const TARGET_TYPE_SERVER = 0x0002_0000;
        const TARGET_TYPE_SHARE = 0x0004_0000;
        const NEGOTIATE_NTLM2_KEY = 0x0008_0000;
        const REQUEST_INIT_RESPONSE = 0x0010_0000;
        const REQUEST_ACCEPT_RESPONSE = 0x0020_0000;
        const REQUEST_NON_NT_SESSION_KEY = 0x0040_0000;
        const NEGOTIATE_TARGET_INFO = 0x0080_0000;
        const UNKNOWN_1000000 = 0x0100_0000;
        const NEGOTIATE_VERSION = 0x0200_0000;
        const UNKNOWN_4000000 = 0x0400_0000;
        const UNKNOWN_8000000 = 0x0800_0000;
        const UNKNOWN_10000000 = 0x1000_0000;
        const NEGOTIATE_128BIT = 0x2000_0000;
        const NEGOTIATE_KEY_EXCHANGE = 0x4000_0000;
        const NEGOTIATE_56BIT = 0x8000_0000;
    }
}
impl Flags {
    /// Renders the set of recognized flags that are set, one name per line, for diagnostics.
    pub fn describe(&self) -> String {
        let mut ret = String::new();
        for (name, _flag) in self.iter_names() {
            ret.push_str(name);
            ret.push('\n');
        }
        ret
    }
}


/// The byte order in which the integer fields of a message are emitted.
///
/// NTLM messages are little-endian on the wire; big-endian emission exists for transports that
/// frame the message with inverted byte order. The decoder always assumes little-endian input, so
/// a big-endian buffer must be re-normalized before it is parsed again.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

fn put_u16(buf: &mut Vec<u8>, value: u16, byte_order: ByteOrder) {
    match byte_order {
        ByteOrder::LittleEndian => buf.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => buf.extend_from_slice(&value.to_be_bytes()),
    }
}

fn put_u32(buf: &mut Vec<u8>, value: u32, byte_order: ByteOrder) {
    match byte_order {
        ByteOrder::LittleEndian => buf.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => buf.extend_from_slice(&value.to_be_bytes()),
    }
}


/// An error that may occur while parsing an existing Challenge message.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ParsingError {
    /// The header is shorter than expected.
    ShortHeader { expected_min_len: usize, obtained_len: usize },

    /// The magic value does not match the expected one.
    MagicMismatch { expected: [u8; 8], obtained: Vec<u8> },

    /// An internal item has a different length than expected.
    ItemLengthMismatch { expected: usize, obtained: usize },

    /// An internal item is shorter than expected.
    ItemMinLengthMismatch { expected_at_least: usize, obtained: usize },

    /// An internal item's length is not divisible by an expected divisor.
    ItemLengthNotDivisible { expected_divisor: usize, obtained_length: usize },

    /// A byte string cannot be decoded using the current OEM encoding.
    InvalidOemEncoding { value: Vec<u8> },

    /// A string of 16-bit characters could not be decoded as UTF-16.
    InvalidUtf16 { value: Vec<u16> },

    /// A buffer offset points before the payload region or past its end.
    StartOutOfRange { start: usize, length: usize },

    /// A buffer offset plus length points past the end of the payload region.
    EndOutOfRange { end: usize, length: usize },
}
impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortHeader { expected_min_len, obtained_len }
                => write!(f, "header too short (expected at least {} bytes, obtained {})", expected_min_len, obtained_len),
            Self::MagicMismatch { expected, obtained }
                => write!(f, "mismatched magic (expected {:?}, obtained {:?})", expected, obtained),
            Self::ItemLengthMismatch { expected, obtained }
                => write!(f, "insufficient length for an internal item (expected {:?}, obtained {:?})", expected, obtained),
            Self::ItemMinLengthMismatch { expected_at_least, obtained }
                => write!(f, "insufficient minimum length for an internal item (expected at least {:?}, obtained {:?})", expected_at_least, obtained),
            Self::ItemLengthNotDivisible { expected_divisor, obtained_length }
                => write!(f, "item length {} not divisible by {}", obtained_length, expected_divisor),
            Self::InvalidOemEncoding { value }
                => write!(f, "failed to decode value with the current OEM encoding: {:?}", value),
            Self::InvalidUtf16 { value }
                => write!(f, "failed to decode value as UTF-16: {:?}", value),
            Self::StartOutOfRange { start, length }
                => write!(f, "start ({}) out of range (payload has {} bytes)", start, length),
            Self::EndOutOfRange { end, length }
                => write!(f, "end ({}) out of range (payload has {} bytes)", end, length),
        }
    }
}
impl std::error::Error for ParsingError {
}

/// An error that may occur while populating a Challenge message.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StoringError {
    /// A single-shot field has already been populated on this message.
    FieldAlreadySet { field: &'static str },

    /// The version block must be the first write into the payload region.
    VersionAfterPayload,

    /// The string cannot be encoded using the OEM encoding.
    NonOemEncodable { string: String },
}
impl fmt::Display for StoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldAlreadySet { field }
                => write!(f, "the {} field has already been set on this message", field),
            Self::VersionAfterPayload
                => write!(f, "the version block must be written before any other payload field"),
            Self::NonOemEncodable { string }
                => write!(f, "failed to encode {:?} using OEM encoding", string),
        }
    }
}
impl std::error::Error for StoringError {
}


/// A structure representing the version of an operating system as well as the NTLM revision used.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OsVersion {
    pub major_version: u8,
    pub minor_version: u8,
    pub build_number: u16,
    pub reserved: [u8; 3],
    pub ntlm_revision: u8,
}
impl OsVersion {
    /// Serializes the OS version structure into bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(8);
        ret.push(self.major_version);
        ret.push(self.minor_version);
        ret.extend_from_slice(&self.build_number.to_le_bytes());
        ret.extend_from_slice(&self.reserved);
        ret.push(self.ntlm_revision);
        ret
    }
}
impl TryFrom<&[u8]> for OsVersion {
    type Error = ParsingError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != 8 {
            return Err(ParsingError::ItemLengthMismatch { expected: 8, obtained: value.len() });
        }

        Ok(OsVersion {
            major_version: value[0],
            minor_version: value[1],
            build_number: u16::from_le_bytes(value[2..4].try_into().unwrap()),
            reserved: value[4..7].try_into().unwrap(),
            ntlm_revision: value[7],
        })
    }
}
impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "version {}.{} build {}, NTLM revision {}",
            self.major_version, self.minor_version, self.build_number, self.ntlm_revision,
        )
    }
}


/// The type of a target information entry within the Challenge message.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TargetInfoType {
    Terminator,
    NbDomainName,
    NbComputerName,
    DnsDomainName,
    DnsComputerName,
    DnsTreeName,
    Flags,
    Timestamp,
    SingleHost,
    TargetName,
    ChannelBindings,
    Unknown(u16),
}
impl From<TargetInfoType> for u16 {
    fn from(t: TargetInfoType) -> Self {
        match t {
            TargetInfoType::Terminator => 0x0000,
            TargetInfoType::NbDomainName => 0x0001,
            TargetInfoType::NbComputerName => 0x0002,
            TargetInfoType::DnsDomainName => 0x0003,
            TargetInfoType::DnsComputerName => 0x0004,
            TargetInfoType::DnsTreeName => 0x0005,
            TargetInfoType::Flags => 0x0006,
            TargetInfoType::Timestamp => 0x0007,
            TargetInfoType::SingleHost => 0x0008,
            TargetInfoType::TargetName => 0x0009,
            TargetInfoType::ChannelBindings => 0x000A,
            TargetInfoType::Unknown(w) => w,
        }
    }
}
impl From<u16> for TargetInfoType {
    fn from(w: u16) -> Self {
        match w {
            0x0000 => TargetInfoType::Terminator,
            0x0001 => TargetInfoType::NbDomainName,
            0x0002 => TargetInfoType::NbComputerName,
            0x0003 => TargetInfoType::DnsDomainName,
            0x0004 => TargetInfoType::DnsComputerName,
            0x0005 => TargetInfoType::DnsTreeName,
            0x0006 => TargetInfoType::Flags,
            0x0007 => TargetInfoType::Timestamp,
            0x0008 => TargetInfoType::SingleHost,
            0x0009 => TargetInfoType::TargetName,
            0x000A => TargetInfoType::ChannelBindings,
            other => TargetInfoType::Unknown(other),
        }
    }
}
impl TargetInfoType {
    /// The diagnostic name of this entry type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Terminator => "MsvAvEOL",
            Self::NbDomainName => "MsvAvNbDomainName",
            Self::NbComputerName => "MsvAvNbComputerName",
            Self::DnsDomainName => "MsvAvDnsDomainName",
            Self::DnsComputerName => "MsvAvDnsComputerName",
            Self::DnsTreeName => "MsvAvDnsTreeName",
            Self::Flags => "MsvAvFlags",
            Self::Timestamp => "MsvAvTimestamp",
            Self::SingleHost => "MsvAvSingleHost",
            Self::TargetName => "MsvAvTargetName",
            Self::ChannelBindings => "MsvAvChannelBindings",
            Self::Unknown(_) => "MsvAvUnknown",
        }
    }

    /// The entry type corresponding to a diagnostic name, if the name is recognized.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MsvAvEOL" => Some(Self::Terminator),
            "MsvAvNbDomainName" => Some(Self::NbDomainName),
            "MsvAvNbComputerName" => Some(Self::NbComputerName),
            "MsvAvDnsDomainName" => Some(Self::DnsDomainName),
            "MsvAvDnsComputerName" => Some(Self::DnsComputerName),
            "MsvAvDnsTreeName" => Some(Self::DnsTreeName),
            "MsvAvFlags" => Some(Self::Flags),
            "MsvAvTimestamp" => Some(Self::Timestamp),
            "MsvAvSingleHost" => Some(Self::SingleHost),
            "MsvAvTargetName" => Some(Self::TargetName),
            "MsvAvChannelBindings" => Some(Self::ChannelBindings),
            _ => None,
        }
    }

    /// Whether the value of an entry of this type is text (encoded as UTF-16LE on the wire)
    /// rather than raw bytes.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::NbDomainName
                | Self::NbComputerName
                | Self::DnsDomainName
                | Self::DnsComputerName
                | Self::DnsTreeName
                | Self::TargetName
        )
    }
}

/// The value of a target information entry: decoded text for the text-typed entries, raw bytes
/// for the rest.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TargetInfoValue {
    Text(String),
    Raw(Vec<u8>),
}

/// An entry of additional target information included in the Challenge message.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TargetInfoEntry {
    pub entry_type: TargetInfoType,
    pub value: TargetInfoValue,
}
impl TargetInfoEntry {
    /// Interprets a Timestamp entry as a calendar time.
    ///
    /// Returns `None` if this is not a Timestamp entry or its value is not an 8-byte FILETIME.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if self.entry_type != TargetInfoType::Timestamp {
            return None;
        }
        match &self.value {
            TargetInfoValue::Raw(data) if data.len() == 8 => {
                let filetime = u64::from_le_bytes(data.as_slice().try_into().unwrap());
                Some(filetime_to_datetime(filetime))
            },
            _ => None,
        }
    }
}

/// Converts a FILETIME value (100-nanosecond intervals since 1601-01-01) into a calendar time.
pub fn filetime_to_datetime(filetime: u64) -> DateTime<Utc> {
    let unix_hundred_ns = (filetime as i64) - (FILETIME_UNIX_EPOCH as i64);
    DateTime::from_timestamp_nanos(unix_hundred_ns * 100)
}

/// Deserializes an ordered target information list from the given byte buffer.
///
/// Entries are read until the terminator (type 0, length 0); bytes past the terminator are left
/// unread. An entry that runs past the end of the buffer, or a buffer that ends before the
/// terminator, is a parsing error.
pub fn parse_target_info(bytes: &[u8]) -> Result<Vec<TargetInfoEntry>, ParsingError> {
    let mut rest = bytes;
    let mut entries = Vec::new();
    loop {
        if rest.len() < 4 {
            return Err(ParsingError::ItemMinLengthMismatch { expected_at_least: 4, obtained: rest.len() });
        }
        let entry_type_u16 = u16::from_le_bytes(rest[0..2].try_into().unwrap());
        let length: usize = u16::from_le_bytes(rest[2..4].try_into().unwrap()).into();
        if entry_type_u16 == 0 && length == 0 {
            return Ok(entries);
        }
        if rest.len() < 4 + length {
            return Err(ParsingError::ItemMinLengthMismatch { expected_at_least: 4 + length, obtained: rest.len() });
        }

        let entry_type: TargetInfoType = entry_type_u16.into();
        let data = &rest[4..4+length];
        let value = if entry_type.is_text() {
            TargetInfoValue::Text(utf16_le_bytes_to_string(data)?)
        } else {
            TargetInfoValue::Raw(Vec::from(data))
        };
        entries.push(TargetInfoEntry { entry_type, value });
        rest = &rest[4+length..];
    }
}

/// Serializes an ordered target information list into bytes, including the terminator.
///
/// Entries of an unrecognized type are silently omitted; text values are encoded as UTF-16LE and
/// raw values are copied verbatim.
pub fn encode_target_info(entries: &[TargetInfoEntry]) -> Vec<u8> {
    let mut bs = Vec::new();
    for entry in entries {
        if matches!(entry.entry_type, TargetInfoType::Terminator | TargetInfoType::Unknown(_)) {
            continue;
        }

        let data: Vec<u8> = match &entry.value {
            TargetInfoValue::Text(s) => s.encode_utf16()
                .flat_map(|w| w.to_le_bytes())
                .collect(),
            TargetInfoValue::Raw(bytes) => bytes.clone(),
        };
        let entry_type_u16: u16 = entry.entry_type.into();
        let length: u16 = data.len().try_into().expect("length of entry does not fit into u16");

        bs.extend_from_slice(&entry_type_u16.to_le_bytes());
        bs.extend_from_slice(&length.to_le_bytes());
        bs.extend_from_slice(&data);
    }
    bs.extend_from_slice(&[0, 0, 0, 0]);
    bs
}


/// Converts UTF-16 values stored as bytes in little-endian format into a string.
pub fn utf16_le_bytes_to_string(bytes: &[u8]) -> Result<String, ParsingError> {
    if bytes.len() % 2 != 0 {
        return Err(ParsingError::ItemLengthNotDivisible { expected_divisor: 2, obtained_length: bytes.len() });
    }
    let u16s: Vec<u16> = bytes.chunks_exact(2)
        .map(|chk| u16::from_le_bytes(chk.try_into().unwrap()))
        .collect();
    String::from_utf16(&u16s)
        .or(Err(ParsingError::InvalidUtf16 { value: u16s }))
}

/// Converts an ANSI string into a Rust string.
fn oem_bytes_to_string(bytes: &[u8]) -> Result<String, ParsingError> {
    ansi_string_to_rust(bytes)
        .ok_or_else(|| ParsingError::InvalidOemEncoding { value: Vec::from(bytes) })
}

/// Renders bytes as a lowercase hex string.
fn hex_string(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}


/// An NTLM Challenge message: the fixed 48-byte header plus the variable payload region.
///
/// The target name, the target information list and (when negotiated) the version block live in
/// the payload; their positions are described by offset/length fields in the header. Offsets are
/// absolute positions in the full wire message, so the payload-relative position of a field is
/// its offset minus 48.
///
/// A message is either built up from empty through the single-shot setters and then serialized,
/// or deserialized from wire bytes and then read through the accessors. Each of the target name,
/// the target information, the server challenge and the version block may be set at most once per
/// instance; a second write is rejected with [`StoringError::FieldAlreadySet`].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChallengeMessage {
    /// The magic value identifying the message family; always `NTLMSSP\0`.
    pub signature: [u8; 8],

    /// The message type number; always 2 for the Challenge message.
    pub message_type: u32,

    pub target_name_len: u16,
    pub target_name_max_len: u16,
    pub target_name_offset: u32,

    /// Stores which NTLM behavior has been accepted by the server from the client's request.
    pub flags: Flags,

    /// The server-generated nonce.
    pub server_challenge: [u8; 8],

    /// Zero-filled on the wire; carried through unchanged.
    pub reserved: [u8; 8],

    pub target_info_len: u16,
    pub target_info_max_len: u16,
    pub target_info_offset: u32,

    /// The variable-length region following the fixed header.
    pub payload: Vec<u8>,

    // next write position within the full message; not part of the wire format
    cursor: u32,

    target_name_set: bool,
    target_info_set: bool,
    challenge_set: bool,
    version_set: bool,
}
impl ChallengeMessage {
    /// Creates an empty Challenge message with the signature and message type filled in.
    pub fn new() -> Self {
        Self {
            signature: NTLMSSP_MAGIC,
            message_type: CHALLENGE_MESSAGE_TYPE,
            target_name_len: 0,
            target_name_max_len: 0,
            target_name_offset: 0,
            flags: Flags::empty(),
            server_challenge: [0; 8],
            reserved: [0; 8],
            target_info_len: 0,
            target_info_max_len: 0,
            target_info_offset: 0,
            payload: Vec::new(),
            cursor: PAYLOAD_START,
            target_name_set: false,
            target_info_set: false,
            challenge_set: false,
            version_set: false,
        }
    }

    /// Serializes the Challenge message into bytes.
    ///
    /// Integer fields are emitted in the requested byte order; the fixed-size byte arrays
    /// (signature, server challenge, reserved) and the payload are emitted verbatim either way.
    pub fn to_bytes(&self, byte_order: ByteOrder) -> Vec<u8> {
        let mut buf = Vec::with_capacity((PAYLOAD_START as usize) + self.payload.len());

        buf.extend_from_slice(&self.signature);
        put_u32(&mut buf, self.message_type, byte_order);

        put_u16(&mut buf, self.target_name_len, byte_order);
        put_u16(&mut buf, self.target_name_max_len, byte_order);
        put_u32(&mut buf, self.target_name_offset, byte_order);

        put_u32(&mut buf, self.flags.bits(), byte_order);
        buf.extend_from_slice(&self.server_challenge);
        buf.extend_from_slice(&self.reserved);

        put_u16(&mut buf, self.target_info_len, byte_order);
        put_u16(&mut buf, self.target_info_max_len, byte_order);
        put_u32(&mut buf, self.target_info_offset, byte_order);

        buf.extend_from_slice(&self.payload);
        buf
    }

    /// Extracts the payload bytes described by an offset/length pair from the header.
    fn payload_slice(&self, offset: u32, length: u16) -> Result<&[u8], ParsingError> {
        let offset_usize = offset as usize;
        if offset_usize < (PAYLOAD_START as usize) {
            return Err(ParsingError::StartOutOfRange { start: offset_usize, length: self.payload.len() });
        }

        let start = offset_usize - (PAYLOAD_START as usize);
        let end = start + usize::from(length);

        if start >= self.payload.len() {
            return Err(ParsingError::StartOutOfRange { start, length: self.payload.len() });
        }
        if end > self.payload.len() {
            return Err(ParsingError::EndOutOfRange { end, length: self.payload.len() });
        }

        Ok(&self.payload[start..end])
    }

    /// The target name, decoded according to the negotiated character set.
    ///
    /// Returns `Ok(None)` if the message carries no target name.
    pub fn target_name(&self) -> Result<Option<String>, ParsingError> {
        if self.target_name_len == 0 {
            return Ok(None);
        }
        let bs = self.payload_slice(self.target_name_offset, self.target_name_len)?;
        let name = if self.flags.contains(Flags::NEGOTIATE_UNICODE) {
            utf16_le_bytes_to_string(bs)?
        } else {
            oem_bytes_to_string(bs)?
        };
        Ok(Some(name))
    }

    /// The raw target information bytes, to be handed to [`parse_target_info`].
    ///
    /// Returns `Ok(None)` if the message carries no target information.
    pub fn target_info(&self) -> Result<Option<&[u8]>, ParsingError> {
        if self.target_info_len == 0 {
            return Ok(None);
        }
        self.payload_slice(self.target_info_offset, self.target_info_len)
            .map(Some)
    }

    /// The raw version block: the first 8 payload bytes, present only when the version flag has
    /// been negotiated.
    pub fn version(&self) -> Option<&[u8]> {
        if self.flags.contains(Flags::NEGOTIATE_VERSION) && self.payload.len() >= 8 {
            Some(&self.payload[0..8])
        } else {
            None
        }
    }

    /// Writes the version block into the payload and sets the version flag.
    ///
    /// The version block is read back from the start of the payload, so it must be the first
    /// payload write; setting it after the target name or target information is rejected.
    pub fn set_version(&mut self, version: &OsVersion) -> Result<(), StoringError> {
        if self.version_set {
            return Err(StoringError::FieldAlreadySet { field: "version" });
        }
        if self.cursor != PAYLOAD_START {
            return Err(StoringError::VersionAfterPayload);
        }

        self.flags.insert(Flags::NEGOTIATE_VERSION);
        self.payload.extend_from_slice(&version.to_bytes());
        self.cursor += 8;
        self.version_set = true;
        Ok(())
    }

    /// Encodes the target name according to the negotiated character set, appends it to the
    /// payload and records its offset and length.
    pub fn set_target_name(&mut self, name: &str) -> Result<(), StoringError> {
        if self.target_name_set {
            return Err(StoringError::FieldAlreadySet { field: "target name" });
        }

        let bs: Vec<u8> = if self.flags.contains(Flags::NEGOTIATE_UNICODE) {
            name.encode_utf16()
                .flat_map(|w| w.to_le_bytes())
                .collect()
        } else {
            rust_string_to_ansi(name)
                .ok_or_else(|| StoringError::NonOemEncodable { string: name.to_owned() })?
        };
        let length: u16 = bs.len().try_into().expect("target name too long for u16 length");

        self.target_name_len = length;
        self.target_name_max_len = length;
        self.target_name_offset = self.cursor;
        self.payload.extend_from_slice(&bs);
        self.cursor += u32::from(length);
        self.target_name_set = true;
        Ok(())
    }

    /// Encodes the target information list, appends it to the payload, records its offset and
    /// length and sets the target-info flag.
    pub fn set_target_info(&mut self, entries: &[TargetInfoEntry]) -> Result<(), StoringError> {
        if self.target_info_set {
            return Err(StoringError::FieldAlreadySet { field: "target info" });
        }

        self.flags.insert(Flags::NEGOTIATE_TARGET_INFO);

        let bs = encode_target_info(entries);
        let length: u16 = bs.len().try_into().expect("target info too long for u16 length");

        self.target_info_len = length;
        self.target_info_max_len = length;
        self.target_info_offset = self.cursor;
        self.payload.extend_from_slice(&bs);
        self.cursor += u32::from(length);
        self.target_info_set = true;
        Ok(())
    }

    /// Fills the server challenge with the supplied nonce, or with cryptographically random
    /// bytes if none is supplied.
    pub fn set_server_challenge(&mut self, challenge: Option<[u8; 8]>) -> Result<(), StoringError> {
        if self.challenge_set {
            return Err(StoringError::FieldAlreadySet { field: "server challenge" });
        }

        match challenge {
            Some(bytes) => self.server_challenge = bytes,
            None => OsRng.fill(&mut self.server_challenge),
        }
        self.challenge_set = true;
        Ok(())
    }

    /// Discards the payload and every field describing it in one step: the payload buffer, the
    /// write cursor, both offset/length/max-length triples and the flag bits set by
    /// [`set_version`](Self::set_version) and [`set_target_info`](Self::set_target_info). The
    /// server challenge is header state and is left untouched.
    pub fn clear(&mut self) {
        self.payload.clear();
        self.cursor = PAYLOAD_START;

        self.target_name_len = 0;
        self.target_name_max_len = 0;
        self.target_name_offset = 0;
        self.target_info_len = 0;
        self.target_info_max_len = 0;
        self.target_info_offset = 0;

        self.flags.remove(Flags::NEGOTIATE_VERSION | Flags::NEGOTIATE_TARGET_INFO);

        self.target_name_set = false;
        self.target_info_set = false;
        self.version_set = false;
    }

    /// Re-decodes the given wire bytes into a deterministic text form.
    ///
    /// Each target information entry is rendered as a `name: value` line, with the Timestamp
    /// entry converted to calendar time, text values rendered verbatim and raw values rendered as
    /// lowercase hex. The lines are sorted in descending lexicographic order and concatenated,
    /// which makes the result independent of the order in which the entries were encoded; the
    /// rendered version block, when present, is appended at the end.
    pub fn canonical_string(bs: &[u8]) -> Result<String, ParsingError> {
        let msg = ChallengeMessage::try_from(bs)?;

        let mut lines = Vec::new();
        if let Some(info) = msg.target_info()? {
            for entry in parse_target_info(info)? {
                let rendered = match (&entry.value, entry.to_datetime()) {
                    (_, Some(timestamp)) => timestamp.to_string(),
                    (TargetInfoValue::Text(s), _) => s.clone(),
                    (TargetInfoValue::Raw(data), _) => hex_string(data),
                };
                lines.push(format!("{:<20}: {}\n", entry.entry_type.name(), rendered));
            }
        }
        lines.sort_by(|a, b| b.cmp(a));

        let mut ret = lines.concat();
        if let Some(version_bytes) = msg.version() {
            let version = OsVersion::try_from(version_bytes)?;
            ret.push_str(&version.to_string());
            ret.push('\n');
        }
        Ok(ret)
    }
}
impl Default for ChallengeMessage {
    fn default() -> Self {
        Self::new()
    }
}
impl TryFrom<&[u8]> for ChallengeMessage {
    type Error = ParsingError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() < (PAYLOAD_START as usize) {
            return Err(ParsingError::ShortHeader { expected_min_len: PAYLOAD_START as usize, obtained_len: value.len() });
        }
        let signature: [u8; 8] = value[0..8].try_into().unwrap();
        if signature != NTLMSSP_MAGIC {
            return Err(ParsingError::MagicMismatch { expected: NTLMSSP_MAGIC, obtained: Vec::from(signature) });
        }

        let message_type = u32::from_le_bytes(value[8..12].try_into().unwrap());

        let target_name_len = u16::from_le_bytes(value[12..14].try_into().unwrap());
        let target_name_max_len = u16::from_le_bytes(value[14..16].try_into().unwrap());
        let target_name_offset = u32::from_le_bytes(value[16..20].try_into().unwrap());

        let flags = Flags::from_bits_retain(u32::from_le_bytes(value[20..24].try_into().unwrap()));
        let server_challenge: [u8; 8] = value[24..32].try_into().unwrap();
        let reserved: [u8; 8] = value[32..40].try_into().unwrap();

        let target_info_len = u16::from_le_bytes(value[40..42].try_into().unwrap());
        let target_info_max_len = u16::from_le_bytes(value[42..44].try_into().unwrap());
        let target_info_offset = u32::from_le_bytes(value[44..48].try_into().unwrap());

        let mut payload_len = 0;
        if target_name_offset != 0 && target_name_len != 0 {
            payload_len += usize::from(target_name_len);
        }
        if target_info_offset != 0 && target_info_len != 0 {
            payload_len += usize::from(target_info_len);
        }
        if flags.contains(Flags::NEGOTIATE_VERSION) {
            payload_len += 8;
        }

        let payload_end = (PAYLOAD_START as usize) + payload_len;
        if value.len() < payload_end {
            return Err(ParsingError::ItemMinLengthMismatch { expected_at_least: payload_end, obtained: value.len() });
        }
        let payload = Vec::from(&value[(PAYLOAD_START as usize)..payload_end]);

        Ok(Self {
            signature,
            message_type,
            target_name_len,
            target_name_max_len,
            target_name_offset,
            flags,
            server_challenge,
            reserved,
            target_info_len,
            target_info_max_len,
            target_info_offset,
            payload,
            cursor: payload_end as u32,
            target_name_set: target_name_offset != 0 && target_name_len != 0,
            target_info_set: target_info_offset != 0 && target_info_len != 0,
            challenge_set: true,
            version_set: flags.contains(Flags::NEGOTIATE_VERSION),
        })
    }
}
impl fmt::Display for ChallengeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Challenge message (type 2)")?;
        writeln!(f, "signature: {:?}", String::from_utf8_lossy(&self.signature))?;
        writeln!(f, "message type: {:#x}", self.message_type)?;

        match self.target_name() {
            Ok(Some(name)) => writeln!(f, "target name: {} (len {}, offset {})", name, self.target_name_len, self.target_name_offset)?,
            Ok(None) => writeln!(f, "target name: (none)")?,
            Err(e) => writeln!(f, "target name: (undecodable: {})", e)?,
        }

        writeln!(f, "negotiate flags: {:#010x}", self.flags.bits())?;
        for (name, _flag) in self.flags.iter_names() {
            writeln!(f, "    {}", name)?;
        }

        writeln!(f, "server challenge: {}", hex_string(&self.server_challenge))?;

        writeln!(f, "target info: (len {}, offset {})", self.target_info_len, self.target_info_offset)?;
        if let Ok(Some(info)) = self.target_info() {
            match parse_target_info(info) {
                Ok(entries) => {
                    for entry in entries {
                        match &entry.value {
                            TargetInfoValue::Text(s)
                                => writeln!(f, "    {}: {}", entry.entry_type.name(), s)?,
                            TargetInfoValue::Raw(data)
                                => writeln!(f, "    {}: {}", entry.entry_type.name(), hex_string(data))?,
                        }
                    }
                },
                Err(e) => writeln!(f, "    (unparseable: {})", e)?,
            }
        }

        if let Some(version_bytes) = self.version() {
            if let Ok(version) = OsVersion::try_from(version_bytes) {
                writeln!(f, "{}", version)?;
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use base64::prelude::{BASE64_STANDARD, Engine};
    use chrono::DateTime;

    // FILETIME for 2002-03-06T02:27:19.599718400Z
    const SAMPLE_FILETIME: u64 = 0x01C1_C4B6_70A4_6000;

    fn sample_entries() -> Vec<TargetInfoEntry> {
        vec![
            TargetInfoEntry {
                entry_type: TargetInfoType::NbDomainName,
                value: TargetInfoValue::Text("DOMAIN".to_owned()),
            },
            TargetInfoEntry {
                entry_type: TargetInfoType::NbComputerName,
                value: TargetInfoValue::Text("SERVER".to_owned()),
            },
            TargetInfoEntry {
                entry_type: TargetInfoType::DnsDomainName,
                value: TargetInfoValue::Text("domain.example.com".to_owned()),
            },
            TargetInfoEntry {
                entry_type: TargetInfoType::Flags,
                value: TargetInfoValue::Raw(vec![0x02, 0x00, 0x00, 0x00]),
            },
            TargetInfoEntry {
                entry_type: TargetInfoType::Timestamp,
                value: TargetInfoValue::Raw(SAMPLE_FILETIME.to_le_bytes().to_vec()),
            },
        ]
    }

    fn build_message() -> ChallengeMessage {
        let mut msg = ChallengeMessage::new();
        msg.flags |= Flags::NEGOTIATE_UNICODE | Flags::NEGOTIATE_NTLM;
        msg.set_version(&OsVersion {
            major_version: 10,
            minor_version: 0,
            build_number: 17763,
            reserved: [0; 3],
            ntlm_revision: 15,
        }).unwrap();
        msg.set_target_name("DOMAIN").unwrap();
        msg.set_target_info(&sample_entries()).unwrap();
        msg.set_server_challenge(Some([0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef])).unwrap();
        msg
    }

    // byte-reverses the integer fields of a big-endian message so the little-endian decoder can
    // read it
    fn normalize_big_endian(buf: &mut [u8]) {
        for range in [8..12, 12..14, 14..16, 16..20, 20..24, 40..42, 42..44, 44..48] {
            buf[range].reverse();
        }
    }

    #[test]
    fn round_trip_little_endian() {
        let msg = build_message();
        let bytes = msg.to_bytes(ByteOrder::LittleEndian);
        let parsed = ChallengeMessage::try_from(bytes.as_slice()).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn round_trip_big_endian() {
        let msg = build_message();
        let mut bytes = msg.to_bytes(ByteOrder::BigEndian);
        normalize_big_endian(&mut bytes);
        let parsed = ChallengeMessage::try_from(bytes.as_slice()).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn big_endian_flips_only_integer_fields() {
        let msg = build_message();
        let le = msg.to_bytes(ByteOrder::LittleEndian);
        let be = msg.to_bytes(ByteOrder::BigEndian);
        assert_eq!(le.len(), be.len());

        // signature, server challenge, reserved and payload are byte-identical
        assert_eq!(le[0..8], be[0..8]);
        assert_eq!(le[24..32], be[24..32]);
        assert_eq!(le[32..40], be[32..40]);
        assert_eq!(le[48..], be[48..]);

        // each integer field is exactly byte-reversed
        for range in [8..12, 12..14, 14..16, 16..20, 20..24, 40..42, 42..44, 44..48] {
            let mut flipped = be[range.clone()].to_vec();
            flipped.reverse();
            assert_eq!(le[range], flipped[..]);
        }
    }

    #[test]
    fn target_info_round_trip() {
        let entries = sample_entries();
        let bytes = encode_target_info(&entries);
        let parsed = parse_target_info(&bytes).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn target_info_encode_omits_unknown_entries() {
        let mut entries = sample_entries();
        entries.push(TargetInfoEntry {
            entry_type: TargetInfoType::Unknown(0x1234),
            value: TargetInfoValue::Raw(vec![0xde, 0xad]),
        });
        let bytes = encode_target_info(&entries);
        let parsed = parse_target_info(&bytes).unwrap();
        assert_eq!(parsed, sample_entries());
    }

    #[test]
    fn target_info_decode_keeps_unknown_entries() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x1234u16.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&[0xde, 0xad]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);

        let parsed = parse_target_info(&bytes).unwrap();
        assert_eq!(parsed, vec![
            TargetInfoEntry {
                entry_type: TargetInfoType::Unknown(0x1234),
                value: TargetInfoValue::Raw(vec![0xde, 0xad]),
            },
        ]);
    }

    #[test]
    fn target_info_decode_stops_at_terminator() {
        // trailing junk past the terminator must not be consumed
        let bytes = [0, 0, 0, 0, 0xff, 0xff];
        assert_eq!(parse_target_info(&bytes).unwrap(), Vec::new());
    }

    #[test]
    fn target_info_decode_without_terminator_fails() {
        let mut bytes = encode_target_info(&sample_entries());
        bytes.truncate(bytes.len() - 4);
        assert!(parse_target_info(&bytes).is_err());
    }

    #[test]
    fn single_shot_setters_reject_second_write() {
        let mut msg = build_message();
        assert_eq!(
            msg.set_target_name("OTHER"),
            Err(StoringError::FieldAlreadySet { field: "target name" }),
        );
        assert_eq!(
            msg.set_target_info(&[]),
            Err(StoringError::FieldAlreadySet { field: "target info" }),
        );
        assert_eq!(
            msg.set_server_challenge(None),
            Err(StoringError::FieldAlreadySet { field: "server challenge" }),
        );
        assert_eq!(
            msg.set_version(&OsVersion::default()),
            Err(StoringError::FieldAlreadySet { field: "version" }),
        );
    }

    #[test]
    fn version_must_be_first_payload_write() {
        let mut msg = ChallengeMessage::new();
        msg.flags |= Flags::NEGOTIATE_UNICODE;
        msg.set_target_name("DOMAIN").unwrap();
        assert_eq!(
            msg.set_version(&OsVersion::default()),
            Err(StoringError::VersionAfterPayload),
        );
    }

    #[test]
    fn offsets_are_increasing_and_disjoint() {
        let msg = build_message();
        assert!(msg.target_name_offset < msg.target_info_offset);
        let name_end = msg.target_name_offset + u32::from(msg.target_name_len);
        assert!(name_end <= msg.target_info_offset);
    }

    #[test]
    fn timestamp_conversion() {
        let entry = TargetInfoEntry {
            entry_type: TargetInfoType::Timestamp,
            value: TargetInfoValue::Raw(SAMPLE_FILETIME.to_le_bytes().to_vec()),
        };
        let expected = DateTime::from_timestamp(1_015_381_639, 599_718_400).unwrap();
        assert_eq!(entry.to_datetime(), Some(expected));
    }

    #[test]
    fn timestamp_conversion_rejects_other_entries() {
        let entry = TargetInfoEntry {
            entry_type: TargetInfoType::Flags,
            value: TargetInfoValue::Raw(vec![0x02, 0x00, 0x00, 0x00]),
        };
        assert_eq!(entry.to_datetime(), None);
    }

    #[test]
    fn unicode_target_name_layout() {
        let mut msg = ChallengeMessage::new();
        msg.flags |= Flags::NEGOTIATE_UNICODE;
        msg.set_target_name("DOMAIN").unwrap();

        assert_eq!(msg.target_name_len, 12);
        assert_eq!(msg.target_name_max_len, 12);
        assert_eq!(msg.target_name_offset, 48);
        let utf16: Vec<u8> = "DOMAIN".encode_utf16()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        assert_eq!(msg.payload, utf16);
        assert_eq!(msg.target_name().unwrap().as_deref(), Some("DOMAIN"));
    }

    #[test]
    fn oem_target_name_layout() {
        let mut msg = ChallengeMessage::new();
        msg.set_target_name("DOMAIN").unwrap();

        assert_eq!(msg.target_name_len, 6);
        assert_eq!(msg.target_name_offset, 48);
        assert_eq!(msg.target_name().unwrap().as_deref(), Some("DOMAIN"));
    }

    #[test]
    fn terminator_only_target_info_decodes_empty() {
        let mut msg = ChallengeMessage::new();
        msg.set_target_info(&[]).unwrap();
        assert_eq!(msg.target_info_len, 4);

        let bytes = msg.to_bytes(ByteOrder::LittleEndian);
        let parsed = ChallengeMessage::try_from(bytes.as_slice()).unwrap();
        let info = parsed.target_info().unwrap().unwrap();
        assert_eq!(parse_target_info(info).unwrap(), Vec::new());
    }

    #[test]
    fn truncated_message_fails_to_decode() {
        let msg = build_message();
        let full = msg.to_bytes(ByteOrder::LittleEndian);

        let short_header = &full[0..40];
        assert_eq!(
            ChallengeMessage::try_from(short_header),
            Err(ParsingError::ShortHeader { expected_min_len: 48, obtained_len: 40 }),
        );

        // header intact but declared payload longer than the input
        let short_payload = &full[0..60];
        assert_eq!(
            ChallengeMessage::try_from(short_payload),
            Err(ParsingError::ItemMinLengthMismatch { expected_at_least: full.len(), obtained: 60 }),
        );
    }

    #[test]
    fn clear_resets_payload_state() {
        let mut msg = build_message();
        msg.clear();

        assert_eq!(msg.payload, Vec::<u8>::new());
        assert_eq!(msg.target_name_len, 0);
        assert_eq!(msg.target_name_max_len, 0);
        assert_eq!(msg.target_name_offset, 0);
        assert_eq!(msg.target_info_len, 0);
        assert_eq!(msg.target_info_max_len, 0);
        assert_eq!(msg.target_info_offset, 0);
        assert!(!msg.flags.contains(Flags::NEGOTIATE_VERSION));
        assert!(!msg.flags.contains(Flags::NEGOTIATE_TARGET_INFO));

        // the message is buildable again from scratch
        msg.set_target_name("OTHER").unwrap();
        assert_eq!(msg.target_name_offset, 48);
    }

    #[test]
    fn canonical_string_is_order_independent() {
        let mut forward = ChallengeMessage::new();
        forward.flags |= Flags::NEGOTIATE_UNICODE;
        forward.set_target_info(&sample_entries()).unwrap();
        forward.set_server_challenge(Some([0; 8])).unwrap();

        let mut reversed_entries = sample_entries();
        reversed_entries.reverse();
        let mut backward = ChallengeMessage::new();
        backward.flags |= Flags::NEGOTIATE_UNICODE;
        backward.set_target_info(&reversed_entries).unwrap();
        backward.set_server_challenge(Some([0; 8])).unwrap();

        let forward_text = ChallengeMessage::canonical_string(&forward.to_bytes(ByteOrder::LittleEndian)).unwrap();
        let backward_text = ChallengeMessage::canonical_string(&backward.to_bytes(ByteOrder::LittleEndian)).unwrap();
        assert_eq!(forward_text, backward_text);
        assert!(forward_text.contains("2002-03-06"));
    }

    #[test]
    fn canonical_string_appends_version() {
        let msg = build_message();
        let text = ChallengeMessage::canonical_string(&msg.to_bytes(ByteOrder::LittleEndian)).unwrap();
        assert!(text.ends_with("version 10.0 build 17763, NTLM revision 15\n"));
    }

    #[test]
    fn decodes_captured_challenge() {
        // Challenge message for target "DOMAIN" with four target info entries, captured in
        // base64 transport framing
        let bytes = BASE64_STANDARD.decode(
            "TlRMTVNTUAACAAAADAAMADAAAAABAoEAASNFZ4mrze8AAAAAAAAAAGIAYgA8AAAARABPAE0AQQBJAE4AAgAM\
             AEQATwBNAEEASQBOAAEADABTAEUAUgBWAEUAUgAEABQAZABvAG0AYQBpAG4ALgBjAG8AbQADACIAcwBlAHIA\
             dgBlAHIALgBkAG8AbQBhAGkAbgAuAGMAbwBtAAAAAAA=",
        ).unwrap();
        let msg = ChallengeMessage::try_from(bytes.as_slice()).unwrap();

        assert_eq!(msg.message_type, 2);
        assert!(msg.flags.contains(Flags::NEGOTIATE_UNICODE));
        assert_eq!(msg.server_challenge, [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef]);
        assert_eq!(msg.target_name().unwrap().as_deref(), Some("DOMAIN"));
        assert_eq!(msg.version(), None);

        let info = parse_target_info(msg.target_info().unwrap().unwrap()).unwrap();
        assert_eq!(info.len(), 4);
        assert_eq!(info[0], TargetInfoEntry {
            entry_type: TargetInfoType::NbComputerName,
            value: TargetInfoValue::Text("DOMAIN".to_owned()),
        });
        assert_eq!(info[3], TargetInfoEntry {
            entry_type: TargetInfoType::DnsDomainName,
            value: TargetInfoValue::Text("server.domain.com".to_owned()),
        });
    }

    #[test]
    fn flag_names_round_trip() {
        let flags = Flags::NEGOTIATE_UNICODE | Flags::NEGOTIATE_VERSION;
        let described = flags.describe();
        assert_eq!(described, "NEGOTIATE_UNICODE\nNEGOTIATE_VERSION\n");

        assert_eq!(TargetInfoType::from_name("MsvAvTimestamp"), Some(TargetInfoType::Timestamp));
        assert_eq!(TargetInfoType::from_name(TargetInfoType::DnsTreeName.name()), Some(TargetInfoType::DnsTreeName));
        assert_eq!(TargetInfoType::from_name("MsvAvBogus"), None);
    }
}
