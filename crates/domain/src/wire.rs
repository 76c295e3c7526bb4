//! DNS wire format: header, question and answer sections (RFC 1035 §4).
pub mod answer;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record_type;

pub use answer::Answer;
pub use header::{Flags, Header, ResponseCode, HEADER_LEN};
pub use message::{Message, Sections};
pub use name::{decode_name, Name};
pub use question::{Question, CLASS_IN};
pub use record_type::{describe_type, RecordType};

/// Largest datagram read from clients and from the upstream resolver.
pub const MAX_UDP_MESSAGE: usize = 512;
