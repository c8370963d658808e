//! Requests handed to the target by the I/O dispatcher.

use std::fmt;

/// Kind of a data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoKind {
    Read,
    ReadAhead,
    Write,
    Discard,
}

impl fmt::Display for IoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IoKind::Read => "read",
            IoKind::ReadAhead => "read-ahead",
            IoKind::Write => "write",
            IoKind::Discard => "discard",
        };
        f.write_str(name)
    }
}

/// One data request. Segment buffers are borrowed for the call only.
#[derive(Debug)]
pub enum IoRequest<'a> {
    /// Fill `segments`, in order, starting at byte `position`
    Read {
        position: u64,
        segments: Vec<&'a mut [u8]>,
    },
    /// Speculative read; always refused
    ReadAhead {
        position: u64,
        segments: Vec<&'a mut [u8]>,
    },
    /// Payload is dropped unread
    Write {
        position: u64,
        segments: Vec<&'a [u8]>,
    },
    /// Range is dropped
    Discard { position: u64, len: u64 },
}

impl<'a> IoRequest<'a> {
    pub fn kind(&self) -> IoKind {
        match self {
            IoRequest::Read { .. } => IoKind::Read,
            IoRequest::ReadAhead { .. } => IoKind::ReadAhead,
            IoRequest::Write { .. } => IoKind::Write,
            IoRequest::Discard { .. } => IoKind::Discard,
        }
    }

    /// Starting byte position on the device.
    pub fn position(&self) -> u64 {
        match self {
            IoRequest::Read { position, .. }
            | IoRequest::ReadAhead { position, .. }
            | IoRequest::Write { position, .. }
            | IoRequest::Discard { position, .. } => *position,
        }
    }

    /// Total bytes covered by the request.
    pub fn len(&self) -> u64 {
        match self {
            IoRequest::Read { segments, .. } | IoRequest::ReadAhead { segments, .. } => {
                segments.iter().map(|s| s.len() as u64).sum()
            }
            IoRequest::Write { segments, .. } => segments.iter().map(|s| s.len() as u64).sum(),
            IoRequest::Discard { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Successful outcome of a data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every segment was filled
    Filled { bytes: u64 },
    /// Write or discard accepted and dropped
    Dropped { bytes: u64 },
}

impl Completion {
    pub fn bytes(&self) -> u64 {
        match self {
            Completion::Filled { bytes } | Completion::Dropped { bytes } => *bytes,
        }
    }
}
