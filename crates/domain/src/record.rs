use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// TTL stamped on every answer; pages carry no per-record TTL.
pub const DEFAULT_RECORD_TTL: u32 = 3600;

/// One terminal answer as authored in a page.
///
/// `rdata` is kept as a loose JSON value: whether it fits `rtype` is only
/// checked when the record is encoded for the wire, so a bad entry fails
/// the queries that reach it instead of the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub domain_name: String,

    #[serde(default)]
    pub rtype: String,

    #[serde(default)]
    pub rdata: Value,
}

impl Record {
    pub fn new(
        domain_name: impl Into<String>,
        rtype: impl Into<String>,
        rdata: impl Into<Value>,
    ) -> Self {
        Self {
            domain_name: domain_name.into(),
            rtype: rtype.into(),
            rdata: rdata.into(),
        }
    }

    /// Parsed record type. An empty `rtype` means `A`.
    pub fn record_type(&self) -> Result<RecordType, DomainError> {
        if self.rtype.is_empty() {
            return Ok(RecordType::A);
        }
        self.rtype.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    PTR,
    TXT,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::TXT => "TXT",
        }
    }

    /// Whether the rdata of this type is a single domain name.
    pub fn is_name_valued(&self) -> bool {
        matches!(self, RecordType::CNAME | RecordType::NS | RecordType::PTR)
    }
}

impl FromStr for RecordType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            "MX" => Ok(RecordType::MX),
            "NS" => Ok(RecordType::NS),
            "PTR" => Ok(RecordType::PTR),
            "TXT" => Ok(RecordType::TXT),
            _ => Err(DomainError::UnknownRecordType(s.to_string())),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
