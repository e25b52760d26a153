use djdns_domain::{DomainError, Record, RecordType, DEFAULT_RECORD_TTL};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, TXT};
use hickory_proto::rr::{Name, RData, Record as WireRecord};
use serde_json::Value;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Converts page records into wire resource records.
///
/// Records are authored by hand in page data, so nothing about them is
/// trusted until this point: the type must be one we can encode and the
/// rdata must have the shape that type needs.
pub struct RecordEncoder;

impl RecordEncoder {
    pub fn encode(record: &Record) -> Result<WireRecord, DomainError> {
        let record_type = record.record_type()?;
        let owner = Self::parse_name(&record.domain_name)?;
        let rdata = Self::encode_rdata(record_type, &record.rdata)?;

        Ok(WireRecord::from_rdata(owner, DEFAULT_RECORD_TTL, rdata))
    }

    /// Encodes every record, stopping at the first one that fails.
    pub fn encode_all(records: &[Record]) -> Result<Vec<WireRecord>, DomainError> {
        records.iter().map(Self::encode).collect()
    }

    fn encode_rdata(record_type: RecordType, rdata: &Value) -> Result<RData, DomainError> {
        match record_type {
            RecordType::A => {
                let text = Self::rdata_str(record_type, rdata)?;
                let ip = Ipv4Addr::from_str(text)
                    .map_err(|e| Self::invalid(record_type, format!("'{}': {}", text, e)))?;
                Ok(RData::A(A(ip)))
            }
            RecordType::AAAA => {
                let text = Self::rdata_str(record_type, rdata)?;
                let ip = Ipv6Addr::from_str(text)
                    .map_err(|e| Self::invalid(record_type, format!("'{}': {}", text, e)))?;
                Ok(RData::AAAA(AAAA(ip)))
            }
            RecordType::CNAME => Ok(RData::CNAME(CNAME(Self::rdata_name(record_type, rdata)?))),
            RecordType::NS => Ok(RData::NS(NS(Self::rdata_name(record_type, rdata)?))),
            RecordType::PTR => Ok(RData::PTR(PTR(Self::rdata_name(record_type, rdata)?))),
            RecordType::TXT => Self::encode_txt(rdata),
            RecordType::MX => Self::encode_mx(rdata),
        }
    }

    fn encode_txt(rdata: &Value) -> Result<RData, DomainError> {
        let strings = match rdata {
            Value::String(text) => vec![text.clone()],
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| Self::invalid(RecordType::TXT, "expected strings only"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(Self::invalid(
                    RecordType::TXT,
                    format!("expected string or list of strings, got {}", other),
                ))
            }
        };

        Ok(RData::TXT(TXT::new(strings)))
    }

    /// Accepts `"10 mail.example."` or `{"preference": 10, "exchange": "mail.example."}`.
    fn encode_mx(rdata: &Value) -> Result<RData, DomainError> {
        let (preference, exchange) = match rdata {
            Value::String(text) => {
                let mut parts = text.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(preference), Some(exchange), None) => {
                        let preference = preference.parse::<u16>().map_err(|e| {
                            Self::invalid(RecordType::MX, format!("preference '{}': {}", preference, e))
                        })?;
                        (preference, exchange)
                    }
                    _ => {
                        return Err(Self::invalid(
                            RecordType::MX,
                            format!("expected '<preference> <exchange>', got '{}'", text),
                        ))
                    }
                }
            }
            Value::Object(fields) => {
                let preference = fields
                    .get("preference")
                    .and_then(Value::as_u64)
                    .and_then(|p| u16::try_from(p).ok())
                    .ok_or_else(|| Self::invalid(RecordType::MX, "missing or invalid preference"))?;
                let exchange = fields
                    .get("exchange")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Self::invalid(RecordType::MX, "missing exchange"))?;
                (preference, exchange)
            }
            other => {
                return Err(Self::invalid(
                    RecordType::MX,
                    format!("expected string or object, got {}", other),
                ))
            }
        };

        let exchange = Self::parse_name(exchange)
            .map_err(|e| Self::invalid(RecordType::MX, e.to_string()))?;
        Ok(RData::MX(MX::new(preference, exchange)))
    }

    fn rdata_str(record_type: RecordType, rdata: &Value) -> Result<&str, DomainError> {
        rdata
            .as_str()
            .ok_or_else(|| Self::invalid(record_type, format!("expected a string, got {}", rdata)))
    }

    fn rdata_name(record_type: RecordType, rdata: &Value) -> Result<Name, DomainError> {
        let text = Self::rdata_str(record_type, rdata)?;
        Self::parse_name(text).map_err(|e| Self::invalid(record_type, e.to_string()))
    }

    /// Parses a name and makes it fully qualified.
    fn parse_name(text: &str) -> Result<Name, DomainError> {
        let mut name = Name::from_str(text)
            .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", text, e)))?;
        name.set_fqdn(true);
        Ok(name)
    }

    fn invalid(record_type: RecordType, reason: impl Into<String>) -> DomainError {
        DomainError::InvalidRdata {
            rtype: record_type.to_string(),
            reason: reason.into(),
        }
    }
}
