use super::record_encoder::RecordEncoder;
use djdns_application::use_cases::GetRecordsUseCase;
use djdns_domain::DomainError;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::sync::Arc;
use tracing::{debug, warn};

/// UDP payload size advertised back to EDNS clients.
pub const EDNS_MAX_PAYLOAD: u16 = 4096;

/// Transport a request arrived on. UDP responses are bounded by the
/// client's advertised payload size; TCP responses are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Udp,
    Tcp,
}

/// Answers DNS questions from the page graph.
pub struct DnsServerHandler {
    use_case: Arc<GetRecordsUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<GetRecordsUseCase>) -> Self {
        Self { use_case }
    }

    /// Resolves the first question of `request`.
    ///
    /// The question name is looked up exactly as it appears on the wire,
    /// trailing dot included. Resolution failures are returned untouched;
    /// records that cannot be encoded are logged here and fail the request.
    pub async fn handle(&self, request: &Message) -> Result<Message, DomainError> {
        if request.op_code() != OpCode::Query {
            return Err(DomainError::UnsupportedOpcode(format!(
                "{:?}",
                request.op_code()
            )));
        }

        let question = request.queries().first().ok_or(DomainError::EmptyQuestion)?;
        let lookup = question.name().to_ascii();

        debug!(query = %lookup, record_type = ?question.query_type(), "DNS query received");

        let records = self.use_case.execute(&lookup).await?;

        let answers = RecordEncoder::encode_all(&records).inspect_err(|e| match e {
            DomainError::UnknownRecordType(rtype) => {
                warn!(query = %lookup, rtype = %rtype, "Unknown Rtype");
            }
            DomainError::InvalidRdata { rtype, reason } => {
                warn!(query = %lookup, rtype = %rtype, reason = %reason, "Invalid Rdata");
            }
            DomainError::InvalidDomainName(name) => {
                warn!(query = %lookup, name = %name, "Invalid record name");
            }
            _ => {}
        })?;

        let mut response = Self::response_to(request, ResponseCode::NoError);
        response.add_answers(answers);
        Ok(response)
    }

    /// Decodes a wire request, handles it and encodes the reply.
    ///
    /// Returns `None` when nothing should be sent back: the bytes were too
    /// short to carry an ID, or the message was itself a response.
    pub async fn handle_wire(&self, bytes: &[u8], transport: Transport) -> Option<Vec<u8>> {
        let request = match Message::from_vec(bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = bytes.len(), "Undecodable DNS request");
                return Self::format_error(bytes);
            }
        };

        if request.message_type() != MessageType::Query {
            return None;
        }

        let mut response = match self.handle(&request).await {
            Ok(response) => response,
            Err(e) => Self::error_response(&request, &e),
        };

        if transport == Transport::Udp {
            Self::fit_udp_payload(&mut response, request.max_payload() as usize)
        } else {
            Self::serialize(&response)
        }
    }

    /// An empty response echoing the request's ID, opcode, RD flag and
    /// question section. Carries an OPT record when the request did.
    pub fn response_to(request: &Message, code: ResponseCode) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_response_code(code);
        response.add_queries(request.queries().iter().cloned());

        if request.extensions().is_some() {
            let mut edns = Edns::new();
            edns.set_max_payload(EDNS_MAX_PAYLOAD);
            edns.set_version(0);
            response.set_edns(edns);
        }
        response
    }

    pub fn error_response(request: &Message, error: &DomainError) -> Message {
        Self::response_to(request, Self::response_code_for(error))
    }

    pub fn response_code_for(error: &DomainError) -> ResponseCode {
        match error {
            DomainError::EmptyQuestion => ResponseCode::FormErr,
            DomainError::UnsupportedOpcode(_) => ResponseCode::NotImp,
            _ => ResponseCode::ServFail,
        }
    }

    fn format_error(bytes: &[u8]) -> Option<Vec<u8>> {
        let id = u16::from_be_bytes([*bytes.first()?, *bytes.get(1)?]);

        let mut response = Message::new();
        response
            .set_id(id)
            .set_message_type(MessageType::Response)
            .set_response_code(ResponseCode::FormErr);
        Self::serialize(&response)
    }

    fn fit_udp_payload(response: &mut Message, max_payload: usize) -> Option<Vec<u8>> {
        let bytes = Self::serialize(response)?;
        if bytes.len() <= max_payload {
            return Some(bytes);
        }

        debug!(
            len = bytes.len(),
            max_payload, "Response exceeds UDP payload, truncating"
        );
        response.take_answers();
        response.set_truncated(true);
        Self::serialize(response)
    }

    fn serialize(message: &Message) -> Option<Vec<u8>> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        match message.emit(&mut encoder) {
            Ok(()) => Some(buf),
            Err(e) => {
                warn!(error = %e, id = message.id(), "Failed to serialize DNS response");
                None
            }
        }
    }
}
