use djdns_application::services::SchemeTable;
use djdns_application::use_cases::GetRecordsUseCase;
use djdns_domain::{AliasTable, Branch, Page, Record, ROOT_ALIAS};
use djdns_infrastructure::dns::DnsServerHandler;
use djdns_infrastructure::page_getters::{InMemoryPageGetter, SlowPageGetter};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub fn abc_records() -> Vec<Record> {
    vec![
        Record::new("first", "A", "1.1.1.1"),
        Record::new("second", "A", "2.2.2.2"),
    ]
}

pub fn dogbreath_records() -> Vec<Record> {
    vec![Record::new("only.smells", "A", "3.3.3.3")]
}

pub fn idn_records() -> Vec<Record> {
    vec![Record::new("xn--bcher-kva.example.", "A", "5.5.5.5")]
}

/// Enough TXT data to overflow a 512 byte UDP response.
pub fn big_records() -> Vec<Record> {
    (0..20)
        .map(|i| Record::new("big.example.", "TXT", format!("{:0>100}", i)))
        .collect()
}

pub fn root_page() -> Page {
    Page::new(vec![
        Branch::records("abc", abc_records()),
        Branch::records("evil", vec![Record::new("evil.record.", "EVIL", 5)]),
        Branch::records("bent", vec![Record::new("bent.record.", "A", "not-an-address")]),
        Branch::records("big", big_records()),
        Branch::records("xn--bcher-kva", idn_records()),
        Branch::targets("dog*", vec!["secondary://"]),
        Branch::targets("slow*", vec!["slow://"]),
    ])
}

pub fn secondary_page() -> Page {
    Page::new(vec![Branch::records("dogbreath", dogbreath_records())])
}

pub fn standard_use_case(timeout: Duration) -> Arc<GetRecordsUseCase> {
    let aliases = AliasTable::new()
        .with_alias(ROOT_ALIAS, "root://")
        .with_alias("secondary", "secondary://")
        .with_alias("slow", "slow://");
    let schemes = SchemeTable::new()
        .with_scheme("root", Arc::new(InMemoryPageGetter::new(root_page())))
        .with_scheme("secondary", Arc::new(InMemoryPageGetter::new(secondary_page())))
        .with_scheme("slow", Arc::new(SlowPageGetter::new(Duration::from_secs(2))));

    Arc::new(
        GetRecordsUseCase::new(Arc::new(aliases), Arc::new(schemes))
            .unwrap()
            .with_timeout(timeout),
    )
}

pub fn standard_handler(timeout: Duration) -> DnsServerHandler {
    DnsServerHandler::new(standard_use_case(timeout))
}

pub fn query(id: u16, name: &str) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), RecordType::A));
    message
}

pub fn to_wire(message: &Message) -> Vec<u8> {
    message.to_vec().unwrap()
}

pub fn from_wire(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}
