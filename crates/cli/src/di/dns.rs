use djdns_application::ports::PageGetter;
use djdns_application::services::SchemeTable;
use djdns_application::use_cases::GetRecordsUseCase;
use djdns_domain::{AliasTable, Config, SchemeConfig};
use djdns_infrastructure::dns::DnsServerHandler;
use djdns_infrastructure::page_getters::{InMemoryPageGetter, SlowPageGetter};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub use_case: Arc<GetRecordsUseCase>,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let aliases = Arc::new(Self::build_alias_table(config));
        let schemes = Arc::new(Self::build_scheme_table(config));

        info!(
            aliases = aliases.len(),
            schemes = schemes.len(),
            timeout_ms = config.resolution.timeout_ms,
            max_depth = config.resolution.max_depth,
            "Page graph ready"
        );

        let use_case = Arc::new(
            GetRecordsUseCase::new(aliases, schemes)?
                .with_timeout(config.resolution.timeout())
                .with_max_depth(config.resolution.max_depth),
        );
        let handler = DnsServerHandler::new(use_case.clone());

        Ok(Self { use_case, handler })
    }

    fn build_alias_table(config: &Config) -> AliasTable {
        config
            .aliases
            .iter()
            .map(|(alias, uri)| (alias.clone(), uri.clone()))
            .collect()
    }

    fn build_scheme_table(config: &Config) -> SchemeTable {
        config
            .schemes
            .iter()
            .fold(SchemeTable::new(), |table, (name, scheme)| {
                table.with_scheme(name.clone(), Self::build_page_getter(scheme))
            })
    }

    fn build_page_getter(scheme: &SchemeConfig) -> Arc<dyn PageGetter> {
        let getter: Arc<dyn PageGetter> = Arc::new(InMemoryPageGetter::new(scheme.page()));
        match scheme.delay() {
            Some(delay) => Arc::new(SlowPageGetter::wrapping(delay, getter)),
            None => getter,
        }
    }
}
