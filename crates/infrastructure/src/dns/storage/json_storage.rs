use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use stackdns_application::ports::RecordStore;
use stackdns_domain::{
    normalize_domain, DomainError, Question, RecordData, RecordType, ResourceRecord, SoaData,
};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// MX priority used when a zone entry gives only the exchange host.
const DEFAULT_MX_PRIORITY: u16 = 10;

#[derive(Deserialize)]
struct SoaEntry {
    mname: String,
    rname: String,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    #[serde(rename = "minimum-ttl", alias = "minimum_ttl")]
    minimum_ttl: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MxEntry {
    Host(String),
    Full { priority: u16, exchange: String },
}

type ZoneTable = FxHashMap<String, FxHashMap<RecordType, Vec<RecordData>>>;

/// Record store backed by a JSON zone file loaded once at construction.
///
/// ```json
/// { "example.com": { "A": ["1.2.3.4", "1.2.3.5"], "MX": "mail.example.com" } }
/// ```
///
/// Every record served carries the same default TTL. The table is never
/// mutated after construction.
pub struct JsonStorageProvider {
    records: ZoneTable,
    default_ttl: u32,
}

impl JsonStorageProvider {
    pub fn from_file(path: impl AsRef<Path>, default_ttl: i64) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DomainError::ConfigError(format!(
                "Unable to open DNS record file {}: {}",
                path.display(),
                e
            ))
        })?;

        let provider = Self::from_json(&contents, default_ttl)?;
        info!(
            file = %path.display(),
            domains = provider.len(),
            default_ttl = provider.default_ttl,
            "DNS record file loaded"
        );
        Ok(provider)
    }

    pub fn from_json(json: &str, default_ttl: i64) -> Result<Self, DomainError> {
        let default_ttl = u32::try_from(default_ttl).map_err(|_| {
            DomainError::ConfigError(format!(
                "Default TTL must be a non-negative 32-bit integer, got {}",
                default_ttl
            ))
        })?;

        let raw: HashMap<String, HashMap<String, Value>> = serde_json::from_str(json)
            .map_err(|e| {
                DomainError::ConfigError(format!("Unable to parse DNS record file: {}", e))
            })?;

        let mut records = ZoneTable::default();
        for (domain, types) in raw {
            let entry = records.entry(normalize_domain(&domain)).or_default();

            for (type_name, value) in types {
                let record_type = match type_name.parse::<RecordType>() {
                    Ok(rt) if !rt.is_pseudo() => rt,
                    _ => {
                        warn!(domain = %domain, record_type = %type_name, "Skipping unsupported record type in zone file");
                        continue;
                    }
                };

                let values = parse_values(record_type, value).map_err(|e| {
                    DomainError::ConfigError(format!(
                        "Invalid {} value for {}: {}",
                        record_type, domain, e
                    ))
                })?;
                entry.entry(record_type).or_default().extend(values);
            }
        }

        Ok(Self {
            records,
            default_ttl,
        })
    }

    /// Number of distinct domains in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn default_ttl(&self) -> u32 {
        self.default_ttl
    }

    /// Values stored for `domain`/`record_type`; `domain` may carry a trailing
    /// dot and any letter case.
    pub fn lookup(&self, domain: &str, record_type: RecordType) -> &[RecordData] {
        self.records
            .get(&normalize_domain(domain))
            .and_then(|types| types.get(&record_type))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn parse_values(record_type: RecordType, value: Value) -> Result<Vec<RecordData>, String> {
    if record_type == RecordType::SOA {
        let soa: SoaEntry = serde_json::from_value(value).map_err(|e| e.to_string())?;
        return Ok(vec![RecordData::Soa(SoaData {
            mname: soa.mname,
            rname: soa.rname,
            serial: soa.serial,
            refresh: soa.refresh,
            retry: soa.retry,
            expire: soa.expire,
            minimum_ttl: soa.minimum_ttl,
        })]);
    }

    let entries = match value {
        Value::Array(items) => items,
        single => vec![single],
    };

    entries
        .into_iter()
        .map(|entry| parse_entry(record_type, entry))
        .collect()
}

fn parse_entry(record_type: RecordType, entry: Value) -> Result<RecordData, String> {
    if record_type == RecordType::MX {
        let mx: MxEntry = serde_json::from_value(entry).map_err(|e| e.to_string())?;
        return Ok(match mx {
            MxEntry::Host(exchange) => RecordData::Mx {
                priority: DEFAULT_MX_PRIORITY,
                exchange,
            },
            MxEntry::Full { priority, exchange } => RecordData::Mx { priority, exchange },
        });
    }

    let text = match entry {
        Value::String(text) => text,
        other => return Err(format!("expected a string, found {}", other)),
    };

    match record_type {
        RecordType::A => Ok(RecordData::A(text)),
        RecordType::AAAA => Ok(RecordData::Aaaa(text)),
        RecordType::NS => Ok(RecordData::Ns(text)),
        RecordType::CNAME => Ok(RecordData::Cname(text)),
        RecordType::PTR => Ok(RecordData::Ptr(text)),
        RecordType::TXT => Ok(RecordData::Txt(text)),
        other => Err(format!("{} records cannot be stored", other)),
    }
}

#[async_trait]
impl RecordStore for JsonStorageProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn get_answer(&self, question: &Question) -> Result<Vec<ResourceRecord>, DomainError> {
        let Some(record_type) = question.record_type() else {
            return Ok(Vec::new());
        };

        let answers: Vec<ResourceRecord> = self
            .lookup(&question.name, record_type)
            .iter()
            .map(|data| ResourceRecord {
                name: question.name.clone(),
                rtype: question.qtype,
                class: question.qclass,
                ttl: self.default_ttl,
                data: data.clone(),
            })
            .collect();

        debug!(
            domain = %question.name,
            record_type = %record_type,
            answers = answers.len(),
            "Static lookup"
        );
        Ok(answers)
    }
}
