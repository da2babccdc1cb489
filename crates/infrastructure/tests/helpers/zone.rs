#![allow(dead_code)]
use std::io::Write;
use tempfile::NamedTempFile;

pub const SAMPLE_ZONE: &str = r#"{
    "example.com": {
        "A": ["1.2.3.4", "1.2.3.5"],
        "AAAA": "2001:db8::1",
        "MX": {"priority": 5, "exchange": "mail.example.com"},
        "TXT": "v=spf1 -all",
        "NS": ["ns1.example.com", "ns2.example.com"],
        "SOA": {
            "mname": "ns1.example.com",
            "rname": "hostmaster.example.com",
            "serial": 2024010101,
            "refresh": 7200,
            "retry": 900,
            "expire": 1209600,
            "minimum-ttl": 300
        }
    },
    "www.example.com": {"CNAME": "example.com"},
    "4.3.2.1.in-addr.arpa": {"PTR": "example.com"}
}"#;

pub fn zone_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp zone file");
    file.write_all(contents.as_bytes())
        .expect("write temp zone file");
    file
}
