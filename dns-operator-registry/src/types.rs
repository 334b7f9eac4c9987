//! Record payloads and registry definitions

use serde::{Deserialize, Serialize};

// ============ Records ============

/// Record type tag, written upper-case (`"A"`, `"SRV"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Txt,
    Ns,
    Srv,
    Caa,
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        })
    }
}

/// 记录内容，按类型区分
///
/// Wire form: `{ "type": "MX", "content": { "priority": 10, "exchange": "mx.example.com" } }`.
/// Two records with equal `RecordData` under the same name are the same
/// record as far as a registry is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    A {
        address: String,
    },
    AAAA {
        address: String,
    },
    CNAME {
        target: String,
    },
    MX {
        priority: u16,
        exchange: String,
    },
    TXT {
        text: String,
    },
    NS {
        nameserver: String,
    },
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    /// `flags` is 0 or 128; `tag` is `issue`, `issuewild` or `iodef`.
    CAA {
        flags: u8,
        tag: String,
        value: String,
    },
}

impl RecordData {
    pub fn record_type(&self) -> DnsRecordType {
        match self {
            Self::A { .. } => DnsRecordType::A,
            Self::AAAA { .. } => DnsRecordType::Aaaa,
            Self::CNAME { .. } => DnsRecordType::Cname,
            Self::MX { .. } => DnsRecordType::Mx,
            Self::TXT { .. } => DnsRecordType::Txt,
            Self::NS { .. } => DnsRecordType::Ns,
            Self::SRV { .. } => DnsRecordType::Srv,
            Self::CAA { .. } => DnsRecordType::Caa,
        }
    }

    /// The field a human would look at first: address, target, text, ...
    pub fn display_value(&self) -> &str {
        match self {
            Self::A { address } | Self::AAAA { address } => address,
            Self::CNAME { target } | Self::SRV { target, .. } => target,
            Self::MX { exchange, .. } => exchange,
            Self::TXT { text } => text,
            Self::NS { nameserver } => nameserver,
            Self::CAA { value, .. } => value,
        }
    }
}

/// Default TTL applied when a record payload omits one.
pub const DEFAULT_TTL: u32 = 600;

const fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// A DNS record as stored by a registry.
///
/// `name` is the fully-qualified, ASCII canonical name. Callers building
/// records from user input leave it empty and let validation fill it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Canonical name (e.g., `"www.example.com"`).
    #[serde(default)]
    pub name: String,
    /// Time to live in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Type-specific record data.
    pub data: RecordData,
}

impl Record {
    /// Create a record with the default TTL.
    pub fn new(name: impl Into<String>, data: RecordData) -> Self {
        Self {
            name: name.into(),
            ttl: DEFAULT_TTL,
            data,
        }
    }

    /// Whether `other` denotes the same record: same name and same data.
    ///
    /// TTL is not part of a record's identity.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name && self.data == other.data
    }
}

// ============ Registry Definition ============

/// Opaque parameters handed to a registry builder.
pub type BuilderParams = serde_json::Value;

/// Describes how to construct a live registry handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDef {
    /// Builder identifier, looked up in a [`BuilderTable`](crate::BuilderTable).
    pub builder: String,
    /// Parameters passed to the builder as-is.
    #[serde(default)]
    pub builder_params: BuilderParams,
}

impl RegistryDef {
    pub fn new(builder: impl Into<String>, builder_params: BuilderParams) -> Self {
        Self {
            builder: builder.into(),
            builder_params,
        }
    }
}
