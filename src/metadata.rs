//! Product metadata from `.eclipseproduct`
//!
//! The file is a loose `key=value` list:
//!
//! ```text
//! name=DBeaver Ultimate
//! id=com.dbeaver.ultimate
//! version=25.2.0
//! ```
//!
//! Only the `version` and `id` entries are read, by pattern search.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::common::fs::read_text;
use crate::error::{Result, RiggerError};

#[allow(clippy::expect_used)]
static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*version\s*=\s*([0-9]+\.[0-9]+\.[0-9]+)").expect("valid version regex")
});

#[allow(clippy::expect_used)]
static ID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*id\s*=\s*(\S+)").expect("valid id regex"));

/// A `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for Version {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('.').map(|p| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(());
            }
            p.parse::<u64>().map_err(|_| ())
        });
        let major = parts.next().ok_or(())??;
        let minor = parts.next().ok_or(())??;
        let patch = parts.next().ok_or(())??;
        if parts.next().is_some() {
            return Err(());
        }
        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Known product editions, keyed by exact product id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Ultimate,
    Enterprise,
    Lite,
}

impl Edition {
    pub const KNOWN_IDS: [&'static str; 3] = [
        "com.dbeaver.ultimate",
        "com.dbeaver.enterprise",
        "com.dbeaver.lite",
    ];

    pub fn from_product_id(id: &str) -> Option<Self> {
        match id {
            "com.dbeaver.ultimate" => Some(Edition::Ultimate),
            "com.dbeaver.enterprise" => Some(Edition::Enterprise),
            "com.dbeaver.lite" => Some(Edition::Lite),
            _ => None,
        }
    }
}

/// Version and product id of an installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductIdentity {
    pub version: Version,
    pub product_id: String,
}

impl ProductIdentity {
    pub fn edition(&self) -> Option<Edition> {
        Edition::from_product_id(&self.product_id)
    }
}

/// Read version and product id from a product descriptor file
pub fn extract(path: &Path) -> Result<ProductIdentity> {
    let content = read_text(path)?;
    parse(&content).map_err(|kind| match kind {
        Missing::Version => RiggerError::MalformedVersion {
            path: path.display().to_string(),
        },
        Missing::Id => RiggerError::MalformedProductId {
            path: path.display().to_string(),
        },
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Missing {
    Version,
    Id,
}

fn parse(content: &str) -> std::result::Result<ProductIdentity, Missing> {
    let version = VERSION_LINE
        .captures(content)
        .and_then(|c| c[1].parse::<Version>().ok())
        .ok_or(Missing::Version)?;

    let product_id = ID_LINE
        .captures(content)
        .map(|c| c[1].to_string())
        .ok_or(Missing::Id)?;

    Ok(ProductIdentity {
        version,
        product_id,
    })
}
