//! Factor types and factor order parsing.
//!
//! A factor order is written as a host string, either as factor names
//! (`"DeviceUID,AppVersionHash"`) or as single-character codes (`"DV"`,
//! `"14"`). Both forms may be mixed across tokens. Unknown tokens are
//! skipped, never fatal.
//!
//! | factor                     | letter | digit |
//! |----------------------------|--------|-------|
//! | device UID                 | `D`    | `1`   |
//! | user account               | `U`    | `2`   |
//! | user account created date  | `C`    | `3`   |
//! | app version hash           | `V`    | `4`   |
//! | app built date             | `B`    | `5`   |
//! | none (sentinel, dropped)   | `N`    | `0`   |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A piece of identity/version data that can feed the unlock code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FactorType {
    /// Sentinel; never resolved.
    None = 0,
    DeviceUid = 1,
    UserAccount = 2,
    UserAccountCreatedDate = 3,
    AppVersionHash = 4,
    AppBuiltDate = 5,
}

impl FactorType {
    /// All resolvable factor types, in default order.
    pub const ALL: [FactorType; 5] = [
        Self::DeviceUid,
        Self::UserAccount,
        Self::UserAccountCreatedDate,
        Self::AppVersionHash,
        Self::AppBuiltDate,
    ];

    /// Returns the single-character letter code for this factor.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            Self::None => 'N',
            Self::DeviceUid => 'D',
            Self::UserAccount => 'U',
            Self::UserAccountCreatedDate => 'C',
            Self::AppVersionHash => 'V',
            Self::AppBuiltDate => 'B',
        }
    }

    /// Returns the canonical display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::DeviceUid => "DeviceUID",
            Self::UserAccount => "UserAccount",
            Self::UserAccountCreatedDate => "UserAccountCreatedDate",
            Self::AppVersionHash => "AppVersionHash",
            Self::AppBuiltDate => "AppBuiltDate",
        }
    }

    /// Maps a single-character code (letter or digit) to a factor type.
    #[must_use]
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' | '0' => Some(Self::None),
            'D' | '1' => Some(Self::DeviceUid),
            'U' | '2' => Some(Self::UserAccount),
            'C' | '3' => Some(Self::UserAccountCreatedDate),
            'V' | '4' => Some(Self::AppVersionHash),
            'B' | '5' => Some(Self::AppBuiltDate),
            _ => None,
        }
    }

    /// Maps a factor name to a factor type, ignoring case and `_`/`-`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "none" => Some(Self::None),
            "deviceuid" | "deviceid" | "device" => Some(Self::DeviceUid),
            "useraccount" | "account" => Some(Self::UserAccount),
            "useraccountcreateddate" | "accountcreateddate" => {
                Some(Self::UserAccountCreatedDate)
            }
            "appversionhash" | "appversionsha" | "versionhash" => Some(Self::AppVersionHash),
            "appbuiltdate" | "appbuilddate" | "builddate" => Some(Self::AppBuiltDate),
            _ => None,
        }
    }

    /// Returns true for the `None` sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for FactorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The sequence in which factor values are concatenated.
///
/// Never contains the `None` sentinel. Duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorOrder(Vec<FactorType>);

impl FactorOrder {
    /// Creates an order from explicit factor types, dropping `None`.
    #[must_use]
    pub fn new(factors: impl IntoIterator<Item = FactorType>) -> Self {
        Self(factors.into_iter().filter(|f| !f.is_none()).collect())
    }

    /// Parses a host order string. Unknown tokens are skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut factors = Vec::new();

        for token in input
            .split(|c: char| c == ',' || c == ';' || c == '|' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            if let Some(factor) = FactorType::from_name(token) {
                factors.push(factor);
                continue;
            }

            let codes: Option<Vec<FactorType>> = token.chars().map(FactorType::from_code).collect();
            match codes {
                Some(codes) => factors.extend(codes),
                None => debug!("Ignoring unknown factor order token {:?}", token),
            }
        }

        Self::new(factors)
    }

    /// Returns the factor types in order.
    #[must_use]
    pub fn factors(&self) -> &[FactorType] {
        &self.0
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no factor is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the order with every occurrence of `factor` removed.
    #[must_use]
    pub fn without(&self, factor: FactorType) -> Self {
        Self(self.0.iter().copied().filter(|f| *f != factor).collect())
    }

    /// Renders the canonical letter-code form, e.g. `"DUCVB"`.
    #[must_use]
    pub fn to_code_string(&self) -> String {
        self.0.iter().map(FactorType::code).collect()
    }
}

impl Default for FactorOrder {
    /// Device UID, user account, account created date, app version hash,
    /// app built date.
    fn default() -> Self {
        Self(FactorType::ALL.to_vec())
    }
}

impl fmt::Display for FactorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code_string())
    }
}

impl FromStr for FactorOrder {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'a> IntoIterator for &'a FactorOrder {
    type Item = &'a FactorType;
    type IntoIter = std::slice::Iter<'a, FactorType>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
