use serde::Serialize;
use std::{collections::HashSet, fs, ops::RangeInclusive, path::Path};
use yaml_rust::{Yaml, YamlLoader};

use crate::error::ConfigError;
use crate::paxos::{quorum::QuorumPolicy, ProposalNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProposalSpec {
    pub number: ProposalNumber,
    pub value: i64,
}

/// Settings for one demonstration run.
///
/// ```yaml
/// mode: fast          # classic | fast
/// acceptors: 7
/// concurrent: true
/// jitter_ms: [1, 5]   # random delay before each acceptor call
/// proposals:
///   - { number: 1, value: 10 }
///   - { number: 2, value: 20 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub mode: QuorumPolicy,
    pub acceptors: usize,
    pub proposals: Vec<ProposalSpec>,
    pub concurrent: bool,
    pub jitter_ms: Option<(u64, u64)>,
}

impl RunConfig {
    /// Defaults for `mode`: five acceptors for classic runs and seven for fast
    /// runs, with proposers 1/2/3 proposing 10/20/30.
    pub fn for_mode(mode: QuorumPolicy) -> Self {
        RunConfig {
            mode,
            acceptors: match mode {
                QuorumPolicy::Classic => 5,
                QuorumPolicy::Fast => 7,
            },
            proposals: vec![
                ProposalSpec { number: 1, value: 10 },
                ProposalSpec { number: 2, value: 20 },
                ProposalSpec { number: 3, value: 30 },
            ],
            concurrent: false,
            jitter_ms: None,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&s)
    }

    /// Parses a YAML document. Missing keys take the defaults of the chosen mode.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(s)?;
        let doc = docs.into_iter().next().ok_or(ConfigError::Empty)?;
        if doc.as_hash().is_none() {
            return Err(invalid("<root>", "a mapping"));
        }

        let mode = match field(&doc, "mode") {
            None => QuorumPolicy::Classic,
            Some(value) => value
                .as_str()
                .ok_or_else(|| invalid("mode", "a string"))?
                .parse::<QuorumPolicy>()?,
        };
        let mut config = RunConfig::for_mode(mode);

        if let Some(value) = field(&doc, "acceptors") {
            config.acceptors = usize::try_from(as_u64(value, "acceptors")?)
                .map_err(|_| invalid("acceptors", "a platform-sized integer"))?;
        }
        if let Some(value) = field(&doc, "concurrent") {
            config.concurrent = value
                .as_bool()
                .ok_or_else(|| invalid("concurrent", "a boolean"))?;
        }
        if let Some(value) = field(&doc, "jitter_ms") {
            config.jitter_ms = Some(parse_jitter(value)?);
        }
        if let Some(value) = field(&doc, "proposals") {
            config.proposals = parse_proposals(value)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.acceptors == 0 {
            return Err(ConfigError::NoAcceptors);
        }
        let mut seen = HashSet::new();
        for proposal in &self.proposals {
            if !seen.insert(proposal.number) {
                return Err(ConfigError::DuplicateProposal(proposal.number));
            }
        }
        if let Some((min, max)) = self.jitter_ms {
            if min > max {
                return Err(invalid("jitter_ms", "[min, max] with min <= max"));
            }
        }
        Ok(())
    }

    pub fn jitter_range(&self) -> Option<RangeInclusive<u64>> {
        self.jitter_ms.map(|(min, max)| min..=max)
    }

    pub fn proposal_pairs(&self) -> Vec<(ProposalNumber, i64)> {
        self.proposals.iter().map(|p| (p.number, p.value)).collect()
    }
}

fn invalid(field: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidField {
        field: field.to_string(),
        expected,
    }
}

// Absent keys and explicit nulls both mean "use the default".
fn field<'a>(doc: &'a Yaml, key: &str) -> Option<&'a Yaml> {
    match &doc[key] {
        Yaml::BadValue | Yaml::Null => None,
        value => Some(value),
    }
}

fn as_u64(value: &Yaml, field: &str) -> Result<u64, ConfigError> {
    value
        .as_i64()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| invalid(field, "a non-negative integer"))
}

fn parse_jitter(value: &Yaml) -> Result<(u64, u64), ConfigError> {
    match value.as_vec().map(Vec::as_slice) {
        Some([min, max]) => Ok((as_u64(min, "jitter_ms")?, as_u64(max, "jitter_ms")?)),
        _ => Err(invalid("jitter_ms", "a two-element list [min, max]")),
    }
}

fn parse_proposals(value: &Yaml) -> Result<Vec<ProposalSpec>, ConfigError> {
    let entries = value
        .as_vec()
        .ok_or_else(|| invalid("proposals", "a list"))?;
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let number_field = format!("proposals[{i}].number");
            let value_field = format!("proposals[{i}].value");
            let number = as_u64(&entry["number"], &number_field)?;
            let value = entry["value"]
                .as_i64()
                .ok_or_else(|| invalid(&value_field, "an integer"))?;
            Ok::<_, ConfigError>(ProposalSpec { number, value })
        })
        .collect()
}
